//! Reader and frame decoder for sVCr voice call report containers.
//!
//! A container holds one report header followed by per-voice tracks of
//! Opus packets. Every packet (or silence marker) becomes one block of
//! 960 mono 16-bit samples at 48 kHz.
//!
//! ## Container Layout
//!
//! All multi-byte fields are little-endian, with no padding.
//!
//! - **Header**: `sVCr` magic, reporter phone (`u32`), position (3 × `f32`),
//!   reason (`u8` length + bytes), voice count (`u8`)
//! - **Voice**: phone (`u32`), position (3 × `f32`), distance (`f64`),
//!   frame count (`u16`)
//! - **Frame**: length (`u8`) + Opus payload; length 0 marks silence
//!
//! ## Quick Start
//!
//! Decoding Opus packets needs the `opus` feature, which is on by default.
//!
//! ```rust,no_run
//! # #[cfg(feature = "opus")]
//! # fn main() -> anyhow::Result<()> {
//! use std::fs::File;
//! use std::io::BufReader;
//! use vcreport::process::decode::FrameDecoder;
//! use vcreport::process::opus::OpusCodec;
//! use vcreport::process::read::ContainerReader;
//! use vcreport::structs::frame::PcmBlock;
//!
//! let mut reader = ContainerReader::new(BufReader::new(File::open("call.vcreport")?));
//! let header = reader.read_header()?;
//! let mut block = PcmBlock::silence();
//!
//! for _ in 0..header.voice_count {
//!     let voice = reader.read_voice_entry()?;
//!     let mut decoder = FrameDecoder::open(&OpusCodec)?;
//!
//!     for _ in 0..voice.frame_count {
//!         let frame = reader.read_frame()?;
//!         decoder.decode(&frame, &mut block)?;
//!         // consume block.samples()
//!     }
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "opus"))]
//! # fn main() {}
//! ```

/// Reading and decoding.
///
/// 1. **Reading** ([`process::read`]): header, voice entries and frames in
///    stream order.
/// 2. **Decoding** ([`process::decode`]): frames to PCM blocks through a
///    per-voice codec session.
pub mod process;

/// Container records: [`structs::header`], [`structs::voice`] and
/// [`structs::frame`].
pub mod structs;

/// Byte input and error types.
pub mod utils;
