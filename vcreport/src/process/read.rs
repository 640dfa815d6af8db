use std::io::Read;

use anyhow::{Result, bail};
use log::{trace, warn};

use crate::structs::frame::{AudioFrame, MAX_FRAME_PAYLOAD};
use crate::structs::header::ReportHeader;
use crate::structs::voice::VoiceEntry;
use crate::utils::byte_io::ByteIoReader;
use crate::utils::errors::ContainerError;

/// Forward-only reader of sVCr containers.
///
/// Records must be requested in stream order: one [`ReportHeader`], then for
/// each voice a [`VoiceEntry`] followed by `frame_count` frames. The reader
/// never seeks and does not validate that order itself.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use vcreport::process::EXAMPLE_DATA;
/// use vcreport::process::read::ContainerReader;
///
/// let mut reader = ContainerReader::new(Cursor::new(EXAMPLE_DATA));
/// let header = reader.read_header()?;
///
/// for _ in 0..header.voice_count {
///     let voice = reader.read_voice_entry()?;
///     for _ in 0..voice.frame_count {
///         let frame = reader.read_frame()?;
///         println!("frame with {} bytes", frame.len());
///     }
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct ContainerReader<R: Read> {
    reader: ByteIoReader<R>,
    payload: [u8; MAX_FRAME_PAYLOAD],
    frames_read: u64,
}

impl<R: Read> ContainerReader<R> {
    pub fn new(read: R) -> Self {
        Self {
            reader: ByteIoReader::new(read),
            payload: [0; MAX_FRAME_PAYLOAD],
            frames_read: 0,
        }
    }

    /// Reads and validates the report header at the start of the stream.
    pub fn read_header(&mut self) -> Result<ReportHeader> {
        ReportHeader::read(&mut self.reader)
    }

    /// Reads the metadata of the next voice. Its frames are not consumed.
    pub fn read_voice_entry(&mut self) -> Result<VoiceEntry> {
        VoiceEntry::read(&mut self.reader)
    }

    /// Reads the next length-prefixed frame.
    ///
    /// The returned frame borrows the reader's payload buffer and is only
    /// valid until the next read.
    pub fn read_frame(&mut self) -> Result<AudioFrame<'_>> {
        let length = self.reader.get::<u8>("frame.length")? as usize;

        let Some(payload) = self.payload.get_mut(..length) else {
            bail!(ContainerError::MalformedFrame {
                length,
                capacity: MAX_FRAME_PAYLOAD,
            });
        };
        self.reader.get_bytes(payload, "frame.payload")?;
        self.frames_read += 1;

        trace!("Frame {}: {length} bytes", self.frames_read);

        Ok(AudioFrame::new(&self.payload[..length]))
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Checks for bytes after the last record and logs a warning if any.
    ///
    /// Trailing data is tolerated. Call only after every voice was read.
    pub fn finish(mut self) -> Result<u64> {
        let position = self.reader.position();
        if self.reader.has_trailing()? {
            warn!("Ignoring trailing data after last voice at offset {position}");
        }
        Ok(position)
    }
}
