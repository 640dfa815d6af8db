use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use vcreport::structs::frame::{BYTES_PER_FRAME, PcmBlock, SAMPLE_RATE};
use vcunpack_macros::{ToBytes, riff_chunk};

use crate::byteorder::WriteBytesLe;
use crate::errors::FileIoError;

pub const WAV_HEADER_SIZE: u64 = 44;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const PCM_FORMAT: u16 = 1;

pub trait RiffChunk {
    fn chunk_id(&self) -> &[u8; 4];
    fn chunk_data(&self) -> Vec<u8>;

    fn write_all<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let chunk_data = self.chunk_data();
        writer.write_all(self.chunk_id())?;
        writer.write_all(&(chunk_data.len() as u32).to_le_bytes())?;
        writer.write_all(&chunk_data)?;

        Ok(())
    }
}

#[derive(Debug, ToBytes)]
struct RiffHeader {
    riff: [u8; 4],
    chunk_size: u32,
    wave: [u8; 4],
}

#[derive(Debug, ToBytes)]
#[riff_chunk(b"fmt ")]
pub struct FormatChunk {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FormatChunk {
    pub fn pcm(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        let block_align = channels * (bits_per_sample / 8);
        Self {
            audio_format: PCM_FORMAT,
            channels,
            sample_rate,
            byte_rate: sample_rate * block_align as u32,
            block_align,
            bits_per_sample,
        }
    }
}

/// Size of the `data` chunk for a voice with `frame_count` frames.
pub fn data_size_for_frames(frame_count: u16) -> u32 {
    frame_count as u32 * BYTES_PER_FRAME as u32
}

/// Mono 16-bit 48 kHz PCM WAV writer.
///
/// The header, including both size fields, is written up front from the
/// frame count and never revised. Callers must write exactly `frame_count`
/// blocks for the file to match its header.
pub struct WAVWriter<W: Write> {
    writer: BufWriter<W>,
    declared_data_size: u32,
    data_written: u64,
    frame_buffer: Vec<u8>,
}

impl WAVWriter<File> {
    /// Creates `path` (truncating any existing file) and writes the header.
    pub fn create(path: &Path, frame_count: u16) -> Result<Self> {
        let file = File::create(path).map_err(|source| FileIoError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file, frame_count)?)
    }
}

impl<W: Write> WAVWriter<W> {
    /// Wraps `writer` and writes the complete header for `frame_count` frames.
    pub fn new(writer: W, frame_count: u16) -> io::Result<Self> {
        let declared_data_size = data_size_for_frames(frame_count);
        let mut wav = Self {
            writer: BufWriter::new(writer),
            declared_data_size,
            data_written: 0,
            frame_buffer: Vec::with_capacity(BYTES_PER_FRAME),
        };
        wav.write_header()?;
        Ok(wav)
    }

    fn write_header(&mut self) -> io::Result<()> {
        let mut header = Vec::with_capacity(WAV_HEADER_SIZE as usize);

        RiffHeader {
            riff: *b"RIFF",
            chunk_size: 36 + self.declared_data_size,
            wave: *b"WAVE",
        }
        .write_le(&mut header);

        FormatChunk::pcm(SAMPLE_RATE, CHANNELS, BITS_PER_SAMPLE).write_all(&mut header)?;

        header.extend_from_slice(b"data");
        self.declared_data_size.write_le(&mut header);

        self.writer.write_all(&header)
    }

    /// Appends one block of 960 little-endian samples.
    pub fn write_block(&mut self, block: &PcmBlock) -> io::Result<()> {
        self.frame_buffer.clear();
        block.samples().write_le(&mut self.frame_buffer);
        self.writer.write_all(&self.frame_buffer)?;
        self.data_written += self.frame_buffer.len() as u64;
        Ok(())
    }

    /// Flushes buffered output.
    pub fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    pub fn stats(&self) -> WAVStats {
        WAVStats {
            declared_data_size: self.declared_data_size,
            data_written: self.data_written,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WAVStats {
    pub declared_data_size: u32,
    pub data_written: u64,
}

impl WAVStats {
    /// True when the data written matches the size declared in the header.
    pub fn is_complete(&self) -> bool {
        self.data_written == self.declared_data_size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vcreport::structs::frame::SAMPLES_PER_FRAME;

    fn le_u32(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    fn le_u16(buf: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([buf[at], buf[at + 1]])
    }

    #[test]
    fn header_declares_sizes_from_frame_count() -> io::Result<()> {
        let writer = WAVWriter::new(Cursor::new(Vec::new()), 2)?;
        let buffer = writer.into_inner()?.into_inner();

        assert_eq!(buffer.len() as u64, WAV_HEADER_SIZE);
        assert_eq!(&buffer[0..4], b"RIFF");
        assert_eq!(le_u32(&buffer, 4), 36 + 3840);
        assert_eq!(&buffer[8..12], b"WAVE");
        assert_eq!(&buffer[12..16], b"fmt ");
        assert_eq!(le_u32(&buffer, 16), 16);
        assert_eq!(le_u16(&buffer, 20), 1); // PCM
        assert_eq!(le_u16(&buffer, 22), 1); // mono
        assert_eq!(le_u32(&buffer, 24), 48_000);
        assert_eq!(le_u32(&buffer, 28), 96_000);
        assert_eq!(le_u16(&buffer, 32), 2);
        assert_eq!(le_u16(&buffer, 34), 16);
        assert_eq!(&buffer[36..40], b"data");
        assert_eq!(le_u32(&buffer, 40), 3840);

        Ok(())
    }

    #[test]
    fn zero_frames_yield_header_only() -> io::Result<()> {
        let mut writer = WAVWriter::new(Cursor::new(Vec::new()), 0)?;
        writer.finish()?;
        assert!(writer.stats().is_complete());

        let buffer = writer.into_inner()?.into_inner();
        assert_eq!(le_u32(&buffer, 4), 36);
        assert_eq!(le_u32(&buffer, 40), 0);
        Ok(())
    }

    #[test]
    fn blocks_are_written_little_endian() -> io::Result<()> {
        let mut writer = WAVWriter::new(Cursor::new(Vec::new()), 1)?;

        let mut samples = [0i16; SAMPLES_PER_FRAME];
        samples[0] = 0x0102;
        samples[1] = -2;
        samples[SAMPLES_PER_FRAME - 1] = i16::MAX;
        writer.write_block(&PcmBlock::from_samples(samples))?;
        writer.finish()?;

        let stats = writer.stats();
        assert_eq!(stats.data_written, 1920);
        assert!(stats.is_complete());

        let buffer = writer.into_inner()?.into_inner();
        let data = &buffer[WAV_HEADER_SIZE as usize..];
        assert_eq!(data.len(), 1920);
        assert_eq!(&data[0..4], &[0x02, 0x01, 0xFE, 0xFF]);
        assert_eq!(&data[1918..], &[0xFF, 0x7F]);
        Ok(())
    }

    #[test]
    fn largest_voice_fits_riff_sizes() {
        assert_eq!(data_size_for_frames(u16::MAX), 65_535 * 1920);
        assert!((36 + data_size_for_frames(u16::MAX) as u64) < u32::MAX as u64);
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("1_2.wav");

        let err = WAVWriter::create(&path, 1).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<FileIoError>(),
            Some(FileIoError::Create { .. })
        ));
    }
}
