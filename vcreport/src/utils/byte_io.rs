//! Little-endian byte input for container parsing.
//!
//! Wraps a [`bitstream_io::ByteReader`] and turns short reads into
//! [`ContainerError::TruncatedInput`] tagged with the field being read.

use std::io;

use anyhow::Result;
use bitstream_io::{ByteRead, ByteReader, LittleEndian, Primitive};

use crate::utils::errors::ContainerError;

#[derive(Debug)]
pub struct ByteIoReader<R: io::Read> {
    bs: ByteReader<R, LittleEndian>,
    position: u64,
}

impl<R: io::Read> ByteIoReader<R> {
    pub fn new(read: R) -> Self {
        Self {
            bs: ByteReader::endian(read, LittleEndian),
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    #[inline(always)]
    pub fn get<V: Primitive>(&mut self, field: &'static str) -> Result<V> {
        let needed = size_of::<V>();
        match self.bs.read::<V>() {
            Ok(value) => {
                self.position += needed as u64;
                Ok(value)
            }
            Err(e) => Err(self.map_err(e, field, needed)),
        }
    }

    #[inline(always)]
    pub fn get_f32(&mut self, field: &'static str) -> Result<f32> {
        self.get::<u32>(field).map(f32::from_bits)
    }

    #[inline(always)]
    pub fn get_f64(&mut self, field: &'static str) -> Result<f64> {
        self.get::<u64>(field).map(f64::from_bits)
    }

    /// Fills `buf` completely or fails; a partial fill is never returned.
    pub fn get_bytes(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        match self.bs.read_bytes(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) => Err(self.map_err(e, field, buf.len())),
        }
    }

    /// Returns `true` if at least one more byte is available.
    ///
    /// Consumes the probed byte; only meant for end-of-stream checks.
    pub fn has_trailing(&mut self) -> Result<bool> {
        let mut probe = [0u8; 1];
        match self.bs.read_bytes(&mut probe) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn map_err(&self, e: io::Error, field: &'static str, needed: usize) -> anyhow::Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ContainerError::TruncatedInput {
                field,
                offset: self.position,
                needed,
            }
            .into()
        } else {
            anyhow::Error::new(e).context(format!("reading {field} at offset {}", self.position))
        }
    }
}
