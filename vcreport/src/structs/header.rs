//! Report header and position structures
//!
//! The report header opens every container: magic tag, reporter identity,
//! free-text reason and the number of voice tracks that follow.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::io::Read;

use anyhow::{Result, bail};
use log::trace;

use crate::utils::byte_io::ByteIoReader;
use crate::utils::errors::ContainerError;

/// Magic tag at offset 0 of every container.
pub const REPORT_MAGIC: [u8; 4] = *b"sVCr";

/// A point in world space, stored as three little-endian `f32`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn read<R: Read>(reader: &mut ByteIoReader<R>) -> Result<Self> {
        let x = reader.get_f32("position.x")?;
        let y = reader.get_f32("position.y")?;
        let z = reader.get_f32("position.z")?;

        Ok(Self { x, y, z })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportHeader {
    pub reporter_phone: u32,
    pub reporter_position: Position,
    /// Raw reason bytes; not null-terminated and not guaranteed to be UTF-8.
    pub reason: Vec<u8>,
    pub voice_count: u8,
}

impl ReportHeader {
    pub fn read<R: Read>(reader: &mut ByteIoReader<R>) -> Result<Self> {
        // A missing or partial tag is an invalid header, not a truncated one.
        let mut magic = [0u8; 4];
        let mut filled = 0;
        while filled < magic.len() {
            match reader.get::<u8>("magic") {
                Ok(byte) => {
                    magic[filled] = byte;
                    filled += 1;
                }
                Err(e) if e.is::<ContainerError>() => bail!(ContainerError::InvalidHeader(magic)),
                Err(e) => return Err(e),
            }
        }
        if magic != REPORT_MAGIC {
            bail!(ContainerError::InvalidHeader(magic));
        }

        let reporter_phone = reader.get::<u32>("reporter_phone")?;
        let reporter_position = Position::read(reader)?;

        let reason_length = reader.get::<u8>("reason_length")?;
        let mut reason = vec![0u8; reason_length as usize];
        reader.get_bytes(&mut reason, "reason")?;

        let voice_count = reader.get::<u8>("voice_count")?;

        trace!("Report header: phone {reporter_phone}, reason {reason_length} bytes, {voice_count} voices");

        Ok(Self {
            reporter_phone,
            reporter_position,
            reason,
            voice_count,
        })
    }

    /// Reason text with invalid UTF-8 sequences replaced.
    pub fn reason_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.reason)
    }
}
