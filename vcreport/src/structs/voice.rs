use std::io::Read;

use anyhow::Result;
use log::trace;

use crate::structs::header::Position;
use crate::utils::byte_io::ByteIoReader;

/// Metadata of one participant track. The frames follow it in the stream.
#[derive(Debug, Clone, Default)]
pub struct VoiceEntry {
    pub phone: u32,
    pub position: Position,
    /// Distance to the reporter.
    pub distance: f64,
    pub frame_count: u16,
}

impl VoiceEntry {
    pub fn read<R: Read>(reader: &mut ByteIoReader<R>) -> Result<Self> {
        let phone = reader.get::<u32>("voice.phone")?;
        let position = Position::read(reader)?;
        let distance = reader.get_f64("voice.distance")?;
        let frame_count = reader.get::<u16>("voice.frame_count")?;

        trace!("Voice entry: phone {phone}, distance {distance}, {frame_count} frames");

        Ok(Self {
            phone,
            position,
            distance,
            frame_count,
        })
    }

    /// Distance truncated toward zero, as used in output file names.
    ///
    /// Non-finite distances saturate (`NaN` becomes 0).
    pub fn distance_truncated(&self) -> i64 {
        self.distance.trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_truncates_toward_zero() {
        let mut voice = VoiceEntry {
            distance: 12.7,
            ..Default::default()
        };
        assert_eq!(voice.distance_truncated(), 12);

        voice.distance = -3.9;
        assert_eq!(voice.distance_truncated(), -3);

        voice.distance = f64::NAN;
        assert_eq!(voice.distance_truncated(), 0);
    }
}
