//! Audio frame and PCM block structures
//!
//! An [`AudioFrame`] is one length-prefixed Opus packet as stored in the
//! container. Every frame, decoded or silent, produces exactly one
//! [`PcmBlock`] of [`SAMPLES_PER_FRAME`] samples.

/// Output sampling rate of every voice track.
pub const SAMPLE_RATE: u32 = 48_000;

/// Samples per frame: 20 ms of mono audio at 48 kHz.
pub const SAMPLES_PER_FRAME: usize = 960;

/// Bytes of 16-bit PCM produced per frame.
pub const BYTES_PER_FRAME: usize = SAMPLES_PER_FRAME * 2;

/// Largest payload a frame can declare with its 8-bit length prefix.
pub const MAX_FRAME_PAYLOAD: usize = u8::MAX as usize;

/// One encoded packet, borrowed from the reader's scratch buffer.
#[derive(Debug, Clone, Copy)]
pub struct AudioFrame<'a> {
    payload: &'a [u8],
}

impl<'a> AudioFrame<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// A zero-length frame marks a gap with no transmitted audio.
    pub fn is_silence(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl AsRef<[u8]> for AudioFrame<'_> {
    fn as_ref(&self) -> &[u8] {
        self.payload
    }
}

/// Fixed-size block of mono 16-bit samples for one frame interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBlock {
    samples: [i16; SAMPLES_PER_FRAME],
}

impl Default for PcmBlock {
    fn default() -> Self {
        Self::silence()
    }
}

impl PcmBlock {
    pub fn silence() -> Self {
        Self {
            samples: [0; SAMPLES_PER_FRAME],
        }
    }

    pub fn from_samples(samples: [i16; SAMPLES_PER_FRAME]) -> Self {
        Self { samples }
    }

    pub fn fill_silence(&mut self) {
        self.samples.fill(0);
    }

    pub fn samples(&self) -> &[i16; SAMPLES_PER_FRAME] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [i16; SAMPLES_PER_FRAME] {
        &mut self.samples
    }

    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }
}
