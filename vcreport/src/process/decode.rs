use log::debug;

use crate::structs::frame::{AudioFrame, PcmBlock, SAMPLES_PER_FRAME};
use crate::utils::errors::CodecError;

/// Factory for per-voice codec sessions.
pub trait Codec {
    type Session: CodecSession;

    /// Creates a fresh decoder state for one voice.
    fn open_session(&self) -> Result<Self::Session, CodecError>;
}

/// Stateful packet decoder bound to a single voice.
///
/// Sessions keep inter-frame state (e.g. for loss concealment) and must see
/// the voice's packets in order.
pub trait CodecSession {
    /// Decodes `packet` into `pcm`, returning the number of samples produced.
    fn decode(&mut self, packet: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError>;
}

/// Per-voice decoding statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub decoded_frames: u64,
    pub silent_frames: u64,
}

impl FrameStats {
    pub fn total_frames(&self) -> u64 {
        self.decoded_frames + self.silent_frames
    }
}

/// Turns [`AudioFrame`]s of one voice into [`PcmBlock`]s.
///
/// Owns the voice's codec session; dropping the decoder releases it.
#[derive(Debug)]
pub struct FrameDecoder<S: CodecSession> {
    session: S,
    stats: FrameStats,
}

impl<S: CodecSession> FrameDecoder<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            stats: FrameStats::default(),
        }
    }

    /// Opens a new session from `codec` for the next voice.
    pub fn open<C: Codec<Session = S>>(codec: &C) -> Result<Self, CodecError> {
        codec.open_session().map(Self::new)
    }

    /// Decodes one frame into `block`, overwriting all of its samples.
    ///
    /// Silence markers produce a zero block without touching the codec. A
    /// packet that does not decode to exactly [`SAMPLES_PER_FRAME`] samples
    /// is an error.
    pub fn decode(&mut self, frame: &AudioFrame, block: &mut PcmBlock) -> Result<(), CodecError> {
        if frame.is_silence() {
            block.fill_silence();
            self.stats.silent_frames += 1;
            return Ok(());
        }

        let samples = self.session.decode(frame.as_ref(), block.samples_mut())?;
        if samples != SAMPLES_PER_FRAME {
            return Err(CodecError::SampleCount {
                expected: SAMPLES_PER_FRAME,
                actual: samples,
            });
        }

        self.stats.decoded_frames += 1;
        Ok(())
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Releases the codec session and returns the final statistics.
    pub fn finish(self) -> FrameStats {
        debug!(
            "Codec session closed: {} decoded, {} silent",
            self.stats.decoded_frames, self.stats.silent_frames
        );
        self.stats
    }
}
