//! libopus-backed codec sessions.

use audiopus::coder::Decoder as OpusDecoder;
use audiopus::packet::Packet;
use audiopus::{Channels, MutSignals, SampleRate};

use crate::process::decode::{Codec, CodecSession};
use crate::utils::errors::CodecError;

/// Mono 48 kHz Opus decoding through libopus.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpusCodec;

impl Codec for OpusCodec {
    type Session = OpusSession;

    fn open_session(&self) -> Result<OpusSession, CodecError> {
        let inner = OpusDecoder::new(SampleRate::Hz48000, Channels::Mono)
            .map_err(|e| CodecError::SessionCreate(e.to_string()))?;
        Ok(OpusSession { inner })
    }
}

/// One libopus decoder state. Released when dropped.
pub struct OpusSession {
    inner: OpusDecoder,
}

impl CodecSession for OpusSession {
    fn decode(&mut self, packet: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError> {
        let decode_err = |e: audiopus::Error| CodecError::Decode {
            length: packet.len(),
            reason: e.to_string(),
        };

        let packet = Packet::try_from(packet).map_err(decode_err)?;
        let signals = MutSignals::try_from(pcm).map_err(decode_err)?;
        self.inner
            .decode(Some(packet), signals, false)
            .map_err(decode_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::frame::SAMPLES_PER_FRAME;

    #[test]
    fn decodes_silent_celt_packet() {
        let mut session = OpusCodec.open_session().unwrap();
        let mut pcm = [0i16; SAMPLES_PER_FRAME];

        // TOC 0xF8: CELT fullband 20 ms, mono, one frame.
        let samples = session.decode(&[0xF8, 0xFF, 0xFE], &mut pcm).unwrap();
        assert_eq!(samples, SAMPLES_PER_FRAME);
    }

    #[test]
    fn sessions_are_independent() {
        let codec = OpusCodec;
        let mut first = codec.open_session().unwrap();
        let mut second = codec.open_session().unwrap();
        let mut pcm = [0i16; SAMPLES_PER_FRAME];

        assert_eq!(first.decode(&[0xF8, 0xFF, 0xFE], &mut pcm).unwrap(), 960);
        assert_eq!(second.decode(&[0xF8, 0xFF, 0xFE], &mut pcm).unwrap(), 960);
    }
}
