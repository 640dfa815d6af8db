//! Container builders and a scripted codec for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::process::decode::{Codec, CodecSession};
use crate::structs::frame::SAMPLES_PER_FRAME;
use crate::structs::header::REPORT_MAGIC;
use crate::utils::errors::CodecError;

/// A deterministic sawtooth standing in for decoded audio.
pub fn tone() -> [i16; SAMPLES_PER_FRAME] {
    std::array::from_fn(|i| ((i % 96) as i16 - 48) * 256)
}

#[derive(Debug, Clone, Copy)]
pub enum ScriptedStep {
    Tone,
    Fail,
    Samples(usize),
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<ScriptedStep>,
    packets: Vec<Vec<u8>>,
    sessions: usize,
}

/// Codec whose sessions replay a shared script; unscripted packets decode to [`tone`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedCodec {
    script: Rc<RefCell<Script>>,
    fail_open: bool,
}

impl ScriptedCodec {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                steps: steps.into(),
                ..Default::default()
            })),
            fail_open: false,
        }
    }

    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.script.borrow().packets.len()
    }

    pub fn packets(&self) -> Vec<Vec<u8>> {
        self.script.borrow().packets.clone()
    }

    pub fn sessions(&self) -> usize {
        self.script.borrow().sessions
    }
}

#[derive(Debug)]
pub struct ScriptedSession {
    script: Rc<RefCell<Script>>,
}

impl Codec for ScriptedCodec {
    type Session = ScriptedSession;

    fn open_session(&self) -> Result<ScriptedSession, CodecError> {
        if self.fail_open {
            return Err(CodecError::SessionCreate("scripted failure".into()));
        }
        self.script.borrow_mut().sessions += 1;
        Ok(ScriptedSession {
            script: Rc::clone(&self.script),
        })
    }
}

impl CodecSession for ScriptedSession {
    fn decode(&mut self, packet: &[u8], pcm: &mut [i16]) -> Result<usize, CodecError> {
        let mut script = self.script.borrow_mut();
        script.packets.push(packet.to_vec());

        match script.steps.pop_front().unwrap_or(ScriptedStep::Tone) {
            ScriptedStep::Tone => {
                pcm[..SAMPLES_PER_FRAME].copy_from_slice(&tone());
                Ok(SAMPLES_PER_FRAME)
            }
            ScriptedStep::Fail => Err(CodecError::Decode {
                length: packet.len(),
                reason: "corrupted stream".into(),
            }),
            ScriptedStep::Samples(n) => Ok(n),
        }
    }
}

/// Assembles container bytes field by field.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    reporter_phone: u32,
    reason: Vec<u8>,
    voice_count: Option<u8>,
    voices: Vec<Vec<u8>>,
}

impl ContainerBuilder {
    pub fn new(reporter_phone: u32) -> Self {
        Self {
            reporter_phone,
            reason: Vec::new(),
            voice_count: None,
            voices: Vec::new(),
        }
    }

    pub fn reason(mut self, reason: &[u8]) -> Self {
        self.reason = reason.to_vec();
        self
    }

    /// Overrides the declared voice count.
    pub fn voice_count(mut self, count: u8) -> Self {
        self.voice_count = Some(count);
        self
    }

    pub fn voice(mut self, phone: u32, distance: f64, frames: &[&[u8]]) -> Self {
        let mut voice = Vec::new();
        voice.extend_from_slice(&phone.to_le_bytes());
        for coord in [0.0f32, 0.0, 0.0] {
            voice.extend_from_slice(&coord.to_le_bytes());
        }
        voice.extend_from_slice(&distance.to_le_bytes());
        voice.extend_from_slice(&(frames.len() as u16).to_le_bytes());
        for frame in frames {
            voice.push(frame.len() as u8);
            voice.extend_from_slice(frame);
        }
        self.voices.push(voice);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = REPORT_MAGIC.to_vec();
        data.extend_from_slice(&self.reporter_phone.to_le_bytes());
        for coord in [0.0f32, 0.0, 0.0] {
            data.extend_from_slice(&coord.to_le_bytes());
        }
        data.push(self.reason.len() as u8);
        data.extend_from_slice(&self.reason);
        data.push(
            self.voice_count
                .unwrap_or(self.voices.len() as u8),
        );
        for voice in &self.voices {
            data.extend_from_slice(voice);
        }
        data
    }
}
