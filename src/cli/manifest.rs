use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use vcreport::structs::header::{Position, ReportHeader};
use vcreport::structs::voice::VoiceEntry;

use crate::errors::FileIoError;

pub const MANIFEST_FILE_NAME: &str = "report.yaml";

/// Summary of an unpacked report, written as `report.yaml`.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub reporter: Reporter,
    #[serde(default)]
    pub voices: Vec<Voice>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub phone: u32,
    pub position: [f32; 3],
    pub reason: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub phone: u32,
    pub position: [f32; 3],
    pub distance: f64,
    pub frames: u16,
    pub silent_frames: u64,
    pub file: String,
}

fn coords(position: &Position) -> [f32; 3] {
    [position.x, position.y, position.z]
}

impl Manifest {
    pub fn with_header(header: &ReportHeader) -> Self {
        Self {
            reporter: Reporter {
                phone: header.reporter_phone,
                position: coords(&header.reporter_position),
                reason: header.reason_lossy().into_owned(),
            },
            voices: Vec::with_capacity(header.voice_count as usize),
        }
    }

    pub fn push_voice(&mut self, voice: &VoiceEntry, silent_frames: u64, file: String) {
        self.voices.push(Voice {
            phone: voice.phone,
            position: coords(&voice.position),
            distance: voice.distance,
            frames: voice.frame_count,
            silent_frames,
            file,
        });
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, self.to_yaml()?).map_err(|source| FileIoError::Create {
            path: path.clone(),
            source,
        })?;
        log::info!("Wrote manifest {}", path.display());
        Ok(())
    }
}
