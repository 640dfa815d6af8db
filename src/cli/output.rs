use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use vcreport::structs::voice::VoiceEntry;

use crate::errors::FileIoError;

/// Directory receiving one report's WAV files: `<parent>/<input stem>`.
pub fn report_dir(input: &Path, parent: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "report".into());

    match parent {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    }
}

/// `<phone>_<distance truncated toward zero>.wav`
pub fn voice_file_name(voice: &VoiceEntry) -> String {
    format!("{}_{}.wav", voice.phone, voice.distance_truncated())
}

/// Creates `dir` if absent. An existing directory is reused as is.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            log::debug!("Reusing output directory {}", dir.display());
            Ok(())
        }
        Ok(_) => Err(FileIoError::NotADirectory {
            path: dir.to_path_buf(),
        }
        .into()),
        Err(_) => {
            fs::create_dir_all(dir).map_err(|source| FileIoError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("Created output directory {}", dir.display());
            Ok(())
        }
    }
}
