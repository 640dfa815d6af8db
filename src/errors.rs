use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use vcreport::utils::errors::{CodecError, ContainerError};

#[derive(thiserror::Error, Debug)]
pub enum FileIoError {
    #[error("Failed to open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output path {} exists and is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

/// Process exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Usage = 1,
    FileIo = 2,
    InvalidHeader = 3,
    Codec = 4,
    Truncated = 5,
}

impl ExitStatus {
    /// Classifies a failed run by the first typed error in its chain.
    ///
    /// Untyped I/O errors count as file failures.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<ContainerError>() {
                return match e {
                    ContainerError::InvalidHeader(_) => Self::InvalidHeader,
                    ContainerError::TruncatedInput { .. } | ContainerError::MalformedFrame { .. } => {
                        Self::Truncated
                    }
                };
            }
            if cause.is::<CodecError>() {
                return Self::Codec;
            }
            if cause.is::<FileIoError>() || cause.is::<io::Error>() {
                return Self::FileIo;
            }
        }
        Self::FileIo
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn maps_typed_errors_to_statuses() {
        let err = anyhow::Error::from(ContainerError::InvalidHeader(*b"RIFF"));
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::InvalidHeader);

        let err = anyhow::Error::from(ContainerError::TruncatedInput {
            field: "voice.phone",
            offset: 22,
            needed: 4,
        });
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Truncated);

        let err = anyhow::Error::from(CodecError::SampleCount {
            expected: 960,
            actual: 120,
        });
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Codec);

        let err = anyhow::Error::from(FileIoError::NotADirectory {
            path: PathBuf::from("report"),
        });
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::FileIo);
    }

    #[test]
    fn context_does_not_hide_the_cause() {
        let err = Err::<(), _>(CodecError::SessionCreate("out of memory".into()))
            .context("voice 3 of 5")
            .unwrap_err();
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::Codec);
    }
}
