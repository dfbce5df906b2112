use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device")]
    NoOutputDevice,
}

impl LoadError {
    /// Numeric code in the style of media element errors
    /// (2 = network/open, 3 = decode, 4 = not supported).
    pub fn code(&self) -> u8 {
        match self {
            LoadError::Open { .. } => 2,
            LoadError::Decode { .. } => 3,
            LoadError::NoOutputDevice => 4,
        }
    }
}
