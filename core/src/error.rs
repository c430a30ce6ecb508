use std::path::PathBuf;
use thiserror::Error;

use crate::format::ImageFormat;

/// Invalid converter setup, detected before any file is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("source and target not set")]
    NeitherSet,

    #[error("source not set")]
    SourceNotSet,

    #[error("target not set")]
    TargetNotSet,

    #[error("source format is the same as target format ({0})")]
    SameFormat(ImageFormat),

    #[error("input path not set")]
    MissingInput,

    #[error("output directory not set")]
    MissingOutput,

    #[error("invalid {format} options: {message}")]
    InvalidOptions {
        format: ImageFormat,
        message: String,
    },
}

/// Failure inside a single codec call.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read {format} data")]
    Io {
        format: ImageFormat,
        source: std::io::Error,
    },

    #[error("failed to decode {format} image")]
    Decode {
        format: ImageFormat,
        source: image::ImageError,
    },

    #[error("failed to encode {format} image: {message}")]
    Encode {
        format: ImageFormat,
        message: String,
    },

    #[error("invalid {format} options: {message}")]
    InvalidOptions {
        format: ImageFormat,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no paths provided")]
    NoInput,

    #[error("failed to collect files from {path}")]
    Collect {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create {path}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} would be written by more than one input")]
    DuplicateOutput { path: PathBuf },

    #[error("failed to convert {path}")]
    Decode { path: PathBuf, source: CodecError },

    #[error("failed to write {path}")]
    Encode { path: PathBuf, source: CodecError },
}

impl ConvertError {
    /// The file the error is about, when it concerns a single entry.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConvertError::Collect { path, .. }
            | ConvertError::Open { path, .. }
            | ConvertError::Create { path, .. }
            | ConvertError::DuplicateOutput { path }
            | ConvertError::Decode { path, .. }
            | ConvertError::Encode { path, .. } => Some(path),
            ConvertError::Config(_) | ConvertError::NoInput => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn chain(err: &dyn std::error::Error) -> Vec<String> {
        let mut messages = vec![err.to_string()];
        let mut cur = err.source();
        while let Some(e) = cur {
            messages.push(e.to_string());
            cur = e.source();
        }
        messages
    }

    #[test]
    fn test_open_message_leaves_cause_to_source() {
        let err = ConvertError::Open {
            path: PathBuf::from("x.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "boom"),
        };
        assert_eq!(chain(&err), vec!["failed to open x.png", "boom"]);
    }

    #[test]
    fn test_decode_cause_reported_once() {
        let image_err = image::load_from_memory_with_format(b"nope", image::ImageFormat::Png).unwrap_err();
        let err = ConvertError::Decode {
            path: PathBuf::from("bad.png"),
            source: CodecError::Decode {
                format: ImageFormat::Png,
                source: image_err,
            },
        };
        let messages = chain(&err);
        assert_eq!(messages[0], "failed to convert bad.png");
        assert_eq!(messages[1], "failed to decode PNG image");
        let joined = messages.join(": ");
        assert_eq!(joined.matches("failed to decode").count(), 1);
    }
}
