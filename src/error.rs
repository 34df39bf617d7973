//! Failure classes at the boundary with the document backends.
//!
//! The `Display` form of each variant is what ends up in the `error` field of
//! a failure envelope, so messages from underlying libraries are kept intact.

use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input path does not exist. Only the mock variant checks this up front.
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Decode(#[from] FromUtf8Error),

    /// A backend failed to parse or export the document.
    #[error("{context}: {message}")]
    Conversion { context: String, message: String },

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl ConvertError {
    pub fn conversion(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Conversion {
            context: context.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_path() {
        let err = ConvertError::NotFound("docs/missing.md".into());
        assert_eq!(err.to_string(), "File not found: docs/missing.md");
    }

    #[test]
    fn io_message_is_passed_through() {
        let err: ConvertError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn conversion_keeps_context_and_cause() {
        let err = ConvertError::conversion("Failed to open EPUB: a.epub", "bad zip");
        assert_eq!(err.to_string(), "Failed to open EPUB: a.epub: bad zip");
    }

    #[test]
    fn decode_failure_reports_utf8_error() {
        let err: ConvertError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, ConvertError::Decode(_)));
        assert!(err.to_string().contains("utf-8"));
    }
}
