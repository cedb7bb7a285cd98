//! Error types for the reflow library.
//!
//! Geometry problems in individual fragments are never errors: they are
//! clamped by the normalizer. Only failures that make the whole document
//! unusable surface here.

/// Result type alias for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during reconstruction and emission.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page-decoding collaborator could not produce fragments for a page
    /// (corrupted or password-protected source). Aborts the whole document.
    #[error("Failed to decode page {page}: {reason}")]
    DecodeFailure {
        /// Zero-based page index
        page: usize,
        /// Reason reported by the decoder
        reason: String,
    },

    /// No emitter exists for the requested output format.
    #[error("Unsupported output target: {0}")]
    UnsupportedTarget(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP packaging error
    #[cfg(feature = "office")]
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// Build a decode failure for the given page.
    pub fn decode(page: usize, reason: impl Into<String>) -> Self {
        Error::DecodeFailure {
            page,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_error() {
        let err = Error::decode(3, "password protected");
        let msg = format!("{}", err);
        assert!(msg.contains("page 3"));
        assert!(msg.contains("password protected"));
    }

    #[test]
    fn test_unsupported_target_error() {
        let err = Error::UnsupportedTarget("odt".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Unsupported output target"));
        assert!(msg.contains("odt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing.json"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
