//! Error types for pollcenter-core

use thiserror::Error;

/// Result type alias for pollcenter operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Main error type for pollcenter operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Input line does not carry the expected fields
    #[error("Malformed record {line:?}: {reason}")]
    MalformedRecord { line: String, reason: String },

    /// Ward key has no `<letters>/AC<digits>` token
    #[error("Missing administrative code in ward key: {0}")]
    MissingAdministrativeCode(String),

    /// Records of one ward were not contiguous in unsorted input
    #[error("Input is not grouped by ward: {0} appears in more than one run")]
    UnsortedInput(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// IO error while writing rows or reading config
    #[error("IO error: {0}")]
    Io(String),
}

impl PollError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        PollError::MalformedRecord {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        PollError::Io(err.to_string())
    }
}

impl From<csv::Error> for PollError {
    fn from(err: csv::Error) -> Self {
        PollError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for PollError {
    fn from(err: toml::de::Error) -> Self {
        PollError::Config(err.to_string())
    }
}

impl From<regex::Error> for PollError {
    fn from(err: regex::Error) -> Self {
        PollError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PollError::MissingAdministrativeCode("KA-W007".to_string());
        assert_eq!(
            err.to_string(),
            "Missing administrative code in ward key: KA-W007"
        );

        let err = PollError::malformed("a\tb", "expected at least 3 fields");
        assert!(err.to_string().contains("expected at least 3 fields"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PollError = io.into();
        assert!(matches!(err, PollError::Io(msg) if msg.contains("pipe closed")));
    }
}
