use thiserror::Error;

/// Unified error type for release-publish operations
#[derive(Error, Debug)]
pub enum ReleasePublishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Commit parsing error: {0}")]
    Commit(String),

    #[error("Host operation failed: {0}")]
    Host(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-publish
pub type Result<T> = std::result::Result<T, ReleasePublishError>;

impl ReleasePublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleasePublishError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleasePublishError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleasePublishError::Tag(msg.into())
    }

    /// Create a commit parsing error with context
    pub fn commit(msg: impl Into<String>) -> Self {
        ReleasePublishError::Commit(msg.into())
    }

    /// Create a host error with context
    pub fn host(msg: impl Into<String>) -> Self {
        ReleasePublishError::Host(msg.into())
    }
}

impl From<ureq::Error> for ReleasePublishError {
    fn from(err: ureq::Error) -> Self {
        ReleasePublishError::Http(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleasePublishError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleasePublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(ReleasePublishError::version("test")
            .to_string()
            .contains("Version"));
        assert!(ReleasePublishError::tag("test").to_string().contains("Tag"));
        assert!(ReleasePublishError::commit("test")
            .to_string()
            .contains("Commit"));
    }

    #[test]
    fn test_error_all_variants() {
        let errors = vec![
            ReleasePublishError::config("config issue"),
            ReleasePublishError::version("version issue"),
            ReleasePublishError::tag("tag issue"),
            ReleasePublishError::commit("commit issue"),
            ReleasePublishError::host("host issue"),
        ];

        for err in errors {
            let msg = err.to_string();
            assert!(!msg.is_empty());
        }
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleasePublishError::config("x"), "Configuration error"),
            (ReleasePublishError::version("x"), "Version error"),
            (ReleasePublishError::tag("x"), "Tag error"),
            (ReleasePublishError::host("x"), "Host operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
