use std::path::PathBuf;

/// Errors that can occur while supplying data to the insights engine.
///
/// The aggregation algorithms themselves never fail; every variant here
/// belongs to the data-supply boundary (loading datasets, parsing config).
///
/// # Examples
///
/// ```
/// use orgpulse_core::OrgPulseError;
///
/// let err = OrgPulseError::Config("rare_skill_ratio must be positive".into());
/// assert!(err.to_string().contains("rare_skill_ratio"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum OrgPulseError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    #[diagnostic(code(orgpulse::io))]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(code(orgpulse::config), help("check the orgpulse.toml settings"))]
    Config(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    #[diagnostic(code(orgpulse::serialization))]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(orgpulse::toml))]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    #[diagnostic(code(orgpulse::file_not_found))]
    FileNotFound(PathBuf),

    /// The dataset document has the wrong overall shape.
    #[error("invalid dataset: {0}")]
    #[diagnostic(
        code(orgpulse::invalid_dataset),
        help("expected an object with `contributors` and `repo_works` arrays")
    )]
    InvalidDataset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: OrgPulseError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = OrgPulseError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn file_not_found_shows_path() {
        let err = OrgPulseError::FileNotFound(PathBuf::from("/tmp/org.json"));
        assert!(err.to_string().contains("/tmp/org.json"));
    }

    #[test]
    fn invalid_dataset_has_diagnostic_code() {
        use miette::Diagnostic;

        let err = OrgPulseError::InvalidDataset("top-level array".into());
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("orgpulse::invalid_dataset"));
        assert!(err.help().is_some());
    }
}
