//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `tessera.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// The configured default process node has no physics entry.
    #[error("default process node '{0}' is missing from [feasibility.nodes]")]
    UnknownDefaultNode(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_default_node() {
        let err = ConfigError::UnknownDefaultNode("2nm".to_string());
        assert_eq!(
            err.to_string(),
            "default process node '2nm' is missing from [feasibility.nodes]"
        );
    }

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("floorplan.max_row_width must be positive".into());
        assert_eq!(
            err.to_string(),
            "validation error: floorplan.max_row_width must be positive"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().starts_with("failed to read configuration:"));
    }
}
