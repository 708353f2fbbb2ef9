//! Configuration Error Types

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating queue configuration
///
/// All of these fire at configuration-load time. A definition that fails
/// validation blocks the whole configuration; matching never starts with a
/// half-valid pattern list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A queue definition failed validation (bad regex, bad group index)
    #[error("Queue definition '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    /// The configuration document could not be parsed
    #[error("Failed to parse queue configuration: {message}")]
    Parse { message: String },

    /// The configuration file could not be read
    #[error("Failed to read queue configuration: {message}")]
    Io { message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io {
            message: err.to_string(),
        }
    }
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        match self {
            // The project admin can fix their queue definitions
            ConfigError::InvalidDefinition { .. } => true,
            ConfigError::Parse { .. } => true,
            // Filesystem trouble is the operator's problem
            ConfigError::Io { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidDefinition { message, .. } => Some(message),
            ConfigError::Parse { message } => Some(message),
            ConfigError::Io { .. } => None,
        }
    }
}
