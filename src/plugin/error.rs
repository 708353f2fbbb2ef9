//! Plugin Error Types

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum PluginError {
    /// Plugin API version incompatible with the host
    #[error("Version incompatible: {message}")]
    VersionIncompatible { message: String },

    /// Plugin failed to initialize
    #[error("Initialization failed: {message}")]
    InitializationFailed { message: String },

    /// A project's queue configuration was rejected
    #[error("Project '{project}' configuration rejected: {message}")]
    ProjectConfiguration { project: String, message: String },
}

impl crate::core::error_handling::ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, PluginError::ProjectConfiguration { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PluginError::ProjectConfiguration { message, .. } => Some(message),
            _ => None,
        }
    }
}
