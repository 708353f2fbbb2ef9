//! Store Error Types

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The storage backend rejected or failed the operation
    #[error("Storage backend failure: {message}")]
    Backend { message: String },

    /// The storage backend is unreachable
    #[error("Storage backend unavailable: {message}")]
    Unavailable { message: String },
}

impl crate::core::error_handling::ContextualError for StoreError {
    fn is_user_actionable(&self) -> bool {
        false // Storage trouble is never fixable by the acting maintainer
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
