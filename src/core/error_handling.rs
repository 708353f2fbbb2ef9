//! Generic error handling utilities
//!
//! Provides unified error handling across the plugin's error types while
//! keeping domain-specific logging behaviour in the error types themselves.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// Configuration mistakes (a malformed queue regex, a bad capture-group index)
/// are actionable by the project admin and should surface their own message.
/// System errors (store failures during fan-out, closed event channels) should
/// show generic context and keep the detail at debug level.
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; when it returns `false`, `user_message()` must return
/// `None`. Error logging relies on that pairing.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a specific, user-actionable message
    fn is_user_actionable(&self) -> bool;

    /// The specific user message, present exactly when `is_user_actionable()`
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context. Full detail is always available at debug level for
/// operators chasing partial fan-out failures.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("{}", user_msg);
        } else {
            log::error!("{}", operation_context);
        }
    } else {
        log::error!("{}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct ActionableError {
        message: String,
    }

    impl fmt::Display for ActionableError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for ActionableError {}

    impl ContextualError for ActionableError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct SystemError;

    impl fmt::Display for SystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "backend unavailable")
        }
    }

    impl std::error::Error for SystemError {}

    impl ContextualError for SystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_actionable_error_exposes_message() {
        let err = ActionableError {
            message: "invalid queue regex 'RHEL-['".to_string(),
        };
        assert!(err.is_user_actionable());
        assert_eq!(err.user_message(), Some("invalid queue regex 'RHEL-['"));
        // Must not panic regardless of logger state
        log_error_with_context(&err, "configuration validation");
    }

    #[test]
    fn test_system_error_has_no_user_message() {
        let err = SystemError;
        assert!(!err.is_user_actionable());
        assert!(err.user_message().is_none());
        log_error_with_context(&err, "membership fan-out");
    }
}
