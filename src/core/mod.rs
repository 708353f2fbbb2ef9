//! Core utilities shared across the plugin
//!
//! Cross-cutting concerns that do not belong to any one component:
//! contextual error handling and logger initialization.

pub mod error_handling;
pub mod logging;
