//! Plugin Surface
//!
//! The host loads this crate as a plugin: it checks API-version
//! compatibility, injects the event bus handle, and calls `initialize()`.
//! From then on the plugin consumes queue-change events from the bus and
//! answers the host's render-time hooks (message status, project admin
//! panel).

mod collab;
mod error;
mod traits;
mod types;

pub use collab::{CollabPlugin, ProjectInfoPanel};
pub use error::{PluginError, PluginResult};
pub use traits::Plugin;
pub use types::PluginInfo;
