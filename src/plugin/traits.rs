//! Plugin Trait System
//!
//! The contract between the host application and a plugin. The host injects
//! its shared services (currently just the event bus) before `initialize()`;
//! everything else the plugin pulls through the hook methods it chooses to
//! expose.

use crate::events::NotificationManager;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::types::PluginInfo;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Base plugin trait that all plugins must implement
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Get plugin metadata
    fn plugin_info(&self) -> PluginInfo;

    /// Check if this plugin is compatible with the given host API version
    ///
    /// The default returns false to force plugins to state their own
    /// compatibility floor explicitly.
    fn is_compatible(&self, _system_api_version: u32) -> bool {
        false
    }

    /// Compatibility check as performed by the host before initialization
    fn check_compatibility(&self, system_api_version: u32) -> PluginResult<()> {
        if self.is_compatible(system_api_version) {
            return Ok(());
        }
        let info = self.plugin_info();
        Err(PluginError::VersionIncompatible {
            message: format!(
                "plugin '{}' requires API version {}, host provides {}",
                info.name, info.api_version, system_api_version
            ),
        })
    }

    /// Inject the event bus handle
    ///
    /// Called before `initialize()`; plugins store the reference internally.
    fn set_notification_manager(&mut self, manager: Arc<Mutex<NotificationManager>>);

    /// Initialize the plugin (subscribe to events, spawn workers)
    async fn initialize(&mut self) -> PluginResult<()>;

    /// Clean up plugin resources
    async fn cleanup(&mut self) -> PluginResult<()>;
}
