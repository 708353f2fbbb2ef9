pub mod classify;
pub mod config;
pub mod core;
pub mod events;
pub mod model;
pub mod plugin;
pub mod status;
pub mod store;
pub mod sync;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the API version string from build script into u32
pub fn get_plugin_api_version() -> u32 {
    PLUGIN_API_VERSION.parse().unwrap_or(20250727)
}
