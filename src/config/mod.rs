//! Queue-definition configuration
//!
//! A project configures which queue names are collaborative ("special") via an
//! ordered list of queue definitions, each carrying a match pattern and the
//! display metadata for the tag rendered when a series sits in that queue:
//!
//! ```toml
//! [[queues]]
//! regex = "RHEL-(\\d+\\.\\d+)"
//! title = "Queued for RHEL %s"
//! char  = "R"
//! type  = "success"
//! group = 1
//! ```
//!
//! Definition order matters: when a queue name matches several patterns the
//! first definition wins. Validation happens at load time; a configuration
//! with a malformed pattern is rejected outright rather than matching with a
//! partial definition list.

mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Semantic type of a rendered tag, mapped to styling by the host UI
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TagKind {
    Success,
    Failure,
    Warning,
    Secondary,
    Info,
}

/// A single queue definition: match pattern plus tag display metadata
///
/// `title` and `glyph` may contain a `%s` placeholder which is substituted
/// with the text of capture group `group` (0 = the whole match) at render
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueDefinition {
    /// Pattern the queue name must match in its entirety
    pub regex: String,
    /// Tag title shown in the series list
    pub title: String,
    /// Single-character tag glyph
    #[serde(rename = "char")]
    pub glyph: String,
    /// Semantic tag type
    #[serde(rename = "type")]
    pub kind: TagKind,
    /// Capture group index substituted for `%s` placeholders
    #[serde(default)]
    pub group: usize,
}

/// Validated per-project queue configuration
///
/// An empty `queues` list is valid and means no queue name is special.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollabConfig {
    #[serde(default)]
    pub queues: Vec<QueueDefinition>,
}

impl CollabConfig {
    /// Parse and validate a configuration from a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: CollabConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file
    pub async fn from_toml_file(path: &std::path::Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    /// Validate every definition, compiling each pattern
    ///
    /// Fails fast on the first malformed regex or out-of-range capture-group
    /// index so that match time never sees an invalid pattern.
    pub fn validate(&self) -> ConfigResult<()> {
        for definition in &self.queues {
            let compiled = regex::Regex::new(&anchored(&definition.regex)).map_err(|e| {
                ConfigError::InvalidDefinition {
                    name: definition.title.clone(),
                    message: format!("invalid regex '{}': {}", definition.regex, e),
                }
            })?;

            // captures_len() counts group 0, so a valid index is < len
            let available = compiled.captures_len();
            if definition.group >= available {
                return Err(ConfigError::InvalidDefinition {
                    name: definition.title.clone(),
                    message: format!(
                        "capture group {} out of range (pattern '{}' has {} groups)",
                        definition.group,
                        definition.regex,
                        available - 1
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Wrap a configured pattern so it must match the whole queue name
///
/// Operator-supplied patterns use prefix-match semantics in some hosts;
/// anchoring avoids surprising partial matches like "accept" matching
/// "accepted-maybe".
pub(crate) fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}
