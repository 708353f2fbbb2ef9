//! Queue Classifier
//!
//! Decides whether a queue name is "special" (collaborative, shared among all
//! maintainers of a project) or private, and which queue definition it
//! matched. Pure functions of the queue name and the project configuration;
//! no side effects.

use crate::config::{anchored, CollabConfig, ConfigError, ConfigResult, QueueDefinition, TagKind};
use regex::{Regex, RegexSet};

/// Compiled matcher over a project's queue definitions
///
/// All patterns are combined into one `RegexSet` for the membership test;
/// capture extraction uses the per-definition regexes. Patterns are anchored
/// so a definition matches the whole queue name, never a prefix of it.
#[derive(Debug, Clone)]
pub struct QueueClassifier {
    set: RegexSet,
    entries: Vec<(QueueDefinition, Regex)>,
}

/// A successful classification: the matched definition and its captured text
#[derive(Debug, Clone)]
pub struct QueueMatch<'a> {
    pub definition: &'a QueueDefinition,
    captured: String,
}

impl QueueMatch<'_> {
    /// Tag title with `%s` placeholders substituted from the capture group
    pub fn title(&self) -> String {
        self.definition.title.replace("%s", &self.captured)
    }

    /// Tag glyph with `%s` placeholders substituted from the capture group
    pub fn glyph(&self) -> String {
        self.definition.glyph.replace("%s", &self.captured)
    }

    pub fn kind(&self) -> TagKind {
        self.definition.kind
    }

    /// Text of the definition's configured capture group
    pub fn captured(&self) -> &str {
        &self.captured
    }
}

impl QueueClassifier {
    /// Compile a classifier from a validated configuration
    ///
    /// Compiling can only fail on a config that skipped `validate()`; the
    /// error is the same `ConfigError` that validation would have produced.
    pub fn new(config: &CollabConfig) -> ConfigResult<Self> {
        let patterns: Vec<String> = config.queues.iter().map(|d| anchored(&d.regex)).collect();
        let set = RegexSet::new(&patterns).map_err(|e| ConfigError::InvalidDefinition {
            name: "queues".to_string(),
            message: e.to_string(),
        })?;

        let mut entries = Vec::with_capacity(config.queues.len());
        for definition in &config.queues {
            let compiled = Regex::new(&anchored(&definition.regex)).map_err(|e| {
                ConfigError::InvalidDefinition {
                    name: definition.title.clone(),
                    message: format!("invalid regex '{}': {}", definition.regex, e),
                }
            })?;
            entries.push((definition.clone(), compiled));
        }

        Ok(Self { set, entries })
    }

    /// True when any queue definition matches the whole of `name`
    pub fn is_special(&self, name: &str) -> bool {
        self.set.is_match(name)
    }

    /// The first matching definition in configuration order, with the text of
    /// its configured capture group
    ///
    /// First match wins when a name matches several patterns; definition
    /// order is the priority order.
    pub fn classify(&self, name: &str) -> Option<QueueMatch<'_>> {
        let index = self.set.matches(name).iter().next()?;
        let (definition, compiled) = &self.entries[index];

        let captured = compiled
            .captures(name)
            .and_then(|caps| caps.get(definition.group))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(QueueMatch {
            definition,
            captured,
        })
    }
}
