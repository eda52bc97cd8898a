//! Engine configuration - game metadata and default messages from TOML.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::session::{Intro, MessageDefaults};

/// Author-supplied engine configuration.
///
/// ```toml
/// name = "The Hollow Hills"
/// description = "A short cave crawl."
/// version = "1.2.0"
/// author = "J. Doe"
///
/// [messages]
/// use = "Nothing happens."
/// failed_combine = "Those don't fit together."
///
/// [intro]
/// title = "The Hollow Hills"
/// image = "intro.png"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game name, reported in the handshake.
    pub name: String,

    /// Game description.
    pub description: Option<String>,

    /// Version of the authored game (not the engine).
    pub version: Option<String>,

    /// Author name.
    pub author: Option<String>,

    /// Default failure messages.
    pub messages: MessageDefaults,

    /// Intro screen, if any.
    pub intro: Option<Intro>,
}

impl EngineConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml(document: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml(
            r#"
            name = "The Hollow Hills"
            description = "A short cave crawl."
            version = "1.2.0"
            author = "J. Doe"

            [messages]
            use = "Nothing happens."
            failed_combine = "Those don't fit together."

            [intro]
            title = "The Hollow Hills"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "The Hollow Hills");
        assert_eq!(config.author.as_deref(), Some("J. Doe"));
        assert_eq!(config.messages.use_item.as_deref(), Some("Nothing happens."));
        assert_eq!(
            config.messages.failed_combine.as_deref(),
            Some("Those don't fit together.")
        );
        assert_eq!(config.messages.failed_pickup, None);
        assert_eq!(config.intro.unwrap().title, "The Hollow Hills");
    }

    #[test]
    fn test_minimal_document() {
        let config = EngineConfig::from_toml(r#"name = "tiny""#).unwrap();
        assert_eq!(config.name, "tiny");
        assert!(config.intro.is_none());
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            EngineConfig::from_toml("name = ["),
            Err(EngineError::Config(_))
        ));
    }
}
