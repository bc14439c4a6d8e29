//! Store configuration parsing.

use std::path::Path;

use fjall::PersistMode;
use serde::Deserialize;
use thiserror::Error;

/// Default keyspace holding all values.
pub const DEFAULT_KEYSPACE: &str = "default";

/// Options applied when opening a store and on every write.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// keyspace = "default"
/// create_if_missing = true
/// durability = "buffer"
/// cache_size = 16777216
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the fjall keyspace that holds the values.
    pub keyspace: String,
    /// Create the store directory when it does not exist yet.
    pub create_if_missing: bool,
    /// How far each write is persisted before the call returns.
    pub durability: Durability,
    /// Block cache size in bytes (engine default when unset).
    pub cache_size: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keyspace: DEFAULT_KEYSPACE.to_string(),
            create_if_missing: true,
            durability: Durability::default(),
            cache_size: None,
        }
    }
}

/// Journal persistence applied after each write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    /// Leave the journal to the engine's own flushing.
    None,
    /// Flush the journal into OS buffers.
    #[default]
    Buffer,
    /// Flush and fsync the journal data.
    SyncData,
    /// Flush and fsync the journal data and metadata.
    SyncAll,
}

impl Durability {
    pub(crate) fn persist_mode(self) -> Option<PersistMode> {
        match self {
            Durability::None => None,
            Durability::Buffer => Some(PersistMode::Buffer),
            Durability::SyncData => Some(PersistMode::SyncData),
            Durability::SyncAll => Some(PersistMode::SyncAll),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),
    /// TOML parse error.
    #[error("Failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StoreConfig::parse("").ok();
        assert_eq!(config, Some(StoreConfig::default()));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
keyspace = "prefs"
create_if_missing = false
durability = "sync_all"
cache_size = 1048576
"#;
        let config = StoreConfig::parse(toml).ok();
        assert_eq!(
            config,
            Some(StoreConfig {
                keyspace: "prefs".to_string(),
                create_if_missing: false,
                durability: Durability::SyncAll,
                cache_size: Some(1_048_576),
            })
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = StoreConfig::parse("compression = \"lz4\"").err();
        assert!(matches!(err, Some(ConfigError::Parse(_))));
    }

    #[test]
    fn test_durability_modes() {
        assert!(Durability::None.persist_mode().is_none());
        assert!(matches!(Durability::Buffer.persist_mode(), Some(PersistMode::Buffer)));
        assert!(matches!(Durability::SyncData.persist_mode(), Some(PersistMode::SyncData)));
        assert!(matches!(Durability::SyncAll.persist_mode(), Some(PersistMode::SyncAll)));
    }

    #[test]
    fn test_missing_file() {
        let err = StoreConfig::from_file("/nonexistent/kvbridge.toml").err();
        assert!(err.is_some_and(|e| e.to_string().contains("/nonexistent/kvbridge.toml")));
    }
}
