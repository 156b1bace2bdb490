use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model construction settings, typically loaded from a RON file:
///
/// ```ron
/// (window_length: 4, seed: Some(42))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Characters of preceding context per prediction.
    pub window_length: usize,
    /// Fixed RNG seed for reproducible generation; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            window_length: 3,
            seed: None,
        }
    }
}

impl ModelConfig {
    /// Load a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = ModelConfig::from_ron_str("(window_length: 5, seed: Some(9))").unwrap();
        assert_eq!(cfg.window_length, 5);
        assert_eq!(cfg.seed, Some(9));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = ModelConfig::from_ron_str("(seed: Some(1))").unwrap();
        assert_eq!(cfg.window_length, 3);
        assert_eq!(cfg.seed, Some(1));

        let cfg = ModelConfig::from_ron_str("()").unwrap();
        assert_eq!(cfg, ModelConfig::default());
    }

    #[test]
    fn malformed_config_is_error() {
        let err = ModelConfig::from_ron_str("(window_length: \"four\")").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ModelConfig::load_from_ron(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
