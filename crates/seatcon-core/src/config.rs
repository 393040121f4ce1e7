//! Configuration types for coordinator sessions.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Configuration for creating a coordinator session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Human-readable session name used in log output
    pub name: Option<String>,
    /// Wake the session immediately after creation instead of starting
    /// asleep
    pub wake_on_create: bool,
}

impl SessionConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: SessionConfig =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(Error::Config("session name must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.name, None);
        assert!(!config.wake_on_create);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = SessionConfig::from_json(r#"{"name": "seat0", "wake_on_create": true}"#)
            .expect("valid config");
        assert_eq!(config.name.as_deref(), Some("seat0"));
        assert!(config.wake_on_create);
    }

    #[test]
    fn test_config_from_json_defaults_missing_fields() {
        let config = SessionConfig::from_json("{}").expect("valid config");
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_config_rejects_empty_name() {
        let result = SessionConfig::from_json(r#"{"name": ""}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = SessionConfig {
            name: Some("seat1".to_string()),
            wake_on_create: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
