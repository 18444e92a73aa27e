//! Collaborator configuration loaded from JSON.
//!
//! ```json
//! {
//!   "oracle":   { "genders": { ... }, "majors": [ ... ], "fall": { ... }, "spring": { ... } },
//!   "switcher": { "withdraw_probability": 0.04, ... }
//! }
//! ```
//!
//! Either section may be omitted and falls back to its defaults.

use crate::error::SimError;
use crate::oracle::{OracleConfig, StatisticalOracle};
use crate::switcher::{MajorSwitch, SwitchConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parameters of the reference sampler and major switcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    pub oracle: OracleConfig,
    pub switcher: SwitchConfig,
}

impl CollaboratorConfig {
    /// Reads a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        info!("Loaded collaborator config from {}", path.display());
        Ok(config)
    }
    
    /// Validates both sections and builds the collaborators.
    pub fn build(&self) -> Result<(StatisticalOracle, MajorSwitch), SimError> {
        let oracle = StatisticalOracle::new(self.oracle.clone())?;
        let switcher = MajorSwitch::new(self.switcher.clone())?;
        Ok((oracle, switcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_empty_json_gives_defaults() {
        let config: CollaboratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CollaboratorConfig::default());
        assert!(config.build().is_ok());
    }
    
    #[test]
    fn test_partial_section_override() {
        let json = r#"{ "switcher": {
            "catalog": [ { "code": "CS", "weight": 1.0 } ],
            "withdraw_probability": 0.5,
            "switch_probability": 0.0,
            "graduation_position": 6,
            "graduation_probability": 0.0
        } }"#;
        let config: CollaboratorConfig = serde_json::from_str(json).unwrap();
        
        assert_eq!(config.oracle, OracleConfig::default());
        assert_eq!(config.switcher.withdraw_probability, 0.5);
        assert_eq!(config.switcher.catalog.len(), 1);
    }
    
    #[test]
    fn test_invalid_probability_rejected_on_build() {
        let mut config = CollaboratorConfig::default();
        config.switcher.switch_probability = 1.5;
        assert!(matches!(config.build(), Err(SimError::InvalidConfig(_))));
    }
    
    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("cohort_config_{}.json", std::process::id()));
        let config = CollaboratorConfig::default();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        
        let loaded = CollaboratorConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
        
        fs::remove_file(&path).unwrap();
        assert!(matches!(CollaboratorConfig::from_json_file(&path), Err(SimError::Io(_))));
    }
}
