use std::path::Path;

use regex::Regex;
use serde::Deserialize;

/// Pattern used to classify controllers when the model file carries no
/// explicit flag for a type.
const DEFAULT_CONTROLLER_PATTERN: &str = "Controller$";

/// Configuration loaded from `di-graph.toml` next to the model file.
#[derive(Debug, Deserialize, Default)]
pub struct DiGraphConfig {
    /// Regex applied to class canonical names and base-class chains to
    /// classify controllers (fallback for types without an explicit flag).
    pub controller_pattern: Option<String>,
}

impl DiGraphConfig {
    /// Load configuration from `di-graph.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or
    /// cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("di-graph.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse di-graph.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read di-graph.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// The compiled controller-classification pattern; falls back to the
    /// default pattern when unset or invalid.
    pub fn controller_regex(&self) -> Regex {
        if let Some(pattern) = &self.controller_pattern {
            match Regex::new(pattern) {
                Ok(re) => return re,
                Err(err) => {
                    eprintln!(
                        "warning: invalid controller_pattern '{pattern}': {err}. Using default."
                    );
                }
            }
        }
        Regex::new(DEFAULT_CONTROLLER_PATTERN).expect("default pattern compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DiGraphConfig::load(dir.path());
        assert!(config.controller_pattern.is_none());
        assert!(config.controller_regex().is_match("OrdersController"));
    }

    #[test]
    fn test_custom_pattern_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("di-graph.toml"),
            "controller_pattern = \"Endpoint$\"\n",
        )
        .expect("write config");
        let config = DiGraphConfig::load(dir.path());
        let re = config.controller_regex();
        assert!(re.is_match("OrdersEndpoint"));
        assert!(!re.is_match("OrdersController"));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_default() {
        let config = DiGraphConfig {
            controller_pattern: Some("(unclosed".to_owned()),
        };
        assert!(config.controller_regex().is_match("OrdersController"));
    }
}
