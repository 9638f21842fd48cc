// ABOUTME: Configuration management for the crashplate application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::tokens::delimit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Custom tokens added to every render
    #[serde(default)]
    pub tokens: HashMap<String, String>,

    #[serde(default = "default_prefer_private")]
    pub prefer_private_address: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_prefer_private() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokens: HashMap::new(),
            prefer_private_address: default_prefer_private(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config: Config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };
        config.tokens = normalize_tokens(std::mem::take(&mut config.tokens))?;

        // Merge with environment variables
        config.merge_env()?;

        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("crashplate.yaml"),
            PathBuf::from("crashplate.yml"),
            PathBuf::from(".crashplate.yaml"),
            PathBuf::from(".crashplate.yml"),
        ];

        // Check current directory
        for path in &possible_paths {
            if path.exists() {
                return path.clone();
            }
        }

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".crashplate").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("crashplate.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = var("CRASHPLATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CRASHPLATE_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(prefer) = var("CRASHPLATE_PREFER_PRIVATE_ADDRESS") {
            self.prefer_private_address = prefer.parse()?;
        }

        Ok(())
    }

    /// Merge additional tokens; later values replace configured ones
    pub fn merge_tokens(&mut self, tokens: HashMap<String, String>) -> Result<()> {
        self.tokens.extend(normalize_tokens(tokens)?);
        Ok(())
    }
}

/// Key tokens by their delimited name so `bugid` and `{bugid}` share one entry
fn normalize_tokens(tokens: HashMap<String, String>) -> Result<HashMap<String, String>> {
    tokens
        .into_iter()
        .map(|(name, value)| Ok((delimit(&name)?, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.prefer_private_address);
        assert!(config.tokens.is_empty());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("crashplate.yaml");

        let config_content = r#"
prefer_private_address: false
tokens:
  bugid: "5001"
  tracker: https://tracker.example.com
logging:
  level: debug
  format: compact
"#;
        fs::write(&config_path, config_content).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert!(!config.prefer_private_address);
        assert_eq!(config.tokens.get("{bugid}"), Some(&"5001".to_string()));
        assert_eq!(config.tokens.len(), 2);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_yaml::from_str("tokens: {}").unwrap();
        assert!(config.prefer_private_address);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_merge_tokens() {
        let mut config = Config::default();
        config
            .tokens
            .insert("{bugid}".to_string(), "1".to_string());

        let mut extra = HashMap::new();
        extra.insert("bugid".to_string(), "2".to_string());
        extra.insert("owner".to_string(), "qa".to_string());
        config.merge_tokens(extra).unwrap();

        assert_eq!(config.tokens.get("{bugid}"), Some(&"2".to_string()));
        assert_eq!(config.tokens.get("{owner}"), Some(&"qa".to_string()));
        assert_eq!(config.tokens.len(), 2);
    }

    #[test]
    fn test_delimited_and_bare_names_share_one_token() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("crashplate.yaml");
        fs::write(&config_path, "tokens:\n  bugid: config\n").unwrap();

        for _ in 0..50 {
            let mut config = Config::load(Some(config_path.clone())).unwrap();
            let mut extra = HashMap::new();
            extra.insert("{bugid}".to_string(), "cli".to_string());
            config.merge_tokens(extra).unwrap();

            assert_eq!(config.tokens.len(), 1);
            assert_eq!(config.tokens.get("{bugid}"), Some(&"cli".to_string()));
        }
    }

    #[test]
    fn test_invalid_token_name_is_rejected() {
        let mut config = Config::default();
        let mut extra = HashMap::new();
        extra.insert("{}".to_string(), "x".to_string());
        assert!(config.merge_tokens(extra).is_err());
    }

    #[test]
    fn test_partial_logging_section() {
        let config: Config = serde_yaml::from_str("logging:\n  level: debug\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_apply_one_at_a_time() {
        let mut config = Config::default();

        config
            .merge_vars(vars(&[("CRASHPLATE_LOG_LEVEL", "trace")]))
            .unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.prefer_private_address);

        config
            .merge_vars(vars(&[("CRASHPLATE_LOG_FORMAT", "compact")]))
            .unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "compact");

        config
            .merge_vars(vars(&[("CRASHPLATE_PREFER_PRIVATE_ADDRESS", "false")]))
            .unwrap();
        assert!(!config.prefer_private_address);

        config.merge_vars(vars(&[])).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert!(!config.prefer_private_address);
    }

    #[test]
    fn test_env_rejects_invalid_bool() {
        let mut config = Config::default();
        let result = config.merge_vars(vars(&[("CRASHPLATE_PREFER_PRIVATE_ADDRESS", "yes")]));
        assert!(result.is_err());
        assert!(config.prefer_private_address);
    }

    #[test]
    fn test_merge_env_reads_process_environment() {
        let mut config = Config::default();

        std::env::set_var("CRASHPLATE_LOG_FORMAT", "compact");
        config.merge_env().unwrap();
        std::env::remove_var("CRASHPLATE_LOG_FORMAT");
        assert_eq!(config.logging.format, "compact");

        let mut config = Config::default();
        config.merge_env().unwrap();
        assert_eq!(config.logging.format, "pretty");
    }
}
