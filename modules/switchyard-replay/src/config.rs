use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// TOML-backed replay configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    #[serde(rename = "counter", default)]
    pub counters: Vec<CounterConfig>,
    #[serde(default)]
    pub log: LogConfig,
}

/// One integer counter in the combined state.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    pub key: String,
    #[serde(default)]
    pub initial: i64,
    /// Tags whose payload amount is added.
    #[serde(default)]
    pub add: Vec<String>,
    /// Tags whose payload amount is subtracted.
    #[serde(default)]
    pub subtract: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive used only when `RUST_LOG` is unset or empty.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "switchyard=info".to_string(),
        }
    }
}

impl ReplayConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ReplayConfig = toml::from_str(content).context("Failed to parse replay config")?;
        config.validate()?;
        Ok(config)
    }

    /// Every tag any counter reacts to.
    pub fn known_tags(&self) -> impl Iterator<Item = &str> {
        self.counters
            .iter()
            .flat_map(|c| c.add.iter().chain(c.subtract.iter()))
            .map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for counter in &self.counters {
            if counter.key.trim().is_empty() {
                anyhow::bail!("Counter key must not be empty");
            }
            if !seen.insert(counter.key.as_str()) {
                anyhow::bail!("Duplicate counter key: {}", counter.key);
            }
            if let Some(tag) = counter.add.iter().find(|tag| counter.subtract.contains(*tag)) {
                anyhow::bail!("Tag {tag} is both added and subtracted by counter {}", counter.key);
            }
        }
        Ok(())
    }
}

/// Load and parse a TOML replay config file.
pub fn load_config(path: &Path) -> Result<ReplayConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    ReplayConfig::from_toml(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_counters_and_defaults() {
        let config = ReplayConfig::from_toml(
            r#"
            [[counter]]
            key = "x"
            add = ["move:x"]
            "#,
        )
        .unwrap();

        assert_eq!(config.counters.len(), 1);
        assert_eq!(config.counters[0].initial, 0);
        assert!(config.counters[0].subtract.is_empty());
        assert_eq!(config.log.filter, "switchyard=info");
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = ReplayConfig::from_toml(
            r#"
            [[counter]]
            key = "x"
            [[counter]]
            key = "x"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate counter key"));
    }

    #[test]
    fn rejects_a_tag_that_both_adds_and_subtracts() {
        let err = ReplayConfig::from_toml(
            r#"
            [[counter]]
            key = "balance"
            add = ["deposit", "adjust"]
            subtract = ["withdraw", "adjust"]
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Tag adjust is both added and subtracted by counter balance");
    }

    #[test]
    fn same_tag_may_drive_different_counters() {
        let config = ReplayConfig::from_toml(
            r#"
            [[counter]]
            key = "credit"
            add = ["transfer"]
            [[counter]]
            key = "debit"
            subtract = ["transfer"]
            "#,
        )
        .unwrap();
        assert_eq!(config.counters.len(), 2);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ReplayConfig::from_toml("[[counter]]\nkey = \"x\"\nmultiply = []\n").is_err());
    }

    #[test]
    fn known_tags_cover_add_and_subtract() {
        let config = ReplayConfig::from_toml(
            r#"
            [[counter]]
            key = "x"
            add = ["a"]
            subtract = ["b"]
            "#,
        )
        .unwrap();
        assert_eq!(config.known_tags().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
