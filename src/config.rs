use anyhow::{Context, Result};
use mantel_core::FeedConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// IANA zone name used when printing the agenda (defaults to the system zone)
    pub timezone: Option<String>,

    /// Seconds between refreshes in watch mode
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Feed configurations, keyed by display name
    #[serde(default)]
    pub feeds: BTreeMap<String, FeedEntry>,
}

/// A single feed in config.toml
#[derive(Debug, Deserialize)]
pub struct FeedEntry {
    /// URL (http, https or webcal) or local file path of the ICS document
    pub source: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Prefix every event title with the feed name
    #[serde(default)]
    pub show_name: bool,

    /// Suppress this feed's errors from output
    #[serde(default)]
    pub hide_errors: bool,
}

impl FeedEntry {
    pub fn to_feed_config(&self, name: &str) -> FeedConfig {
        FeedConfig {
            name: name.to_string(),
            color: self.color.clone(),
            show_name: self.show_name,
            hide_errors: self.hide_errors,
        }
    }
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_color() -> String {
    "zinc".to_string()
}

/// Get the config file path (~/.config/mantel/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("mantel");
    Ok(config_dir.join("config.toml"))
}

/// Load config from ~/.config/mantel/config.toml, or an explicit path
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let path = match override_path {
        Some(p) => expand_path(p),
        None => config_path()?,
    };

    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with at least one feed:\n\n\
            [feeds.team]\n\
            source = \"https://example.com/team.ics\"\n\
            color = \"teal\"\n\
            show_name = true",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [feeds.team]
            source = "https://example.com/team.ics"
            "#,
        )
        .unwrap();

        let entry = &config.feeds["team"];
        assert_eq!(entry.source, "https://example.com/team.ics");
        assert_eq!(entry.color, "zinc");
        assert!(!entry.show_name);
        assert!(!entry.hide_errors);
        assert_eq!(config.refresh_interval_secs, 300);
    }

    #[test]
    fn feed_entry_becomes_a_feed_config() {
        let entry = FeedEntry {
            source: "~/cal.ics".to_string(),
            color: "rose".to_string(),
            show_name: true,
            hide_errors: false,
        };
        let feed = entry.to_feed_config("personal");
        assert_eq!(feed.name, "personal");
        assert_eq!(feed.color, "rose");
        assert!(feed.show_name);
    }
}
