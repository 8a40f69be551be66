//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay before each request in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Maximum fetch attempts per ZIP code
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum rate cards extracted per page
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Filter: minimum price in cents per kWh
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price in cents per kWh
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Filter: renewable-energy offers only
    #[serde(default)]
    pub green_only: bool,

    /// Filter: offers without a fee only
    #[serde(default)]
    pub no_fee_only: bool,
}

fn default_delay_ms() -> u64 {
    5000
}

fn default_delay_jitter_ms() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_cards() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            max_retries: default_max_retries(),
            max_cards: default_max_cards(),
            format: OutputFormat::Table,
            min_price: None,
            max_price: None,
            green_only: false,
            no_fee_only: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("powersetter-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("PS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("PS_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(retries) = std::env::var("PS_RETRIES") {
            if let Ok(r) = retries.parse() {
                self.max_retries = r;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.delay_ms, 5000);
        assert_eq!(config.delay_jitter_ms, 1000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.max_cards, 5);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.proxy.is_none());
        assert!(config.min_price.is_none());
        assert!(config.max_price.is_none());
        assert!(!config.green_only);
        assert!(!config.no_fee_only);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.delay_ms, 5000);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("table, json, markdown"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            delay_ms = 3000
            max_retries = 5
            max_cards = 3
            green_only = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.delay_ms, 3000);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_cards, 3);
        assert!(config.green_only);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            proxy = "socks5://localhost:1080"
            delay_ms = 8000
            delay_jitter_ms = 2000
            max_retries = 2
            max_cards = 10
            format = "json"
            min_price = 8.0
            max_price = 13.0
            green_only = true
            no_fee_only = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.delay_ms, 8000);
        assert_eq!(config.delay_jitter_ms, 2000);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_cards, 10);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.min_price, Some(8.0));
        assert_eq!(config.max_price, Some(13.0));
        assert!(config.green_only);
        assert!(config.no_fee_only);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            delay_ms = 4000
            max_cards = 4
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.delay_ms, 4000);
        assert_eq!(config.max_cards, 4);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            delay_ms = 2500
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.delay_ms, 2500);
    }

    #[test]
    fn test_config_with_env() {
        // Save original env vars
        let orig_proxy = std::env::var("PS_PROXY").ok();
        let orig_delay = std::env::var("PS_DELAY").ok();
        let orig_retries = std::env::var("PS_RETRIES").ok();

        // Set test env vars
        std::env::set_var("PS_PROXY", "http://proxy:8080");
        std::env::set_var("PS_DELAY", "7000");
        std::env::set_var("PS_RETRIES", "5");

        let config = Config::new().with_env();
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.delay_ms, 7000);
        assert_eq!(config.max_retries, 5);

        // Restore original env vars
        match orig_proxy {
            Some(v) => std::env::set_var("PS_PROXY", v),
            None => std::env::remove_var("PS_PROXY"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("PS_DELAY", v),
            None => std::env::remove_var("PS_DELAY"),
        }
        match orig_retries {
            Some(v) => std::env::set_var("PS_RETRIES", v),
            None => std::env::remove_var("PS_RETRIES"),
        }
    }

    #[test]
    fn test_config_with_env_invalid_values() {
        let orig_delay = std::env::var("PS_DELAY").ok();

        std::env::set_var("PS_DELAY", "not_a_number");

        let config = Config::new().with_env();
        // Invalid values should be ignored, keeping defaults
        assert_eq!(config.delay_ms, 5000);

        match orig_delay {
            Some(v) => std::env::set_var("PS_DELAY", v),
            None => std::env::remove_var("PS_DELAY"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            proxy: Some("socks5://localhost:1080".to_string()),
            delay_ms: 3000,
            delay_jitter_ms: 1500,
            max_retries: 4,
            max_cards: 7,
            format: OutputFormat::Json,
            min_price: Some(8.0),
            max_price: Some(13.0),
            green_only: true,
            no_fee_only: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.delay_ms, config.delay_ms);
        assert_eq!(parsed.max_retries, config.max_retries);
        assert_eq!(parsed.max_cards, config.max_cards);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.min_price, config.min_price);
        assert_eq!(parsed.green_only, config.green_only);
    }
}
