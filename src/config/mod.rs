pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "artic-table")]
#[command(about = "Browse the Art Institute of Chicago catalog and select artworks across pages")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the artworks endpoint
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Page shown at startup
    #[arg(long)]
    pub start_page: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the config file, then command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(page_size) = self.page_size {
            config.table.page_size = page_size;
        }
        if let Some(start_page) = self.start_page {
            config.table.start_page = start_page;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = timeout;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\ntimeout_seconds = 9\n\n[table]\npage_size = 40\nstart_page = 2\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["artic-table", "--config", path.as_str(), "--page-size", "20"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.page_size(), 20);
        assert_eq!(config.start_page(), 2);
        assert_eq!(config.timeout_seconds(), 9);
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = CliConfig::parse_from(["artic-table", "--api-endpoint", "http://localhost:9000/a"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.api_endpoint(), "http://localhost:9000/a");
        assert_eq!(config.page_size(), toml_config::DEFAULT_PAGE_SIZE);
    }
}
