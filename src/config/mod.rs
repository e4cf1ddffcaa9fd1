#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::net::SocketAddr;
use std::path::Path;
use toml_config::TomlConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_CATALOG_PATH: &str = "data/placeables.json";
pub const DEFAULT_CONFIG_FILE: &str = "calculator.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Effective server settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub catalog_path: String,
    pub log_format: LogFormat,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_addr: Option<String>,
    pub catalog_path: Option<String>,
}

impl ServerConfig {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Result<Self> {
        if let Some(file) = file {
            file.validate()?;
        }

        let bind_addr = overrides
            .bind_addr
            .as_deref()
            .or_else(|| file.and_then(|f| f.server.bind_addr.as_deref()))
            .unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = validation::validate_socket_addr("bind_addr", bind_addr)?;

        let catalog_path = overrides
            .catalog_path
            .clone()
            .or_else(|| file.and_then(|f| f.catalog.path.clone()))
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());

        let log_format = match file.and_then(|f| f.log_format()) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let config = Self {
            bind_addr,
            catalog_path,
            log_format,
            log_level: file.and_then(|f| f.log_level()).map(str::to_string),
        };
        config.validate()?;
        Ok(config)
    }

    /// 讀取配置檔；若使用預設檔名且檔案不存在，回傳 None
    pub fn load_file(path: Option<&str>) -> Result<Option<TomlConfig>> {
        match path {
            Some(path) => TomlConfig::from_file(path).map(Some),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog_path", &self.catalog_path)
    }
}

impl ConfigProvider for ServerConfig {
    fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    fn catalog_path(&self) -> &str {
        &self.catalog_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CalcError;

    #[test]
    fn test_defaults_without_file() {
        let config = ServerConfig::resolve(None, &Overrides::default()).unwrap();

        assert_eq!(config.bind_addr(), DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.catalog_path(), DEFAULT_CATALOG_PATH);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_file_values_used() {
        let file = TomlConfig::from_toml_str(
            "[server]\nbind_addr = \"127.0.0.1:9000\"\n[catalog]\npath = \"custom.json\"\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = ServerConfig::resolve(Some(&file), &Overrides::default()).unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.catalog_path, "custom.json");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cli_overrides_win() {
        let file = TomlConfig::from_toml_str(
            "[server]\nbind_addr = \"127.0.0.1:9000\"\n[catalog]\npath = \"custom.json\"\n",
        )
        .unwrap();
        let overrides = Overrides {
            bind_addr: Some("127.0.0.1:7000".to_string()),
            catalog_path: Some("override.json".to_string()),
        };

        let config = ServerConfig::resolve(Some(&file), &overrides).unwrap();

        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.catalog_path, "override.json");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            bind_addr: Some("not-an-addr".to_string()),
            catalog_path: None,
        };

        let result = ServerConfig::resolve(None, &overrides);
        assert!(matches!(
            result,
            Err(CalcError::InvalidConfigValueError { ref field, .. }) if field == "bind_addr"
        ));
    }

    #[test]
    fn test_invalid_file_rejected() {
        let file = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(ServerConfig::resolve(Some(&file), &Overrides::default()).is_err());
    }
}
