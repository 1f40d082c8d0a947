use crate::domain_model::RowLimit;
use crate::logger::{DEFAULT_FILTER, LogConfig};
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    pub storage: Storage,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            filter: default_filter(),
        }
    }
}

impl From<&Log> for LogConfig {
    fn from(log: &Log) -> Self {
        LogConfig {
            filter: log.filter.clone(),
        }
    }
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: String, // "mysql" or "memory"
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Memory backend only: name of an admin account created at startup
    /// with the default credential.
    #[serde(default)]
    pub bootstrap_admin: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub default_password: String,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            default_password: "1234".to_string(),
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub audit: RowLimit,
    pub accesses: RowLimit,
    pub user_accesses: RowLimit,
    pub events: RowLimit,
    pub alerts: RowLimit,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            audit: RowLimit::AUDIT,
            accesses: RowLimit::ACCESSES,
            user_accesses: RowLimit::USER_ACCESSES,
            events: RowLimit::EVENTS,
            alerts: RowLimit::ALERTS,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Loads the TOML file at `path` (or the build's default), then applies
/// `WATCHTOWER__SECTION__KEY` environment overrides.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("WATCHTOWER").separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let settings = from_toml(
            r#"
[storage]
backend = "memory"
"#,
        );

        assert_eq!(LogConfig::from(&settings.log).filter, DEFAULT_FILTER);
        assert_eq!(settings.storage.backend, "memory");
        assert_eq!(settings.storage.max_connections, 5);
        assert!(settings.storage.bootstrap_admin.is_none());
        assert_eq!(settings.credentials.default_password, "1234");
        assert_eq!(settings.limits.audit, RowLimit(50));
        assert_eq!(settings.limits.user_accesses, RowLimit(50));
        assert_eq!(settings.limits.alerts, RowLimit(100));
    }

    #[test]
    fn partial_limits_keep_the_other_defaults() {
        let settings = from_toml(
            r#"
[log]
filter = "info"

[storage]
backend = "mysql"
url = "mysql://localhost/watchtower"

[limits]
audit = 10
"#,
        );

        assert_eq!(settings.limits.audit, RowLimit(10));
        assert_eq!(settings.limits.events, RowLimit(100));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_settings(Some("")).is_err());
    }
}
