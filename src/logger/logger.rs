use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Filter used until settings are loaded, and when `[log]` is absent.
pub const DEFAULT_FILTER: &str = "info";
/// Overrides the bootstrap filter, e.g. to trace settings parsing itself.
pub const BOOTSTRAP_FILTER_ENV: &str = "WATCHTOWER_LOG";

pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| anyhow!("invalid log filter {directives:?}: {e}"))
}

/// Owns the reload handle of the global subscriber. Records go to stderr;
/// stdout carries command output only.
pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    pub fn new_bootstrap() -> Self {
        let filter = EnvFilter::try_from_env(BOOTSTRAP_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();

        Self { reload_handle }
    }

    /// On an invalid filter the current one stays in place.
    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = parse_filter(&config.filter)?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        tracing::debug!(filter = %config.filter, "log filter applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_per_target_directives() {
        assert!(parse_filter("debug,sqlx=warn,watchtower::console=trace").is_ok());
        assert!(parse_filter(&LogConfig::default().filter).is_ok());
    }

    #[test]
    fn rejects_malformed_directives_with_the_input_in_the_message() {
        let err = parse_filter("=[").unwrap_err();
        assert!(err.to_string().contains("=["));
    }
}
