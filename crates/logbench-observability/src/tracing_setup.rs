//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level per component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: component_name → level
    #[serde(default)]
    pub components: HashMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: HashMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// `info` normally, `debug` for the logbench crates when verbose.
    pub fn from_verbosity(verbose: bool, json: bool) -> Self {
        let mut config = Self {
            json,
            ..Self::default()
        };
        if verbose {
            for component in ["logbench-core", "logbench-evm", "logbench-harness"] {
                config.components.insert(component.into(), "debug".into());
            }
        }
        config
    }

    /// Build the directive string: "info,logbench_harness=debug" etc.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        let mut components: Vec<_> = self.components.iter().collect();
        components.sort();
        for (component, level) in components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Initialise tracing with the given log config.
/// Should be called once at application startup. `RUST_LOG`, when set,
/// takes precedence over the config.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_config_is_plain_info() {
        assert_eq!(LogConfig::from_verbosity(false, false).directives(), "info");
    }

    #[test]
    fn verbose_config_raises_logbench_crates() {
        let directives = LogConfig::from_verbosity(true, false).directives();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("logbench_harness=debug"));
        assert!(directives.contains("logbench_evm=debug"));
    }
}
