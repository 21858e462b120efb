//! Logger set-up for the engine and the studio.
//!
//! Everything logs through the `log` facade; `env_logger` prints it.

use std::sync::Once;

use env_logger::WriteStyle;

/// Filter used when neither the config nor the environment names one.
/// The GPU backend crates are noisy at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Environment variable consulted before `RUST_LOG`.
pub const FILTER_VAR: &str = "TESSERA_LOG";

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"tessera_engine=debug"`.
    /// Overrides the environment.
    pub filter: Option<String>,
    /// Forces colour on or off; `None` detects a terminal.
    pub color: Option<bool>,
}

fn pick_filter(config: &LoggingConfig, var: impl Fn(&str) -> Option<String>) -> String {
    config
        .filter
        .clone()
        .or_else(|| var(FILTER_VAR))
        .or_else(|| var("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = pick_filter(&config, |name| std::env::var(name).ok());
        let style = match config.color {
            Some(true) => WriteStyle::Always,
            Some(false) => WriteStyle::Never,
            None => WriteStyle::Auto,
        };

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter).write_style(style).format_timestamp_millis();
        if builder.try_init().is_ok() {
            log::debug!("logging to stderr with filter '{filter}'");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn config_filter_wins() {
        let config = LoggingConfig { filter: Some("warn".into()), color: None };
        assert_eq!(pick_filter(&config, env(&[(FILTER_VAR, "debug"), ("RUST_LOG", "trace")])), "warn");
    }

    #[test]
    fn own_variable_is_read_before_rust_log() {
        let config = LoggingConfig::default();
        assert_eq!(pick_filter(&config, env(&[(FILTER_VAR, "debug"), ("RUST_LOG", "trace")])), "debug");
        assert_eq!(pick_filter(&config, env(&[("RUST_LOG", "trace")])), "trace");
    }

    #[test]
    fn quiet_backends_by_default() {
        assert_eq!(pick_filter(&LoggingConfig::default(), env(&[])), DEFAULT_FILTER);
    }
}
