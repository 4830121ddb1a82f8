//! Logging Infrastructure
//!
//! Tracing goes to the in-app log pane (tui-logger) and, when a log directory
//! is configured, to a daily rolling file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logger settings
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | RUST_LOG | info | Filter directives |
/// | PRODUCT_CONSOLE_LOG_DIR | - | Directory for `product-console.<date>` files |
/// | PRODUCT_CONSOLE_LOG_JSON | false | Write file logs as JSON lines (`true`/`1`/`yes`/`on`) |
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub log_dir: Option<PathBuf>,
    pub json: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self {
            log_dir: std::env::var("PRODUCT_CONSOLE_LOG_DIR")
                .ok()
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
            json: std::env::var("PRODUCT_CONSOLE_LOG_JSON")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

/// `true`, `1`, `yes` or `on`, in any case
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Initialize the logger
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole run.
pub fn init_logger(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &settings.log_dir {
        Some(dir) if dir.exists() => {
            let appender = tracing_appender::rolling::daily(dir, "product-console");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            let layer = if settings.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            };
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .with(env_filter)
        .init();

    // Also init log crate adapter for dependencies using the log crate
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    if let Some(dir) = &settings.log_dir
        && guard.is_none()
    {
        tracing::warn!(
            "Log directory {} does not exist, file logging disabled",
            dir.display()
        );
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        for on in ["true", "TRUE", "1", "yes", " on "] {
            assert!(parse_flag(on), "{on}");
        }
        for off in ["false", "0", "", "no", "json"] {
            assert!(!parse_flag(off), "{off}");
        }
    }
}
