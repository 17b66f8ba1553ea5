//! `env_logger` bootstrap for binaries embedding the renderer.

use std::sync::Once;

/// Options for [`init_logging`].
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `"debug"` or `"glint=trace,warn"`.
    /// `None` defers to `RUST_LOG`, falling back to `info`.
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs the global logger on first call; later calls do nothing.
///
/// Call this from `main` before creating GL resources, otherwise shader
/// compile logs, missing-uniform warnings and GL error reports go
/// nowhere.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // the embedding application may have installed its own logger
        let _ = builder.try_init();

        log::debug!("logging initialized");
    });
}

/// [`init_logging`] with defaults, for binaries with no filter of their
/// own.
pub fn init() {
    init_logging(LoggingConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_ignored() {
        init();
        init();
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
        });
    }
}
