use std::sync::Once;

use log::LevelFilter;

/// `env_filter` uses the `env_logger` filter syntax ("info", "glsteps=debug,bootstrap=trace").
/// When it's `None`, `RUST_LOG` is used, and failing that everything at `info` and above.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Sets up the global logger. Only the first call does anything.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => { builder.parse_filters(&filter); },
            None => { builder.filter_level(LevelFilter::Info); },
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
