use std::sync::Once;

/// `filter` follows the `env_logger` syntax, e.g. "info" or "gltut=debug,glw=trace".
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Sets up the global logger. Later calls do nothing.
///
/// An explicit filter wins over `RUST_LOG`; with neither, everything at `info` and above is shown.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => builder.parse_filters(&filter),
            None => builder.filter_level(log::LevelFilter::Info),
        };

        builder.init();
        log::debug!("logging initialized");
    });
}
