use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"arbor_engine=debug,wgpu_core=warn"`. When unset, `RUST_LOG` is
/// consulted, then `default_level` applies with the noisy GPU crates
/// capped at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const GPU_CRATES: [&str; 4] = ["wgpu_core", "wgpu_hal", "wgpu", "naga"];

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
                for name in GPU_CRATES {
                    builder.filter_module(name, config.default_level.min(LevelFilter::Warn));
                }
            }
        }

        builder.write_style(config.write_style);

        // A test harness or embedding host may already own the logger.
        if let Err(err) = builder.try_init() {
            eprintln!("arbor: logger already installed ({err})");
            return;
        }

        log::debug!("logging initialized");
    });
}
