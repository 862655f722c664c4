use crate::config::Config;
use log::{info, LevelFilter, SetLoggerError};
use simplelog::{self, ConfigBuilder};

/// HTTP stack modules muted below Trace, so request handling in the application
/// crates stays readable.
const FILTERED_MODULES: &[&str] = &[
    "hyper",
    "hyper_util",
    "reqwest",
    "rustls",
    "tower",
    "tower_sessions",
    "tower_sessions_core",
    "axum",
];

pub struct Logger {}

impl Logger {
    /// Installs the terminal logger at the configured level and reports which
    /// dependency modules it mutes.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;
        let muted = Self::muted_modules(level);

        simplelog::TermLogger::init(
            level,
            Self::build_log_config(muted),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )?;

        if muted.is_empty() {
            info!("Logging at {level}, dependency logs included");
        } else {
            info!("Logging at {level}, muting {}", muted.join(", "));
        }
        Ok(())
    }

    /// Trace shows everything; any other level mutes the HTTP stack.
    fn muted_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            FILTERED_MODULES
        }
    }

    fn build_log_config(muted: &[&'static str]) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        for module in muted {
            builder.add_filter_ignore_str(module);
        }
        builder.build()
    }
}
