//! logging stuff
use {
    crate::{
        config::options::{LoggingConfig, LoggingFormat},
        getopt,
        utils::string_to_log_level,
    },
    color_eyre::Result,
    tracing::{info, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// setup logging from the global config
pub fn setup() -> Result<()> {
    setup_with(&getopt!(logging))
}

/// setup logging from an explicit config
///
/// fails if a global subscriber is already installed
pub fn setup_with(cfg: &LoggingConfig) -> Result<()> {
    let defaults = LoggingConfig::default();

    if !cfg.enable.or(defaults.enable).unwrap_or(true) {
        return Ok(());
    }

    let level = cfg
        .level
        .as_deref()
        .or(defaults.level.as_deref())
        .map(string_to_log_level)
        .unwrap_or(tracing::Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(cfg.ansi.or(defaults.ansi).unwrap_or(true))
        .with_line_number(cfg.line_numbers.or(defaults.line_numbers).unwrap_or(false))
        .with_target(cfg.event_targets.or(defaults.event_targets).unwrap_or(false));

    match cfg.format.or(defaults.format).unwrap_or_default() {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    info!(%level, "logging setup successfully");
    Ok(())
}
