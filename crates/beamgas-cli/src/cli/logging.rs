use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub(super) const LOG_ENV_VAR: &str = "BEAMGAS_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the stderr subscriber; stdout stays reserved for report output.
pub(super) fn init_logging(cli_level: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .ok()
        .or_else(|| cli_level.and_then(|level| EnvFilter::try_new(level).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
