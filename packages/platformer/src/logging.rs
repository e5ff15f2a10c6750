//! Global logging system.

use std::{
    fs::{
        self,
        File,
    },
    path::Path,
    sync::Arc,
    env,
    panic,
};
use anyhow::*;
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};


/// Default logging environment filter. Our crate is debug, everything else is warn.
const DEFAULT_FILTER: &'static str = "warn,platformer=debug";

/// Directory, relative to the working directory, which the log file goes in.
pub const LOG_DIR: &'static str = "logs";
pub const LOG_FILE_NAME: &'static str = "game.log";

/// Initializes a `tracing` logging backend which outputs to stdout and also `logs/game.log`,
/// truncating it. Accepts ecosystem-standard `RUST_LOG` env filters. Also routes panics through
/// the logging system.
pub fn init_logging() -> Result<()> {
    // initialize and install logging system
    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    fs::create_dir_all(LOG_DIR)
        .with_context(|| format!("unable to create {} directory", LOG_DIR))?;
    let log_path = Path::new(LOG_DIR).join(LOG_FILE_NAME);
    let log_file = File::create(&log_path)
        .with_context(|| format!("unable to create log file {}", log_path.display()))?;
    let log_file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(env_filter) = env::var(EnvFilter::DEFAULT_ENV).ok() {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log)
        .with(log_file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;
    info!("starting program");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
    Ok(())
}
