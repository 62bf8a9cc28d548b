//! `log` backend for the binaries: plain stderr lines, level from the
//! `--log-level` flag, then `RUST_LOG`, then `info`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Log level argument for the CLI and server.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

struct StderrLogger {
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let secs = self.started.elapsed().as_secs_f64();
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{secs:9.3}] {:5} {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn level_from_env() -> Option<LevelFilter> {
    std::env::var("RUST_LOG").ok()?.trim().parse().ok()
}

/// Install the stderr logger. Safe to call more than once; later calls only
/// adjust the level.
pub fn init(cli_level: Option<LogLevelArg>) {
    let level = cli_level
        .map(LogLevelArg::to_level_filter)
        .or_else(level_from_env)
        .unwrap_or(LevelFilter::Info);
    let logger = LOGGER.get_or_init(|| StderrLogger {
        started: Instant::now(),
    });
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}
