use std::io;

use tracing::{Dispatch, Level};
use tracing_subscriber::{Registry, filter::Targets, prelude::*, util::TryInitError};

const TARGETS: [&str; 2] = ["range_iterator", "range_iter"];

/// Installs a stderr subscriber for this crate's events at `level`.
pub fn install(level: Level, json: bool) -> Result<(), TryInitError> {
    let filter = TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| targets.with_target(*target, level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let dispatch = if json {
        Dispatch::new(Registry::default().with(fmt_layer.json().with_filter(filter)))
    } else {
        Dispatch::new(Registry::default().with(fmt_layer.with_filter(filter)))
    };
    dispatch.try_init()
}

/// Maps `-v` repetitions to a level, starting at warnings.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
