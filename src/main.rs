use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use range_iterator::{
    args::get_opts,
    logger,
    run::{RunError, run_all},
};
use tracing::{debug, info, warn};

fn main() -> ExitCode {
    let opts = get_opts();

    if let Err(e) = logger::install(opts.level(), opts.log_json) {
        eprintln!("range-iter: could not install logger: {e}");
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed)) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    match run_all(&opts, &stop) {
        Ok(emitted) => {
            info!(emitted, "done");
            ExitCode::SUCCESS
        }
        // The reader went away, e.g. `range-iter inf | head`.
        Err(RunError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("range-iter: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
