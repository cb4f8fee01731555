use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    args::Options,
    config::{NamedRange, parse_config},
    error::{ConfigError, RangeError},
    float_range::FloatRange,
    grid::Grid,
    output::Emitter,
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Range(_) | RunError::Config(_) => 2,
            RunError::Output { .. } | RunError::Io(_) => 1,
        }
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Mode {
    Single(FloatRange),
    Named(Vec<NamedRange>),
    Grid(Grid),
}

impl Mode {
    /// Total values (or rows) this mode emits, `None` if unbounded.
    pub fn len(&self) -> Option<u64> {
        match self {
            Mode::Single(range) => range.len().map(|n| n as u64),
            Mode::Named(ranges) => ranges
                .iter()
                .try_fold(0u64, |acc, r| Some(acc.saturating_add(r.range.len()? as u64))),
            Mode::Grid(grid) => Some(grid.len() as u64),
        }
    }
}

pub fn resolve_mode(opts: &Options) -> Result<Mode, RunError> {
    let Some(fp) = &opts.config else {
        let range = FloatRange::parse(opts.start.as_deref(), opts.end.as_deref(), opts.step.as_deref())?;
        return Ok(Mode::Single(range));
    };

    let cfg = parse_config(fp)?;
    let ranges = cfg.select(&opts.names)?;
    debug!(config = %fp, ranges = ranges.len(), "loaded config");

    if opts.grid {
        let combinations = Grid::count(&ranges)?;
        info!(combinations, "expanding grid");
        Ok(Mode::Grid(Grid::expand(&ranges)?))
    } else {
        Ok(Mode::Named(ranges))
    }
}

struct Session<'a, W: Write> {
    emitter: Emitter<W>,
    limit: Option<u64>,
    stop: &'a AtomicBool,
    progress: Option<ProgressBar>,
}

impl<W: Write> Session<'_, W> {
    fn open(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            info!(emitted = self.emitter.rows(), "interrupted");
            return false;
        }
        self.limit.is_none_or(|limit| self.emitter.rows() < limit)
    }

    fn tick(&self) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn emit(&mut self, mode: &Mode) -> io::Result<()> {
        match mode {
            Mode::Single(range) => {
                self.emitter.header(&["value"])?;
                for v in range {
                    if !self.open() {
                        break;
                    }
                    self.emitter.value(None, v)?;
                    self.tick();
                }
            }
            Mode::Named(ranges) => {
                self.emitter.header(&["name", "value"])?;
                'ranges: for r in ranges {
                    for v in &r.range {
                        if !self.open() {
                            break 'ranges;
                        }
                        self.emitter.value(Some(&r.name), v)?;
                        self.tick();
                    }
                }
            }
            Mode::Grid(grid) => {
                let names: Vec<&str> = grid.names().iter().map(String::as_str).collect();
                self.emitter.header(&names)?;
                for row in grid.rows() {
                    if !self.open() {
                        break;
                    }
                    self.emitter.row(grid.names(), &row)?;
                    self.tick();
                }
            }
        }
        self.emitter.flush()
    }
}

/// Emits whatever `opts` describes, stopping early once `stop` is set.
/// Returns the number of values (or grid rows) written.
pub fn run_all(opts: &Options, stop: &AtomicBool) -> Result<u64, RunError> {
    let mode = resolve_mode(opts)?;
    let total = mode
        .len()
        .map(|n| opts.limit.map_or(n, |limit| n.min(limit)));

    let (out, progress): (Box<dyn Write>, Option<ProgressBar>) = match &opts.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| RunError::Output {
                path: path.clone(),
                source,
            })?;
            (Box::new(BufWriter::new(file)), total.map(ProgressBar::new))
        }
        None => (Box::new(BufWriter::new(io::stdout().lock())), None),
    };

    let mut session = Session {
        emitter: Emitter::new(out, opts.format),
        limit: opts.limit,
        stop,
        progress,
    };
    session.emit(&mode)?;

    if let Some(pb) = &session.progress {
        pb.finish();
    }

    Ok(session.emitter.rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn opts(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("range-iter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_mode() {
        let mode = resolve_mode(&opts(&["-5"])).unwrap();
        assert!(matches!(&mode, Mode::Single(r) if r.step() == -1.));
        assert_eq!(mode.len(), Some(5));
    }

    #[test]
    fn test_invalid_arguments_exit_with_2() {
        let err = resolve_mode(&opts(&["0", "dafds"])).unwrap_err();
        assert!(matches!(err, RunError::Range(_)));
        assert_eq!(err.exit_code(), 2);

        let err = resolve_mode(&opts(&[])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let err = resolve_mode(&opts(&["--config", "/nonexistent/ranges.json"])).unwrap_err();
        assert!(matches!(err, RunError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn test_unbounded_len() {
        let mode = resolve_mode(&opts(&["inf"])).unwrap();
        assert_eq!(mode.len(), None);
    }

    #[test]
    fn test_session_honours_limit_and_stop() {
        let range = FloatRange::to(f64::INFINITY).unwrap();
        let stop = AtomicBool::new(false);
        let mut buf = Vec::new();
        let mut session = Session {
            emitter: Emitter::new(&mut buf, crate::output::Format::Plain),
            limit: Some(3),
            stop: &stop,
            progress: None,
        };
        session.emit(&Mode::Single(range)).unwrap();
        assert_eq!(session.emitter.rows(), 3);
        drop(session);
        assert_eq!(String::from_utf8(buf).unwrap(), "0\n1\n2\n");

        stop.store(true, Ordering::Relaxed);
        let mut buf = Vec::new();
        let mut session = Session {
            emitter: Emitter::new(&mut buf, crate::output::Format::Plain),
            limit: None,
            stop: &stop,
            progress: None,
        };
        session.emit(&Mode::Single(range)).unwrap();
        assert_eq!(session.emitter.rows(), 0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_limit_on_large_grid() {
        let named = |name: &str| NamedRange {
            name: name.to_string(),
            range: FloatRange::to(100_000.).unwrap(),
        };
        let grid = Grid::expand(&[named("a"), named("b")]).unwrap();
        let mode = Mode::Grid(grid);
        assert_eq!(mode.len(), Some(10_000_000_000));

        let stop = AtomicBool::new(false);
        let mut buf = Vec::new();
        let mut session = Session {
            emitter: Emitter::new(&mut buf, crate::output::Format::Csv),
            limit: Some(2),
            stop: &stop,
            progress: None,
        };
        session.emit(&mode).unwrap();
        assert_eq!(session.emitter.rows(), 2);
        drop(session);
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\n0,0\n0,1\n");
    }
}
