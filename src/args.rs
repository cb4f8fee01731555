use clap::{ArgAction, Parser};
use tracing::Level;

use crate::logger;
use crate::output::Format;

/// Print evenly spaced numbers from START up to, but excluding, END.
///
/// With a single argument the range runs from 0 towards it, counting down
/// when it is negative.
#[derive(Parser, Debug)]
#[command(name = "range-iter", version, allow_negative_numbers = true)]
pub struct Options {
    /// Inclusive start, or the excluded end when END is omitted.
    #[arg(conflicts_with = "config")]
    pub start: Option<String>,

    /// Excluded end. May be `inf` or `-inf`.
    pub end: Option<String>,

    /// Increment between values; must be finite and non-zero.
    #[arg(short, long, alias = "increment", conflicts_with = "config")]
    pub step: Option<String>,

    /// JSON file of named ranges.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only emit these ranges from the config, in this order.
    #[arg(short, long = "name", requires = "config")]
    pub names: Vec<String>,

    /// Emit every combination of the selected ranges.
    #[arg(short, long, requires = "config")]
    pub grid: bool,

    /// Stop after this many values (or grid rows).
    #[arg(short, long)]
    pub limit: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    pub format: Format,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log more; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log level, overriding `-v`.
    #[arg(long, env = "RANGE_ITER_LOG")]
    pub log_level: Option<Level>,

    /// Log as JSON.
    #[arg(long)]
    pub log_json: bool,
}

impl Options {
    pub fn level(&self) -> Level {
        self.log_level.unwrap_or_else(|| logger::level_for(self.verbose))
    }
}

pub fn get_opts() -> Options {
    Options::parse()
}
