pub mod args;
pub mod config;
pub mod error;
pub mod float_range;
pub mod grid;
pub mod logger;
pub mod output;
pub mod run;

use std::{fs, path::Path};

pub use error::{ConfigError, Param, RangeError, RangeResult};
pub use float_range::{CursorState, FloatRange, Steps, range};

pub fn read_file(fp: &str) -> Result<String, ConfigError> {
    let path = Path::new(fp);
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
