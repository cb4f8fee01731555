use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Param};
use crate::float_range::{self, FloatRange};
use crate::read_file;

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub ranges: Vec<RangeConfig>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RangeConfig {
    pub name: String,
    pub start: Option<Bound>,
    #[serde(default)]
    pub end: Option<Bound>,
    #[serde(default, alias = "increment")]
    pub step: Option<Bound>,
}

/// A range argument as written in JSON. Strings allow `"inf"` and `"-inf"`,
/// which JSON numbers cannot express.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Bound {
    Number(f64),
    Text(String),
}

impl Bound {
    fn resolve(&self, param: Param) -> crate::RangeResult<f64> {
        match self {
            Bound::Number(n) => Ok(*n),
            Bound::Text(text) => float_range::parse_number(param, text),
        }
    }
}

impl RangeConfig {
    pub fn to_range(&self) -> Result<FloatRange, ConfigError> {
        let resolve = |bound: &Option<Bound>, param| bound.as_ref().map(|b| b.resolve(param)).transpose();

        let range = resolve(&self.start, Param::Start)
            .and_then(|start| {
                let end = resolve(&self.end, Param::End)?;
                let step = resolve(&self.step, Param::Step)?;
                float_range::range(start, end, step)
            })
            .map_err(|e| ConfigError::range(&self.name, e))?;

        Ok(range)
    }
}

/// A config entry after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRange {
    pub name: String,
    pub range: FloatRange,
}

impl Config {
    /// Validates every entry, reporting the first one that fails.
    pub fn ranges(&self) -> Result<Vec<NamedRange>, ConfigError> {
        if self.ranges.is_empty() {
            return Err(ConfigError::Empty);
        }

        self.ranges
            .iter()
            .map(|r| {
                Ok(NamedRange {
                    name: r.name.clone(),
                    range: r.to_range()?,
                })
            })
            .collect()
    }

    /// Validated ranges restricted to `names`, in the order given. An empty
    /// selection returns every range.
    pub fn select(&self, names: &[String]) -> Result<Vec<NamedRange>, ConfigError> {
        let all = self.ranges()?;
        if names.is_empty() {
            return Ok(all);
        }

        names
            .iter()
            .map(|name| {
                all.iter()
                    .find(|r| &r.name == name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownRange(name.clone()))
            })
            .collect()
    }
}

pub fn parse_config(fp: &str) -> Result<Config, ConfigError> {
    let contents = read_file(fp)?;

    let config: Config = serde_json::from_str(&contents)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;

    fn config(json: &str) -> Config {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_text_bounds() {
        let cfg = config(
            r#"{ "ranges": [
                { "name": "alpha", "start": 0, "end": 1, "step": 0.25 },
                { "name": "count", "start": 3 },
                { "name": "forever", "start": 0, "end": "inf" },
                { "name": "down", "start": "-2", "increment": 1 }
            ] }"#,
        );
        let ranges = cfg.ranges().unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].range.iter().collect::<Vec<_>>(), [0., 0.25, 0.5, 0.75]);
        assert_eq!(ranges[1].range.len(), Some(3));
        assert!(!ranges[2].range.is_bounded());
        assert_eq!(ranges[3].range.iter().collect::<Vec<_>>(), [0., -1.]);
    }

    #[test]
    fn test_invalid_entry_reports_name() {
        let cfg = config(r#"{ "ranges": [ { "name": "bad", "start": 0, "end": "dafds" } ] }"#);
        match cfg.ranges().unwrap_err() {
            ConfigError::Range { name, source } => {
                assert_eq!(name, "bad");
                assert_eq!(source.param(), Param::End);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_start() {
        let cfg = config(r#"{ "ranges": [ { "name": "empty" } ] }"#);
        match cfg.ranges().unwrap_err() {
            ConfigError::Range { source, .. } => {
                assert!(matches!(source, RangeError::InvalidArgument { param: Param::Start, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select() {
        let cfg = config(r#"{ "ranges": [ { "name": "a", "start": 1 }, { "name": "b", "start": 2 } ] }"#);
        let picked = cfg.select(&["b".to_string(), "a".to_string()]).unwrap();
        assert_eq!(picked[0].name, "b");
        assert_eq!(picked[1].name, "a");
        assert_eq!(cfg.select(&[]).unwrap().len(), 2);
        assert!(matches!(
            cfg.select(&["c".to_string()]),
            Err(ConfigError::UnknownRange(name)) if name == "c"
        ));
    }

    #[test]
    fn test_no_ranges() {
        assert!(matches!(config(r#"{ "ranges": [] }"#).ranges(), Err(ConfigError::Empty)));
    }
}
