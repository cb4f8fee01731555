//! Lazy, evenly spaced `f64` ranges over `[start, end)`.
//!
//! A [`FloatRange`] is an immutable, validated parameter record. Every call
//! to [`FloatRange::iter`] hands out a fresh [`Steps`] cursor, so the same
//! range can be walked any number of times.
//!
//! ```
//! use range_iterator::{range, FloatRange};
//!
//! let r = FloatRange::new(0., 3., 1.).unwrap();
//! assert_eq!(r.iter().collect::<Vec<_>>(), [0., 1., 2.]);
//!
//! // A single negative argument counts down from zero.
//! let r = range(Some(-3.), None, None).unwrap();
//! assert_eq!(r.iter().collect::<Vec<_>>(), [0., -1., -2.]);
//!
//! // Unbounded ranges stay lazy.
//! let r = FloatRange::to(f64::INFINITY).unwrap();
//! assert_eq!(r.iter().nth(1_000), Some(1_000.));
//! ```

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{Param, RangeError, RangeResult};

/// Validated range parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    start: f64,
    end: f64,
    step: f64,
    steps: f64,
}

/// Builds a range from optional arguments.
///
/// With `end` omitted the range is implicit: it runs from `0` to `start`,
/// and a negative `start` flips the sign of `step`. With `end` given no
/// direction is inferred, so `range(Some(0.), Some(-5.), None)` is empty.
///
/// `step` defaults to `1` and must be finite and non-zero. `end` may be
/// infinite, in which case the range never ends.
pub fn range(start: Option<f64>, end: Option<f64>, step: Option<f64>) -> RangeResult<FloatRange> {
    let start = match start {
        None => {
            return Err(RangeError::invalid(
                Param::Start,
                "must give at least one numeric parameter",
            ));
        }
        Some(start) if start.is_nan() => {
            return Err(RangeError::invalid(Param::Start, "must be a number, got NaN"));
        }
        Some(start) => start,
    };

    let mut step = step.unwrap_or(1.);

    let (start, end) = match end {
        None => {
            if start < 0. {
                step = -step;
            }
            (0., start)
        }
        Some(end) if end.is_nan() => {
            return Err(RangeError::invalid(
                Param::End,
                "must be a number or not given, got NaN",
            ));
        }
        Some(end) => {
            if !start.is_finite() {
                return Err(RangeError::invalid(
                    Param::Start,
                    format!("must be finite when an end is given, got {start}"),
                ));
            }
            (start, end)
        }
    };

    if step == 0. || !step.is_finite() {
        return Err(RangeError::invalid(
            Param::Step,
            format!("must not be 0, NaN or infinite, got {step}"),
        ));
    }

    let range = FloatRange {
        start,
        end,
        step,
        steps: (end - start) / step,
    };
    debug!(start, end, step, steps = range.steps, "built range");
    Ok(range)
}

impl FloatRange {
    /// A range with an explicit end. No direction is inferred.
    pub fn new(start: f64, end: f64, step: f64) -> RangeResult<FloatRange> {
        range(Some(start), Some(end), Some(step))
    }

    /// The implicit range `[0, end)`, counting down when `end` is negative.
    pub fn to(end: f64) -> RangeResult<FloatRange> {
        range(Some(end), None, None)
    }

    /// Builds a range from textual arguments, as read from a command line or
    /// a config file. `"inf"` and `"-inf"` are accepted for unbounded ends.
    pub fn parse(start: Option<&str>, end: Option<&str>, step: Option<&str>) -> RangeResult<FloatRange> {
        let Some(start) = start else {
            return range(None, None, None);
        };
        let start = parse_number(Param::Start, start)?;
        let end = end.map(|end| parse_number(Param::End, end)).transpose()?;
        let step = step.map(|step| parse_number(Param::Step, step)).transpose()?;
        range(Some(start), end, step)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// `(end - start) / step`. May be fractional, negative or infinite.
    pub fn total_steps(&self) -> f64 {
        self.steps
    }

    /// Whether the range produces a finite number of values.
    pub fn is_bounded(&self) -> bool {
        self.steps != f64::INFINITY
    }

    /// Number of values produced, or `None` for an unbounded range.
    ///
    /// Counts above `usize::MAX` saturate.
    pub fn len(&self) -> Option<usize> {
        self.is_bounded().then(|| self.steps.ceil().max(0.) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.steps <= 0.
    }

    /// Returns a fresh cursor positioned before the first value.
    pub fn iter(&self) -> Steps {
        Steps {
            start: self.start,
            step: self.step,
            total: self.steps,
            done: 0,
            state: CursorState::NotStarted,
        }
    }
}

impl IntoIterator for &FloatRange {
    type Item = f64;
    type IntoIter = Steps;

    fn into_iter(self) -> Steps {
        self.iter()
    }
}

impl IntoIterator for FloatRange {
    type Item = f64;
    type IntoIter = Steps;

    fn into_iter(self) -> Steps {
        self.iter()
    }
}

pub(crate) fn parse_number(param: Param, text: &str) -> RangeResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| RangeError::invalid(param, format!("expected a number, got {text:?}")))
}

/// Progress of a single cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    NotStarted,
    Producing,
    Exhausted,
}

/// One traversal of a [`FloatRange`].
///
/// Each value is computed as `start + steps_done * step` so rounding error
/// does not build up over long runs.
#[derive(Debug, Clone)]
pub struct Steps {
    start: f64,
    step: f64,
    total: f64,
    done: u64,
    state: CursorState,
}

impl Steps {
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of values produced (or skipped) so far.
    pub fn steps_done(&self) -> u64 {
        self.done
    }

    fn remaining(&self) -> Option<f64> {
        if self.total == f64::INFINITY {
            return None;
        }
        Some((self.total.ceil() - self.done as f64).max(0.))
    }
}

impl Iterator for Steps {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == CursorState::Exhausted {
            return None;
        }

        if self.done as f64 >= self.total {
            trace!(steps_done = self.done, "cursor exhausted");
            self.state = CursorState::Exhausted;
            return None;
        }

        // The counter cannot move past u64::MAX; the cursor ends there.
        let Some(next) = self.done.checked_add(1) else {
            trace!(steps_done = self.done, "cursor counter exhausted");
            self.state = CursorState::Exhausted;
            return None;
        };

        let res = self.start + self.done as f64 * self.step;
        self.done = next;
        self.state = CursorState::Producing;
        Some(res)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if self.state != CursorState::Exhausted {
            self.done = self.done.saturating_add(n as u64);
        }
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == CursorState::Exhausted {
            return (0, Some(0));
        }
        match self.remaining() {
            Some(n) if n < usize::MAX as f64 => (n as usize, Some(n as usize)),
            _ => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Steps {}
