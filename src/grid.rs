//! Cartesian products of named ranges.

use std::iter::FusedIterator;

use crate::config::NamedRange;
use crate::error::ConfigError;
use crate::float_range::FloatRange;

/// Every combination of values drawn from a set of bounded ranges.
///
/// Rows are computed on demand, so a grid of any size costs one row at a
/// time.
#[derive(Debug, Clone)]
pub struct Grid {
    names: Vec<String>,
    ranges: Vec<FloatRange>,
    len: usize,
}

impl Grid {
    /// Prepares `ranges` for row-major iteration: the last range varies
    /// fastest.
    pub fn expand(ranges: &[NamedRange]) -> Result<Grid, ConfigError> {
        let len = Grid::count(ranges)?;

        Ok(Grid {
            names: ranges.iter().map(|r| r.name.clone()).collect(),
            ranges: ranges.iter().map(|r| r.range).collect(),
            len,
        })
    }

    /// Number of combinations `ranges` expand to. Saturates at `usize::MAX`.
    pub fn count(ranges: &[NamedRange]) -> Result<usize, ConfigError> {
        if ranges.is_empty() {
            return Ok(0);
        }
        ranges.iter().try_fold(1usize, |acc, r| {
            let len = r
                .range
                .len()
                .ok_or_else(|| ConfigError::Unbounded(r.name.clone()))?;
            Ok(acc.saturating_mul(len))
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// A fresh iterator over the combinations.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            grid: self,
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn row(&self, mut index: usize) -> Vec<f64> {
        let mut row = vec![0.; self.ranges.len()];
        for (slot, range) in row.iter_mut().zip(&self.ranges).rev() {
            // Every range is non-empty whenever a row exists.
            let len = range.len().unwrap_or(1).max(1);
            *slot = range.iter().nth(index % len).unwrap_or(f64::NAN);
            index /= len;
        }
        row
    }
}

/// Row iterator returned by [`Grid::rows`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    grid: &'a Grid,
    next: usize,
}

impl Iterator for Rows<'_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        if self.next >= self.grid.len {
            return None;
        }
        let row = self.grid.row(self.next);
        self.next += 1;
        Some(row)
    }

    fn nth(&mut self, n: usize) -> Option<Vec<f64>> {
        self.next = self.next.saturating_add(n).min(self.grid.len);
        self.next()
    }

    fn last(self) -> Option<Vec<f64>> {
        (self.next < self.grid.len).then(|| self.grid.row(self.grid.len - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.grid.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}
