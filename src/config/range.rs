//! Catalog page ranges

use crate::ConfigError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// An inclusive range of catalog page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Creates a range without validation
    ///
    /// A range whose start is past its end is allowed and covers no pages.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The page numbers covered by this range, in ascending order
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of catalog pages in the range
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parses the `START:END` form accepted on the command line
///
/// Both bounds must be integers with `0 < START <= END`.
impl FromStr for PageRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidRange {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected START:END, e.g. 1:5"))?;

        let start: i64 = start
            .trim()
            .parse()
            .map_err(|_| invalid("START is not an integer"))?;
        let end: i64 = end
            .trim()
            .parse()
            .map_err(|_| invalid("END is not an integer"))?;

        if start <= 0 {
            return Err(invalid("START must be greater than 0"));
        }
        if start > end {
            return Err(invalid("START must not be greater than END"));
        }

        let start = u32::try_from(start).map_err(|_| invalid("START is too large"))?;
        let end = u32::try_from(end).map_err(|_| invalid("END is too large"))?;

        Ok(Self { start, end })
    }
}
