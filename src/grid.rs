// grid.rs - Allowed single-molecule energy levels

use crate::error::SamplerError;
use std::ops::RangeInclusive;

/// Largest number of levels a grid may hold. Every run keeps one histogram
/// bucket per level (one per worker chunk in parallel runs).
pub const MAX_LEVELS: usize = 1 << 24;

/// Ordered, unit-spaced integer energy levels `E_min..=E_max`.
///
/// Index `i` corresponds to energy `E_min + i`. Every level has weight one
/// (no degeneracies). Levels are computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyGrid {
    e_min: i64,
    e_max: i64,
    len: usize,
}

impl EnergyGrid {
    pub fn uniform(e_min: i64, e_max: i64) -> Result<Self, SamplerError> {
        if e_min > e_max {
            return Err(SamplerError::InvalidRange { e_min, e_max });
        }
        let span = i128::from(e_max) - i128::from(e_min) + 1;
        let len = usize::try_from(span)
            .ok()
            .filter(|&len| len <= MAX_LEVELS)
            .ok_or(SamplerError::TooManyLevels {
                e_min,
                e_max,
                max: MAX_LEVELS,
            })?;
        Ok(Self { e_min, e_max, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a grid holds at least one level.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn levels(&self) -> RangeInclusive<i64> {
        self.e_min..=self.e_max
    }

    #[inline]
    pub fn energy(&self, index: usize) -> i64 {
        debug_assert!(index < self.len);
        self.e_min + index as i64
    }

    pub fn min(&self) -> i64 {
        self.e_min
    }

    pub fn max(&self) -> i64 {
        self.e_max
    }

    /// Grid index holding `energy`, or `None` when the value is off-grid.
    ///
    /// Matches resolve to the first position carrying the value; levels are
    /// unique here, so that position is simply `energy - E_min`.
    #[inline]
    pub fn index_of(&self, energy: i64) -> Option<usize> {
        let offset = energy.checked_sub(self.e_min)?;
        let index = usize::try_from(offset).ok()?;
        (index < self.len).then_some(index)
    }

    /// Smallest and largest total energy `molecules` molecules can carry,
    /// or `None` if either bound overflows.
    pub fn reachable_range(&self, molecules: usize) -> Option<(i64, i64)> {
        let n = i64::try_from(molecules).ok()?;
        Some((self.e_min.checked_mul(n)?, self.e_max.checked_mul(n)?))
    }

    pub fn can_reach(&self, molecules: usize, e_total: i64) -> bool {
        self.reachable_range(molecules)
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&e_total))
    }
}
