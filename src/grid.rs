//! The shared sample grid and the rules for replacing it.

use std::cell::Cell;
use std::rc::Rc;

use tracing::info;

/// Fewest points a grid may hold.
pub const MIN_POINTS: usize = 2;

/// `len` evenly spaced values from 0 to 1 inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    values: Vec<f64>,
}

impl SampleGrid {
    /// Builds a grid of `len` points, raised to [`MIN_POINTS`] if smaller.
    pub fn new(len: usize) -> Self {
        let len = len.max(MIN_POINTS);
        let step = 1.0 / (len - 1) as f64;
        let mut values: Vec<f64> = (0..len).map(|i| i as f64 * step).collect();
        // Pin the end so accumulated rounding never leaves it short of 1.
        values[len - 1] = 1.0;
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Set while the grid and its dependent lines are being replaced.
///
/// Clones share the same flag, so a render binding or test can watch a
/// rebuild from the outside.
#[derive(Debug, Clone, Default)]
pub struct RebuildFlag(Rc<Cell<bool>>);

impl RebuildFlag {
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Raises the flag until the returned guard is dropped.
    pub fn raise(&self) -> RebuildGuard {
        self.0.set(true);
        RebuildGuard { flag: self.clone() }
    }
}

/// Clears its [`RebuildFlag`] on drop, including during unwinding.
#[must_use = "the rebuild flag is cleared as soon as the guard is dropped"]
pub struct RebuildGuard {
    flag: RebuildFlag,
}

impl Drop for RebuildGuard {
    fn drop(&mut self) {
        self.flag.0.set(false);
    }
}

/// Owns the current grid. Only [`GridManager::rebuild`] changes its length.
#[derive(Debug)]
pub struct GridManager {
    grid: SampleGrid,
    rebuilding: RebuildFlag,
}

impl GridManager {
    pub fn new(points: usize) -> Self {
        Self {
            grid: SampleGrid::new(points),
            rebuilding: RebuildFlag::default(),
        }
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn points(&self) -> usize {
        self.grid.len()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.rebuilding.is_set()
    }

    pub fn rebuild_flag(&self) -> RebuildFlag {
        self.rebuilding.clone()
    }

    /// Replaces the grid with `points` values (at least [`MIN_POINTS`]) and
    /// runs `recreate` against the new grid with the rebuild flag raised.
    ///
    /// Returns `false` without touching anything if the count is unchanged.
    pub fn rebuild<F>(&mut self, points: usize, recreate: F) -> bool
    where
        F: FnOnce(&SampleGrid),
    {
        let points = points.max(MIN_POINTS);
        if points == self.grid.len() {
            return false;
        }

        let _guard = self.rebuilding.raise();
        info!("Rebuilding sample grid: {} -> {} points", self.grid.len(), points);
        self.grid = SampleGrid::new(points);
        recreate(&self.grid);
        true
    }
}
