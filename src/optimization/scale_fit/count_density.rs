//! Expected-count density of the parent sample over a search window.
use crate::{catalog::Bounds, density::lookup::LookupTable};

/// `CountDensity` — `factor · lookup(x)`, integrating to `count` over
/// `window`.
///
/// Fields
/// ------
/// - `factor`: `count / ∫_window lookup`.
/// - `lookup`: parent KDE re-tabulated on the scale-fit grid.
/// - `count`: parent observations inside `window` (inclusive).
/// - `window`: the search bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CountDensity {
    factor: f64,
    lookup: LookupTable,
    count: usize,
    window: Bounds,
}

impl CountDensity {
    pub fn new(factor: f64, lookup: LookupTable, count: usize, window: Bounds) -> Self {
        Self { factor, lookup, count, window }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn window(&self) -> Bounds {
        self.window
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.factor * self.lookup.evaluate(x)
    }
}
