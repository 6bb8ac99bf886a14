use serde::{Deserialize, Serialize};

/// Constants controlling composite aggregation. The defaults are the locked
/// production values; regression tests pin the numbers they produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Share of the composite taken from the weighted dimension mean; the
    /// remainder comes from the position-adjusted industry baseline.
    pub dimension_blend: f64,
    /// Interval half-width at full confidence. Kept above zero to model
    /// irreducible uncertainty.
    pub min_half_width: f64,
    /// Interval half-width at zero confidence with no supporting evidence.
    pub max_half_width: f64,
    /// Evidence count at which the confidence-driven spread is halved.
    pub evidence_scale: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            dimension_blend: 0.7,
            min_half_width: 2.0,
            max_half_width: 25.0,
            evidence_scale: 10.0,
        }
    }
}
