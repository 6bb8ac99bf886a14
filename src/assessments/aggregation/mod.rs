//! Pure composite scoring: weighted dimension mean, contextual blend against
//! the industry baseline, and a confidence band derived from per-dimension
//! confidence and evidence volume. No side effects, no clock, no randomness,
//! which is what keeps this independently testable.

mod config;
mod interval;
mod weights;

pub use config::AggregationConfig;

use serde::{Deserialize, Serialize};

use super::domain::{CompositeScore, DimensionScore, ValidationError};

/// Company and industry context feeding the contextual blend step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringContext {
    /// Company-specific adjustment against the sector prior; 0.5 is neutral.
    pub position_factor: f64,
    /// Expected readiness for the sector (`h_r_base`), in [0,100].
    pub industry_baseline: f64,
}

/// Stateless aggregator applying the configured constants to a score set.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    config: AggregationConfig,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(AggregationConfig::default())
    }
}

impl ScoreAggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Fold a non-empty score set into a composite value with a confidence
    /// band. Fails with `ValidationError` on an empty set or any entry
    /// outside its bounds; never mutates anything.
    pub fn aggregate(
        &self,
        scores: &[DimensionScore],
        context: &ScoringContext,
    ) -> Result<CompositeScore, ValidationError> {
        let means = weights::weighted_means(scores)?;

        let adjusted_baseline =
            (context.industry_baseline * (0.5 + context.position_factor)).clamp(0.0, 100.0);
        let blend = self.config.dimension_blend;
        let composite = blend * means.score + (1.0 - blend) * adjusted_baseline;

        let half_width = interval::half_width(&self.config, means.confidence, means.total_evidence);
        let (lower, upper) = interval::clamped_band(composite, half_width);

        Ok(CompositeScore {
            value: composite,
            lower,
            upper,
        })
    }
}
