use super::config::AggregationConfig;

/// Half-width of the confidence band around the composite.
///
/// Monotone decreasing in aggregate confidence and in total evidence:
/// `min + (max - min) * (1 - confidence) * 1 / (1 + evidence / scale)`.
/// Full confidence collapses to the floor; zero confidence with no evidence
/// reaches the ceiling.
pub(crate) fn half_width(
    config: &AggregationConfig,
    aggregate_confidence: f64,
    total_evidence: u64,
) -> f64 {
    let spread = config.max_half_width - config.min_half_width;
    let confidence_gap = (1.0 - aggregate_confidence).clamp(0.0, 1.0);
    let evidence_damping = 1.0 / (1.0 + total_evidence as f64 / config.evidence_scale);
    config.min_half_width + spread * confidence_gap * evidence_damping
}

/// Clamp an interval around `composite` to the valid score range.
pub(crate) fn clamped_band(composite: f64, half_width: f64) -> (f64, f64) {
    (
        (composite - half_width).clamp(0.0, 100.0),
        (composite + half_width).clamp(0.0, 100.0),
    )
}
