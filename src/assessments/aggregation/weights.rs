use crate::assessments::domain::{DimensionScore, ValidationError};

pub(crate) struct WeightedMeans {
    pub score: f64,
    pub confidence: f64,
    pub total_evidence: u64,
}

/// Normalize the effective weights across the provided dimensions and fold
/// scores and confidences into weighted means. Weights divide by their sum,
/// so they total 1 even when some dimensions are missing or the entries
/// carry non-catalog weights.
pub(crate) fn weighted_means(scores: &[DimensionScore]) -> Result<WeightedMeans, ValidationError> {
    if scores.is_empty() {
        return Err(ValidationError::EmptyScoreSet);
    }

    for score in scores {
        score.validate()?;
    }

    let weight_sum: f64 = scores.iter().map(DimensionScore::effective_weight).sum();

    let mut score_mean = 0.0;
    let mut confidence_mean = 0.0;
    let mut total_evidence: u64 = 0;
    for entry in scores {
        let normalized = entry.effective_weight() / weight_sum;
        score_mean += normalized * entry.score;
        confidence_mean += normalized * entry.confidence;
        total_evidence += u64::from(entry.evidence_count);
    }

    Ok(WeightedMeans {
        score: score_mean,
        confidence: confidence_mean,
        total_evidence,
    })
}
