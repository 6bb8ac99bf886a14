use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::Dimension;
use super::lifecycle::AssessmentStatus;

/// Identifier wrapper for industry reference records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndustryId(pub String);

/// Identifier wrapper for company records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// Identifier wrapper for assessment records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl std::fmt::Display for IndustryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sector classification with the expected readiness for companies in that
/// sector absent company-specific information. Immutable reference data,
/// seeded administratively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: IndustryId,
    pub name: String,
    /// Baseline readiness for the sector, a percentage-like value in [0,100].
    pub baseline_readiness: f64,
}

/// Visibility lifecycle for a company record. Archived companies stay out of
/// normal listings but remain valid targets for historical assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyState {
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub ticker: Option<String>,
    pub industry_id: IndustryId,
    /// Shifts the industry baseline above or below the sector prior; 0.5 is
    /// baseline-neutral under the default aggregation constants.
    pub position_factor: f64,
    pub state: CompanyState,
}

/// Why an evaluation event was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    DueDiligence,
    Screening,
    Monitoring,
    ExitPrep,
}

impl AssessmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DueDiligence => "Due Diligence",
            Self::Screening => "Screening",
            Self::Monitoring => "Monitoring",
            Self::ExitPrep => "Exit Preparation",
        }
    }
}

/// One dimension's evaluation within an assessment. At most one live score
/// per dimension per assessment; re-scoring replaces the prior entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Bounded to [0,100].
    pub score: f64,
    /// Bounded to [0,1]. `None` or `Some(0.0)` falls back to the catalog
    /// default for the dimension.
    pub weight: Option<f64>,
    /// Assessor confidence in the score, in [0,1].
    pub confidence: f64,
    /// Supporting evidence items behind the score. Informational: more
    /// evidence tightens the composite interval but never gates acceptance.
    pub evidence_count: u32,
}

impl DimensionScore {
    pub const DEFAULT_CONFIDENCE: f64 = 0.8;

    pub fn new(dimension: Dimension, score: f64) -> Self {
        Self {
            dimension,
            score,
            weight: None,
            confidence: Self::DEFAULT_CONFIDENCE,
            evidence_count: 0,
        }
    }

    /// The weight the aggregator should use for this entry.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(weight) if weight > 0.0 => weight,
            _ => self.dimension.default_weight(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=100.0).contains(&self.score) {
            return Err(ValidationError::ScoreOutOfRange {
                dimension: self.dimension,
                value: self.score,
            });
        }
        if let Some(weight) = self.weight {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ValidationError::WeightOutOfRange {
                    dimension: self.dimension,
                    value: weight,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange {
                dimension: self.dimension,
                value: self.confidence,
            });
        }
        Ok(())
    }
}

/// Derived readiness result: the composite value plus the uncertainty band
/// around it. Never edited directly; recomputed whenever the score set
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl CompositeScore {
    /// Width of the confidence band.
    pub fn interval_width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Copy rounded to two decimals, the precision external representations
    /// are required to preserve.
    pub fn rounded(&self) -> Self {
        let round2 = |value: f64| (value * 100.0).round() / 100.0;
        Self {
            value: round2(self.value),
            lower: round2(self.lower),
            upper: round2(self.upper),
        }
    }
}

/// One evaluation event for a company. Owns its dimension scores (held by
/// the repository adapter) and carries the derived composite alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub company_id: CompanyId,
    pub kind: AssessmentKind,
    pub assessed_on: NaiveDate,
    pub assessor: String,
    pub status: AssessmentStatus,
    /// `None` until at least one dimension score exists; always consistent
    /// with the persisted score set.
    pub composite: Option<CompositeScore>,
    /// Optimistic concurrency token; bumped on every committed write.
    pub version: u64,
}

/// Malformed or out-of-range input to the aggregator or to score creation.
/// Rejecting the offending request has no effect on other assessments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("cannot aggregate an empty dimension score set")]
    EmptyScoreSet,
    #[error("score {value} for {dimension:?} outside [0,100]")]
    ScoreOutOfRange { dimension: Dimension, value: f64 },
    #[error("weight {value} for {dimension:?} outside [0,1]")]
    WeightOutOfRange { dimension: Dimension, value: f64 },
    #[error("confidence {value} for {dimension:?} outside [0,1]")]
    ConfidenceOutOfRange { dimension: Dimension, value: f64 },
}
