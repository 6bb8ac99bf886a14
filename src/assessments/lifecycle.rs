use serde::{Deserialize, Serialize};

use super::catalog::Dimension;
use super::domain::{AssessmentId, DimensionScore};

/// Lifecycle status of an assessment. Statuses advance one step at a time;
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Draft,
    InProgress,
    Submitted,
    Approved,
    Rejected,
}

impl AssessmentStatus {
    /// Statuses a transition may legally reach from `self`. `Submitted` may
    /// return to `InProgress` when an assessment is sent back for revision.
    pub const fn allowed_targets(self) -> &'static [AssessmentStatus] {
        match self {
            Self::Draft => &[Self::InProgress],
            Self::InProgress => &[Self::Submitted],
            Self::Submitted => &[Self::Approved, Self::Rejected, Self::InProgress],
            Self::Approved | Self::Rejected => &[],
        }
    }

    pub fn can_transition_to(self, target: AssessmentStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Whether dimension scores may be added, replaced, or removed.
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::InProgress)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// Lifecycle violations, carrying enough detail for callers to render a
/// precise message. Status is never changed when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("assessment {assessment_id} cannot move from {current:?} to {requested:?}")]
    Invalid {
        assessment_id: AssessmentId,
        current: AssessmentStatus,
        requested: AssessmentStatus,
    },
    #[error("assessment {assessment_id} is missing scores for {}", missing_labels(.missing))]
    Incomplete {
        assessment_id: AssessmentId,
        missing: Vec<Dimension>,
    },
}

fn missing_labels(missing: &[Dimension]) -> String {
    missing
        .iter()
        .map(|dimension| dimension.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Catalog dimensions not yet covered by `scores`, in canonical order.
pub fn missing_dimensions(scores: &[DimensionScore]) -> Vec<Dimension> {
    Dimension::ordered()
        .into_iter()
        .filter(|dimension| !scores.iter().any(|score| score.dimension == *dimension))
        .collect()
}

/// Validate a requested transition, including the completeness rule for
/// submission: every catalog dimension must be scored before an assessment
/// may enter `Submitted`.
pub fn check_transition(
    assessment_id: &AssessmentId,
    current: AssessmentStatus,
    requested: AssessmentStatus,
    scores: &[DimensionScore],
) -> Result<(), TransitionError> {
    if !current.can_transition_to(requested) {
        return Err(TransitionError::Invalid {
            assessment_id: assessment_id.clone(),
            current,
            requested,
        });
    }

    if requested == AssessmentStatus::Submitted {
        let missing = missing_dimensions(scores);
        if !missing.is_empty() {
            return Err(TransitionError::Incomplete {
                assessment_id: assessment_id.clone(),
                missing,
            });
        }
    }

    Ok(())
}
