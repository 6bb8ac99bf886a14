//! Scoring engine for structured AI-readiness assessments.
//!
//! The crate models one evaluation event per company: a fixed catalog of
//! seven readiness dimensions, a pure aggregation step that folds per-dimension
//! scores into a composite value with a confidence band, and a lifecycle state
//! machine that controls when scores may change. Storage and caching are
//! consumed through narrow adapter traits so callers can plug in their own
//! engines (the tests ship in-memory doubles).

pub mod assessments;
pub mod config;
pub mod telemetry;

pub use assessments::{
    AssessmentService, AssessmentServiceError, AssessmentStatus, CompositeScore, Dimension,
    DimensionScore, ScoreAggregator,
};
