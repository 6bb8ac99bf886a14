//! Assessment scoring core: dimension catalog, pure score aggregation,
//! lifecycle state machine, and the adapter contracts the core consumes.

pub mod aggregation;
pub mod catalog;
pub mod domain;
pub mod lifecycle;
pub mod repository;
pub mod service;


pub use aggregation::{AggregationConfig, ScoreAggregator, ScoringContext};
pub use catalog::Dimension;
pub use domain::{
    Assessment, AssessmentId, AssessmentKind, Company, CompanyId, CompanyState, CompositeScore,
    DimensionScore, Industry, IndustryId, ValidationError,
};
pub use lifecycle::{AssessmentStatus, TransitionError};
pub use repository::{
    composite_cache_key, AssessmentRepository, CacheError, CompositeCache, RepositoryError,
};
pub use service::{AssessmentService, AssessmentServiceError};
