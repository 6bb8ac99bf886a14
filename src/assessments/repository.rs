use std::time::Duration;

use super::domain::{
    Assessment, AssessmentId, Company, CompanyId, CompositeScore, DimensionScore, Industry,
    IndustryId,
};

/// Error enumeration for storage adapter failures. The core never retries
/// storage internally; `Unavailable` propagates opaquely to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment {assessment_id} was modified concurrently (expected version {expected})")]
    Conflict {
        assessment_id: AssessmentId,
        expected: u64,
    },
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// The narrow contract the scoring core requires from durable storage.
/// Implementations own filtering archived companies out of listings; loads
/// here return archived companies so historical assessments stay scoreable.
pub trait AssessmentRepository: Send + Sync {
    /// Persist a new assessment. Fails with `Conflict` on a duplicate id.
    fn insert_assessment(&self, assessment: Assessment) -> Result<(), RepositoryError>;

    fn load_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;

    fn load_scores(&self, id: &AssessmentId) -> Result<Vec<DimensionScore>, RepositoryError>;

    fn load_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;

    fn load_industry(&self, id: &IndustryId) -> Result<Option<Industry>, RepositoryError>;

    /// Persist an assessment together with its full score set as one logical
    /// transaction: either both land or neither is considered committed.
    /// Fails with `Conflict` when the stored version no longer matches
    /// `expected_version`; the stored version becomes `assessment.version`.
    fn commit(
        &self,
        assessment: Assessment,
        scores: Vec<DimensionScore>,
        expected_version: u64,
    ) -> Result<(), RepositoryError>;
}

/// Cache transport failure, propagated without interpretation.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache transport unavailable: {0}")]
    Transport(String),
}

/// TTL-based cache for derived composites. Entries are advisory: a miss is
/// always safe, fabricated data never is, so `invalidate` must complete
/// before the write that changed the underlying scores is acknowledged.
pub trait CompositeCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CompositeScore>, CacheError>;
    fn set(&self, key: &str, value: &CompositeScore, ttl: Duration) -> Result<(), CacheError>;
    fn invalidate(&self, key: &str) -> Result<(), CacheError>;
}

/// Cache keys are scoped by entity type and identifier; composites live
/// under `composite:{assessment_id}`.
pub fn composite_cache_key(id: &AssessmentId) -> String {
    format!("composite:{id}")
}
