use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::aggregation::{AggregationConfig, ScoreAggregator, ScoringContext};
use super::catalog::Dimension;
use super::domain::{
    Assessment, AssessmentId, AssessmentKind, CompanyId, CompositeScore, DimensionScore,
    IndustryId, ValidationError,
};
use super::lifecycle::{check_transition, AssessmentStatus, TransitionError};
use super::repository::{
    composite_cache_key, AssessmentRepository, CacheError, CompositeCache, RepositoryError,
};

/// Service composing the repository adapter, the composite cache, and the
/// aggregator into the lifecycle operations callers consume in-process.
pub struct AssessmentService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
    aggregator: ScoreAggregator,
    cache_ttl: Duration,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R, C> AssessmentService<R, C>
where
    R: AssessmentRepository + 'static,
    C: CompositeCache + 'static,
{
    pub fn new(
        repository: Arc<R>,
        cache: Arc<C>,
        config: AggregationConfig,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            aggregator: ScoreAggregator::new(config),
            cache_ttl,
        }
    }

    /// Open a new evaluation event in `Draft` with no scores and no
    /// composite. Archived companies are accepted; only unknown ids fail.
    pub fn create_assessment(
        &self,
        company_id: CompanyId,
        kind: AssessmentKind,
        assessed_on: NaiveDate,
        assessor: String,
    ) -> Result<Assessment, AssessmentServiceError> {
        self.repository
            .load_company(&company_id)?
            .ok_or_else(|| AssessmentServiceError::CompanyNotFound(company_id.clone()))?;

        let assessment = Assessment {
            id: next_assessment_id(),
            company_id,
            kind,
            assessed_on,
            assessor,
            status: AssessmentStatus::Draft,
            composite: None,
            version: 1,
        };

        self.repository.insert_assessment(assessment.clone())?;
        info!(assessment_id = %assessment.id, kind = kind.label(), "assessment created");
        Ok(assessment)
    }

    /// Add a dimension score, or replace the existing one for the same
    /// dimension, then synchronously re-aggregate the composite and persist
    /// both under an optimistic version check. The cached composite is
    /// invalidated before this returns. Idempotent for identical input.
    pub fn add_or_replace_score(
        &self,
        assessment_id: &AssessmentId,
        score: DimensionScore,
    ) -> Result<CompositeScore, AssessmentServiceError> {
        score.validate()?;

        let mut assessment = self.load_required(assessment_id)?;
        self.require_editable(&assessment)?;

        let mut scores = self.repository.load_scores(assessment_id)?;
        match scores
            .iter()
            .position(|existing| existing.dimension == score.dimension)
        {
            Some(index) => scores[index] = score,
            None => scores.push(score),
        }

        let context = self.scoring_context(&assessment.company_id)?;
        let composite = self.aggregator.aggregate(&scores, &context)?;
        assessment.composite = Some(composite);

        self.commit_and_invalidate(assessment, scores)?;
        Ok(composite)
    }

    /// Remove one dimension's score. Removing the last score nulls the
    /// composite rather than leaving a value derived from nothing; removing
    /// an unscored dimension is a no-op.
    pub fn remove_score(
        &self,
        assessment_id: &AssessmentId,
        dimension: Dimension,
    ) -> Result<Option<CompositeScore>, AssessmentServiceError> {
        let mut assessment = self.load_required(assessment_id)?;
        self.require_editable(&assessment)?;

        let mut scores = self.repository.load_scores(assessment_id)?;
        let before = scores.len();
        scores.retain(|existing| existing.dimension != dimension);
        if scores.len() == before {
            return Ok(assessment.composite);
        }

        let composite = if scores.is_empty() {
            None
        } else {
            let context = self.scoring_context(&assessment.company_id)?;
            Some(self.aggregator.aggregate(&scores, &context)?)
        };
        assessment.composite = composite;

        self.commit_and_invalidate(assessment, scores)?;
        Ok(composite)
    }

    /// Move an assessment to `target` if the transition table and, for
    /// submission, the completeness rule allow it. Illegal requests leave
    /// the status untouched.
    pub fn transition_status(
        &self,
        assessment_id: &AssessmentId,
        target: AssessmentStatus,
    ) -> Result<Assessment, AssessmentServiceError> {
        let mut assessment = self.load_required(assessment_id)?;
        let scores = self.repository.load_scores(assessment_id)?;

        check_transition(assessment_id, assessment.status, target, &scores)?;

        let previous = assessment.status;
        assessment.status = target;
        let expected = assessment.version;
        assessment.version += 1;
        self.repository.commit(assessment.clone(), scores, expected)?;

        info!(
            assessment_id = %assessment.id,
            from = previous.label(),
            to = target.label(),
            "assessment status changed"
        );
        Ok(assessment)
    }

    /// Current composite for an assessment: the cached value when present,
    /// otherwise recomputed from the persisted score set and re-cached.
    /// `None` while no dimension has been scored.
    pub fn composite(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Option<CompositeScore>, AssessmentServiceError> {
        let key = composite_cache_key(assessment_id);
        if let Some(cached) = self.cache.get(&key)? {
            debug!(assessment_id = %assessment_id, "composite served from cache");
            return Ok(Some(cached));
        }

        let assessment = self.load_required(assessment_id)?;
        let scores = self.repository.load_scores(assessment_id)?;
        if scores.is_empty() {
            return Ok(None);
        }

        let context = self.scoring_context(&assessment.company_id)?;
        let composite = self.aggregator.aggregate(&scores, &context)?;
        self.cache.set(&key, &composite, self.cache_ttl)?;
        debug!(assessment_id = %assessment_id, "composite recomputed and cached");
        Ok(Some(composite))
    }

    fn load_required(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Assessment, AssessmentServiceError> {
        self.repository
            .load_assessment(assessment_id)?
            .ok_or_else(|| AssessmentServiceError::AssessmentNotFound(assessment_id.clone()))
    }

    fn require_editable(&self, assessment: &Assessment) -> Result<(), AssessmentServiceError> {
        if assessment.status.is_editable() {
            Ok(())
        } else {
            Err(AssessmentServiceError::InvalidState {
                assessment_id: assessment.id.clone(),
                status: assessment.status,
            })
        }
    }

    fn scoring_context(
        &self,
        company_id: &CompanyId,
    ) -> Result<ScoringContext, AssessmentServiceError> {
        let company = self
            .repository
            .load_company(company_id)?
            .ok_or_else(|| AssessmentServiceError::CompanyNotFound(company_id.clone()))?;
        let industry = self
            .repository
            .load_industry(&company.industry_id)?
            .ok_or_else(|| AssessmentServiceError::IndustryNotFound(company.industry_id.clone()))?;

        Ok(ScoringContext {
            position_factor: company.position_factor,
            industry_baseline: industry.baseline_readiness,
        })
    }

    /// Persist assessment plus scores, then drop any cached composite. The
    /// invalidation happens before the caller sees the result, so a crash
    /// in between can only be observed as a cache miss.
    fn commit_and_invalidate(
        &self,
        mut assessment: Assessment,
        scores: Vec<DimensionScore>,
    ) -> Result<(), AssessmentServiceError> {
        let expected = assessment.version;
        assessment.version += 1;
        let key = composite_cache_key(&assessment.id);
        self.repository.commit(assessment, scores, expected)?;
        self.cache.invalidate(&key)?;
        debug!(cache_key = %key, "composite cache invalidated");
        Ok(())
    }
}

/// Error raised by the assessment service. Conflicts surface unchanged so
/// the caller can retry with freshly loaded state; nothing is auto-merged.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("assessment {assessment_id} does not accept score changes in status {status:?}")]
    InvalidState {
        assessment_id: AssessmentId,
        status: AssessmentStatus,
    },
    #[error("assessment {0} not found")]
    AssessmentNotFound(AssessmentId),
    #[error("company {0} not found")]
    CompanyNotFound(CompanyId),
    #[error("industry {0} not found")]
    IndustryNotFound(IndustryId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}
