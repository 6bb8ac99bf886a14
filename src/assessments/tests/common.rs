use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use crate::assessments::aggregation::AggregationConfig;
use crate::assessments::catalog::Dimension;
use crate::assessments::domain::{
    Assessment, AssessmentId, AssessmentKind, Company, CompanyId, CompanyState, CompositeScore,
    DimensionScore, Industry, IndustryId,
};
use crate::assessments::repository::{
    AssessmentRepository, CacheError, CompositeCache, RepositoryError,
};
use crate::assessments::service::AssessmentService;

pub(super) fn industry() -> Industry {
    Industry {
        id: IndustryId("ind-software".to_string()),
        name: "Software & Platforms".to_string(),
        baseline_readiness: 85.0,
    }
}

pub(super) fn company() -> Company {
    Company {
        id: CompanyId("co-acme".to_string()),
        name: "Acme Analytics".to_string(),
        ticker: Some("ACME".to_string()),
        industry_id: industry().id,
        position_factor: 0.6,
        state: CompanyState::Active,
    }
}

pub(super) fn assessed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date")
}

pub(super) fn scored(dimension: Dimension, value: f64) -> DimensionScore {
    DimensionScore {
        dimension,
        score: value,
        weight: Some(1.0 / 7.0),
        confidence: 0.8,
        evidence_count: 5,
    }
}

/// Seven equal-weight scores with uniform value, confidence, and evidence.
pub(super) fn full_scores(value: f64, confidence: f64, evidence_count: u32) -> Vec<DimensionScore> {
    Dimension::ordered()
        .into_iter()
        .map(|dimension| DimensionScore {
            dimension,
            score: value,
            weight: Some(1.0 / 7.0),
            confidence,
            evidence_count,
        })
        .collect()
}

pub(super) fn service(
    repository: Arc<MemoryRepository>,
    cache: Arc<MemoryCache>,
) -> AssessmentService<MemoryRepository, MemoryCache> {
    AssessmentService::new(
        repository,
        cache,
        AggregationConfig::default(),
        Duration::from_secs(300),
    )
}

/// Repository, cache, and service wired together with the default company
/// and industry seeded.
pub(super) fn setup() -> (
    Arc<MemoryRepository>,
    Arc<MemoryCache>,
    AssessmentService<MemoryRepository, MemoryCache>,
) {
    let repository = Arc::new(MemoryRepository::default());
    repository.seed_industry(industry());
    repository.seed_company(company());
    let cache = Arc::new(MemoryCache::default());
    let svc = service(repository.clone(), cache.clone());
    (repository, cache, svc)
}

#[derive(Default)]
struct MemoryState {
    assessments: HashMap<AssessmentId, Assessment>,
    scores: HashMap<AssessmentId, Vec<DimensionScore>>,
    companies: HashMap<CompanyId, Company>,
    industries: HashMap<IndustryId, Industry>,
}

/// In-memory storage double honoring the optimistic version contract.
#[derive(Default)]
pub(super) struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    pub(super) fn seed_company(&self, company: Company) {
        let mut state = self.state.lock().expect("lock");
        state.companies.insert(company.id.clone(), company);
    }

    pub(super) fn seed_industry(&self, industry: Industry) {
        let mut state = self.state.lock().expect("lock");
        state.industries.insert(industry.id.clone(), industry);
    }

    pub(super) fn stored_scores(&self, id: &AssessmentId) -> Vec<DimensionScore> {
        let state = self.state.lock().expect("lock");
        state.scores.get(id).cloned().unwrap_or_default()
    }

    pub(super) fn stored_assessment(&self, id: &AssessmentId) -> Option<Assessment> {
        let state = self.state.lock().expect("lock");
        state.assessments.get(id).cloned()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert_assessment(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("lock");
        if state.assessments.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict {
                assessment_id: assessment.id,
                expected: 0,
            });
        }
        state.scores.insert(assessment.id.clone(), Vec::new());
        state.assessments.insert(assessment.id.clone(), assessment);
        Ok(())
    }

    fn load_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let state = self.state.lock().expect("lock");
        Ok(state.assessments.get(id).cloned())
    }

    fn load_scores(&self, id: &AssessmentId) -> Result<Vec<DimensionScore>, RepositoryError> {
        let state = self.state.lock().expect("lock");
        Ok(state.scores.get(id).cloned().unwrap_or_default())
    }

    fn load_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let state = self.state.lock().expect("lock");
        Ok(state.companies.get(id).cloned())
    }

    fn load_industry(&self, id: &IndustryId) -> Result<Option<Industry>, RepositoryError> {
        let state = self.state.lock().expect("lock");
        Ok(state.industries.get(id).cloned())
    }

    fn commit(
        &self,
        assessment: Assessment,
        scores: Vec<DimensionScore>,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("lock");
        let stored = state
            .assessments
            .get(&assessment.id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.version != expected_version {
            return Err(RepositoryError::Conflict {
                assessment_id: assessment.id,
                expected: expected_version,
            });
        }
        state.scores.insert(assessment.id.clone(), scores);
        state.assessments.insert(assessment.id.clone(), assessment);
        Ok(())
    }
}

/// In-memory cache double recording set and invalidate calls so tests can
/// assert sequencing.
#[derive(Default)]
pub(super) struct MemoryCache {
    entries: Mutex<HashMap<String, CompositeScore>>,
    sets: Mutex<Vec<String>>,
    invalidations: Mutex<Vec<String>>,
}

impl MemoryCache {
    pub(super) fn seed(&self, key: &str, value: CompositeScore) {
        self.entries
            .lock()
            .expect("lock")
            .insert(key.to_string(), value);
    }

    pub(super) fn contains(&self, key: &str) -> bool {
        self.entries.lock().expect("lock").contains_key(key)
    }

    pub(super) fn set_keys(&self) -> Vec<String> {
        self.sets.lock().expect("lock").clone()
    }

    pub(super) fn invalidated_keys(&self) -> Vec<String> {
        self.invalidations.lock().expect("lock").clone()
    }
}

impl CompositeCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<CompositeScore>, CacheError> {
        Ok(self.entries.lock().expect("lock").get(key).copied())
    }

    fn set(&self, key: &str, value: &CompositeScore, _ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .lock()
            .expect("lock")
            .insert(key.to_string(), *value);
        self.sets.lock().expect("lock").push(key.to_string());
        Ok(())
    }

    fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().expect("lock").remove(key);
        self.invalidations.lock().expect("lock").push(key.to_string());
        Ok(())
    }
}

/// Storage double that refuses every call, for propagation tests.
pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert_assessment(&self, _assessment: Assessment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn load_assessment(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn load_scores(&self, _id: &AssessmentId) -> Result<Vec<DimensionScore>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn load_company(&self, _id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn load_industry(&self, _id: &IndustryId) -> Result<Option<Industry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit(
        &self,
        _assessment: Assessment,
        _scores: Vec<DimensionScore>,
        _expected_version: u64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Storage double that serves reads from an inner repository but fails every
/// commit as a stale-version conflict.
pub(super) struct ConflictingRepository {
    pub(super) inner: MemoryRepository,
}

impl AssessmentRepository for ConflictingRepository {
    fn insert_assessment(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        self.inner.insert_assessment(assessment)
    }

    fn load_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        self.inner.load_assessment(id)
    }

    fn load_scores(&self, id: &AssessmentId) -> Result<Vec<DimensionScore>, RepositoryError> {
        self.inner.load_scores(id)
    }

    fn load_company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        self.inner.load_company(id)
    }

    fn load_industry(&self, id: &IndustryId) -> Result<Option<Industry>, RepositoryError> {
        self.inner.load_industry(id)
    }

    fn commit(
        &self,
        assessment: Assessment,
        _scores: Vec<DimensionScore>,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict {
            assessment_id: assessment.id,
            expected: expected_version,
        })
    }
}

pub(super) fn draft_assessment(
    svc: &AssessmentService<MemoryRepository, MemoryCache>,
) -> Assessment {
    svc.create_assessment(
        company().id,
        AssessmentKind::DueDiligence,
        assessed_on(),
        "j.doe".to_string(),
    )
    .expect("assessment created")
}
