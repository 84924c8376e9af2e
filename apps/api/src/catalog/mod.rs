//! JobCatalog — the authoritative, ordered list of job postings.
//!
//! Every mutation writes the full collection back through `PersistentStore`
//! before returning, so the stored copy never lags the in-memory one.

pub mod dataset;
pub mod validation;

use std::collections::HashSet;

use anyhow::anyhow;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::{Job, JobFields, JobId};
use crate::store::{PersistentStore, JOBS_KEY, JOB_SEQUENCE_KEY};

#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<Job>,
    /// Next identifier to issue. Only ever grows; kept wider than `JobId` so the
    /// counter can sit one past the last issuable id.
    next_id: u64,
}

impl Default for JobCatalog {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
        }
    }
}

impl JobCatalog {
    /// Builds a catalog from stored or fetched records.
    ///
    /// Records repeating an earlier id get a fresh one. `sequence` is a previously
    /// persisted high-water mark; the counter starts above both it and every id present.
    /// Duplicates that cannot be re-issued because the id space is used up are dropped.
    pub fn from_jobs(records: Vec<Job>, sequence: Option<u64>) -> Self {
        let max_id = records.iter().map(|j| u64::from(j.id)).max().unwrap_or(0);
        let mut next_id = sequence.unwrap_or(1).max(max_id + 1);
        let mut seen = HashSet::with_capacity(records.len());
        let mut jobs = Vec::with_capacity(records.len());

        for mut job in records {
            if !seen.insert(job.id) {
                let Ok(fresh) = JobId::try_from(next_id) else {
                    warn!("Dropping job with duplicate id {}: identifier space exhausted", job.id);
                    continue;
                };
                warn!("Duplicate job id {} re-issued as {fresh}", job.id);
                job.id = fresh;
                next_id += 1;
                seen.insert(fresh);
            }
            jobs.push(job);
        }

        Self { jobs, next_id }
    }

    /// Restores the catalog saved by an earlier session, if there is one.
    pub async fn load(store: &PersistentStore) -> Option<Self> {
        let jobs: Vec<Job> = store.load(JOBS_KEY).await?;
        let sequence: Option<u64> = store.load(JOB_SEQUENCE_KEY).await;
        info!("Loaded {} saved jobs", jobs.len());
        Some(Self::from_jobs(jobs, sequence))
    }

    /// Builds the catalog from the baseline dataset and writes it to the store.
    pub async fn seed(records: Vec<Job>, store: &PersistentStore) -> Self {
        let catalog = Self::from_jobs(records, None);
        catalog.persist(store).await;
        info!("Seeded store with {} baseline jobs", catalog.jobs.len());
        catalog
    }

    pub fn all(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn find_by_id(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub async fn create(
        &mut self,
        fields: JobFields,
        store: &PersistentStore,
    ) -> Result<Job, AppError> {
        let id = JobId::try_from(self.next_id)
            .map_err(|_| AppError::Internal(anyhow!("Job identifier space exhausted")))?;
        let job = Job::new(id, fields);
        self.next_id += 1;
        self.jobs.push(job.clone());
        self.persist(store).await;
        info!("Created job {} ({} at {})", job.id, job.fields.position, job.fields.company);
        Ok(job)
    }

    pub async fn update(
        &mut self,
        id: JobId,
        fields: JobFields,
        store: &PersistentStore,
    ) -> Result<Job, AppError> {
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| not_found(id))?;
        job.fields = fields;
        let updated = job.clone();
        self.persist(store).await;
        info!("Updated job {id}");
        Ok(updated)
    }

    /// Removes a job. The caller must reconcile favorites afterwards.
    pub async fn remove(&mut self, id: JobId, store: &PersistentStore) -> Result<Job, AppError> {
        let index = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.jobs.remove(index);
        self.persist(store).await;
        info!("Deleted job {id}");
        Ok(removed)
    }

    async fn persist(&self, store: &PersistentStore) {
        store.commit(JOBS_KEY, &self.jobs).await;
        store.commit(JOB_SEQUENCE_KEY, &self.next_id).await;
    }
}

fn not_found(id: JobId) -> AppError {
    AppError::NotFound(format!("Job {id} not found"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::job::sample_fields;
    use crate::store::MemoryBackend;

    fn memory_store() -> PersistentStore {
        PersistentStore::new(Arc::new(MemoryBackend::new()))
    }

    async fn stored_jobs(store: &PersistentStore) -> Vec<Job> {
        store.load(JOBS_KEY).await.unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_then_find_returns_same_fields() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();
        let fields = sample_fields("Photosnap", "Senior Frontend Developer", &["HTML", "CSS"]);

        let created = catalog.create(fields.clone(), &store).await.unwrap();
        let found = catalog.find_by_id(created.id).unwrap();
        assert_eq!(found.fields, fields);
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();
        let a = catalog.create(sample_fields("A", "Dev", &[]), &store).await.unwrap();
        let b = catalog.create(sample_fields("B", "Dev", &[]), &store).await.unwrap();
        catalog.remove(b.id, &store).await.unwrap();
        let c = catalog.create(sample_fields("C", "Dev", &[]), &store).await.unwrap();
        assert!(c.id > b.id);
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_sequence_survives_reload() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();
        catalog.create(sample_fields("A", "Dev", &[]), &store).await.unwrap();
        let b = catalog.create(sample_fields("B", "Dev", &[]), &store).await.unwrap();
        catalog.remove(b.id, &store).await.unwrap();

        let mut reloaded = JobCatalog::load(&store).await.unwrap();
        let c = reloaded.create(sample_fields("C", "Dev", &[]), &store).await.unwrap();
        assert!(c.id > b.id, "id {} was reissued", c.id);
    }

    #[tokio::test]
    async fn test_store_matches_memory_after_every_operation() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();

        let a = catalog.create(sample_fields("A", "Dev", &["Go"]), &store).await.unwrap();
        assert_eq!(stored_jobs(&store).await, catalog.all());

        let b = catalog.create(sample_fields("B", "QA", &[]), &store).await.unwrap();
        assert_eq!(stored_jobs(&store).await, catalog.all());

        catalog
            .update(a.id, sample_fields("A", "Lead Dev", &["Go", "Rust"]), &store)
            .await
            .unwrap();
        assert_eq!(stored_jobs(&store).await, catalog.all());

        catalog.remove(b.id, &store).await.unwrap();
        assert_eq!(stored_jobs(&store).await, catalog.all());
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_job_is_not_found_and_harmless() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();
        catalog.create(sample_fields("A", "Dev", &[]), &store).await.unwrap();
        let before = catalog.all().to_vec();

        let err = catalog
            .update(99, sample_fields("X", "Y", &[]), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(catalog.all(), before.as_slice());

        let err = catalog.remove(99, &store).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(stored_jobs(&store).await, before);
    }

    #[tokio::test]
    async fn test_update_keeps_position_in_order() {
        let store = memory_store();
        let mut catalog = JobCatalog::default();
        let a = catalog.create(sample_fields("A", "Dev", &[]), &store).await.unwrap();
        catalog.create(sample_fields("B", "Dev", &[]), &store).await.unwrap();
        catalog
            .update(a.id, sample_fields("A2", "Dev", &[]), &store)
            .await
            .unwrap();
        let companies: Vec<_> = catalog.all().iter().map(|j| j.fields.company.as_str()).collect();
        assert_eq!(companies, vec!["A2", "B"]);
    }

    #[test]
    fn test_from_jobs_reissues_duplicate_ids() {
        let records = vec![
            Job::new(1, sample_fields("A", "Dev", &[])),
            Job::new(5, sample_fields("B", "Dev", &[])),
            Job::new(1, sample_fields("C", "Dev", &[])),
        ];
        let catalog = JobCatalog::from_jobs(records, None);
        let ids: Vec<_> = catalog.all().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 5, 6]);
        assert_eq!(catalog.next_id, 7);
    }

    #[test]
    fn test_from_jobs_respects_stored_sequence() {
        let records = vec![Job::new(2, sample_fields("A", "Dev", &[]))];
        let catalog = JobCatalog::from_jobs(records, Some(10));
        assert_eq!(catalog.next_id, 10);
    }

    #[tokio::test]
    async fn test_create_past_last_id_is_an_error_not_a_wrap() {
        let store = memory_store();
        let records = vec![Job::new(JobId::MAX, sample_fields("A", "Dev", &[]))];
        let mut catalog = JobCatalog::from_jobs(records, None);
        assert_eq!(catalog.next_id, u64::from(JobId::MAX) + 1);

        let err = catalog
            .create(sample_fields("B", "Dev", &[]), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(catalog.len(), 1);
        assert!(stored_jobs(&store).await.is_empty());
    }

    #[test]
    fn test_from_jobs_drops_duplicate_when_ids_exhausted() {
        let records = vec![
            Job::new(JobId::MAX, sample_fields("A", "Dev", &[])),
            Job::new(JobId::MAX, sample_fields("B", "Dev", &[])),
        ];
        let catalog = JobCatalog::from_jobs(records, None);
        let companies: Vec<_> = catalog.all().iter().map(|j| j.fields.company.as_str()).collect();
        assert_eq!(companies, vec!["A"]);
    }

    #[tokio::test]
    async fn test_load_without_saved_jobs_is_none() {
        assert!(JobCatalog::load(&memory_store()).await.is_none());
    }

    #[tokio::test]
    async fn test_seed_writes_baseline_to_store() {
        let store = memory_store();
        let records = vec![Job::new(1, sample_fields("A", "Dev", &[]))];
        let catalog = JobCatalog::seed(records.clone(), &store).await;
        assert_eq!(catalog.all(), records.as_slice());
        assert_eq!(stored_jobs(&store).await, records);
    }
}
