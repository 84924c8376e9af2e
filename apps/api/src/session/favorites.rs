use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::models::job::{Job, JobId};
use crate::store::{PersistentStore, FAVORITES_KEY};

/// Favorited job ids. Every id must name a job currently in the catalog.
#[derive(Debug, Clone, Default)]
pub struct FavoritesTracker {
    ids: BTreeSet<JobId>,
}

impl FavoritesTracker {
    pub async fn load(store: &PersistentStore) -> Self {
        let ids: BTreeSet<JobId> = store.load(FAVORITES_KEY).await.unwrap_or_default();
        Self { ids }
    }

    pub fn is_favorite(&self, id: JobId) -> bool {
        self.ids.contains(&id)
    }

    pub fn all(&self) -> &BTreeSet<JobId> {
        &self.ids
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Flips membership of a catalog job. Returns whether it is now a favorite.
    pub async fn toggle(
        &mut self,
        id: JobId,
        catalog: &JobCatalog,
        store: &PersistentStore,
    ) -> Result<bool, AppError> {
        if !catalog.contains(id) {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        store.commit(FAVORITES_KEY, &self.ids).await;
        info!("Job {id} favorite: {now_favorite}");
        Ok(now_favorite)
    }

    /// Drops ids that no longer name a catalog job. Returns how many were dropped.
    pub async fn reconcile(&mut self, catalog: &JobCatalog, store: &PersistentStore) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| catalog.contains(*id));
        let removed = before - self.ids.len();
        if removed > 0 {
            warn!("Pruned {removed} favorite(s) for jobs no longer in the catalog");
            store.commit(FAVORITES_KEY, &self.ids).await;
        }
        removed
    }

    /// Favorited jobs in catalog order.
    pub fn jobs<'a>(&self, catalog: &'a JobCatalog) -> Vec<&'a Job> {
        catalog
            .all()
            .iter()
            .filter(|j| self.is_favorite(j.id))
            .collect()
    }
}
