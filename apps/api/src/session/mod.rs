//! Session — owns every mutable collection for the lifetime of the app and
//! routes each `Command` to the component that owns the state it touches.
//!
//! Flow per command: owning component mutates and persists → the affected
//! views are re-rendered from scratch. `AppState` keeps the session behind a
//! mutex so commands run to completion one at a time.

pub mod commands;
pub mod favorites;
pub mod handlers;
pub mod profile;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::catalog::dataset::load_baseline;
use crate::catalog::validation::{validate_job_form, JobForm};
use crate::catalog::JobCatalog;
use crate::errors::AppError;
use crate::filtering::tags::same_tag;
use crate::filtering::ManualFilterSet;
use crate::models::job::{Job, JobId};
use crate::store::PersistentStore;
use crate::views::payloads::{JobDetailView, ViewUpdate};
use crate::views::{self, View, ViewContext};

use commands::{scope_to_tab, Command, Tab};
use favorites::FavoritesTracker;
use profile::{ProfileStore, SkillChange};

/// Result of a dispatched command.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// The job a create or update produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
    /// Whether an added skill was new or ignored as blank/duplicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillChange>,
    pub views: ViewUpdate,
}

/// What a command produced besides its view changes.
enum Effect {
    Nothing,
    Job(Job),
    Skill(SkillChange),
}

pub struct Session {
    store: PersistentStore,
    catalog: JobCatalog,
    favorites: FavoritesTracker,
    profile: ProfileStore,
    manual_filters: ManualFilterSet,
    search_term: String,
    active_tab: Tab,
    dataset_error: bool,
}

impl Session {
    /// Loads saved state, seeding the catalog from `dataset_source` when nothing was saved.
    ///
    /// A failed dataset load leaves an empty catalog and is reported in the job list view.
    pub async fn bootstrap(store: PersistentStore, dataset_source: &str) -> Self {
        let profile = ProfileStore::load(&store).await;
        let mut favorites = FavoritesTracker::load(&store).await;

        let (catalog, dataset_error) = match JobCatalog::load(&store).await {
            Some(catalog) => (catalog, false),
            None => match load_baseline(dataset_source).await {
                Ok(records) => (JobCatalog::seed(records, &store).await, false),
                Err(e) => {
                    error!("{e}");
                    (JobCatalog::default(), true)
                }
            },
        };

        favorites.reconcile(&catalog, &store).await;
        info!(
            "Session ready: {} jobs, {} favorites, {} profile skills",
            catalog.len(),
            favorites.count(),
            profile.skills().len()
        );

        Self {
            store,
            catalog,
            favorites,
            profile,
            manual_filters: ManualFilterSet::new(),
            search_term: String::new(),
            active_tab: Tab::default(),
            dataset_error,
        }
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, AppError> {
        debug!("Dispatching {command:?}");
        let affected = scope_to_tab(command.affected_views(), self.tab_after(&command));
        let (job, skill) = match self.apply(command).await? {
            Effect::Nothing => (None, None),
            Effect::Job(job) => (Some(job), None),
            Effect::Skill(change) => (None, Some(change)),
        };
        Ok(Outcome {
            job,
            skill,
            views: self.render(&affected),
        })
    }

    /// Every view, regardless of the open tab.
    pub fn render_all(&self) -> ViewUpdate {
        self.render(&View::ALL)
    }

    pub fn render(&self, views: &[View]) -> ViewUpdate {
        views::render(&self.view_context(), views)
    }

    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            catalog: &self.catalog,
            profile: self.profile.profile(),
            favorites: &self.favorites,
            manual_filters: &self.manual_filters,
            search_term: &self.search_term,
            dataset_error: self.dataset_error,
            persistence_degraded: self.store.is_degraded(),
        }
    }

    pub fn job_detail(&self, id: JobId) -> Result<JobDetailView, AppError> {
        let job = self.find(id)?;
        Ok(JobDetailView::new(job, self.favorites.is_favorite(id)))
    }

    pub fn job_form(&self, id: JobId) -> Result<JobForm, AppError> {
        Ok(JobForm::from_job(self.find(id)?))
    }

    fn find(&self, id: JobId) -> Result<&Job, AppError> {
        self.catalog
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
    }

    fn tab_after(&self, command: &Command) -> Tab {
        match command {
            Command::SwitchTab { tab } => *tab,
            _ => self.active_tab,
        }
    }

    async fn apply(&mut self, command: Command) -> Result<Effect, AppError> {
        let store = &self.store;
        match command {
            Command::AddSkill { skill } => {
                return Ok(Effect::Skill(self.profile.add_skill(&skill, store).await));
            }
            Command::RemoveSkill { skill } => {
                self.profile.remove_skill(&skill, store).await?;
            }
            Command::SetIdentity { name, position } => {
                self.profile.set_identity(&name, &position, store).await?;
            }
            Command::AddManualFilter { tag } => {
                self.manual_filters.insert(&tag);
            }
            Command::RemoveManualFilter { tag } => {
                self.manual_filters
                    .remove(&tag)
                    .ok_or_else(|| AppError::NotFound(format!("Filter '{tag}' not active")))?;
            }
            Command::ClearFilters => {
                self.manual_filters.clear();
                self.search_term.clear();
            }
            Command::SetSearchTerm { term } => {
                self.search_term = term;
            }
            Command::ClickTag { id, tag } => {
                let job = self.find(id)?;
                if !job.tags().iter().any(|t| same_tag(t, &tag)) {
                    return Err(AppError::NotFound(format!("Job {id} has no tag '{tag}'")));
                }
                self.manual_filters.insert(&tag);
            }
            Command::ToggleFavorite { id } => {
                self.favorites.toggle(id, &self.catalog, store).await?;
            }
            Command::CreateJob { form } => {
                let fields = validate_job_form(&form, None)?;
                return Ok(Effect::Job(self.catalog.create(fields, store).await?));
            }
            Command::UpdateJob { id, form } => {
                let fields = validate_job_form(&form, Some(self.find(id)?))?;
                return Ok(Effect::Job(self.catalog.update(id, fields, store).await?));
            }
            Command::DeleteJob { id } => {
                self.catalog.remove(id, store).await?;
                self.favorites.reconcile(&self.catalog, store).await;
            }
            Command::SwitchTab { tab } => {
                self.active_tab = tab;
            }
        }
        Ok(Effect::Nothing)
    }
}
