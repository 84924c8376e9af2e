//! Per-view data payloads handed to the templating client.

use serde::Serialize;

use crate::models::job::{Job, JobId};
use crate::models::profile::Profile;

pub const NO_MATCHES_MESSAGE: &str = "No jobs match your search.";
pub const DATASET_ERROR_MESSAGE: &str = "Error loading job data.";
pub const NO_FAVORITES_MESSAGE: &str = "You haven't added any favorite jobs yet.";

/// One rendered job card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub id: JobId,
    pub company: String,
    pub position: String,
    pub logo_url: String,
    pub posted_at: String,
    pub contract: String,
    pub location: String,
    pub tags: Vec<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_favorite: bool,
}

impl JobCard {
    pub fn new(job: &Job, is_favorite: bool) -> Self {
        let f = &job.fields;
        Self {
            id: job.id,
            company: f.company.clone(),
            position: f.position.clone(),
            logo_url: job.logo_url(),
            posted_at: f.posted_at.clone(),
            contract: f.contract.clone(),
            location: f.location.clone(),
            tags: job.tags(),
            is_new: f.is_new,
            is_featured: f.is_featured,
            is_favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobListView {
    pub cards: Vec<JobCard>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub match_count: usize,
    pub total_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChipsView {
    pub tags: Vec<String>,
    pub has_filters: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub position: String,
    pub skills: Vec<String>,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            position: profile.position.clone(),
            skills: profile.skills.as_slice().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoritesCountView {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoritesView {
    pub count: usize,
    pub cards: Vec<JobCard>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManageItem {
    pub id: JobId,
    pub position: String,
    pub company: String,
    pub location: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManageListView {
    pub items: Vec<ManageItem>,
}

/// Job details modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetailView {
    pub id: JobId,
    pub company: String,
    pub position: String,
    pub logo_url: String,
    pub description: String,
    /// posted-at, contract, location
    pub meta: Vec<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl JobDetailView {
    pub fn new(job: &Job, is_favorite: bool) -> Self {
        let f = &job.fields;
        Self {
            id: job.id,
            company: f.company.clone(),
            position: f.position.clone(),
            logo_url: job.logo_url(),
            description: f.description.clone(),
            meta: vec![f.posted_at.clone(), f.contract.clone(), f.location.clone()],
            tags: job.tags(),
            is_favorite,
        }
    }
}

/// The views re-rendered after a command. Views that were not affected are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_list: Option<JobListView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_chips: Option<FilterChipsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_count: Option<FavoritesCountView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<FavoritesView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_list: Option<ManageListView>,
    pub persistence_degraded: bool,
}
