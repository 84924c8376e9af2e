//! View Synchronizer — turns session state into view payloads.
//!
//! Rendering is a pure function of state and holds nothing between calls.
//! Callers pass the set of views a mutation touched; everything else is left
//! out of the update.

pub mod payloads;

use serde::{Deserialize, Serialize};

use crate::catalog::JobCatalog;
use crate::filtering::engine::{apply_filters, FilterInputs};
use crate::filtering::tags::TagSet;
use crate::models::profile::Profile;
use crate::session::favorites::FavoritesTracker;
use payloads::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    JobList,
    Stats,
    FilterChips,
    Profile,
    FavoritesCount,
    Favorites,
    ManageList,
}

impl View {
    pub const ALL: [View; 7] = [
        View::JobList,
        View::Stats,
        View::FilterChips,
        View::Profile,
        View::FavoritesCount,
        View::Favorites,
        View::ManageList,
    ];
}

/// Read-only borrow of everything a view may show.
pub struct ViewContext<'a> {
    pub catalog: &'a JobCatalog,
    pub profile: &'a Profile,
    pub favorites: &'a FavoritesTracker,
    pub manual_filters: &'a TagSet,
    pub search_term: &'a str,
    /// Set when the baseline dataset could not be loaded at startup.
    pub dataset_error: bool,
    pub persistence_degraded: bool,
}

pub fn render(ctx: &ViewContext<'_>, views: &[View]) -> ViewUpdate {
    let wants = |v: View| views.contains(&v);
    let mut update = ViewUpdate {
        persistence_degraded: ctx.persistence_degraded,
        ..Default::default()
    };

    if wants(View::JobList) || wants(View::Stats) {
        let result = apply_filters(
            ctx.catalog.all(),
            &FilterInputs {
                profile_skills: &ctx.profile.skills,
                manual_filters: ctx.manual_filters,
                search_term: ctx.search_term,
            },
        );

        if wants(View::JobList) {
            let cards: Vec<JobCard> = result
                .matches
                .iter()
                .map(|job| JobCard::new(job, ctx.favorites.is_favorite(job.id)))
                .collect();
            let empty_message = cards.is_empty().then(|| {
                if ctx.dataset_error && ctx.catalog.is_empty() {
                    DATASET_ERROR_MESSAGE.to_string()
                } else {
                    NO_MATCHES_MESSAGE.to_string()
                }
            });
            update.job_list = Some(JobListView {
                cards,
                empty_message,
            });
        }

        if wants(View::Stats) {
            update.stats = Some(StatsView {
                match_count: result.match_count,
                total_count: result.total_count,
                message: result.stats_message(),
            });
        }
    }

    if wants(View::FilterChips) {
        update.filter_chips = Some(FilterChipsView {
            tags: ctx.manual_filters.as_slice().to_vec(),
            has_filters: !ctx.manual_filters.is_empty(),
        });
    }

    if wants(View::Profile) {
        update.profile = Some(ProfileView::from(ctx.profile));
    }

    if wants(View::FavoritesCount) {
        update.favorites_count = Some(FavoritesCountView {
            count: ctx.favorites.all().len(),
        });
    }

    if wants(View::Favorites) {
        update.favorites = Some(favorites_view(ctx));
    }

    if wants(View::ManageList) {
        update.manage_list = Some(manage_list_view(ctx.catalog));
    }

    update
}

pub fn favorites_view(ctx: &ViewContext<'_>) -> FavoritesView {
    let cards: Vec<JobCard> = ctx
        .favorites
        .jobs(ctx.catalog)
        .into_iter()
        .map(|job| JobCard::new(job, true))
        .collect();
    FavoritesView {
        count: cards.len(),
        empty_message: cards.is_empty().then(|| NO_FAVORITES_MESSAGE.to_string()),
        cards,
    }
}

pub fn manage_list_view(catalog: &JobCatalog) -> ManageListView {
    ManageListView {
        items: catalog
            .all()
            .iter()
            .map(|job| ManageItem {
                id: job.id,
                position: job.fields.position.clone(),
                company: job.fields.company.clone(),
                location: job.fields.location.clone(),
                logo_url: job.logo_url(),
            })
            .collect(),
    }
}
