//! Axum route handlers for the job board session.
//!
//! Mutating handlers translate the request into a `Command` and dispatch it
//! while holding the session lock, so each one runs to completion before the
//! next starts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::catalog::validation::JobForm;
use crate::errors::AppError;
use crate::models::job::{Job, JobId};
use crate::session::commands::Command;
use crate::session::Outcome;
use crate::state::AppState;
use crate::views::payloads::{
    FavoritesView, JobDetailView, ManageListView, ProfileView, ViewUpdate,
};
use crate::views::{favorites_view, manage_list_view};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IdentityRequest {
    pub name: String,
    pub position: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: String,
}

async fn dispatch(state: &AppState, command: Command) -> Result<Json<Outcome>, AppError> {
    let mut session = state.session.lock().await;
    Ok(Json(session.dispatch(command).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Views & commands
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/views
pub async fn handle_get_views(State(state): State<AppState>) -> Json<ViewUpdate> {
    Json(state.session.lock().await.render_all())
}

/// POST /api/v1/commands
pub async fn handle_dispatch(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, command).await
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.session.lock().await.catalog().all().to_vec())
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(form): Json<JobForm>,
) -> Result<(StatusCode, Json<Outcome>), AppError> {
    let outcome = dispatch(&state, Command::CreateJob { form }).await?;
    Ok((StatusCode::CREATED, outcome))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<JobDetailView>, AppError> {
    Ok(Json(state.session.lock().await.job_detail(id)?))
}

/// GET /api/v1/jobs/:id/form
pub async fn handle_get_job_form(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<JobForm>, AppError> {
    Ok(Json(state.session.lock().await.job_form(id)?))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    Json(form): Json<JobForm>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::UpdateJob { id, form }).await
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::DeleteJob { id }).await
}

// ────────────────────────────────────────────────────────────────────────────
// Favorites & manage tab
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/favorites/:id/toggle
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::ToggleFavorite { id }).await
}

/// GET /api/v1/favorites
pub async fn handle_get_favorites(State(state): State<AppState>) -> Json<FavoritesView> {
    let session = state.session.lock().await;
    Json(favorites_view(&session.view_context()))
}

/// GET /api/v1/manage
pub async fn handle_get_manage(State(state): State<AppState>) -> Json<ManageListView> {
    let session = state.session.lock().await;
    Json(manage_list_view(session.catalog()))
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ProfileView> {
    let session = state.session.lock().await;
    Json(ProfileView::from(session.view_context().profile))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(req): Json<IdentityRequest>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(
        &state,
        Command::SetIdentity {
            name: req.name,
            position: req.position,
        },
    )
    .await
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::AddSkill { skill: req.skill }).await
}

/// DELETE /api/v1/profile/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::RemoveSkill { skill }).await
}

// ────────────────────────────────────────────────────────────────────────────
// Filters & search
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/filters
pub async fn handle_add_filter(
    State(state): State<AppState>,
    Json(req): Json<TagRequest>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::AddManualFilter { tag: req.tag }).await
}

/// DELETE /api/v1/filters
pub async fn handle_clear_filters(State(state): State<AppState>) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::ClearFilters).await
}

/// DELETE /api/v1/filters/:tag
pub async fn handle_remove_filter(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::RemoveManualFilter { tag }).await
}

/// PUT /api/v1/search
pub async fn handle_set_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Outcome>, AppError> {
    dispatch(&state, Command::SetSearchTerm { term: req.term }).await
}
