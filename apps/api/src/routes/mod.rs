pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/views", get(handlers::handle_get_views))
        .route("/api/v1/commands", post(handlers::handle_dispatch))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(handlers::handle_get_job)
                .put(handlers::handle_update_job)
                .delete(handlers::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/form", get(handlers::handle_get_job_form))
        // Favorites & manage tab
        .route("/api/v1/favorites", get(handlers::handle_get_favorites))
        .route(
            "/api/v1/favorites/:id/toggle",
            post(handlers::handle_toggle_favorite),
        )
        .route("/api/v1/manage", get(handlers::handle_get_manage))
        // Profile
        .route(
            "/api/v1/profile",
            get(handlers::handle_get_profile).put(handlers::handle_put_profile),
        )
        .route("/api/v1/profile/skills", post(handlers::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:skill",
            delete(handlers::handle_remove_skill),
        )
        // Filters & search
        .route(
            "/api/v1/filters",
            post(handlers::handle_add_filter).delete(handlers::handle_clear_filters),
        )
        .route("/api/v1/filters/:tag", delete(handlers::handle_remove_filter))
        .route("/api/v1/search", put(handlers::handle_set_search))
        .with_state(state)
}
