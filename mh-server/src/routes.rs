use crate::{AppState, health};

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // REST API
        .nest("/api", api_router())
        // Add shared state
        .with_state(state)
        // CORS middleware (the SPA is served from another origin)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

fn api_router() -> Router<AppState> {
    use crate::api::events::events;
    use crate::api::meetings::meetings;
    use crate::api::roles::roles;
    use crate::api::users::users;

    Router::new()
        // Meetings
        .route(
            "/meetings",
            get(meetings::list_meetings).post(meetings::create_meeting),
        )
        .route(
            "/meetings/{meeting_id}",
            get(meetings::get_meeting)
                .patch(meetings::update_meeting)
                .delete(meetings::delete_meeting),
        )
        .route("/meetings/{meeting_id}/end", patch(meetings::end_meeting))
        .route(
            "/meetings/{meeting_id}/attendances",
            get(meetings::get_attendance)
                .patch(meetings::replace_attendance)
                .delete(meetings::clear_attendance),
        )
        .route(
            "/meetings/{meeting_id}/attendances/users/{user_id}",
            get(meetings::get_attendance_for_user).patch(meetings::update_attendance_for_user),
        )
        .route("/meetings/{meeting_id}/feedback", get(meetings::get_feedback))
        .route(
            "/meetings/{meeting_id}/feedback/users/{user_id}",
            get(meetings::get_feedback_for_user)
                .post(meetings::set_feedback_for_user)
                .patch(meetings::set_feedback_for_user),
        )
        // Events (read-only projection of the meeting store)
        .route("/events", get(events::list_events))
        .route("/events/{event_id}", get(events::get_event))
        // Roles
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{role_id}",
            get(roles::get_role)
                .patch(roles::update_role)
                .delete(roles::delete_role),
        )
        // Users
        .route("/users/login", post(users::login))
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/roles", patch(users::set_user_roles))
}
