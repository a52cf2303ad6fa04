use api_state::ApiState;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use middleware_api_auth::api_auth;
use routes::{
    chat::chat,
    drawings::{get_drawings, save_drawings},
    key_check::check_key,
    liveness::live,
    notes::notes_ai_help,
    prioritize::prioritize_tasks,
    projects::{get_projects, save_projects},
    readiness::ready,
    upload::upload_document,
    users::{get_user, list_users, login},
};

pub mod api_state;
pub mod error;
pub mod middleware_api_auth;
mod routes;

/// Router for API functionality, version 1
pub fn api_routes_v1(app_state: &ApiState) -> Router {
    // Public, unauthenticated endpoints (probes and user directory)
    let public = Router::new()
        .route("/ready", get(ready))
        .route("/live", get(live))
        .route("/auth/login", post(login))
        .route("/auth/user/{user_id}", get(get_user))
        .route("/auth/users", get(list_users));

    // Protected endpoints: the opaque API key doubles as the storage
    // namespace for everything below.
    let protected = Router::new()
        .route(
            "/upload",
            post(upload_document).layer(DefaultBodyLimit::max(
                app_state.config.upload_max_body_bytes,
            )),
        )
        .route("/chat", get(chat))
        .route("/prioritize", post(prioritize_tasks))
        .route("/notes/ai-help", post(notes_ai_help))
        .route("/projects", get(get_projects).post(save_projects))
        .route("/drawings", get(get_drawings).post(save_drawings))
        .route("/key/check", get(check_key))
        .route_layer(from_fn(api_auth));

    public.merge(protected).with_state(app_state.clone())
}
