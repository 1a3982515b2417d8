use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app::created,
    error::AppResult,
    extractors::ValidJson,
    state::AppState,
    users::{dto::UserRequest, repo_types::User, services},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UserRequest>,
) -> AppResult<Response> {
    let user = services::create_user(state.store.as_ref(), payload).await?;
    Ok(created(format!("/api/users/{}", user.id), user))
}

#[instrument(skip(state))]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<User>> {
    Ok(Json(services::get_user(state.store.as_ref(), id).await?))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(services::list_users(state.store.as_ref()).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<UserRequest>,
) -> AppResult<StatusCode> {
    services::update_user(state.store.as_ref(), id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<StatusCode> {
    services::delete_user(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
