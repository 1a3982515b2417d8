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
    salon_services::{dto::ServiceRequest, repo_types::Service, services},
    state::AppState,
};

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/:id",
            get(get_service).put(update_service).delete(delete_service),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_service(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ServiceRequest>,
) -> AppResult<Response> {
    let service = services::create_service(state.store.as_ref(), payload).await?;
    Ok(created(format!("/api/services/{}", service.id), service))
}

#[instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Service>> {
    Ok(Json(services::get_service(state.store.as_ref(), id).await?))
}

#[instrument(skip(state))]
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<Service>>> {
    Ok(Json(services::list_services(state.store.as_ref()).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<ServiceRequest>,
) -> AppResult<StatusCode> {
    services::update_service(state.store.as_ref(), id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    services::delete_service(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
