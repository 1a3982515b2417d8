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
    employees::{dto::EmployeeRequest, repo_types::Employee, services},
    error::AppResult,
    extractors::ValidJson,
    state::AppState,
};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<EmployeeRequest>,
) -> AppResult<Response> {
    let employee = services::create_employee(state.store.as_ref(), payload).await?;
    Ok(created(format!("/api/employees/{}", employee.id), employee))
}

#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    Ok(Json(services::get_employee(state.store.as_ref(), id).await?))
}

#[instrument(skip(state))]
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(services::list_employees(state.store.as_ref()).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<EmployeeRequest>,
) -> AppResult<StatusCode> {
    services::update_employee(state.store.as_ref(), id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    services::delete_employee(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
