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
    appointments::{
        dto::AppointmentRequest, repo_types::AppointmentDetails, scheduler::Scheduler,
    },
    error::AppResult,
    extractors::ValidJson,
    state::AppState,
};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}

/// POST /appointments { userId, employeeId, serviceId, appointmentDate }
#[instrument(skip(scheduler, payload))]
pub async fn create_appointment(
    State(scheduler): State<Scheduler>,
    ValidJson(payload): ValidJson<AppointmentRequest>,
) -> AppResult<Response> {
    let appointment = scheduler.create(payload.into()).await?;
    Ok(created(
        format!("/api/appointments/{}", appointment.id),
        appointment,
    ))
}

#[instrument(skip(scheduler))]
pub async fn get_appointment(
    State(scheduler): State<Scheduler>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AppointmentDetails>> {
    Ok(Json(scheduler.get(id).await?))
}

#[instrument(skip(scheduler))]
pub async fn list_appointments(
    State(scheduler): State<Scheduler>,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    Ok(Json(scheduler.list().await?))
}

/// Full replace; existence and slot pre-checks are not repeated here.
#[instrument(skip(scheduler, payload))]
pub async fn update_appointment(
    State(scheduler): State<Scheduler>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<AppointmentRequest>,
) -> AppResult<StatusCode> {
    scheduler.update(id, payload.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(scheduler))]
pub async fn delete_appointment(
    State(scheduler): State<Scheduler>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    scheduler.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
