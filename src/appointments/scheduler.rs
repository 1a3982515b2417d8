use std::sync::Arc;

use axum::extract::FromRef;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::appointments::repo::AppointmentRepo;
use crate::appointments::repo_types::{Appointment, AppointmentDetails, AppointmentFields};
use crate::employees::repo::EmployeeRepo;
use crate::error::{AppError, AppResult};
use crate::salon_services::repo::ServiceRepo;
use crate::state::AppState;
use crate::store::{Store, StoreError};
use crate::users::repo::UserRepo;

pub const INVALID_REFERENCE: &str = "Invalid UserId, EmployeeId, or ServiceId.";
pub const EMPLOYEE_BOOKED: &str = "The employee already has an appointment at this time.";
pub const INVALID_DATE: &str = "Invalid appointment date.";
const NOT_FOUND: &str = "Appointment not found.";

/// Books appointments against the store.
///
/// Creation validates that the user, employee and service exist and that the
/// employee has nothing booked at exactly the same instant. The slot rule is
/// also a unique constraint in the store, so two concurrent bookings of one
/// slot cannot both commit; the loser gets the same conflict error.
///
/// Updates replace all four fields without re-running those checks. Only the
/// store's own constraints apply to them.
#[derive(Clone)]
pub struct Scheduler {
    store: Arc<dyn Store>,
}

impl FromRef<AppState> for Scheduler {
    fn from_ref(state: &AppState) -> Self {
        Scheduler::new(state.store.clone())
    }
}

/// UTC, truncated to the microsecond precision the database keeps.
///
/// `None` when the instant has no UTC representation in years 0 through 9999,
/// the range RFC 3339 can write back out.
pub(crate) fn normalize_timestamp(at: OffsetDateTime) -> Option<OffsetDateTime> {
    let utc = OffsetDateTime::from_unix_timestamp_nanos(at.unix_timestamp_nanos()).ok()?;
    if !(0..=9999).contains(&utc.year()) {
        return None;
    }
    utc.replace_nanosecond(utc.nanosecond() / 1_000 * 1_000).ok()
}

fn normalize(fields: AppointmentFields) -> AppResult<AppointmentFields> {
    let appointment_date = normalize_timestamp(fields.appointment_date).ok_or_else(|| {
        warn!(at = %fields.appointment_date, "appointment date out of range");
        AppError::Validation(INVALID_DATE.into())
    })?;
    Ok(AppointmentFields {
        appointment_date,
        ..fields
    })
}

fn map_write_error(e: StoreError) -> AppError {
    match e {
        StoreError::Unique(_) => AppError::Conflict(EMPLOYEE_BOOKED.into()),
        StoreError::ForeignKey(_) => AppError::Validation(INVALID_REFERENCE.into()),
        other => other.into(),
    }
}

impl Scheduler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[instrument(
        skip(self, request),
        fields(employee_id = %request.employee_id, at = %request.appointment_date)
    )]
    pub async fn create(&self, request: AppointmentFields) -> AppResult<Appointment> {
        let fields = normalize(request)?;

        let (user, employee, service) = tokio::try_join!(
            self.store.get_user(fields.user_id),
            self.store.get_employee(fields.employee_id),
            self.store.get_service(fields.service_id),
        )?;
        if user.is_none() || employee.is_none() || service.is_none() {
            warn!(
                user_found = user.is_some(),
                employee_found = employee.is_some(),
                service_found = service.is_some(),
                "appointment references unknown records"
            );
            return Err(AppError::Validation(INVALID_REFERENCE.into()));
        }

        if self
            .store
            .employee_booked_at(fields.employee_id, fields.appointment_date)
            .await?
        {
            warn!("employee already booked");
            return Err(AppError::Conflict(EMPLOYEE_BOOKED.into()));
        }

        let appointment = self
            .store
            .insert_appointment(Uuid::new_v4(), &fields)
            .await
            .map_err(|e| {
                warn!(error = %e, "appointment insert rejected by store");
                map_write_error(e)
            })?;
        info!(appointment_id = %appointment.id, "appointment created");
        Ok(appointment)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<AppointmentDetails> {
        self.store
            .get_appointment_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    pub async fn list(&self) -> AppResult<Vec<AppointmentDetails>> {
        Ok(self.store.list_appointment_details().await?)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: AppointmentFields) -> AppResult<()> {
        let fields = normalize(request)?;
        let found = self
            .store
            .update_appointment(id, &fields)
            .await
            .map_err(map_write_error)?;
        if !found {
            return Err(AppError::NotFound(NOT_FOUND.into()));
        }
        info!(appointment_id = %id, "appointment updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_appointment(id).await? {
            return Err(AppError::NotFound(NOT_FOUND.into()));
        }
        info!(appointment_id = %id, "appointment deleted");
        Ok(())
    }
}
