use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::appointments::repo_types::AppointmentFields;

/// Body of `POST /appointments` and `PUT /appointments/:id`. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub user_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub appointment_date: OffsetDateTime,
}

impl From<AppointmentRequest> for AppointmentFields {
    fn from(r: AppointmentRequest) -> Self {
        Self {
            user_id: r.user_id,
            employee_id: r.employee_id,
            service_id: r.service_id,
            appointment_date: r.appointment_date,
        }
    }
}
