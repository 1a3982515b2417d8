use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::employees::repo_types::Employee;
use crate::salon_services::repo_types::Service;
use crate::users::repo_types::User;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub appointment_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The four caller-supplied columns; written together on create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentFields {
    pub user_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: OffsetDateTime,
}

/// Appointment with its user, employee and service resolved.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub user: User,
    pub employee: Employee,
    pub service: Service,
}

#[derive(Debug, FromRow)]
pub struct AppointmentDetailsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub user_name: String,
    pub user_email: String,
    pub user_password_hash: String,
    pub user_created_at: OffsetDateTime,
    pub employee_name: String,
    pub employee_email: String,
    pub employee_created_at: OffsetDateTime,
    pub service_name: String,
    pub service_created_at: OffsetDateTime,
}

impl From<AppointmentDetailsRow> for AppointmentDetails {
    fn from(r: AppointmentDetailsRow) -> Self {
        Self {
            appointment: Appointment {
                id: r.id,
                user_id: r.user_id,
                employee_id: r.employee_id,
                service_id: r.service_id,
                appointment_date: r.appointment_date,
                created_at: r.created_at,
            },
            user: User {
                id: r.user_id,
                name: r.user_name,
                email: r.user_email,
                password_hash: r.user_password_hash,
                created_at: r.user_created_at,
            },
            employee: Employee {
                id: r.employee_id,
                name: r.employee_name,
                email: r.employee_email,
                created_at: r.employee_created_at,
            },
            service: Service {
                id: r.service_id,
                name: r.service_name,
                created_at: r.service_created_at,
            },
        }
    }
}
