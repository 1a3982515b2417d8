use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::appointments::repo_types::{
    Appointment, AppointmentDetails, AppointmentDetailsRow, AppointmentFields,
};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait AppointmentRepo: Send + Sync {
    /// Fails with `StoreError::Unique` if the employee is already booked at that instant,
    /// and with `StoreError::ForeignKey` if a reference does not resolve.
    async fn insert_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<Appointment, StoreError>;
    async fn get_appointment_details(&self, id: Uuid)
        -> Result<Option<AppointmentDetails>, StoreError>;
    async fn list_appointment_details(&self) -> Result<Vec<AppointmentDetails>, StoreError>;
    async fn update_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<bool, StoreError>;
    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn employee_booked_at(
        &self,
        employee_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<bool, StoreError>;
}

const DETAILS_SELECT: &str = r#"
    SELECT a.id, a.user_id, a.employee_id, a.service_id, a.appointment_date, a.created_at,
           u.name AS user_name, u.email AS user_email,
           u.password_hash AS user_password_hash, u.created_at AS user_created_at,
           e.name AS employee_name, e.email AS employee_email,
           e.created_at AS employee_created_at,
           s.name AS service_name, s.created_at AS service_created_at
      FROM appointments a
      JOIN users u ON u.id = a.user_id
      JOIN employees e ON e.id = a.employee_id
      JOIN services s ON s.id = a.service_id
"#;

#[async_trait]
impl AppointmentRepo for PgStore {
    async fn insert_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<Appointment, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, user_id, employee_id, service_id, appointment_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, employee_id, service_id, appointment_date, created_at
            "#,
        )
        .bind(id)
        .bind(fields.user_id)
        .bind(fields.employee_id)
        .bind(fields.service_id)
        .bind(fields.appointment_date)
        .fetch_one(&self.db)
        .await?;
        Ok(appointment)
    }

    async fn get_appointment_details(
        &self,
        id: Uuid,
    ) -> Result<Option<AppointmentDetails>, StoreError> {
        let row = sqlx::query_as::<_, AppointmentDetailsRow>(&format!(
            "{DETAILS_SELECT} WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(AppointmentDetails::from))
    }

    async fn list_appointment_details(&self) -> Result<Vec<AppointmentDetails>, StoreError> {
        let rows = sqlx::query_as::<_, AppointmentDetailsRow>(&format!(
            "{DETAILS_SELECT} ORDER BY a.created_at ASC, a.id ASC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(AppointmentDetails::from).collect())
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<bool, StoreError> {
        let res = sqlx::query(
            r#"
            UPDATE appointments
               SET user_id = $2, employee_id = $3, service_id = $4, appointment_date = $5
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(fields.user_id)
        .bind(fields.employee_id)
        .bind(fields.service_id)
        .bind(fields.appointment_date)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn employee_booked_at(
        &self,
        employee_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        let (booked,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM appointments
                 WHERE employee_id = $1 AND appointment_date = $2
            )
            "#,
        )
        .bind(employee_id)
        .bind(at)
        .fetch_one(&self.db)
        .await?;
        Ok(booked)
    }
}
