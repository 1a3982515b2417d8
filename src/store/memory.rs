//! In-memory store for tests. Mirrors the PostgreSQL schema's constraints:
//! unique user email, unique employee slot, references that must resolve,
//! and cascading deletes from users, employees and services.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::appointments::repo::AppointmentRepo;
use crate::appointments::repo_types::{Appointment, AppointmentDetails, AppointmentFields};
use crate::employees::repo::EmployeeRepo;
use crate::employees::repo_types::{Employee, EmployeeFields};
use crate::salon_services::repo::ServiceRepo;
use crate::salon_services::repo_types::Service;
use crate::store::{StoreError, APPOINTMENT_SLOT_CONSTRAINT, USER_EMAIL_CONSTRAINT};
use crate::users::repo::UserRepo;
use crate::users::repo_types::{User, UserFields};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    employees: Vec<Employee>,
    services: Vec<Service>,
    appointments: Vec<Appointment>,
}

impl Tables {
    fn check_references(&self, fields: &AppointmentFields) -> Result<(), StoreError> {
        if !self.users.iter().any(|u| u.id == fields.user_id) {
            return Err(StoreError::ForeignKey("appointments_user_id_fkey".into()));
        }
        if !self.employees.iter().any(|e| e.id == fields.employee_id) {
            return Err(StoreError::ForeignKey("appointments_employee_id_fkey".into()));
        }
        if !self.services.iter().any(|s| s.id == fields.service_id) {
            return Err(StoreError::ForeignKey("appointments_service_id_fkey".into()));
        }
        Ok(())
    }

    fn check_slot(&self, fields: &AppointmentFields, except: Option<Uuid>) -> Result<(), StoreError> {
        let taken = self.appointments.iter().any(|a| {
            Some(a.id) != except
                && a.employee_id == fields.employee_id
                && a.appointment_date == fields.appointment_date
        });
        if taken {
            return Err(StoreError::Unique(APPOINTMENT_SLOT_CONSTRAINT.into()));
        }
        Ok(())
    }

    fn check_email(&self, email: &str, except: Option<Uuid>) -> Result<(), StoreError> {
        if self
            .users
            .iter()
            .any(|u| Some(u.id) != except && u.email == email)
        {
            return Err(StoreError::Unique(USER_EMAIL_CONSTRAINT.into()));
        }
        Ok(())
    }

    fn details(&self, a: &Appointment) -> Option<AppointmentDetails> {
        Some(AppointmentDetails {
            appointment: a.clone(),
            user: self.users.iter().find(|u| u.id == a.user_id)?.clone(),
            employee: self.employees.iter().find(|e| e.id == a.employee_id)?.clone(),
            service: self.services.iter().find(|s| s.id == a.service_id)?.clone(),
        })
    }
}

/// Checks and writes happen under one lock, so constraint checks are atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn appointment_count(&self) -> usize {
        self.tables.lock().unwrap().appointments.len()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert_user(&self, id: Uuid, fields: &UserFields) -> Result<User, StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.check_email(&fields.email, None)?;
        let user = User {
            id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            password_hash: fields.password_hash.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn update_user(&self, id: Uuid, fields: &UserFields) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.check_email(&fields.email, Some(id))?;
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        user.name = fields.name.clone();
        user.email = fields.email.clone();
        user.password_hash = fields.password_hash.clone();
        Ok(true)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        t.appointments.retain(|a| a.user_id != id);
        Ok(t.users.len() < before)
    }
}

#[async_trait]
impl EmployeeRepo for MemoryStore {
    async fn insert_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee, StoreError> {
        let employee = Employee {
            id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.lock().unwrap().employees.push(employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.tables.lock().unwrap().employees.clone())
    }

    async fn update_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let Some(employee) = t.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        employee.name = fields.name.clone();
        employee.email = fields.email.clone();
        Ok(true)
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.employees.len();
        t.employees.retain(|e| e.id != id);
        t.appointments.retain(|a| a.employee_id != id);
        Ok(t.employees.len() < before)
    }
}

#[async_trait]
impl ServiceRepo for MemoryStore {
    async fn insert_service(&self, id: Uuid, name: &str) -> Result<Service, StoreError> {
        let service = Service {
            id,
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables.lock().unwrap().services.push(service.clone());
        Ok(service)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.services.iter().find(|s| s.id == id).cloned())
    }

    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        Ok(self.tables.lock().unwrap().services.clone())
    }

    async fn update_service(&self, id: Uuid, name: &str) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let Some(service) = t.services.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        service.name = name.to_string();
        Ok(true)
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.services.len();
        t.services.retain(|s| s.id != id);
        t.appointments.retain(|a| a.service_id != id);
        Ok(t.services.len() < before)
    }
}

#[async_trait]
impl AppointmentRepo for MemoryStore {
    async fn insert_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<Appointment, StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.check_references(fields)?;
        t.check_slot(fields, None)?;
        let appointment = Appointment {
            id,
            user_id: fields.user_id,
            employee_id: fields.employee_id,
            service_id: fields.service_id,
            appointment_date: fields.appointment_date,
            created_at: OffsetDateTime::now_utc(),
        };
        t.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn get_appointment_details(
        &self,
        id: Uuid,
    ) -> Result<Option<AppointmentDetails>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.appointments
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| t.details(a)))
    }

    async fn list_appointment_details(&self) -> Result<Vec<AppointmentDetails>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.appointments.iter().filter_map(|a| t.details(a)).collect())
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        fields: &AppointmentFields,
    ) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        if !t.appointments.iter().any(|a| a.id == id) {
            return Ok(false);
        }
        t.check_references(fields)?;
        t.check_slot(fields, Some(id))?;
        if let Some(a) = t.appointments.iter_mut().find(|a| a.id == id) {
            a.user_id = fields.user_id;
            a.employee_id = fields.employee_id;
            a.service_id = fields.service_id;
            a.appointment_date = fields.appointment_date;
        }
        Ok(true)
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.appointments.len();
        t.appointments.retain(|a| a.id != id);
        Ok(t.appointments.len() < before)
    }

    async fn employee_booked_at(
        &self,
        employee_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<bool, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.appointments
            .iter()
            .any(|a| a.employee_id == employee_id && a.appointment_date == at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    async fn seeded() -> (MemoryStore, AppointmentFields) {
        let store = MemoryStore::default();
        let user = store
            .insert_user(
                Uuid::new_v4(),
                &UserFields {
                    name: "Ana".into(),
                    email: "ana@salon.com".into(),
                    password_hash: "h".into(),
                },
            )
            .await
            .unwrap();
        let employee = store
            .insert_employee(
                Uuid::new_v4(),
                &EmployeeFields {
                    name: "Bia".into(),
                    email: "bia@salon.com".into(),
                },
            )
            .await
            .unwrap();
        let service = store.insert_service(Uuid::new_v4(), "Haircut").await.unwrap();
        let fields = AppointmentFields {
            user_id: user.id,
            employee_id: employee.id,
            service_id: service.id,
            appointment_date: datetime!(2025-01-01 10:00 UTC),
        };
        (store, fields)
    }

    #[tokio::test]
    async fn slot_constraint_rejects_second_insert() {
        let (store, fields) = seeded().await;
        store.insert_appointment(Uuid::new_v4(), &fields).await.unwrap();
        let err = store.insert_appointment(Uuid::new_v4(), &fields).await.unwrap_err();
        assert!(matches!(err, StoreError::Unique(ref c) if c == APPOINTMENT_SLOT_CONSTRAINT));
        assert_eq!(store.appointment_count(), 1);
    }

    #[tokio::test]
    async fn dangling_reference_is_a_foreign_key_error() {
        let (store, mut fields) = seeded().await;
        fields.service_id = Uuid::new_v4();
        let err = store.insert_appointment(Uuid::new_v4(), &fields).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
        assert_eq!(store.appointment_count(), 0);
    }

    #[tokio::test]
    async fn deleting_an_employee_cascades_to_appointments() {
        let (store, fields) = seeded().await;
        store.insert_appointment(Uuid::new_v4(), &fields).await.unwrap();
        assert!(store.delete_employee(fields.employee_id).await.unwrap());
        assert_eq!(store.appointment_count(), 0);
        assert!(store.get_user(fields.user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_an_appointment_leaves_references_alone() {
        let (store, fields) = seeded().await;
        let a = store.insert_appointment(Uuid::new_v4(), &fields).await.unwrap();
        assert!(store.delete_appointment(a.id).await.unwrap());
        assert!(!store.delete_appointment(a.id).await.unwrap());
        assert!(store.get_user(fields.user_id).await.unwrap().is_some());
        assert!(store.get_employee(fields.employee_id).await.unwrap().is_some());
        assert!(store.get_service(fields.service_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn email_uniqueness_ignores_the_row_being_updated() {
        let (store, fields) = seeded().await;
        let same = UserFields {
            name: "Ana B".into(),
            email: "ana@salon.com".into(),
            password_hash: "h2".into(),
        };
        assert!(store.update_user(fields.user_id, &same).await.unwrap());
        let err = store.insert_user(Uuid::new_v4(), &same).await.unwrap_err();
        assert!(matches!(err, StoreError::Unique(_)));
    }
}
