use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::employees::dto::EmployeeRequest;
use crate::employees::repo::EmployeeRepo;
use crate::employees::repo_types::{Employee, EmployeeFields};
use crate::error::{AppError, AppResult};
use crate::store::Store;
use crate::validation::{normalize_email, require_name};

const NOT_FOUND: &str = "Employee not found.";

fn prepare(req: &EmployeeRequest) -> AppResult<EmployeeFields> {
    Ok(EmployeeFields {
        name: require_name(&req.name)?,
        email: normalize_email(&req.email)?,
    })
}

#[instrument(skip(store, req))]
pub async fn create_employee(store: &dyn Store, req: EmployeeRequest) -> AppResult<Employee> {
    let fields = prepare(&req)?;
    let employee = store.insert_employee(Uuid::new_v4(), &fields).await?;
    info!(employee_id = %employee.id, "employee created");
    Ok(employee)
}

pub async fn get_employee(store: &dyn Store, id: Uuid) -> AppResult<Employee> {
    store
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn list_employees(store: &dyn Store) -> AppResult<Vec<Employee>> {
    Ok(store.list_employees().await?)
}

#[instrument(skip(store, req))]
pub async fn update_employee(store: &dyn Store, id: Uuid, req: EmployeeRequest) -> AppResult<()> {
    if req.id.is_some_and(|body_id| body_id != id) {
        warn!(employee_id = %id, body_id = ?req.id, "employee id mismatch");
        return Err(AppError::Validation("Employee ID mismatch.".into()));
    }
    let fields = prepare(&req)?;
    if !store.update_employee(id, &fields).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(employee_id = %id, "employee updated");
    Ok(())
}

#[instrument(skip(store))]
pub async fn delete_employee(store: &dyn Store, id: Uuid) -> AppResult<()> {
    if !store.delete_employee(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(employee_id = %id, "employee deleted");
    Ok(())
}
