use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::salon_services::dto::ServiceRequest;
use crate::salon_services::repo::ServiceRepo;
use crate::salon_services::repo_types::Service;
use crate::store::Store;
use crate::validation::require_name;

const NOT_FOUND: &str = "Service not found.";

#[instrument(skip(store, req))]
pub async fn create_service(store: &dyn Store, req: ServiceRequest) -> AppResult<Service> {
    let name = require_name(&req.name)?;
    let service = store.insert_service(Uuid::new_v4(), &name).await?;
    info!(service_id = %service.id, name = %service.name, "service created");
    Ok(service)
}

pub async fn get_service(store: &dyn Store, id: Uuid) -> AppResult<Service> {
    store
        .get_service(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn list_services(store: &dyn Store) -> AppResult<Vec<Service>> {
    Ok(store.list_services().await?)
}

#[instrument(skip(store, req))]
pub async fn update_service(store: &dyn Store, id: Uuid, req: ServiceRequest) -> AppResult<()> {
    if req.id.is_some_and(|body_id| body_id != id) {
        warn!(service_id = %id, body_id = ?req.id, "service id mismatch");
        return Err(AppError::Validation("Service ID mismatch.".into()));
    }
    let name = require_name(&req.name)?;
    if !store.update_service(id, &name).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(service_id = %id, "service updated");
    Ok(())
}

#[instrument(skip(store))]
pub async fn delete_service(store: &dyn Store, id: Uuid) -> AppResult<()> {
    if !store.delete_service(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(service_id = %id, "service deleted");
    Ok(())
}
