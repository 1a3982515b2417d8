use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{Store, StoreError, USER_EMAIL_CONSTRAINT};
use crate::users::dto::UserRequest;
use crate::users::password::{hash_password, MIN_PASSWORD_LEN};
use crate::users::repo::UserRepo;
use crate::users::repo_types::{User, UserFields};
use crate::validation::{normalize_email, require_name};

const NOT_FOUND: &str = "User not found.";

fn prepare(req: UserRequest) -> AppResult<UserFields> {
    let name = require_name(&req.name)?;
    let email = normalize_email(&req.email)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short.".into()));
    }
    let password_hash = hash_password(&req.password)?;
    Ok(UserFields {
        name,
        email,
        password_hash,
    })
}

fn map_store_error(e: StoreError) -> AppError {
    match e {
        StoreError::Unique(c) if c == USER_EMAIL_CONSTRAINT => {
            AppError::Conflict("Email already registered.".into())
        }
        other => other.into(),
    }
}

#[instrument(skip(store, req))]
pub async fn create_user(store: &dyn Store, req: UserRequest) -> AppResult<User> {
    let fields = prepare(req)?;
    let user = store
        .insert_user(Uuid::new_v4(), &fields)
        .await
        .map_err(map_store_error)?;
    info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user)
}

pub async fn get_user(store: &dyn Store, id: Uuid) -> AppResult<User> {
    store
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn list_users(store: &dyn Store) -> AppResult<Vec<User>> {
    Ok(store.list_users().await?)
}

#[instrument(skip(store, req))]
pub async fn update_user(store: &dyn Store, id: Uuid, req: UserRequest) -> AppResult<()> {
    let fields = prepare(req)?;
    if !store.update_user(id, &fields).await.map_err(map_store_error)? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(user_id = %id, "user updated");
    Ok(())
}

#[instrument(skip(store))]
pub async fn delete_user(store: &dyn Store, id: Uuid) -> AppResult<()> {
    if !store.delete_user(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(user_id = %id, "user deleted");
    Ok(())
}
