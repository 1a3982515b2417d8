use async_trait::async_trait;
use uuid::Uuid;

use crate::salon_services::repo_types::Service;
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait ServiceRepo: Send + Sync {
    async fn insert_service(&self, id: Uuid, name: &str) -> Result<Service, StoreError>;
    async fn get_service(&self, id: Uuid) -> Result<Option<Service>, StoreError>;
    async fn list_services(&self) -> Result<Vec<Service>, StoreError>;
    async fn update_service(&self, id: Uuid, name: &str) -> Result<bool, StoreError>;
    async fn delete_service(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl ServiceRepo for PgStore {
    async fn insert_service(&self, id: Uuid, name: &str) -> Result<Service, StoreError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.db)
        .await?;
        Ok(service)
    }

    async fn get_service(&self, id: Uuid) -> Result<Option<Service>, StoreError> {
        let service =
            sqlx::query_as::<_, Service>(r#"SELECT id, name, created_at FROM services WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.db)
                .await?;
        Ok(service)
    }

    async fn list_services(&self) -> Result<Vec<Service>, StoreError> {
        let rows = sqlx::query_as::<_, Service>(
            r#"SELECT id, name, created_at FROM services ORDER BY created_at ASC, id ASC"#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_service(&self, id: Uuid, name: &str) -> Result<bool, StoreError> {
        let res = sqlx::query("UPDATE services SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
