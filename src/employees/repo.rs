use async_trait::async_trait;
use uuid::Uuid;

use crate::employees::repo_types::{Employee, EmployeeFields};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait EmployeeRepo: Send + Sync {
    async fn insert_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee, StoreError>;
    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
    async fn update_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<bool, StoreError>;
    /// Also removes the employee's appointments.
    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl EmployeeRepo for PgStore {
    async fn insert_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .fetch_one(&self.db)
        .await?;
        Ok(employee)
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"SELECT id, name, email, created_at FROM employees WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(employee)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, created_at
            FROM employees
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_employee(&self, id: Uuid, fields: &EmployeeFields) -> Result<bool, StoreError> {
        let res = sqlx::query(r#"UPDATE employees SET name = $2, email = $3 WHERE id = $1"#)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.email)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
