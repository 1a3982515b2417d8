use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    /// Only checked on update, where it must match the path id when present.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
}
