use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
}
