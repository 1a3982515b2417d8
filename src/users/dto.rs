use serde::Deserialize;

/// Body of `POST /users` and `PUT /users/:id`.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
