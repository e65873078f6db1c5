//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
#[sqlx(rename_all = "PascalCase")]
#[schema(example = json!({
    "Id": "d5fE_asz",
    "Email": "phumudzo@example.com",
    "FirstName": "Phumudzo",
    "LastName": "Nthangeni",
    "UserType": 1,
    "Password": "$argon2id$v=19$m=19456,t=2,p=1$..."
}))]
pub struct User {
    /// Server-generated id
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Role/category code
    pub user_type: Option<i32>,
    /// Argon2 hash of the password, never the plaintext
    pub password: String,
}

/// Body of `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
#[schema(example = json!({
    "Email": "phumudzo@example.com",
    "FirstName": "Phumudzo",
    "LastName": "Nthangeni",
    "UserType": 1,
    "Password": "123qwe"
}))]
pub struct UserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_type: Option<i32>,
    /// Plaintext; hashed before it reaches the database
    #[serde(default)]
    pub password: String,
}

impl UserRequest {
    /// Build the stored row. `password_hash` replaces the plaintext password.
    pub fn into_user(self, id: String, password_hash: String) -> User {
        User {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            user_type: self.user_type,
            password: password_hash,
        }
    }
}
