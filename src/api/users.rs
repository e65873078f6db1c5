//! User endpoints.
//!
//! Passwords are hashed before they reach the repository. Email uniqueness is
//! checked up front for a cheap early 409, but the unique index on `Email` is
//! what decides concurrent signups.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use super::error::{ApiError, ErrorResponse};
use super::extractors::{ApiJson, ResourceId};
use super::validation::validate_user_request;
use crate::crypto::hash_password;
use crate::db::repos::users::duplicate_email_message;
use crate::db::{User, UserRepo, UserRequest};
use crate::utils::short_id;
use crate::AppState;

/// List all registered users
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "The list of the registered users", body = Vec<User>),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.db).list_all().await?;
    Ok(Json(users))
}

/// Get a user by id
///
/// GET /users/:id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "The user's id")),
    responses(
        (status = 200, description = "The user description by id", body = User),
        (status = 404, description = "The user was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.db).get_by_id(&id).await?;
    Ok(Json(user))
}

/// Register a new user
///
/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "The user was successfully created", body = User),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 409, description = "A user with this email already exists", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UserRequest>,
) -> Result<Json<User>, ApiError> {
    validate_user_request(&req)?;

    let repo = UserRepo::new(&state.db);
    if repo.count_by_email(&req.email).await? > 0 {
        return Err(ApiError::conflict(duplicate_email_message(&req.email)));
    }

    let password_hash = hash_password(&req.password)?;
    let user = req.into_user(short_id(), password_hash);
    let created = repo.create(&user).await?;

    info!(user_id = %created.id, "User created");
    Ok(Json(created))
}

/// Overwrite a user; the new password is hashed before storage
///
/// PUT /users/:id
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "The user id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "The user was updated", body = User),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 404, description = "The user was not found", body = ErrorResponse),
        (status = 409, description = "The email belongs to another user", body = ErrorResponse),
        (status = 500, description = "Some error happened", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
    ApiJson(req): ApiJson<UserRequest>,
) -> Result<Json<User>, ApiError> {
    validate_user_request(&req)?;

    let password_hash = hash_password(&req.password)?;
    let user = req.into_user(id, password_hash);
    let updated = UserRepo::new(&state.db).update(&user).await?;

    info!(user_id = %updated.id, "User updated");
    Ok(Json(updated))
}

/// Remove a user
///
/// DELETE /users/:id
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "The user id")),
    responses(
        (status = 200, description = "The user was deleted"),
        (status = 404, description = "The user was not found", body = ErrorResponse),
        (status = 500, description = "Some server error", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(&state.db).delete(&id).await?;

    info!(user_id = %id, "User deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::{send, test_app};
    use crate::crypto::verify_password;

    #[tokio::test]
    async fn test_signup_conflict_and_fetch() {
        let app = test_app().await;

        let (status, created) = send(
            &app,
            "POST",
            "/users",
            Some(json!({ "Email": "a@x.com", "Password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["Id"].as_str().unwrap().to_string();
        let hash = created["Password"].as_str().unwrap();
        assert_ne!(hash, "pw");
        assert!(verify_password("pw", hash));

        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(json!({ "Email": "a@x.com", "Password": "other" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "conflict");
        assert_eq!(body["error"]["message"], "user with a@x.com already exists");

        let (status, fetched) = send(&app, "GET", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_keeps_optional_fields() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(json!({
                "Email": "phumudzo@example.com",
                "FirstName": "Phumudzo",
                "LastName": "Nthangeni",
                "UserType": 1,
                "Password": "123qwe"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Email"], "phumudzo@example.com");
        assert_eq!(body["FirstName"], "Phumudzo");
        assert_eq!(body["LastName"], "Nthangeni");
        assert_eq!(body["UserType"], 1);
    }

    #[tokio::test]
    async fn test_concurrent_signups_admit_one() {
        let app = test_app().await;
        let body = json!({ "Email": "race@x.com", "Password": "pw" });

        let (first, second) = tokio::join!(
            send(&app, "POST", "/users", Some(body.clone())),
            send(&app, "POST", "/users", Some(body.clone())),
        );

        let mut statuses = vec![first.0, second.0];
        statuses.sort();
        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = test_app().await;

        let (status, body) = send(&app, "POST", "/users", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
        assert!(body["error"]["details"]["Email"].is_array());
        assert!(body["error"]["details"]["Password"].is_array());

        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(json!({ "Email": "userName", "Password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Email must be a valid email address");
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let app = test_app().await;

        let (_, created) = send(
            &app,
            "POST",
            "/users",
            Some(json!({ "Email": "a@x.com", "Password": "old" })),
        )
        .await;
        let id = created["Id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/users/{}", id),
            Some(json!({ "Email": "b@x.com", "LastName": "Doe", "UserType": 2, "Password": "new" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["Id"], id);

        let (_, fetched) = send(&app, "GET", &format!("/users/{}", id), None).await;
        assert_eq!(fetched["Email"], "b@x.com");
        assert_eq!(fetched["LastName"], "Doe");
        assert_eq!(fetched["UserType"], 2);
        let hash = fetched["Password"].as_str().unwrap();
        assert!(verify_password("new", hash));
        assert!(!verify_password("old", hash));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let app = test_app().await;

        send(&app, "POST", "/users", Some(json!({ "Email": "a@x.com", "Password": "pw" }))).await;
        let (_, second) =
            send(&app, "POST", "/users", Some(json!({ "Email": "b@x.com", "Password": "pw" })))
                .await;
        let id = second["Id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/users/{}", id),
            Some(json!({ "Email": "a@x.com", "Password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "user with a@x.com already exists");
    }

    #[tokio::test]
    async fn test_missing_user_is_404() {
        let app = test_app().await;

        let (status, body) = send(&app, "GET", "/users/nobody", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");

        let (status, _) = send(
            &app,
            "PUT",
            "/users/nobody",
            Some(json!({ "Email": "a@x.com", "Password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/users/nobody", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let app = test_app().await;

        let (_, created) =
            send(&app, "POST", "/users", Some(json!({ "Email": "a@x.com", "Password": "pw" })))
                .await;
        let id = created["Id"].as_str().unwrap();

        let (status, _) = send(&app, "DELETE", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The email is free again
        let (status, _) =
            send(&app, "POST", "/users", Some(json!({ "Email": "a@x.com", "Password": "pw" })))
                .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_multibyte_id_within_limit_is_looked_up() {
        let app = test_app().await;

        let uri = format!("/users/{}", "%C3%A9".repeat(200));
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }
}
