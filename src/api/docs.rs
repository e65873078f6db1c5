//! Generated API documentation.
//!
//! The OpenAPI document is assembled from the `#[utoipa::path]` annotations on
//! the handlers and served as JSON; `/api-docs` renders it with Swagger UI
//! loaded from a CDN.

use axum::{response::Html, routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

use super::error::{ErrorBody, ErrorResponse};
use crate::db::{Task, TaskRequest, User, UserRequest};
use crate::AppState;

pub const DOCS_PATH: &str = "/api-docs";
pub const SPEC_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo List API", description = "A TodoList API"),
    paths(
        crate::api::tasks::list_tasks,
        crate::api::tasks::get_task,
        crate::api::tasks::create_task,
        crate::api::tasks::update_task,
        crate::api::tasks::delete_task,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user
    ),
    components(schemas(Task, TaskRequest, User, UserRequest, ErrorResponse, ErrorBody)),
    tags(
        (name = "Tasks", description = "tasks apis"),
        (name = "Users", description = "users apis")
    )
)]
pub struct ApiDoc;

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "{spec_url}", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(DOCS_PATH, get(swagger_ui))
        .route(SPEC_PATH, get(openapi_json))
}

/// Interactive documentation page
///
/// GET /api-docs
async fn swagger_ui() -> Html<String> {
    let doc = ApiDoc::openapi();
    Html(
        SWAGGER_UI_HTML
            .replace("{title}", &doc.info.title)
            .replace("{spec_url}", SPEC_PATH),
    )
}

/// OpenAPI document
///
/// GET /api-docs/openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
