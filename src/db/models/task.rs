//! Task models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::common::{boolean_like, free_form};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
#[sqlx(rename_all = "PascalCase")]
#[schema(example = json!({
    "Id": "d5fE_asz",
    "Task": "Write the quarterly report",
    "Status": "open",
    "Priority": "high",
    "IsDeleted": false
}))]
pub struct Task {
    /// Server-generated id
    pub id: String,
    pub task: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Stored and returned as-is; deletes are hard deletes
    pub is_deleted: bool,
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
#[schema(example = json!({
    "Task": "Write the quarterly report",
    "Status": "open",
    "Priority": 1,
    "IsDeleted": false
}))]
pub struct TaskRequest {
    #[serde(default)]
    pub task: Option<String>,
    /// Free-form; strings, numbers and booleans are stored as text
    #[serde(default, deserialize_with = "free_form")]
    #[schema(value_type = Option<String>)]
    pub status: Option<String>,
    /// Free-form; strings, numbers and booleans are stored as text
    #[serde(default, deserialize_with = "free_form")]
    #[schema(value_type = Option<String>)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "boolean_like")]
    pub is_deleted: bool,
}

impl TaskRequest {
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            task: self.task,
            status: self.status,
            priority: self.priority,
            is_deleted: self.is_deleted,
        }
    }
}
