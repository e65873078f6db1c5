use crate::db::{DbError, DbPool, Task};

const RESOURCE: &str = "task";

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a DbPool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// All tasks in storage order.
    pub async fn list_all(&self) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM Tasks")
            .fetch_all(self.pool)
            .await?;
        Ok(tasks)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Task, DbError> {
        sqlx::query_as::<_, Task>("SELECT * FROM Tasks WHERE Id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a full row and return it as stored.
    pub async fn create(&self, task: &Task) -> Result<Task, DbError> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO Tasks (Id, Task, Status, Priority, IsDeleted)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&task.id)
        .bind(&task.task)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.is_deleted)
        .fetch_one(self.pool)
        .await?;
        Ok(created)
    }

    /// Overwrite every non-key column of the row with `task.id`.
    pub async fn update(&self, task: &Task) -> Result<Task, DbError> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE Tasks SET
                Task = ?,
                Status = ?,
                Priority = ?,
                IsDeleted = ?
            WHERE Id = ?
            RETURNING *
            "#,
        )
        .bind(&task.task)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.is_deleted)
        .bind(&task.id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, &task.id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM Tasks WHERE Id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn sample(id: &str) -> Task {
        Task {
            id: id.to_string(),
            task: Some("Write the report".to_string()),
            status: Some("open".to_string()),
            priority: Some("2".to_string()),
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);

        let created = repo.create(&sample("t1")).await.unwrap();
        assert_eq!(created, sample("t1"));

        let fetched = repo.get_by_id("t1").await.unwrap();
        assert_eq!(fetched, sample("t1"));
    }

    #[tokio::test]
    async fn test_list_all() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);

        assert!(repo.list_all().await.unwrap().is_empty());

        repo.create(&sample("t1")).await.unwrap();
        repo.create(&sample("t2")).await.unwrap();

        let mut ids: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);

        let err = repo.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "task", ref id } if id == "nope"));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);
        repo.create(&sample("t1")).await.unwrap();

        let changed = Task {
            id: "t1".to_string(),
            task: None,
            status: Some("done".to_string()),
            priority: None,
            is_deleted: true,
        };
        let updated = repo.update(&changed).await.unwrap();
        assert_eq!(updated, changed);
        assert_eq!(repo.get_by_id("t1").await.unwrap(), changed);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);

        let err = repo.update(&sample("ghost")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);
        repo.create(&sample("t1")).await.unwrap();

        repo.delete("t1").await.unwrap();
        assert!(matches!(
            repo.get_by_id("t1").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            repo.delete("t1").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_not_a_conflict() {
        let pool = test_pool().await;
        let repo = TaskRepo::new(&pool);
        repo.create(&sample("t1")).await.unwrap();

        let err = repo.create(&sample("t1")).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));

        let api_err = crate::api::error::ApiError::from(err);
        assert_eq!(api_err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
