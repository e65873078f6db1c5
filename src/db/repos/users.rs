use crate::db::{DbError, DbPool, User};

const RESOURCE: &str = "user";

/// Message returned when an email is already registered
pub fn duplicate_email_message(email: &str) -> String {
    format!("user with {} already exists", email)
}

/// Rewrite a UNIQUE violation on `Users.Email` into the user-facing message
fn email_conflict(err: sqlx::Error, email: &str) -> DbError {
    match DbError::from(err) {
        DbError::Conflict(msg) if msg.contains("Users.Email") => {
            DbError::Conflict(duplicate_email_message(email))
        }
        other => other,
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// All users in storage order.
    pub async fn list_all(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM Users")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT * FROM Users WHERE Id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Number of users registered with `email`.
    ///
    /// Advisory only: the unique index on `Email` is what rejects duplicates.
    pub async fn count_by_email(&self, email: &str) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Users WHERE Email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a full row and return it as stored.
    ///
    /// `user.password` must already be hashed.
    pub async fn create(&self, user: &User) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO Users (Id, Email, FirstName, LastName, UserType, Password)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.user_type)
        .bind(&user.password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| email_conflict(e, &user.email))
    }

    /// Overwrite every non-key column of the row with `user.id`.
    pub async fn update(&self, user: &User) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE Users SET
                Email = ?,
                FirstName = ?,
                LastName = ?,
                UserType = ?,
                Password = ?
            WHERE Id = ?
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.user_type)
        .bind(&user.password)
        .bind(&user.id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| email_conflict(e, &user.email))?
        .ok_or_else(|| DbError::not_found(RESOURCE, &user.id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM Users WHERE Id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(())
    }
}
