//! Repositories: one SQL statement per operation.
//!
//! - Missing rows surface as `DbError::NotFound`, never as an empty success
//! - Uniqueness is left to the database; violations surface as `DbError::Conflict`,
//!   except `Id` collisions, which stay `DbError::Sqlx`

pub mod tasks;
pub mod users;

pub use tasks::TaskRepo;
pub use users::UserRepo;
