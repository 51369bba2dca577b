//! Persistence for users and tasks.
//!
//! The flows only talk to the [`UserStore`] and [`TaskStore`] traits. Two backends
//! implement both: [`postgres::PgStore`] for deployments and [`memory::MemoryStore`]
//! for tests and for running without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Inserts a new user. A taken email yields `AppError::Conflict`.
    async fn insert_user(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task. The owner must be an existing user; a missing owner means
    /// the caller's token outlived its account and is `AuthFailure::InvalidToken`.
    async fn insert_task(&self, task: &Task) -> Result<Task, AppError>;

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// All tasks owned by `user_id`, newest first.
    async fn list_tasks_by_owner(&self, user_id: Uuid) -> Result<Vec<Task>, AppError>;

    /// Overwrites the mutable columns of an existing task.
    async fn update_task(&self, task: &Task) -> Result<Task, AppError>;

    /// Returns `false` if no task had that id.
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Everything the HTTP layer needs, as a single trait object.
pub trait Store: UserStore + TaskStore {}

impl<T: UserStore + TaskStore> Store for T {}
