use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::validation::{deserialize_present, non_blank};

/// Represents the status of a task, i.e. its column on the board.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    #[serde(rename = "PENDENTE")]
    #[sqlx(rename = "PENDENTE")]
    Pending,
    /// Task is currently being worked on.
    #[serde(rename = "EM_ANDAMENTO")]
    #[sqlx(rename = "EM_ANDAMENTO")]
    InProgress,
    /// Task is completed.
    #[serde(rename = "CONCLUIDA")]
    #[sqlx(rename = "CONCLUIDA")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDENTE",
            TaskStatus::InProgress => "EM_ANDAMENTO",
            TaskStatus::Done => "CONCLUIDA",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Invalid status. Use: PENDENTE, EM_ANDAMENTO or CONCLUIDA".into(),
                )
            })
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    pub status: TaskStatus,
    #[serde(rename = "dataCriacao")]
    pub created_at: DateTime<Utc>,
    /// Set by the client when the task is finished. The server never derives it from `status`.
    #[serde(rename = "dataConclusao")]
    pub completed_at: Option<DateTime<Utc>>,
    /// The owner. Only this user may read, change, or delete the task.
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

impl Task {
    /// Creates a new `Task` owned by `user_id`, created now and not yet completed.
    pub fn new(user_id: Uuid, title: String, description: String, status: TaskStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            status,
            created_at: Utc::now(),
            completed_at: None,
            user_id,
        }
    }

    /// Applies the fields present in `patch`, leaving the others unchanged.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
    }
}

/// A validated partial update. `None` means "leave the field as it is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    /// `Some(None)` clears the completion timestamp.
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Payload for `POST /api/tasks`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(rename = "titulo", default)]
    #[validate(custom = "non_blank")]
    pub title: String,

    #[serde(rename = "descricao", default)]
    #[validate(custom = "non_blank")]
    pub description: String,

    /// One of `PENDENTE`, `EM_ANDAMENTO`, `CONCLUIDA`. Defaults to `PENDENTE`.
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateTaskRequest {
    /// Validates the request and resolves the status, defaulting to pending.
    pub fn validated_status(&self) -> Result<TaskStatus, AppError> {
        self.validate()?;
        self.status
            .as_deref()
            .map(TaskStatus::from_str)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Payload for `PUT /api/tasks/{id}`. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[serde(rename = "titulo", default)]
    #[validate(custom = "non_blank")]
    pub title: Option<String>,

    #[serde(rename = "descricao", default)]
    #[validate(custom = "non_blank")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Absent leaves the timestamp alone, `null` clears it.
    #[serde(
        rename = "dataConclusao",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, AppError> {
        self.validate()?;
        let status = self.status.as_deref().map(TaskStatus::from_str).transpose()?;
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status,
            completed_at: self.completed_at,
        })
    }
}
