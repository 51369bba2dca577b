//! Ownership check for single-task operations.
//!
//! Reading one task, updating it, and deleting it all go through
//! [`require_owner`]. Listing does not: it filters by owner in the query.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::Task;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
    NotFound,
}

/// Decides whether `requester` may act on `task` (`None` = no such task).
pub fn authorize(task: Option<&Task>, requester: Uuid) -> Access {
    match task {
        None => Access::NotFound,
        Some(task) if task.user_id != requester => Access::Forbidden,
        Some(_) => Access::Allowed,
    }
}

/// Returns the task if `requester` owns it, or the matching error.
pub fn require_owner(task: Option<Task>, requester: Uuid) -> Result<Task, AppError> {
    match (authorize(task.as_ref(), requester), task) {
        (Access::Allowed, Some(task)) => Ok(task),
        (Access::Forbidden, _) => {
            log::warn!("User {} denied access to a task they do not own", requester);
            Err(AppError::Forbidden("Access denied to this task".into()))
        }
        _ => Err(AppError::NotFound("Task not found".into())),
    }
}
