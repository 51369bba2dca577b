pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskPatch, TaskStatus, UpdateTaskRequest};
pub use user::{PublicUser, User};
