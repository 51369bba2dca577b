use crate::{
    auth::AuthContext,
    error::AppError,
    models::{CreateTaskRequest, Task, UpdateTaskRequest},
    store::Store,
    tasks,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned for a single task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub task: Task,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Retrieves the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...]}`, ordered by creation date, newest first.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    store: web::Data<dyn Store>,
    auth: AuthContext,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_mine(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(TaskListResponse { tasks }))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `titulo`: required, non-empty.
/// - `descricao`: required, non-empty.
/// - `status` (optional): `PENDENTE` (default), `EM_ANDAMENTO` or `CONCLUIDA`.
///
/// ## Responses:
/// - `201 Created`: `{"message", "task"}`.
/// - `400 Bad Request`: missing title/description or unknown status.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    auth: AuthContext,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = tasks::create(store.get_ref(), &auth, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(TaskResponse {
        message: Some("Task created successfully".into()),
        task,
    }))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{"task"}`.
/// - `403 Forbidden`: the task belongs to another user.
/// - `404 Not Found`: no task with this id.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<dyn Store>,
    auth: AuthContext,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks::get_one(store.get_ref(), &auth, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TaskResponse { message: None, task }))
}

/// Partially updates a task.
///
/// Only the fields present in the body change. `dataConclusao: null` clears the
/// completion timestamp; omitting it leaves the timestamp untouched.
///
/// ## Responses:
/// - `200 OK`: `{"message", "task"}`.
/// - `400 Bad Request`: unknown status, blank title/description, bad timestamp.
/// - `403 Forbidden` / `404 Not Found`: as for `GET /tasks/{id}`.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn Store>,
    auth: AuthContext,
    task_id: web::Path<Uuid>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = tasks::update(
        store.get_ref(),
        &auth,
        task_id.into_inner(),
        task_data.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(TaskResponse {
        message: Some("Task updated successfully".into()),
        task,
    }))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `200 OK`: `{"message"}`.
/// - `403 Forbidden` / `404 Not Found`: as for `GET /tasks/{id}`.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    auth: AuthContext,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    tasks::delete(store.get_ref(), &auth, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Task deleted successfully".into(),
    }))
}
