//! Task CRUD on behalf of an authenticated user.
//!
//! Every function takes the caller's [`AuthContext`]. Single-task operations
//! load the task and pass it through [`access::require_owner`] before doing
//! anything else; listing asks the store for the caller's tasks only.

pub mod access;

use uuid::Uuid;

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::store::TaskStore;

pub use access::{authorize, require_owner, Access};

/// Creates a task owned by the caller. Status defaults to `PENDENTE`.
pub async fn create<S>(
    tasks: &S,
    auth: &AuthContext,
    request: CreateTaskRequest,
) -> Result<Task, AppError>
where
    S: TaskStore + ?Sized,
{
    let status = request.validated_status()?;
    let task = Task::new(
        auth.user_id,
        request.title.trim().to_string(),
        request.description.trim().to_string(),
        status,
    );
    let task = tasks.insert_task(&task).await?;

    log::info!("User {} created task {}", auth.user_id, task.id);
    Ok(task)
}

/// The caller's tasks, newest first.
pub async fn list_mine<S>(tasks: &S, auth: &AuthContext) -> Result<Vec<Task>, AppError>
where
    S: TaskStore + ?Sized,
{
    tasks.list_tasks_by_owner(auth.user_id).await
}

pub async fn get_one<S>(tasks: &S, auth: &AuthContext, task_id: Uuid) -> Result<Task, AppError>
where
    S: TaskStore + ?Sized,
{
    require_owner(tasks.find_task(task_id).await?, auth.user_id)
}

/// Applies a partial update. Fields absent from `request` keep their value.
///
/// The completion timestamp is never derived from the status: changing the
/// status away from `CONCLUIDA` leaves `dataConclusao` as it was unless the
/// request sets it explicitly.
pub async fn update<S>(
    tasks: &S,
    auth: &AuthContext,
    task_id: Uuid,
    request: UpdateTaskRequest,
) -> Result<Task, AppError>
where
    S: TaskStore + ?Sized,
{
    let mut task = require_owner(tasks.find_task(task_id).await?, auth.user_id)?;
    let mut patch = request.into_patch()?;
    patch.title = patch.title.map(|t| t.trim().to_string());
    patch.description = patch.description.map(|d| d.trim().to_string());

    task.apply(patch);
    let task = tasks.update_task(&task).await?;

    log::info!("User {} updated task {}", auth.user_id, task.id);
    Ok(task)
}

pub async fn delete<S>(tasks: &S, auth: &AuthContext, task_id: Uuid) -> Result<(), AppError>
where
    S: TaskStore + ?Sized,
{
    let task = require_owner(tasks.find_task(task_id).await?, auth.user_id)?;
    if !tasks.delete_task(task.id).await? {
        // removed concurrently between the lookup and the delete
        return Err(AppError::NotFound("Task not found".into()));
    }

    log::info!("User {} deleted task {}", auth.user_id, task.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskStatus, User};
    use crate::store::{MemoryStore, UserStore};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    async fn store_with_users() -> (MemoryStore, AuthContext, AuthContext) {
        let store = MemoryStore::new();
        let ana = store
            .insert_user(&User::new("ana@example.com".into(), "h".into(), "Ana".into()))
            .await
            .unwrap();
        let bia = store
            .insert_user(&User::new("bia@example.com".into(), "h".into(), "Bia".into()))
            .await
            .unwrap();
        (
            store,
            AuthContext { user_id: ana.id },
            AuthContext { user_id: bia.id },
        )
    }

    fn new_task(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: "Y".to_string(),
            status: None,
        }
    }

    fn parse_update(json: &str) -> UpdateTaskRequest {
        serde_json::from_str(json).unwrap()
    }

    #[actix_rt::test]
    async fn test_create_defaults() {
        let (store, ana, _) = store_with_users().await;

        let task = create(&store, &ana, new_task("X")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.completed_at, None);
        assert_eq!(task.user_id, ana.user_id);
    }

    #[actix_rt::test]
    async fn test_create_validation() {
        let (store, ana, _) = store_with_users().await;

        let blank_title = create(&store, &ana, new_task("  ")).await;
        assert!(matches!(blank_title, Err(AppError::ValidationError(_))));

        let bad_status = CreateTaskRequest {
            status: Some("FINISHED".to_string()),
            ..new_task("X")
        };
        assert!(matches!(
            create(&store, &ana, bad_status).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(list_mine(&store, &ana).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_other_users_are_forbidden() {
        let (store, ana, bia) = store_with_users().await;
        let task = create(&store, &ana, new_task("X")).await.unwrap();

        assert!(matches!(
            get_one(&store, &bia, task.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            update(&store, &bia, task.id, parse_update(r#"{"titulo": "hijacked"}"#)).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            delete(&store, &bia, task.id).await,
            Err(AppError::Forbidden(_))
        ));

        let unchanged = get_one(&store, &ana, task.id).await.unwrap();
        assert_eq!(unchanged, task);
        delete(&store, &ana, task.id).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_unknown_task_is_not_found() {
        let (store, ana, _) = store_with_users().await;
        let missing = Uuid::new_v4();

        assert!(matches!(
            get_one(&store, &ana, missing).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            update(&store, &ana, missing, UpdateTaskRequest::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete(&store, &ana, missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_list_mine_only_returns_own_tasks_newest_first() {
        let (store, ana, bia) = store_with_users().await;
        create(&store, &ana, new_task("first")).await.unwrap();
        create(&store, &bia, new_task("not mine")).await.unwrap();
        create(&store, &ana, new_task("second")).await.unwrap();

        let mine = list_mine(&store, &ana).await.unwrap();

        assert!(mine.iter().all(|t| t.user_id == ana.user_id));
        let titles: Vec<&str> = mine.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert!(mine
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[actix_rt::test]
    async fn test_completion_timestamp_is_not_cleared_by_status_change() {
        let (store, ana, _) = store_with_users().await;
        let task = create(&store, &ana, new_task("X")).await.unwrap();

        let done = update(
            &store,
            &ana,
            task.id,
            parse_update(r#"{"status": "CONCLUIDA", "dataConclusao": "2025-01-01T00:00:00Z"}"#),
        )
        .await
        .unwrap();
        let done_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(done.status, TaskStatus::Done);
        assert_eq!(done.completed_at, Some(done_at));

        let reopened = update(&store, &ana, task.id, parse_update(r#"{"status": "PENDENTE"}"#))
            .await
            .unwrap();
        assert_eq!(reopened.status, TaskStatus::Pending);
        assert_eq!(reopened.completed_at, Some(done_at));
        assert_eq!(reopened.title, "X");

        let cleared = update(&store, &ana, task.id, parse_update(r#"{"dataConclusao": null}"#))
            .await
            .unwrap();
        assert_eq!(cleared.completed_at, None);
        assert_eq!(cleared.status, TaskStatus::Pending);
    }

    #[actix_rt::test]
    async fn test_update_rejects_bad_input_without_writing() {
        let (store, ana, _) = store_with_users().await;
        let task = create(&store, &ana, new_task("X")).await.unwrap();

        let result = update(&store, &ana, task.id, parse_update(r#"{"status": "DONE"}"#)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let result = update(&store, &ana, task.id, parse_update(r#"{"descricao": ""}"#)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        assert_eq!(get_one(&store, &ana, task.id).await.unwrap(), task);
    }
}
