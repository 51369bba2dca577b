pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Mounts the API. Expects to be placed under `/api` and needs both a
/// `web::Data<dyn Store>` and a `web::Data<TokenService>` registered on the app.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::signin),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Unparseable or wrongly typed JSON bodies become 400 validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}

/// A task id that is not a UUID cannot name an existing task.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err: error::PathError, _req: &HttpRequest| {
        AppError::NotFound("Task not found".into()).into()
    })
}
