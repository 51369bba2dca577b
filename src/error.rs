//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every flow (signup, signin, task CRUD) returns `Result<_, AppError>`, and the HTTP
//! boundary turns the error into a status code plus a JSON body of the form
//! `{"error": <message>, "code": <CODE>}`.
//!
//! `AppError` implements `actix_web::error::ResponseError`. Server-side failures
//! (5xx) are logged and surfaced to the client with a generic message only.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow using `?` directly.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Why a request failed authentication.
///
/// Kept separate from `AppError` so that callers can match on the exact reason
/// while the client only ever sees the code and message below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Unknown email or wrong password. The two cases are never distinguished.
    InvalidCredentials,
    /// No `Authorization` header on a protected route.
    TokenNotProvided,
    /// The header is not of the form `Bearer <token>`.
    MalformedToken,
    /// Bad signature, unparseable token, or expired token.
    InvalidToken,
}

impl AuthFailure {
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthFailure::TokenNotProvided => "TOKEN_NOT_PROVIDED",
            AuthFailure::MalformedToken => "MALFORMED_TOKEN",
            AuthFailure::InvalidToken => "INVALID_TOKEN",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials => "Invalid credentials",
            AuthFailure::TokenNotProvided => "Token not provided",
            AuthFailure::MalformedToken => "Malformed token",
            AuthFailure::InvalidToken => "Invalid token",
        }
    }
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Input failed validation: missing fields, bad email, short password,
    /// unknown status, malformed body (HTTP 400).
    ValidationError(String),
    /// The resource already exists, e.g. a duplicate email on signup (HTTP 400).
    Conflict(String),
    /// Authentication failed or is required but missing (HTTP 401).
    Unauthorized(AuthFailure),
    /// Authenticated, but the resource belongs to someone else (HTTP 403).
    Forbidden(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The process is misconfigured, e.g. no signing secret (HTTP 500).
    Configuration(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the data store (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    /// Machine-readable code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Unauthorized(failure) => failure.code(),
            AppError::Forbidden(_) => "ACCESS_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }

    /// Message shown to the client. Internal details never leave the server.
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized(failure) => failure.message().to_string(),
            AppError::Configuration(_) => "Invalid server configuration".to_string(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(failure) => write!(f, "Unauthorized: {}", failure.message()),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({
            "error": self.public_message(),
            "code": self.code(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// A unique-constraint violation can only come from the users' email index, so it
/// becomes `AppError::Conflict`. The only foreign key is a task's owner: violating
/// it means a signed token names a user that no longer exists, which is reported
/// as `INVALID_TOKEN`. Everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".into())
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                log::warn!("Task owner does not exist: {}", db);
                AppError::Unauthorized(AuthFailure::InvalidToken)
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any JWT failure is reported as an invalid token; the library's reason is not exposed.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        log::debug!("Token rejected: {}", error);
        AppError::Unauthorized(AuthFailure::InvalidToken)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}
