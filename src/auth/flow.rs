//! Signup and signin.
//!
//! Each call is independent: the only state is what the [`UserStore`] holds, and
//! tokens are never persisted.

use lazy_static::lazy_static;
use validator::Validate;

use super::password::{hash_password, verify_password};
use super::token::TokenService;
use super::{SigninRequest, SignupRequest};
use crate::error::{AppError, AuthFailure};
use crate::models::{PublicUser, User};
use crate::store::UserStore;
use crate::validation::normalize_email;

lazy_static! {
    // Compared against when the email is unknown, so both failure paths cost one bcrypt run.
    static ref UNKNOWN_USER_HASH: String =
        hash_password("unknown-user-placeholder").unwrap_or_default();
}

/// A successful signin.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
}

/// Registers a new user and returns its public projection.
///
/// # Errors
/// - `ValidationError` for a missing field, malformed email, or a password under 6 characters.
/// - `Conflict` if the email is already registered (compared case-insensitively).
pub async fn signup<S>(users: &S, mut request: SignupRequest) -> Result<PublicUser, AppError>
where
    S: UserStore + ?Sized,
{
    request.email = normalize_email(&request.email);
    request.validate()?;

    if users.find_user_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = User::new(request.email, password_hash, request.name.trim().to_string());
    let user = users.insert_user(&user).await?;

    log::info!("Registered user {}", user.id);
    Ok(user.to_public())
}

/// Authenticates a user and issues an identity token.
///
/// An unknown email and a wrong password produce the same
/// `Unauthorized(InvalidCredentials)` error.
pub async fn signin<S>(
    users: &S,
    tokens: &TokenService,
    request: SigninRequest,
) -> Result<Session, AppError>
where
    S: UserStore + ?Sized,
{
    request.validate()?;

    let email = normalize_email(&request.email);
    let user = match users.find_user_by_email(&email).await? {
        Some(user) if verify_password(&request.password, &user.password_hash) => user,
        Some(_) => return Err(rejected()),
        None => {
            verify_password(&request.password, &UNKNOWN_USER_HASH);
            return Err(rejected());
        }
    };

    let token = tokens.issue(user.id)?;
    log::info!("User {} signed in", user.id);

    Ok(Session {
        token,
        user: user.to_public(),
    })
}

fn rejected() -> AppError {
    log::warn!("Rejected signin attempt");
    AppError::Unauthorized(AuthFailure::InvalidCredentials)
}
