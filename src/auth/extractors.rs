use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::{AppError, AuthFailure};

/// The authenticated caller of a request.
///
/// `AuthMiddleware` inserts this into request extensions after verifying the
/// bearer token; handlers take it as an argument and pass it to the task flows.
///
/// If it is missing (the middleware did not run on this route), extraction fails
/// with `TOKEN_NOT_PROVIDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl FromRequest for AuthContext {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthContext>().copied() {
            Some(context) => ready(Ok(context)),
            None => ready(Err(
                AppError::Unauthorized(AuthFailure::TokenNotProvided).into()
            )),
        }
    }
}
