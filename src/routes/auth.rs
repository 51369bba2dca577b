use crate::{
    auth::{flow, AuthResponse, SigninRequest, SignupRequest, SignupResponse, TokenService},
    error::AppError,
    store::Store,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// ## Request Body:
/// `{"email": ..., "password": ..., "nome": ...}`
///
/// ## Responses:
/// - `201 Created`: `{"message", "user"}` with the public user projection.
/// - `400 Bad Request`: missing fields, invalid email, short password, or email already registered.
#[post("/signup")]
pub async fn signup(
    store: web::Data<dyn Store>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let user = flow::signup(store.get_ref(), signup_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created successfully".into(),
        user,
    }))
}

/// Sign in
///
/// ## Responses:
/// - `200 OK`: `{"message", "token", "user"}`.
/// - `400 Bad Request`: email or password missing.
/// - `401 Unauthorized`: `INVALID_CREDENTIALS`, whether the email is unknown or the password wrong.
#[post("/signin")]
pub async fn signin(
    store: web::Data<dyn Store>,
    tokens: web::Data<TokenService>,
    signin_data: web::Json<SigninRequest>,
) -> Result<impl Responder, AppError> {
    let session = flow::signin(store.get_ref(), &tokens, signin_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Signed in successfully".into(),
        token: session.token,
        user: session.user,
    }))
}
