use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthContext;
use crate::auth::token::TokenService;
use crate::error::{AppError, AuthFailure};

/// Requires a valid `Authorization: Bearer <token>` header on every request it wraps.
///
/// On success an [`AuthContext`] is inserted into the request extensions. On
/// failure the request never reaches the wrapped service and the error is
/// answered here, so outer middleware sees an ordinary response. The
/// [`TokenService`] is taken from app data, so it must be registered with
/// `App::app_data(web::Data::new(tokens))`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(context) => {
                req.extensions_mut().insert(context);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::warn!("Rejected request to {}: {}", req.path(), app_err);
                let response = req.error_response(app_err).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, AppError> {
    let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        AppError::Configuration("TokenService is not registered as app data".into())
    })?;

    let token = bearer_token(req.headers().get(AUTHORIZATION))?;
    let claims = tokens.verify(token)?;

    Ok(AuthContext {
        user_id: claims.sub,
    })
}

/// Extracts the token from an `Authorization` header value.
///
/// The header must consist of exactly two space-separated parts, the first being
/// `Bearer` in any letter case.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let header = header.ok_or(AppError::Unauthorized(AuthFailure::TokenNotProvided))?;
    let malformed = AppError::Unauthorized(AuthFailure::MalformedToken);

    let value = header.to_str().map_err(|_| malformed.clone())?;
    let parts: Vec<&str> = value.split(' ').collect();

    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("Bearer") => Ok(*token),
        _ => Err(malformed),
    }
}
