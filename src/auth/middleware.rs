use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::{Claims, TokenKeys};
use crate::error::AppError;

/// Requires `Authorization: Bearer <token>` signed with the service's `TokenKeys`.
///
/// Verified `Claims` are inserted into the request extensions. Rejections are answered
/// directly with a 401 JSON response instead of an `Err`, so the wrapped scope never runs.
pub struct AuthMiddleware {
    keys: TokenKeys,
}

impl AuthMiddleware {
    pub fn new(keys: TokenKeys) -> Self {
        Self { keys }
    }
}

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
        ready(Ok(AuthMiddlewareService {
            service,
            keys: self.keys.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    keys: TokenKeys,
}

impl<S> AuthMiddlewareService<S> {
    fn authorize(&self, req: &ServiceRequest) -> Result<Claims, AppError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

        self.keys.verify(token.trim())
    }
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
        match self.authorize(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), err);
                let response = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
