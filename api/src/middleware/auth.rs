//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the Bearer token from the Authorization header,
//! verifies it through the injected verifier, and places the resulting
//! `IdentityContext` into the request extensions. Handlers receive it via
//! the `AuthUser` extractor. Every verification failure produces the same
//! unauthorized response body.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use sm_core::domain::entities::token::Claims;
use sm_core::domain::value_objects::IdentityContext;
use sm_core::errors::DomainResult;
use sm_core::repositories::TokenRepository;
use sm_core::services::token::TokenService;
use sm_shared::errors::{error_codes, ErrorResponse};

/// Verifies access tokens; implemented by the token service
///
/// A trait object keeps the middleware free of the repository type
/// parameter the token service carries.
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> DomainResult<Claims>;
}

impl<R: TokenRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        TokenService::verify_access_token(self, token)
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl JwtAuth {
    /// Creates the middleware around an injected verifier
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let identity = extract_bearer_token(&req)
                .ok_or(())
                .and_then(|token| {
                    verifier
                        .verify_access_token(&token)
                        .and_then(IdentityContext::from_claims)
                        .map_err(|_| ())
                });

            // One uniform rejection regardless of which check failed.
            let identity = match identity {
                Ok(identity) => identity,
                Err(()) => {
                    return Ok(req.into_response(unauthorized_response().map_into_right_body()));
                }
            };

            req.extensions_mut().insert(identity);

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// The uniform 401 body every authentication failure maps to
fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Unauthorized",
    ))
}

/// Extractor handing the verified identity to handlers
#[derive(Debug, Clone)]
pub struct AuthUser(pub IdentityContext);

impl Deref for AuthUser {
    type Target = IdentityContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<IdentityContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ErrorUnauthorized("Unauthorized"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
