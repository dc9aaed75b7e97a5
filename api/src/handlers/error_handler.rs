//! Single translation point from domain errors to HTTP responses.
//!
//! Every handler funnels failures through here, so the status mapping of
//! the error taxonomy lives in exactly one place:
//! - validation failures -> 400
//! - duplicate email / school name -> 400
//! - bad credentials at login -> 403
//! - any token or policy denial -> uniform 401
//! - absent resource or wrong tenant -> 404
//! - everything internal -> 500 with no detail leaked

use actix_web::HttpResponse;
use validator::ValidationErrors;

use sm_core::errors::{AuthError, DomainError};
use sm_shared::errors::{error_codes, ErrorResponse};

/// Converts a domain error into its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),

        DomainError::Unauthorized => unauthorized(),

        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => HttpResponse::Forbidden().json(ErrorResponse::new(
                error_codes::FORBIDDEN,
                "Invalid login credentials",
            )),
            AuthError::EmailAlreadyInUse => HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::CONFLICT,
                "Email already in use",
            )),
            AuthError::SchoolNameAlreadyInUse => HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::CONFLICT, "School name already in use"),
            ),
            AuthError::UserNotFound => HttpResponse::NotFound()
                .json(ErrorResponse::new(error_codes::NOT_FOUND, "User not found")),
            AuthError::InsufficientPermissions => unauthorized(),
            AuthError::PasswordHashingFailed => internal_error(),
        },

        // All token failures are indistinguishable to the caller.
        DomainError::Token(_) => unauthorized(),

        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            internal_error()
        }
    }
}

/// Converts DTO validation failures into a 400 response
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        errors.to_string(),
    ))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Unauthorized",
    ))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use sm_core::errors::TokenError;

    #[test]
    fn test_token_errors_collapse_to_uniform_401() {
        for error in [
            TokenError::TokenExpired,
            TokenError::InvalidSignature,
            TokenError::TokenRevoked,
            TokenError::UnknownToken,
            TokenError::TokenMismatch,
        ] {
            let response = handle_domain_error(DomainError::Token(error));
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials)),
                StatusCode::FORBIDDEN,
            ),
            (
                handle_domain_error(DomainError::Auth(AuthError::EmailAlreadyInUse)),
                StatusCode::BAD_REQUEST,
            ),
            (
                handle_domain_error(DomainError::not_found("student")),
                StatusCode::NOT_FOUND,
            ),
            (
                handle_domain_error(DomainError::Unauthorized),
                StatusCode::UNAUTHORIZED,
            ),
        ];
        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
