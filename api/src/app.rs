//! Application factory
//!
//! Builds the Actix application: middleware stack, public auth routes,
//! and the protected resource routes behind the JWT gate.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::auth::{AccessTokenVerifier, JwtAuth};
use crate::middleware::cors::create_cors;
use crate::routes::{attendance, auth, messages, schools, students, teachers, AppState};

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, S, T, ST, TE, A, M>(
    app_state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SchoolRepository + 'static,
    T: TokenRepository + 'static,
    ST: StudentRepository + 'static,
    TE: TeacherRepository + 'static,
    A: AttendanceRepository + 'static,
    M: MessageRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.token_service.clone();
    let guard = move || JwtAuth::new(Arc::clone(&verifier));

    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                // Public auth endpoints
                .route("/register", web::post().to(auth::register::<U, S, T, ST, TE, A, M>))
                .route("/login", web::post().to(auth::login::<U, S, T, ST, TE, A, M>))
                .route(
                    "/refreshToken",
                    web::post().to(auth::refresh_token::<U, S, T, ST, TE, A, M>),
                )
                // Everything below requires a verified access token
                .service(
                    web::resource("/revokeRefreshTokens")
                        .wrap(guard())
                        .route(web::post().to(auth::revoke_refresh_tokens::<U, S, T, ST, TE, A, M>)),
                )
                // School management (super admin)
                .service(
                    web::resource("/schools")
                        .wrap(guard())
                        .route(web::get().to(schools::list_schools::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/school")
                        .wrap(guard())
                        .route(web::post().to(schools::create_school::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/school/{id}")
                        .wrap(guard())
                        .route(web::get().to(schools::get_school::<U, S, T, ST, TE, A, M>))
                        .route(web::put().to(schools::update_school::<U, S, T, ST, TE, A, M>))
                        .route(web::delete().to(schools::delete_school::<U, S, T, ST, TE, A, M>)),
                )
                // Student profiles
                .service(
                    web::resource("/students")
                        .wrap(guard())
                        .route(web::get().to(students::list_students::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/student")
                        .wrap(guard())
                        .route(web::post().to(students::create_student::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/student/{id}")
                        .wrap(guard())
                        .route(web::get().to(students::get_student::<U, S, T, ST, TE, A, M>))
                        .route(web::put().to(students::update_student::<U, S, T, ST, TE, A, M>))
                        .route(web::delete().to(students::delete_student::<U, S, T, ST, TE, A, M>)),
                )
                // Teacher profiles
                .service(
                    web::resource("/teachers")
                        .wrap(guard())
                        .route(web::get().to(teachers::list_teachers::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/teacher")
                        .wrap(guard())
                        .route(web::post().to(teachers::create_teacher::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/teacher/{id}")
                        .wrap(guard())
                        .route(web::get().to(teachers::get_teacher::<U, S, T, ST, TE, A, M>))
                        .route(web::put().to(teachers::update_teacher::<U, S, T, ST, TE, A, M>))
                        .route(web::delete().to(teachers::delete_teacher::<U, S, T, ST, TE, A, M>)),
                )
                // Attendance
                .service(
                    web::resource("/attendances")
                        .wrap(guard())
                        .route(web::get().to(attendance::list_own_attendance::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/attendance")
                        .wrap(guard())
                        .route(web::post().to(attendance::create_attendance::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/attendance/{id}")
                        .wrap(guard())
                        .route(web::get().to(attendance::get_attendance::<U, S, T, ST, TE, A, M>))
                        .route(web::put().to(attendance::update_attendance::<U, S, T, ST, TE, A, M>))
                        .route(web::delete().to(attendance::delete_attendance::<U, S, T, ST, TE, A, M>)),
                )
                // Messages
                .service(
                    web::resource("/messages")
                        .wrap(guard())
                        .route(web::get().to(messages::list_messages::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/message")
                        .wrap(guard())
                        .route(web::post().to(messages::create_message::<U, S, T, ST, TE, A, M>)),
                )
                .service(
                    web::resource("/message/{id}")
                        .wrap(guard())
                        .route(web::get().to(messages::get_message::<U, S, T, ST, TE, A, M>))
                        .route(web::put().to(messages::update_message::<U, S, T, ST, TE, A, M>))
                        .route(web::delete().to(messages::delete_message::<U, S, T, ST, TE, A, M>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "school-mgmt-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unknown paths
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "Endpoint not found",
    }))
}
