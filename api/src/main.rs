use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use sm_api::app::create_app;
use sm_api::routes::AppState;
use sm_core::services::auth::AuthService;
use sm_core::services::password::PasswordHasher;
use sm_core::services::policy::PolicyGate;
use sm_core::services::token::{TokenService, TokenServiceConfig};
use sm_infra::{
    DatabasePool, MySqlAttendanceRepository, MySqlMessageRepository, MySqlSchoolRepository,
    MySqlStudentRepository, MySqlTeacherRepository, MySqlTokenRepository, MySqlUserRepository,
};
use sm_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting SchoolMgmt API server");

    // Configuration is read once here; services receive it injected.
    let config = AppConfig::from_env();
    if config.auth.jwt.is_using_default_secrets() && config.environment.is_production() {
        panic!("JWT secrets must be configured in production");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .expect("Failed to create database pool");
    pool.health_check()
        .await
        .expect("Database is not reachable");

    // Repositories
    let user_repository = Arc::new(MySqlUserRepository::new(pool.pool()));
    let school_repository = Arc::new(MySqlSchoolRepository::new(pool.pool()));
    let student_repository = Arc::new(MySqlStudentRepository::new(pool.pool()));
    let teacher_repository = Arc::new(MySqlTeacherRepository::new(pool.pool()));
    let attendance_repository = Arc::new(MySqlAttendanceRepository::new(pool.pool()));
    let message_repository = Arc::new(MySqlMessageRepository::new(pool.pool()));

    // Services
    let token_service = Arc::new(TokenService::new(
        MySqlTokenRepository::new(pool.pool()),
        TokenServiceConfig::from(&config.auth),
    ));
    let password_hasher = PasswordHasher::new(config.auth.bcrypt_cost);
    let policy_gate = Arc::new(PolicyGate::new(config.auth.super_admin_email.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&school_repository),
        Arc::clone(&token_service),
        password_hasher.clone(),
        Arc::clone(&policy_gate),
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        token_service,
        policy_gate,
        password_hasher,
        user_repository,
        school_repository,
        student_repository,
        teacher_repository,
        attendance_repository,
        message_repository,
    });

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(bind_address)?.run().await
}
