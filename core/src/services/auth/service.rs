//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::school::School;
use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::IdentityContext;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SchoolRepository, TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::policy::{table, PolicyGate, ResourceScope};
use crate::services::token::TokenService;

/// Input for registering a new school with its admin account
#[derive(Debug, Clone)]
pub struct RegisterSchoolData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Authentication service for the complete account lifecycle
pub struct AuthService<U, S, T>
where
    U: UserRepository,
    S: SchoolRepository,
    T: TokenRepository,
{
    /// User repository for identity lookups
    user_repository: Arc<U>,
    /// School repository for tenant creation
    school_repository: Arc<S>,
    /// Token service for issuing and rotating pairs
    token_service: Arc<TokenService<T>>,
    /// Password hasher with the configured work factor
    password_hasher: PasswordHasher,
    /// Policy gate for the revocation endpoint
    policy_gate: Arc<PolicyGate>,
}

impl<U, S, T> AuthService<U, S, T>
where
    U: UserRepository,
    S: SchoolRepository,
    T: TokenRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        school_repository: Arc<S>,
        token_service: Arc<TokenService<T>>,
        password_hasher: PasswordHasher,
        policy_gate: Arc<PolicyGate>,
    ) -> Self {
        Self {
            user_repository,
            school_repository,
            token_service,
            password_hasher,
            policy_gate,
        }
    }

    /// Registers a new school together with its admin account
    ///
    /// Fails if the school name or the admin email is already taken.
    /// Returns a freshly issued token pair for the new admin.
    pub async fn register(&self, data: RegisterSchoolData) -> DomainResult<TokenPair> {
        if self.school_repository.find_by_name(&data.name).await?.is_some() {
            return Err(DomainError::Auth(AuthError::SchoolNameAlreadyInUse));
        }
        if self.user_repository.find_by_email(&data.email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }

        let school = School::new(data.name, data.email.clone()).with_contact(
            data.address,
            data.phone,
            data.website,
        );
        let school = self.school_repository.save(school).await?;

        let password_hash = self.password_hasher.hash(&data.password)?;
        let user = User::new(data.email, password_hash, Role::Admin, school.id);
        let user = self.user_repository.save(user).await?;

        tracing::info!(school_id = %school.id, user_id = %user.id, "school registered");

        self.token_service.issue_tokens(&user).await
    }

    /// Authenticates a user by email and password
    ///
    /// Both an unknown email and a wrong password produce the same
    /// invalid-credentials error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        self.token_service.issue_tokens(&user).await
    }

    /// Exchanges a refresh token for a new pair, rotating the old one out
    ///
    /// The presented token is verified cryptographically and against the
    /// whitelist; the owning user must still exist. The old record is
    /// replaced atomically, so a replay of the old token fails.
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let (claims, record) = self.token_service.verify_refresh_token(refresh_token).await?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Unauthorized)?;
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        self.token_service.rotate_tokens(&record, &user).await
    }

    /// Revokes every outstanding refresh token of the target user
    ///
    /// Gated: the caller must be the target user or the super admin.
    /// Idempotent; returns the number of records newly revoked.
    pub async fn revoke_tokens(
        &self,
        identity: &IdentityContext,
        target_user_id: Uuid,
    ) -> DomainResult<usize> {
        self.policy_gate.authorize(
            &table::REVOKE_TOKENS,
            identity,
            &ResourceScope::owner(target_user_id),
        )?;

        self.token_service.revoke_all_tokens(target_user_id).await
    }
}
