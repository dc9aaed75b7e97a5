//! Declarative per-endpoint authorization policy.
//!
//! Every protected endpoint declares one [`AccessPolicy`] in the policy
//! table and the [`PolicyGate`] evaluates it against the caller's
//! [`IdentityContext`] before any business logic runs. Checks run in a
//! fixed order and fail fast: role membership, then tenant scope, then
//! resource ownership.

pub mod table;

use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::domain::value_objects::IdentityContext;
use crate::errors::{DomainError, DomainResult};

/// Tenant-scoping rule of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantRule {
    /// No tenant check; the handler derives any school id from the caller
    Any,
    /// The resource's school must equal the caller's school
    ///
    /// A mismatch surfaces as not-found so cross-tenant probing cannot
    /// confirm that a resource exists.
    SameSchool,
    /// Only the configured super admin may pass, regardless of tenant
    SuperAdminOnly,
}

/// Ownership rule of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipRule {
    /// No ownership check
    Any,
    /// The resource's owner must be the caller
    Owner,
    /// The resource's owner must be the caller, unless the caller is an
    /// admin (who already passed the tenant check)
    OwnerOrAdmin,
    /// The resource's owner must be the caller, unless the caller is the
    /// configured super admin
    OwnerOrSuperAdmin,
}

/// Declarative authorization rule for one endpoint
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    /// Roles allowed to call the endpoint
    pub roles: &'static [Role],
    /// Tenant-scoping rule
    pub tenant: TenantRule,
    /// Ownership rule
    pub ownership: OwnershipRule,
}

/// Scope of the resource a request operates on
///
/// Handlers load the resource first and describe it here; endpoints that
/// create resources or operate on the caller itself use [`ResourceScope::none`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceScope {
    /// School the resource belongs to
    pub school_id: Option<Uuid>,
    /// User or profile id owning the resource
    pub owner_id: Option<Uuid>,
}

impl ResourceScope {
    /// Scope for endpoints without a pre-existing resource
    pub fn none() -> Self {
        Self::default()
    }

    /// Scope carrying only a tenant
    pub fn school(school_id: Uuid) -> Self {
        Self {
            school_id: Some(school_id),
            owner_id: None,
        }
    }

    /// Scope carrying a tenant and an owner
    pub fn owned(school_id: Uuid, owner_id: Uuid) -> Self {
        Self {
            school_id: Some(school_id),
            owner_id: Some(owner_id),
        }
    }

    /// Scope carrying only an owner
    pub fn owner(owner_id: Uuid) -> Self {
        Self {
            school_id: None,
            owner_id: Some(owner_id),
        }
    }
}

/// Evaluates access policies against request identities
///
/// Holds the one piece of configuration the policy needs: the super
/// admin's email. Constructed at startup and shared across handlers.
#[derive(Debug, Clone)]
pub struct PolicyGate {
    super_admin_email: String,
}

impl PolicyGate {
    /// Creates a gate recognizing the given super admin email
    pub fn new(super_admin_email: impl Into<String>) -> Self {
        Self {
            super_admin_email: super_admin_email.into(),
        }
    }

    /// Checks whether the identity is the configured super admin
    pub fn is_super_admin(&self, identity: &IdentityContext) -> bool {
        identity.email == self.super_admin_email
    }

    /// Evaluates a policy; returns `Ok(())` if every check passes
    ///
    /// Failure mapping: role and ownership denials are `Unauthorized`;
    /// a tenant mismatch is `NotFound` (fail closed without confirming
    /// existence).
    pub fn authorize(
        &self,
        policy: &AccessPolicy,
        identity: &IdentityContext,
        scope: &ResourceScope,
    ) -> DomainResult<()> {
        // 1. Role membership
        if !policy.roles.contains(&identity.role) {
            return Err(DomainError::Unauthorized);
        }

        // 2. Tenant scope
        match policy.tenant {
            TenantRule::Any => {}
            TenantRule::SameSchool => {
                if scope.school_id != Some(identity.school_id) {
                    return Err(DomainError::not_found("resource"));
                }
            }
            TenantRule::SuperAdminOnly => {
                if !self.is_super_admin(identity) {
                    return Err(DomainError::Unauthorized);
                }
            }
        }

        // 3. Resource ownership
        match policy.ownership {
            OwnershipRule::Any => Ok(()),
            OwnershipRule::Owner => self.check_owner(identity, scope),
            OwnershipRule::OwnerOrAdmin => {
                if identity.role == Role::Admin {
                    Ok(())
                } else {
                    self.check_owner(identity, scope)
                }
            }
            OwnershipRule::OwnerOrSuperAdmin => {
                if self.is_super_admin(identity) {
                    Ok(())
                } else {
                    self.check_owner(identity, scope)
                }
            }
        }
    }

    fn check_owner(&self, identity: &IdentityContext, scope: &ResourceScope) -> DomainResult<()> {
        if scope.owner_id == Some(identity.user_id) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
