//! The policy table: one declarative rule per protected endpoint.
//!
//! This is the single place where endpoint authorization is defined.
//! Handlers reference these constants; none of them re-derive role or
//! tenant checks inline.

use crate::domain::entities::user::Role;

use super::{AccessPolicy, OwnershipRule, TenantRule};

/// Any authenticated role
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Teacher, Role::Student];

/// School administrators only
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Administrators and teaching staff
pub const STAFF: &[Role] = &[Role::Admin, Role::Teacher];

// School management: reserved for the configured super admin.
pub const SCHOOL_READ: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::SuperAdminOnly,
    ownership: OwnershipRule::Any,
};
pub const SCHOOL_WRITE: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::SuperAdminOnly,
    ownership: OwnershipRule::Any,
};

// Student profiles: staff may read, admins mutate, all within their school.
pub const STUDENT_READ: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};
pub const STUDENT_LIST: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const STUDENT_CREATE: AccessPolicy = AccessPolicy {
    roles: ADMIN_ONLY,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const STUDENT_WRITE: AccessPolicy = AccessPolicy {
    roles: ADMIN_ONLY,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};

// Teacher profiles mirror student profiles.
pub const TEACHER_READ: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};
pub const TEACHER_LIST: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const TEACHER_CREATE: AccessPolicy = AccessPolicy {
    roles: ADMIN_ONLY,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const TEACHER_WRITE: AccessPolicy = AccessPolicy {
    roles: ADMIN_ONLY,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};

// Attendance: students read their own history, teachers author records,
// the authoring teacher or a same-school admin amends them.
pub const ATTENDANCE_LIST_OWN: AccessPolicy = AccessPolicy {
    roles: &[Role::Student],
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const ATTENDANCE_READ: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};
pub const ATTENDANCE_CREATE: AccessPolicy = AccessPolicy {
    roles: &[Role::Teacher],
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const ATTENDANCE_WRITE: AccessPolicy = AccessPolicy {
    roles: STAFF,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::OwnerOrAdmin,
};

// Messages: anyone in the school may post and read, only the author edits.
pub const MESSAGE_LIST: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const MESSAGE_READ: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Any,
};
pub const MESSAGE_CREATE: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::Any,
};
pub const MESSAGE_WRITE: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::SameSchool,
    ownership: OwnershipRule::Owner,
};

// Bulk token revocation: the target user themselves, or the super admin.
pub const REVOKE_TOKENS: AccessPolicy = AccessPolicy {
    roles: ANY_ROLE,
    tenant: TenantRule::Any,
    ownership: OwnershipRule::OwnerOrSuperAdmin,
};
