//! Acting member identity + role.
//!
//! Authentication itself is an external collaborator; callers hand the core
//! an already-resolved [`Actor`]. The role model is deliberately binary.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::MemberId;

/// Binary role distinction used by admin-gated operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// The member performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub member_id: MemberId,
    pub display_name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(member_id: MemberId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            member_id,
            display_name: display_name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Reject non-admin callers of an admin-only operation.
    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_rejected_from_admin_operations() {
        let member = Actor::new(MemberId::new(), "Kari", Role::Member);
        assert_eq!(member.require_admin(), Err(DomainError::Forbidden));

        let admin = Actor::new(MemberId::new(), "Odd", Role::Admin);
        assert!(admin.require_admin().is_ok());
    }
}
