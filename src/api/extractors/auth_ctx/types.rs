/*
 * Responsibility
 * - the authenticated-principal type handlers see
 * - the verification middleware fills it from the access token claims
 *
 * Notes
 * - token parsing/verification belongs to services::auth::jwt, not here
 * - ownership checks (self / author / admin) are expressed on this type
 */
use crate::error::AppError;
use crate::services::auth::{AuthorityUtils, Role, jwt::AccessClaims};

/// Context attached to an authenticated request.
///
/// - `member_id` / `email` identify the member (`email` is the token subject)
/// - `roles` are coarse-grained; per-resource ownership is checked in handlers
/// - `jti` is kept for log correlation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub member_id: i64,
    pub email: String,
    pub roles: Vec<Role>,
    pub jti: Option<String>,
}

impl AuthCtx {
    pub fn new(member_id: i64, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            member_id,
            email: email.into(),
            roles,
            jti: None,
        }
    }

    pub fn from_claims(claims: AccessClaims) -> Self {
        Self {
            member_id: claims.member_id,
            email: claims.sub,
            roles: AuthorityUtils::roles_from_names(&claims.roles),
            jti: Some(claims.jti),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// The principal is `member_id` itself, or an admin.
    pub fn ensure_can_act_for(&self, member_id: i64) -> Result<(), AppError> {
        if self.member_id == member_id || self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(
                principal = self.member_id,
                target = member_id,
                "access to another member's resource denied"
            );
            Err(AppError::Forbidden)
        }
    }
}

/// Why a presented bearer token was not accepted.
/// Stored in request extensions so the authorization step can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Expired,
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_act_for_themselves_admins_for_anyone() {
        let member = AuthCtx::new(1, "a@band.io", vec![Role::User]);
        let admin = AuthCtx::new(2, "root@band.io", vec![Role::Admin, Role::User]);

        assert!(member.ensure_can_act_for(1).is_ok());
        assert!(matches!(member.ensure_can_act_for(5), Err(AppError::Forbidden)));
        assert!(admin.ensure_can_act_for(5).is_ok());
    }

    #[test]
    fn claims_roles_are_parsed() {
        let ctx = AuthCtx::from_claims(AccessClaims {
            typ: crate::services::auth::jwt::TokenKind::Access,
            member_id: 4,
            username: "a@band.io".into(),
            roles: vec!["USER".into(), "BOGUS".into()],
            sub: "a@band.io".into(),
            jti: "j-1".into(),
            iat: 0,
            exp: 1,
        });

        assert_eq!(ctx.roles, vec![Role::User]);
        assert!(!ctx.is_admin());
        assert_eq!(ctx.jti.as_deref(), Some("j-1"));
    }
}
