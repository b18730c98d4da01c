/*
 * Responsibility
 * - roles a member holds, and how they are assigned at sign-up
 * - admin members are recognised by email (ADMIN_EMAILS)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Accepts `USER` as well as `ROLE_USER`; case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorityUtils {
    admin_emails: Vec<String>,
}

impl AuthorityUtils {
    pub fn new(admin_emails: &[String]) -> Self {
        Self {
            admin_emails: admin_emails
                .iter()
                .map(|e| e.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn create_roles(&self, email: &str) -> Vec<Role> {
        let email = email.trim().to_ascii_lowercase();
        if self.admin_emails.iter().any(|admin| *admin == email) {
            vec![Role::Admin, Role::User]
        } else {
            vec![Role::User]
        }
    }

    /// Stored / claimed role names -> roles. Unknown names are dropped.
    pub fn roles_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Role> {
        names.iter().filter_map(|n| Role::parse(n.as_ref())).collect()
    }

    pub fn role_names(roles: &[Role]) -> Vec<String> {
        roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_email_gets_both_roles() {
        let utils = AuthorityUtils::new(&["Admin@Band.io".to_string()]);

        assert_eq!(utils.create_roles("admin@band.io"), vec![Role::Admin, Role::User]);
        assert_eq!(utils.create_roles(" ADMIN@band.io "), vec![Role::Admin, Role::User]);
        assert_eq!(utils.create_roles("student@band.io"), vec![Role::User]);
    }

    #[test]
    fn parse_accepts_prefixed_and_plain_names() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("role_user"), Some(Role::User));
        assert_eq!(Role::parse("TEACHER"), None);
    }

    #[test]
    fn unknown_names_are_dropped() {
        let roles = AuthorityUtils::roles_from_names(&["USER", "GUEST", "ROLE_ADMIN"]);
        assert_eq!(roles, vec![Role::User, Role::Admin]);
    }
}
