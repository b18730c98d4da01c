/*
 * Responsibility
 * - read settings from the environment (DATABASE_URL, CORS allowlist, JWT settings, ...)
 * - validate them (missing or malformed values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret_key: String,
    pub access_token_expiration_minutes: i64,
    pub refresh_token_expiration_minutes: i64,

    pub admin_emails: Vec<String>,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // secrets stay out of logs
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "access_token_expiration_minutes",
                &self.access_token_expiration_minutes,
            )
            .field(
                "refresh_token_expiration_minutes",
                &self.refresh_token_expiration_minutes,
            )
            .field("admin_emails", &self.admin_emails)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|raw| AppEnv::parse(&raw))
            .unwrap_or(AppEnv::Development);

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            None => 10,
        };

        let cors_allowed_origins = split_list(lookup("CORS_ALLOWED_ORIGINS"));

        let jwt_secret_key = lookup("JWT_SECRET_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let access_token_expiration_minutes = positive_minutes(
            lookup("JWT_ACCESS_TOKEN_EXPIRATION_MINUTES"),
            "JWT_ACCESS_TOKEN_EXPIRATION_MINUTES",
            30,
        )?;
        let refresh_token_expiration_minutes = positive_minutes(
            lookup("JWT_REFRESH_TOKEN_EXPIRATION_MINUTES"),
            "JWT_REFRESH_TOKEN_EXPIRATION_MINUTES",
            420,
        )?;

        let admin_emails = split_list(lookup("ADMIN_EMAILS"));

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|c| (4..=31).contains(c))
                .ok_or(ConfigError::Invalid("BCRYPT_COST"))?,
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            jwt_secret_key,
            access_token_expiration_minutes,
            refresh_token_expiration_minutes,
            admin_emails,
            bcrypt_cost,
        })
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn positive_minutes(
    raw: Option<String>,
    key: &'static str,
    default: i64,
) -> Result<i64, ConfigError> {
    match raw {
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|m| *m > 0)
            .ok_or(ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/band"),
            ("JWT_SECRET_KEY", "kevin1234123412341234123412341234"),
        ]
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = Config::from_lookup(lookup_from(&required())).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.access_token_expiration_minutes, 30);
        assert_eq!(config.refresh_token_expiration_minutes, 420);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.admin_emails.is_empty());
    }

    #[test]
    fn lists_are_split_and_trimmed() {
        let mut pairs = required();
        pairs.push((
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, http://localhost:8080,,",
        ));
        pairs.push(("ADMIN_EMAILS", "admin@band.io"));
        pairs.push(("APP_ENV", "PROD"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://localhost:8080"]
        );
        assert_eq!(config.admin_emails, vec!["admin@band.io"]);
        assert!(config.app_env.is_production());
    }

    #[test]
    fn missing_secret_fails() {
        let err = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/band",
        )]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("JWT_SECRET_KEY")));
    }

    #[test]
    fn non_positive_expiration_is_rejected() {
        let mut pairs = required();
        pairs.push(("JWT_ACCESS_TOKEN_EXPIRATION_MINUTES", "0"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid("JWT_ACCESS_TOKEN_EXPIRATION_MINUTES")
        ));
    }

    #[test]
    fn malformed_port_is_rejected() {
        let mut pairs = required();
        pairs.push(("PORT", "eighty"));

        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid("PORT")));
    }
}
