use crate::error::AppError;

/// bcrypt password hashing. Hashing runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordEncoder {
    cost: u32,
}

impl PasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn encode(&self, raw: &str) -> Result<String, AppError> {
        let raw = raw.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                AppError::Internal
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "failed to hash password");
                AppError::Internal
            })
    }

    /// A malformed stored hash counts as a mismatch.
    pub async fn matches(&self, raw: &str, hash: &str) -> bool {
        let raw = raw.to_string();
        let hash = hash.to_string();
        match tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash)).await {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "stored password hash is not valid bcrypt");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }

    /// Stand-in for `matches` when there is no stored hash: the same bcrypt work
    /// at the configured cost, always false.
    pub async fn matches_absent(&self, raw: &str) -> bool {
        if let Err(e) = self.encode(raw).await {
            tracing::debug!(error = ?e, "placeholder password hashing failed");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn encoded_password_matches_only_the_original() {
        let encoder = PasswordEncoder::new(4);
        let hash = encoder.encode("s3cret-pass").await.unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(encoder.matches("s3cret-pass", &hash).await);
        assert!(!encoder.matches("wrong-pass", &hash).await);
    }

    #[tokio::test]
    async fn absent_hash_never_matches() {
        let encoder = PasswordEncoder::new(4);
        assert!(!encoder.matches_absent("s3cret-pass").await);
    }

    #[tokio::test]
    async fn malformed_hash_never_matches() {
        let encoder = PasswordEncoder::new(4);
        assert!(!encoder.matches("anything", "plaintext-not-a-hash").await);
    }
}
