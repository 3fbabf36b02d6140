use padel_types::PadelError;

/// bcrypt hashing, run off the async workers since it is CPU bound
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salted hash; the plain password is never stored
    pub async fn hash(&self, password: &str) -> Result<String, PadelError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|err| PadelError::Internal {
                message: format!("password hashing task failed: {}", err),
            })?
            .map_err(|err| PadelError::Internal {
                message: format!("password hashing failed: {}", err),
            })
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PadelError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || check_password(&password, &hash))
            .await
            .map_err(|err| PadelError::Internal {
                message: format!("password check task failed: {}", err),
            })
    }
}

/// bcrypt's verify compares in constant time; malformed hashes never match
pub fn check_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_salted_and_verifiable() {
        let hasher = PasswordHasher::new(4);

        let first = hasher.hash("secret").await.unwrap();
        let second = hasher.hash("secret").await.unwrap();

        assert_ne!(first, "secret");
        assert_ne!(first, second);
        assert!(check_password("secret", &first));
        assert!(check_password("secret", &second));
        assert!(!check_password("Secret", &first));
        assert!(hasher.verify("secret", &first).await.unwrap());
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!check_password("secret", "not-a-bcrypt-hash"));
        assert!(!check_password("", ""));
    }
}
