//! Admin credentials and sessions.
//!
//! Passwords are hashed with Argon2id and never stored or logged in clear.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::Duration;
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Admin, AdminSession};
use crate::repository::{admin::AdminRepository, session::SessionRepository};

const SESSION_ID_LEN: usize = 64;

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| StorageError::Hashing(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StorageError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Check credentials and open a session on success.
///
/// Returns `None` for an unknown user or a wrong password.
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    password: &str,
    ttl: Duration,
) -> Result<Option<AdminSession>> {
    let Some(admin) = AdminRepository::new(pool).find_by_username(username).await? else {
        return Ok(None);
    };

    if !verify_password(password, &admin.password_hash) {
        return Ok(None);
    }

    let session = SessionRepository::new(pool)
        .create(&generate_session_id(), admin.id, ttl)
        .await?;

    Ok(Some(session))
}

/// Set the password of `username`, creating the admin if it does not exist.
pub async fn reset_password(pool: &PgPool, username: &str, password: &str) -> Result<Admin> {
    let hash = hash_password(password)?;
    AdminRepository::new(pool)
        .upsert_password_hash(username, &hash)
        .await
}

/// Create the bootstrap admin unless it already exists. Returns whether an
/// admin was created.
pub async fn ensure_admin(pool: &PgPool, username: &str, password: &str) -> Result<bool> {
    let repo = AdminRepository::new(pool);
    if repo.find_by_username(username).await?.is_some() {
        return Ok(false);
    }

    repo.upsert_password_hash(username, &hash_password(password)?)
        .await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("admin123").unwrap();

        assert_ne!(hash, "admin123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin1234", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_session_ids_are_long_and_random() {
        let a = generate_session_id();
        let b = generate_session_id();

        assert_eq!(a.len(), SESSION_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
