use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

fn argon2_failure(op: &'static str, err: argon2::password_hash::Error) -> anyhow::Error {
    error!(error = %err, op, "argon2 failure");
    anyhow::anyhow!("{op}: {err}")
}

/// PHC-formatted Argon2id hash of `plain` under a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| argon2_failure("hash password", e))
}

/// `Ok(false)` on a mismatch; a malformed `stored` hash is an error.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = PasswordHash::new(stored).map_err(|e| argon2_failure("parse stored hash", e))?;
    match Argon2::default().verify_password(plain.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(argon2_failure("verify password", e)),
    }
}

// Argon2 is slow by construction; run it on the blocking pool.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("12345678").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("12345678", &hash).expect("verify should succeed"));
        assert!(!verify_password("87654321", &hash).expect("verify should not error"));
    }

    #[test]
    fn salts_differ_per_hash() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(err.to_string().starts_with("parse stored hash"));
    }

    #[tokio::test]
    async fn blocking_wrappers_agree() {
        let hash = hash_password_blocking("correct-horse".into()).await.unwrap();
        assert!(verify_password_blocking("correct-horse".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("wrong-horse".into(), hash).await.unwrap());
    }
}
