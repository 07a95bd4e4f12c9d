//! Argon2id password hashing and verification.
//!
//! New passwords are stored as PHC strings. Settings files written before
//! hashing was introduced hold the password in plaintext;
//! [`verify_stored_password`] accepts both.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;

/// Minimum length for a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether `stored` looks like a PHC hash rather than a legacy plaintext.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

/// Check `candidate` against a stored password that is either a PHC hash
/// or legacy plaintext.
pub fn verify_stored_password(
    candidate: &str,
    stored: &str,
) -> Result<bool, argon2::password_hash::Error> {
    if is_hashed(stored) {
        verify_password(candidate, stored)
    } else {
        Ok(constant_time_eq(candidate.as_bytes(), stored.as_bytes()))
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

/// Constant-time comparison against the stored secret. The loop runs over
/// the stored length whatever the candidate's length.
fn constant_time_eq(candidate: &[u8], stored: &[u8]) -> bool {
    let mut equal = (candidate.len() as u64).ct_eq(&(stored.len() as u64));
    for (i, byte) in stored.iter().enumerate() {
        let other = candidate.get(i).copied().unwrap_or(0);
        equal &= other.ct_eq(byte);
    }
    equal.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
        assert!(!verify_password("wrong", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_stored_password_accepts_hash_and_plaintext() {
        let hash = hash_password("s3cret!").expect("hashing should succeed");
        assert!(verify_stored_password("s3cret!", &hash).unwrap());
        assert!(!verify_stored_password("nope", &hash).unwrap());

        assert!(verify_stored_password("admin123", "admin123").unwrap());
        assert!(!verify_stored_password("admin12", "admin123").unwrap());
        assert!(!verify_stored_password("", "admin123").unwrap());
        assert!(!verify_stored_password("x", "admin123").unwrap());
        assert!(!verify_stored_password("admin1234", "admin123").unwrap());
        assert!(!verify_stored_password("admin123\0", "admin123").unwrap());
    }

    #[test]
    fn test_constant_time_eq_pads_short_candidates() {
        // A shorter candidate is compared against zero padding, never
        // accepted just because its prefix matches.
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"ab", b"ab\0"));
        assert!(!constant_time_eq(b"ab\0", b"ab"));
        assert!(!constant_time_eq(b"", b"a"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_password_too_short() {
        let msg = validate_password_strength("abc", MIN_PASSWORD_LENGTH).unwrap_err();
        assert!(msg.contains("at least 6 characters"));
        assert!(validate_password_strength("abcdef", MIN_PASSWORD_LENGTH).is_ok());
    }
}
