use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;
use pinboard_types::models::Identity;
use tracing::{debug, error};

use crate::Store;
use crate::error::{Result, StoreError};

/// Hash a password with Argon2id and a random salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Hash(e.to_string()))
}

fn password_matches(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!("Stored password hash is not a valid PHC string: {}", e);
        StoreError::Hash(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl Store {
    /// Check a username/password pair. Unknown usernames and wrong passwords
    /// both come back as [`StoreError::InvalidCredentials`].
    pub fn verify(&self, username: &str, password: &str) -> Result<Identity> {
        let Some(user) = self.users.iter().find(|u| u.username == username) else {
            // Burn one verification anyway so an unknown username costs the
            // same as a wrong password.
            if let Some(any) = self.users.first() {
                let _ = password_matches(password, &any.password);
            }
            debug!("Login rejected: unknown username");
            return Err(StoreError::InvalidCredentials);
        };

        if !password_matches(password, &user.password)? {
            debug!("Login rejected: bad password for user {}", user.id);
            return Err(StoreError::InvalidCredentials);
        }

        Ok(Identity::from(user))
    }
}
