use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hashed.to_string())
}

pub fn verify(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify("hunter2", &hashed).unwrap());
        assert!(!verify("hunter3", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per hash
        assert_ne!(hash("hunter2").unwrap(), hash("hunter2").unwrap());
    }
}
