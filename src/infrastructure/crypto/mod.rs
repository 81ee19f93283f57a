use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::password_hasher::PasswordHasher;

pub mod jwt;

/// Argon2 cost knobs. `None` keeps the crate default for that knob.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashCost {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(cost: HashCost) -> anyhow::Result<Self> {
        let params = Params::new(
            cost.memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            cost.iterations.unwrap_or(Params::DEFAULT_T_COST),
            cost.parallelism.unwrap_or(Params::DEFAULT_P_COST),
            None,
        )
        .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {}", e))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("hash failed: {}", e))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("invalid hash format: {}", e))?;
        // Parameters embedded in the PHC string win, so hashes made under an
        // older cost still verify.
        Ok(self
            .argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(HashCost {
            memory_kib: Some(1024),
            iterations: Some(1),
            parallelism: Some(1),
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = cheap();
        let hash = hasher.hash("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "password123");
        assert!(hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn same_plaintext_gets_distinct_salts() {
        let hasher = cheap();
        let a = hasher.hash("same-password").unwrap();
        let b = hasher.hash("same-password").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("same-password", &a).unwrap());
        assert!(hasher.verify("same-password", &b).unwrap());
    }

    #[test]
    fn verifies_hashes_made_with_other_costs() {
        let hash = Argon2PasswordHasher::new(HashCost::default())
            .unwrap()
            .hash("secret-pass")
            .unwrap();
        assert!(cheap().verify("secret-pass", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(cheap().verify("password", "not-a-valid-hash").is_err());
    }

    #[test]
    fn rejects_impossible_cost() {
        let res = Argon2PasswordHasher::new(HashCost {
            memory_kib: Some(1),
            iterations: Some(1),
            parallelism: Some(1),
        });
        assert!(res.is_err());
    }
}
