pub trait PasswordHasher: Send + Sync {
    /// Produces a salted one-way hash in PHC string format.
    fn hash(&self, plaintext: &str) -> anyhow::Result<String>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, plaintext: &str, hash: &str) -> anyhow::Result<bool>;
}
