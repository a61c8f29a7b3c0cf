//! Authentication configuration.

/// Configuration for the session gate.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Reserved administrator username. The admin principal has no
    /// stored account; it is matched against this name.
    pub admin_username: String,
    /// Argon2id PHC hash of the administrator password. `None`
    /// disables admin login entirely.
    pub admin_password_hash: Option<String>,
    /// Optional pepper prepended to passwords before Argon2id
    /// verification. Must match the pepper used by the user store.
    pub pepper: Option<String>,
    /// Minimum password length for registration.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".into(),
            admin_password_hash: None,
            pepper: None,
            min_password_length: 8,
        }
    }
}
