//! Auth Config

use std::fmt;

use clap::Args;
use jiff::SignedDuration;

/// Access token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// Secret used to sign access tokens, at least 32 bytes
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Access token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = 900)]
    pub token_ttl_seconds: u32,
}

impl AuthConfig {
    /// Access token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.token_ttl_seconds))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"**redacted**")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}
