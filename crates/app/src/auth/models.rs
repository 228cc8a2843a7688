//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use zeroize::Zeroize;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Maximum username length in characters.
pub const MAX_USERNAME_CHARS: usize = 80;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub created_at: Timestamp,
}

/// Stored credentials for a user, used only during login.
#[derive(Clone)]
pub(crate) struct StoredCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("uuid", &self.uuid)
            .field("password_hash", &"**redacted**")
            .finish()
    }
}

/// New user persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub password_hash: String,
}

/// Username and cleartext password supplied at registration or login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Access token issued on successful login.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub user_uuid: UserUuid,
    pub expires_at: Timestamp,
}
