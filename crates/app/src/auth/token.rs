//! Access token formatting, signing, and verification.
//!
//! Tokens are self-contained: the user claim and expiry travel in the token and
//! are protected by an HMAC, so verification never touches storage.
//!
//! Format: `th_v1_{user_uuid_simple}_{expires_unix_seconds}.{hmac_sha256_hex}`

use std::{fmt, str::FromStr};

use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::UserUuid;

type HmacSha256 = Hmac<Sha256>;

/// Access token identifier prefix.
pub const ACCESS_TOKEN_PREFIX: &str = "th";

/// Minimum accepted signing key length in bytes.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenVersion {
    V1,
}

impl AccessTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for AccessTokenVersion {
    type Err = AccessTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("access token format is invalid")]
    InvalidFormat,

    #[error("access token uses an unsupported version")]
    UnsupportedVersion,

    #[error("access token signature is invalid")]
    InvalidSignature,

    #[error("access token has expired")]
    Expired,

    #[error("signing key must be at least {MIN_SIGNING_KEY_BYTES} bytes")]
    WeakSigningKey,
}

/// Server secret used to sign and verify access tokens.
#[derive(Clone)]
pub struct TokenSigningKey {
    mac: HmacSha256,
}

impl TokenSigningKey {
    /// Build a signing key from raw secret material.
    ///
    /// The secret bytes are zeroized once the keyed MAC has been prepared.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::WeakSigningKey`] when the secret is shorter
    /// than [`MIN_SIGNING_KEY_BYTES`].
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AccessTokenError> {
        let mut bytes = secret.into();

        let mac = if bytes.len() < MIN_SIGNING_KEY_BYTES {
            Err(AccessTokenError::WeakSigningKey)
        } else {
            <HmacSha256 as Mac>::new_from_slice(&bytes).map_err(|_| AccessTokenError::WeakSigningKey)
        };

        bytes.zeroize();

        Ok(Self { mac: mac? })
    }

    fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }
}

impl fmt::Debug for TokenSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSigningKey(**redacted**)")
    }
}

/// Claims carried by a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub user_uuid: UserUuid,
    pub version: AccessTokenVersion,
    pub expires_at: Timestamp,
}

/// Issues and verifies signed access tokens.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    key: TokenSigningKey,
    ttl: SignedDuration,
}

impl TokenSigner {
    #[must_use]
    pub fn new(key: TokenSigningKey, ttl: SignedDuration) -> Self {
        Self { key, ttl }
    }

    /// Issue a token for `user_uuid` expiring one TTL after `now`.
    #[must_use]
    pub fn issue(&self, user_uuid: UserUuid, now: Timestamp) -> (String, Timestamp) {
        // Tokens carry whole seconds, so the reported expiry is truncated to match.
        let expires_at = now
            .saturating_add(self.ttl)
            .ok()
            .and_then(|expires_at| Timestamp::from_second(expires_at.as_second()).ok())
            .unwrap_or(Timestamp::MAX);
        let payload = format_payload(AccessTokenVersion::V1, user_uuid, expires_at);
        let signature = self.sign(&payload);

        (format!("{payload}.{signature}"), expires_at)
    }

    /// Verify a token's signature and expiry as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is malformed, carries a bad signature,
    /// or has expired.
    pub fn verify(&self, token: &str, now: Timestamp) -> Result<AccessTokenClaims, AccessTokenError> {
        let (payload, signature_hex) =
            token.split_once('.').ok_or(AccessTokenError::InvalidFormat)?;

        let signature = hex::decode(signature_hex).map_err(|_| AccessTokenError::InvalidFormat)?;

        let mut mac = self.key.mac();

        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AccessTokenError::InvalidSignature)?;

        let claims = parse_payload(payload)?;

        if claims.expires_at <= now {
            return Err(AccessTokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.key.mac();

        mac.update(payload.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

fn format_payload(version: AccessTokenVersion, user_uuid: UserUuid, expires_at: Timestamp) -> String {
    format!(
        "{ACCESS_TOKEN_PREFIX}_{}_{}_{}",
        version.segment(),
        user_uuid.into_uuid().simple(),
        expires_at.as_second()
    )
}

fn parse_payload(payload: &str) -> Result<AccessTokenClaims, AccessTokenError> {
    let mut parts = payload.splitn(4, '_');

    let prefix = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let version_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let user_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let expires_segment = parts.next().ok_or(AccessTokenError::InvalidFormat)?;

    if prefix != ACCESS_TOKEN_PREFIX {
        return Err(AccessTokenError::InvalidFormat);
    }

    let version = AccessTokenVersion::from_str(version_segment)?;

    let user_uuid = Uuid::try_parse(user_segment).map_err(|_| AccessTokenError::InvalidFormat)?;

    let expires_at = expires_segment
        .parse::<i64>()
        .ok()
        .and_then(|seconds| Timestamp::from_second(seconds).ok())
        .ok_or(AccessTokenError::InvalidFormat)?;

    Ok(AccessTokenClaims {
        user_uuid: UserUuid::from_uuid(user_uuid),
        version,
        expires_at,
    })
}
