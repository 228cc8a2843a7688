//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::task;
use tracing::info;
use zeroize::Zeroizing;

use crate::{
    auth::{
        AuthServiceError, Credentials, IssuedAccessToken, MAX_USERNAME_CHARS, TokenSigner,
        UserRecord, UserUuid,
        models::NewUser,
        password::{hash_password, prepare_decoy_hash, verify_decoy, verify_password},
        repository::PgAuthRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    signer: TokenSigner,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner) -> Self {
        prepare_decoy_hash();

        Self {
            db,
            repository: PgAuthRepository::new(),
            signer,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, credentials: Credentials) -> Result<UserRecord, AuthServiceError> {
        let username = validate_username(&credentials.username)?;

        if credentials.password.is_empty() {
            return Err(AuthServiceError::Validation("password is required"));
        }

        let password = Zeroizing::new(credentials.password.clone());
        let password_hash = task::spawn_blocking(move || hash_password(&password)).await??;

        let mut tx = self.db.begin().await?;

        if self.repository.username_exists(&mut tx, username).await? {
            return Err(AuthServiceError::AlreadyExists);
        }

        let user = self
            .repository
            .create_user(
                &mut tx,
                NewUser {
                    uuid: UserUuid::new(),
                    username: username.to_string(),
                    password_hash,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, username = %user.username, "user registered");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedAccessToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .find_credentials_by_username(&mut tx, credentials.username.trim())
            .await?;

        tx.commit().await?;

        let password = Zeroizing::new(credentials.password.clone());

        let Some(stored) = stored else {
            return Err(task::spawn_blocking(move || verify_decoy(&password)).await?);
        };
        let password_hash = stored.password_hash;

        task::spawn_blocking(move || verify_password(&password, &password_hash)).await??;

        let (token, expires_at) = self.signer.issue(stored.uuid, Timestamp::now());

        info!(user_uuid = %stored.uuid, "access token issued");

        Ok(IssuedAccessToken {
            token,
            user_uuid: stored.uuid,
            expires_at,
        })
    }

    fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let claims = self.signer.verify(bearer_token, Timestamp::now())?;

        Ok(claims.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user, storing only a salted hash of the password.
    async fn register(&self, credentials: Credentials) -> Result<UserRecord, AuthServiceError>;

    /// Check credentials and issue a bearer token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedAccessToken, AuthServiceError>;

    /// Resolve the user a bearer token was issued to, without touching storage.
    fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

fn validate_username(username: &str) -> Result<&str, AuthServiceError> {
    let username = username.trim();

    if username.is_empty() {
        return Err(AuthServiceError::Validation("username is required"));
    }

    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AuthServiceError::Validation("username is too long"));
    }

    Ok(username)
}
