//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use techhaven_app::auth::{Credentials, IssuedAccessToken};

use crate::{auth::into_status_error, extensions::*, state::State};

const TOKEN_TYPE: &str = "Bearer";

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials::new(request.username, request.password)
    }
}

/// Access Token Response
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct AccessTokenResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// When the token stops being accepted
    pub expires_at: String,
}

impl From<IssuedAccessToken> for AccessTokenResponse {
    fn from(issued: IssuedAccessToken) -> Self {
        AccessTokenResponse {
            token: issued.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_at: issued.expires_at.to_string(),
        }
    }
}

/// Login Handler
///
/// Exchanges a username and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AccessTokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(issued.into()))
}
