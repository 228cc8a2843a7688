//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use techhaven_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => StatusError::bad_request().brief("Username already exists"),
        AuthServiceError::Validation(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::InvalidToken(_) => StatusError::unauthorized().brief("Invalid access token"),
        AuthServiceError::PasswordHash(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Task(source) => {
            error!("password hashing task failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use techhaven_app::auth::AccessTokenError;

    use super::*;

    #[test]
    fn conflicts_and_validation_are_bad_requests() {
        assert_eq!(
            into_status_error(AuthServiceError::AlreadyExists).code,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            into_status_error(AuthServiceError::Validation("username is required")).code,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn credential_failures_are_unauthorized() {
        assert_eq!(
            into_status_error(AuthServiceError::InvalidCredentials).code,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            into_status_error(AuthServiceError::InvalidToken(AccessTokenError::Expired)).code,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn storage_errors_hide_detail() {
        let status = into_status_error(AuthServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
