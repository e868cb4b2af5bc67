use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::errors::AppError;

pub const USERNAME_HEADER: &str = "username";

/// Username named by the `username` request header.
///
/// The header is trusted as-is and decoded as UTF-8, so non-ASCII usernames
/// work. A missing header is reported as `UserNotFound`, the same outcome as
/// naming an unknown user.
#[derive(Debug, Clone)]
pub struct ActingUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .ok_or_else(|| {
                tracing::debug!("Request without a {} header", USERNAME_HEADER);
                AppError::UserNotFound
            })?;

        Ok(ActingUser(username))
    }
}
