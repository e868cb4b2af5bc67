use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::{Uuid, Variant};
use crate::errors::AppError;

/// The `:id` path segment, parsed as a canonical hyphenated UUID.
///
/// Declared ahead of `ActingUser` in handler signatures, so a malformed id
/// is rejected before any header or store lookup happens.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidIdFormat)?;

        parse_id(&raw).map(PathId)
    }
}

// Canonical hyphenated text only, carrying an RFC 4122 variant and a
// version from 1 to 8. The nil and max ids are the two exceptions.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    if raw.len() != 36 {
        tracing::debug!("Rejecting malformed id: {}", raw);
        return Err(AppError::InvalidIdFormat);
    }
    let id = Uuid::parse_str(raw).map_err(|_| AppError::InvalidIdFormat)?;

    if id.is_nil() || id == Uuid::from_u128(u128::MAX) {
        return Ok(id);
    }
    if !(1..=8).contains(&id.get_version_num()) || id.get_variant() != Variant::RFC4122 {
        tracing::debug!("Rejecting id with unknown version or variant: {}", raw);
        return Err(AppError::InvalidIdFormat);
    }
    Ok(id)
}
