//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use contactbook_core::validation::{validate_contact_id, Field, FieldErrors, ID_INVALID};
use contactbook_core::RawContactInput;
use uuid::Uuid;

use super::error::ApiError;

/// Extract and validate a contact id (canonical UUID) from the path
pub struct ValidContactId(pub Uuid);

impl<S> FromRequestParts<S> for ValidContactId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                let mut errors = FieldErrors::default();
                errors.insert(Field::Id, ID_INVALID);
                ApiError::Validation(errors)
            })?;

        let uuid = validate_contact_id(&id)?;
        Ok(Self(uuid))
    }
}

/// Contact fields from a JSON body, with rejections in the API error shape
pub struct ContactBody(pub RawContactInput);

impl<S> FromRequest<S> for ContactBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<RawContactInput>::from_request(req, state).await?;
        Ok(Self(raw))
    }
}
