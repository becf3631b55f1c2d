use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use garde::Validate;
use parkpass_core::FieldError;
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::AppError;

/// JSON body that has passed its `garde` rules.
///
/// Malformed bodies and rule violations are both rejected with 422. Decode
/// errors name the offending field where serde can locate it.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::Validation(vec![FieldError::new(
                "body",
                "Expected request with `Content-Type: application/json`",
            )]));
        }

        let bytes = Bytes::from_request(req, state).await?;
        let value = decode_json::<T>(&bytes)?;
        parkpass_core::validate(&value)?;
        Ok(Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.starts_with("application/") && mime.ends_with("json")
        })
        .unwrap_or(false)
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let message = err.inner().to_string();
        let field = match err.path().to_string() {
            path if path == "." => missing_field(&message).unwrap_or("body").to_string(),
            path => path,
        };
        AppError::Validation(vec![FieldError::new(field, message)])
    })
}

/// serde reports a missing field at its parent, so the name is only in the message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
