//! Request-body extraction that reports failures through [`AppError`].

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::messages;

/// JSON request body.
///
/// An empty body deserializes as `T::default()`, so optional fields read as
/// absent. The `Content-Type` header is not required. Unreadable or
/// malformed bodies are rejected with a 400 in the usual `{error, code}`
/// shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Unreadable request body");
            AppError::BadRequest(messages::INCOMPLETE_FORM.into())
        })?;

        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "Malformed JSON request body");
        AppError::BadRequest(messages::INCOMPLETE_FORM.into())
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Form {
        name: Option<String>,
    }

    #[test]
    fn empty_body_reads_as_default() {
        assert_eq!(parse_body::<Form>(b"").unwrap(), Form::default());
        assert_eq!(parse_body::<Form>(b" \n").unwrap(), Form::default());
    }

    #[test]
    fn wrongly_typed_field_is_bad_request() {
        let err = parse_body::<Form>(br#"{"name": 5}"#).unwrap_err();
        assert_matches!(err, AppError::BadRequest(msg) if msg == messages::INCOMPLETE_FORM);
    }

    #[test]
    fn well_formed_body_parses() {
        let form = parse_body::<Form>(br#"{"name": "ana"}"#).unwrap();
        assert_eq!(form.name.as_deref(), Some("ana"));
    }
}
