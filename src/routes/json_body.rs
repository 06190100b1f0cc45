use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Deserializer, Map, Value};

use crate::error::ApiError;

/// JSON request body extractor.
///
/// Unlike `axum::Json` this ignores `Content-Type`, decodes only the first
/// JSON value in the body and treats a top-level `null` as an empty object.
/// Decode problems, including an empty body, are rejected with 400; failures
/// reading the body keep their own status.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Body {
                status: e.status(),
                message: e.body_text(),
            })?;

        decode(&body).map(JsonBody)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value = match Deserializer::from_slice(body).into_iter::<Value>().next() {
        Some(Ok(Value::Null)) => Value::Object(Map::new()),
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(ApiError::BadRequest(e.to_string())),
        None => return Err(ApiError::BadRequest("expected a body".to_string())),
    };

    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}
