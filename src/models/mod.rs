pub mod trip;
pub mod user;

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// Decodes a request body that was accepted as raw JSON. Handlers take
/// `Json<Value>` so that role checks run before the body's shape is looked at.
pub fn decode_body<'a, T: Deserialize<'a>>(body: &'a Value) -> Result<T, AppError> {
    T::deserialize(body)
        .map_err(|err| AppError::BadRequest(format!("invalid request body: {err}")))
}
