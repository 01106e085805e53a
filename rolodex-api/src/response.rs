/// Response envelope for successful requests
///
/// Every successful handler wraps its projection in `{"data": ...}` so that
/// clients can always read the payload from the same key, mirroring the
/// `{"errors": ...}` shape on failures.

use axum::Json;
use serde::Serialize;

/// The `{"data": ...}` envelope
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T: Serialize> Data<T> {
    /// Wraps a payload in the envelope, ready to return from a handler
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}
