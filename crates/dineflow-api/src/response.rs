//! Success envelope

use serde::Serialize;

/// `{ ok: true, data }`. Failures are rendered by [`crate::error::ApiError`].
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}
