use serde::Serialize;

use crate::locale::{TranslationError, Translator};
use crate::{ErrorEntry, ErrorPayload, HttpStatus};

/// Status and payload to answer a fault with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: HttpStatus,
    pub payload: ErrorPayload,
}

impl ErrorResponse {
    pub fn new(status: HttpStatus, payload: ErrorPayload) -> Self {
        Self { status, payload }
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        self.payload.entries()
    }

    /// Same response with its messages rendered in `locale`
    pub fn localized(&self, translator: &dyn Translator, locale: &str) -> Result<Self, TranslationError> {
        Ok(Self {
            status: self.status,
            payload: self.payload.localized(translator, locale)?,
        })
    }
}

/// Hand the response to a web layer; the body is left for it to encode
impl From<ErrorResponse> for http::Response<ErrorPayload> {
    fn from(response: ErrorResponse) -> Self {
        let mut http_response = Self::new(response.payload);
        *http_response.status_mut() = response.status.into();
        http_response
    }
}
