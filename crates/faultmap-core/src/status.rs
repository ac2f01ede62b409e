use std::fmt;

use http::StatusCode;
use serde::{Serialize, Serializer};

/// Status code outside the range a response may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP status {0}: expected a value between 100 and 599")]
pub struct InvalidStatus(pub u16);

/// HTTP status restricted to `100..=599`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus(StatusCode);

impl HttpStatus {
    /// Lowest accepted status
    pub const MIN: u16 = 100;
    /// Highest accepted status
    pub const MAX: u16 = 599;

    pub fn new(code: u16) -> Result<Self, InvalidStatus> {
        if !(Self::MIN..=Self::MAX).contains(&code) {
            return Err(InvalidStatus(code));
        }

        StatusCode::from_u16(code).map(Self).map_err(|_| InvalidStatus(code))
    }

    pub fn as_u16(self) -> u16 {
        self.0.as_u16()
    }

    pub fn status_code(self) -> StatusCode {
        self.0
    }
}

impl TryFrom<u16> for HttpStatus {
    type Error = InvalidStatus;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl TryFrom<StatusCode> for HttpStatus {
    type Error = InvalidStatus;

    fn try_from(code: StatusCode) -> Result<Self, Self::Error> {
        Self::new(code.as_u16())
    }
}

impl From<HttpStatus> for StatusCode {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_u16())
    }
}

impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}
