//! Application faults the tests map

use std::borrow::Cow;

use faultmap::Classified;
use thiserror::Error;

/// Unchecked failure carrying only a message
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RuntimeError(pub String);

impl RuntimeError {
    pub fn fault(message: &str) -> anyhow::Error {
        anyhow::Error::new(Self(message.to_owned()))
    }
}

/// Failure of a downstream dependency
#[derive(Debug, Error)]
#[error("{service} unavailable")]
pub struct Unavailable {
    pub service: &'static str,
}

impl Unavailable {
    pub fn fault(service: &'static str) -> anyhow::Error {
        anyhow::Error::new(Self { service })
    }
}

/// Lookup failed because a translation is missing
#[derive(Debug, Error)]
#[error("no translation for '{0}'")]
pub struct MissingTranslation(pub String);

/// Domain faults classified by their own identifier
#[derive(Debug, Error)]
pub enum OrderFault {
    #[error("order {0} not found")]
    NotFound(u64),
    #[error("payment for order {0} declined")]
    PaymentDeclined(u64),
    #[error("order storage full")]
    StorageFull,
}

impl Classified for OrderFault {
    fn cause_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Self::NotFound(_) => "ORDER_NOT_FOUND",
            Self::PaymentDeclined(_) => "PAYMENT_DECLINED",
            Self::StorageFull => "STORAGE_FULL",
        })
    }
}

/// One rejected field of a request
#[derive(Debug)]
pub struct Violation {
    pub field: &'static str,
    pub rule: &'static str,
    pub in_query: bool,
}

impl Violation {
    pub const fn body(field: &'static str, rule: &'static str) -> Self {
        Self {
            field,
            rule,
            in_query: false,
        }
    }

    pub const fn query(field: &'static str, rule: &'static str) -> Self {
        Self {
            field,
            rule,
            in_query: true,
        }
    }
}

/// Request rejected for one or more violations
#[derive(Debug, Error)]
#[error("request failed validation")]
pub struct ValidationFailed {
    pub violations: Vec<Violation>,
}
