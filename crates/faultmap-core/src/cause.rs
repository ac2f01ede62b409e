use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A fault classified under an identifier
///
/// Borrows the fault it was resolved from for the duration of one
/// `respond_to` call. Two causes are equal when their identifiers are,
/// whatever faults they carry.
pub struct Cause<'f, F: ?Sized> {
    id: String,
    context: &'f F,
}

impl<'f, F: ?Sized> Cause<'f, F> {
    pub fn new(id: impl Into<String>, context: &'f F) -> Self {
        Self { id: id.into(), context }
    }

    /// Classification identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The fault this cause was resolved from
    pub fn context(&self) -> &'f F {
        self.context
    }
}

impl<F: ?Sized> Clone for Cause<'_, F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            context: self.context,
        }
    }
}

impl<F: ?Sized> PartialEq for Cause<'_, F> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<F: ?Sized> Eq for Cause<'_, F> {}

impl<F: ?Sized> Hash for Cause<'_, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<F: ?Sized> fmt::Debug for Cause<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cause").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Faults that carry their own classification identifier
pub trait Classified {
    fn cause_id(&self) -> Cow<'_, str>;
}

impl<T: Classified + ?Sized> Classified for &T {
    fn cause_id(&self) -> Cow<'_, str> {
        (**self).cause_id()
    }
}

impl<T: Classified + ?Sized> Classified for Box<T> {
    fn cause_id(&self) -> Cow<'_, str> {
        (**self).cause_id()
    }
}
