//! Deciding which rule applies to a fault

use std::any::type_name;
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use faultmap_core::{Cause, Classified};

/// Recognizes faults and classifies them into a [`Cause`]
pub trait CauseResolver<F: ?Sized>: Send + Sync {
    /// Classify the fault, or `None` when this resolver does not apply
    fn resolve<'f>(&self, fault: &'f F) -> Option<Cause<'f, F>>;

    /// Whether this resolver applies to the fault
    fn matches(&self, fault: &F) -> bool {
        self.resolve(fault).is_some()
    }
}

/// Faults whose concrete error type can be inspected at runtime
pub trait Downcast {
    fn downcast_ref<T: Error + Send + Sync + 'static>(&self) -> Option<&T>;

    fn is<T: Error + Send + Sync + 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl Downcast for anyhow::Error {
    fn downcast_ref<T: Error + Send + Sync + 'static>(&self) -> Option<&T> {
        Self::downcast_ref::<T>(self)
    }
}

impl Downcast for dyn Error + Send + Sync + 'static {
    fn downcast_ref<T: Error + Send + Sync + 'static>(&self) -> Option<&T> {
        <dyn Error + Send + Sync>::downcast_ref::<T>(self)
    }
}

impl Downcast for dyn Error + 'static {
    fn downcast_ref<T: Error + Send + Sync + 'static>(&self) -> Option<&T> {
        <dyn Error>::downcast_ref::<T>(self)
    }
}

type IdentifierFn<F> = dyn Fn(&F) -> String + Send + Sync;

enum Identifier<F: ?Sized> {
    Key(String),
    Function(Box<IdentifierFn<F>>),
}

impl<F: ?Sized> Identifier<F> {
    fn id_for(&self, fault: &F) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Function(function) => function(fault),
        }
    }
}

/// Resolver driven by a predicate over the fault
///
/// The identifier defaults to the short type name of `F`.
pub struct PredicateResolver<F: ?Sized> {
    predicate: Box<dyn Fn(&F) -> bool + Send + Sync>,
    identifier: Identifier<F>,
}

impl<F: ?Sized> PredicateResolver<F> {
    pub fn new(predicate: impl Fn(&F) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            identifier: Identifier::Key(short_type_name::<F>().to_owned()),
        }
    }

    /// Classify matching faults under a fixed key
    #[must_use]
    pub fn identified_by_key(mut self, key: impl Into<String>) -> Self {
        self.identifier = Identifier::Key(key.into());
        self
    }

    /// Classify matching faults with a function of the fault
    #[must_use]
    pub fn identified_by(mut self, identifier: impl Fn(&F) -> String + Send + Sync + 'static) -> Self {
        self.identifier = Identifier::Function(Box::new(identifier));
        self
    }
}

impl<F: ?Sized> CauseResolver<F> for PredicateResolver<F> {
    fn resolve<'f>(&self, fault: &'f F) -> Option<Cause<'f, F>> {
        (self.predicate)(fault).then(|| Cause::new(self.identifier.id_for(fault), fault))
    }

    fn matches(&self, fault: &F) -> bool {
        (self.predicate)(fault)
    }
}

impl<F: ?Sized> fmt::Debug for PredicateResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PredicateResolver");
        if let Identifier::Key(ref key) = self.identifier {
            debug.field("key", key);
        }
        debug.finish_non_exhaustive()
    }
}

/// Resolver matching faults whose concrete error type is `T`
///
/// The identifier defaults to the short type name of `T`.
pub struct TypeResolver<T> {
    key: String,
    _type: PhantomData<fn() -> T>,
}

impl<T> TypeResolver<T> {
    pub fn new() -> Self {
        Self {
            key: short_type_name::<T>().to_owned(),
            _type: PhantomData,
        }
    }

    #[must_use]
    pub fn identified_by_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl<T> Default for TypeResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, T> CauseResolver<F> for TypeResolver<T>
where
    F: Downcast + ?Sized,
    T: Error + Send + Sync + 'static,
{
    fn resolve<'f>(&self, fault: &'f F) -> Option<Cause<'f, F>> {
        fault.is::<T>().then(|| Cause::new(self.key.clone(), fault))
    }
}

impl<T> fmt::Debug for TypeResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("type", &type_name::<T>())
            .field("key", &self.key)
            .finish()
    }
}

/// Resolver over the fault's own classification
///
/// With an expected identifier it only matches faults classified under it;
/// without one it matches every fault.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedResolver {
    expected: Option<String>,
}

impl ClassifiedResolver {
    pub fn matching(id: impl Into<String>) -> Self {
        Self {
            expected: Some(id.into()),
        }
    }

    pub const fn any() -> Self {
        Self { expected: None }
    }
}

impl<F: Classified + ?Sized> CauseResolver<F> for ClassifiedResolver {
    fn resolve<'f>(&self, fault: &'f F) -> Option<Cause<'f, F>> {
        let id = fault.cause_id();

        match self.expected {
            Some(ref expected) if *expected != id => None,
            _ => Some(Cause::new(id.into_owned(), fault)),
        }
    }
}

/// Factory for the built-in resolvers
pub struct CauseResolvers<F: ?Sized>(PhantomData<fn(&F)>);

impl<F: ?Sized> CauseResolvers<F> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Match faults satisfying `predicate`
    pub fn when(&self, predicate: impl Fn(&F) -> bool + Send + Sync + 'static) -> PredicateResolver<F> {
        PredicateResolver::new(predicate)
    }

    /// Match faults whose concrete error type is `T`
    pub fn type_of<T>(&self) -> TypeResolver<T>
    where
        F: Downcast,
        T: Error + Send + Sync + 'static,
    {
        TypeResolver::new()
    }

    /// Match faults classified under `id`
    pub fn classified(&self, id: impl Into<String>) -> ClassifiedResolver
    where
        F: Classified,
    {
        ClassifiedResolver::matching(id)
    }

    /// Match every fault, classified by its own identifier
    pub fn any(&self) -> ClassifiedResolver
    where
        F: Classified,
    {
        ClassifiedResolver::any()
    }

    /// Match every fault under a fixed identifier
    pub fn fixed_id(&self, id: impl Into<String>) -> PredicateResolver<F> {
        PredicateResolver::new(|_| true).identified_by_key(id)
    }

    /// Match every fault, identified by a function of the fault
    pub fn function(&self, identifier: impl Fn(&F) -> String + Send + Sync + 'static) -> PredicateResolver<F> {
        PredicateResolver::new(|_| true).identified_by(identifier)
    }
}

impl<F: ?Sized> Default for CauseResolvers<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> Clone for CauseResolvers<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for CauseResolvers<F> {}

/// Last path segment of a type name, without generic arguments
///
/// Trait objects keep their principal trait: `dyn Error + Send + Sync` is `Error`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let principal = full.strip_prefix("dyn ").unwrap_or(full);
    let principal = principal.split(" + ").next().unwrap_or(principal);
    let base = principal.split('<').next().unwrap_or(principal);
    base.rsplit("::").next().unwrap_or(base)
}
