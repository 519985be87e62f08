use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{Injector, InjectorError};
use crate::container::{Managed, SharedManaged};

/// Additional objects offered to a single [`create_instance_with`] call.
///
/// [`create_instance_with`]: crate::container::injector::TypedInjector::create_instance_with
#[derive(Default)]
pub struct Extras {
    objects: HashMap<String, Box<dyn SharedManaged>>,
}

impl Extras {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds `object` under `alias`, replacing any previous extra of the same
    /// alias.
    pub fn with<T>(mut self, alias: impl Into<String>, object: T) -> Self
    where
        T: SharedManaged,
    {
        self.insert(alias, object);
        self
    }

    pub fn insert<T>(&mut self, alias: impl Into<String>, object: T)
    where
        T: SharedManaged,
    {
        self.objects.insert(alias.into(), Box::new(object));
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.objects.contains_key(alias)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn get(&self, alias: &str) -> Option<Box<dyn Managed>> {
        self.objects
            .get(alias)
            .map(|object| (**object).dyn_clone().upcast_managed())
    }
}

impl Debug for Extras {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.objects.keys()).finish()
    }
}

/// An [`Injector`] which behaves like `inner`, except that aliases found in
/// its [`Extras`] shadow the ones registered in `inner`.
pub struct ExtendedInjector<'a> {
    inner: &'a dyn Injector,
    extras: Extras,
}

impl<'a> ExtendedInjector<'a> {
    pub fn new(inner: &'a dyn Injector, extras: Extras) -> Self {
        Self { inner, extras }
    }
}

impl Injector for ExtendedInjector<'_> {
    fn dyn_get(&self, alias: &str) -> Result<Box<dyn Managed>, InjectorError> {
        match self.extras.get(alias) {
            Some(object) => Ok(object),
            None => self.inner.dyn_get(alias),
        }
    }

    fn dyn_get_all(&self, alias: &str) -> Result<Vec<Box<dyn Managed>>, InjectorError> {
        self.inner.dyn_get_all(alias)
    }

    fn has(&self, alias: &str) -> bool {
        self.extras.contains(alias) || self.inner.has(alias)
    }
}
