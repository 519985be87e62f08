pub mod closure;
pub mod component;
pub mod instance;

use std::fmt::Debug;

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::SharedManaged;

use closure::ClosureProvider;
use component::{Component, ComponentProvider};
use instance::InstanceProvider;

/// A universal factory which constructs objects of one type.
///
/// A [`Provider`] is responsible for constructing an object on each request
/// and retrieving all dependencies from an [`Injector`]. Whether the object is
/// cached afterwards is decided by the container according to the lifetime
/// of the registration, not by the provider.
///
/// Usually, you don't need to implement [`Provider`] manually, since this is
/// automatically done by [`TypedProvider`]'s blanket implementation. See
/// [`TypedProvider`] for more information.
pub trait Provider: Debug + Send + Sync + 'static {
    /// Provides a newly created type-erased object. A [`Injector`] is needed
    /// since some other objects may be dependent on the object requested by
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if all dependencies can't be fetched or the object
    /// construction fails.
    fn dyn_provide(&self, injector: &dyn Injector) -> Result<Box<dyn SharedManaged>, InjectorError>;
}

/// A static variant of the [`Provider`] trait, leveraging static dispatch and
/// type-safety.
///
/// Providers come in three flavors, and the caller picks one explicitly when
/// registering a type:
///
/// - [`factory`] wraps a closure receiving the injector,
/// - [`component`] builds a [`Component`], a type with a dedicated
///   constructor,
/// - [`instance`] hands out clones of a ready-made object.
pub trait TypedProvider: Provider {
    /// The return type in response to each request to the provider.
    type Output: SharedManaged;

    /// Provides a newly created object of type [`TypedProvider::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if all dependencies can't be fetched or the object
    /// construction fails.
    fn provide<I>(&self, injector: &I) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized;
}

impl<T: TypedProvider> Provider for T {
    fn dyn_provide(&self, injector: &dyn Injector) -> Result<Box<dyn SharedManaged>, InjectorError> {
        self.provide(injector)
            .map(|obj| -> Box<dyn SharedManaged> { Box::new(obj) })
    }
}

/// Creates a provider from a factory closure.
///
/// A factory receives the injector as its only argument, so it can pull any
/// dependency by alias.
pub fn factory<T, F>(closure: F) -> ClosureProvider<T, F>
where
    T: SharedManaged,
    F: Fn(&dyn Injector) -> Result<T, InjectorError> + Send + Sync + 'static,
{
    ClosureProvider::new(closure)
}

/// Creates a provider which calls the dedicated constructor of `C`.
pub fn component<C>() -> ComponentProvider<C>
where
    C: Component,
{
    ComponentProvider::new()
}

/// Creates a provider which hands out clones of `instance`.
pub fn instance<T>(instance: T) -> InstanceProvider<T>
where
    T: SharedManaged + Clone,
{
    InstanceProvider::new(instance)
}
