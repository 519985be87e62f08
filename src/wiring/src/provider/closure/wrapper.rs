use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::SharedManaged;
use crate::provider::TypedProvider;

/// A [`Provider`] which supplies objects from a factory closure.
///
/// The closure receives the injector and is free to request any dependency
/// from it. Errors raised by the closure itself can be wrapped with
/// [`InjectorError::construction`].
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use wiring::container::injector::TypedInjector;
/// # use wiring::provider::closure::ClosureProvider;
/// let provider = ClosureProvider::new(|injector| {
///     let name: Arc<String> = injector.get("name")?;
///     Ok(format!("hello, {name}"))
/// });
/// ```
///
/// [`Provider`]: crate::provider::Provider
pub struct ClosureProvider<T, F>
where
    T: SharedManaged,
    F: Fn(&dyn Injector) -> Result<T, InjectorError> + Send + Sync + 'static,
{
    closure: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> ClosureProvider<T, F>
where
    T: SharedManaged,
    F: Fn(&dyn Injector) -> Result<T, InjectorError> + Send + Sync + 'static,
{
    /// Creates a new [`ClosureProvider`] from a factory closure.
    pub fn new(closure: F) -> Self {
        Self {
            closure,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Debug for ClosureProvider<T, F>
where
    T: SharedManaged,
    F: Fn(&dyn Injector) -> Result<T, InjectorError> + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureProvider<T, F>")
            .finish_non_exhaustive()
    }
}

impl<T, F> TypedProvider for ClosureProvider<T, F>
where
    T: SharedManaged,
    F: Fn(&dyn Injector) -> Result<T, InjectorError> + Send + Sync + 'static,
{
    type Output = T;

    fn provide<I>(&self, injector: &I) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        (self.closure)(injector.upcast_dyn())
    }
}

#[cfg(test)]
mod tests {
    use crate::container::injector::MockInjector;

    use super::*;

    #[test]
    fn closure_provider_succeeds() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .withf(|alias| alias == "x")
            .times(2)
            .returning(|_| Ok(Box::new(42i32)));

        let provider = ClosureProvider::new(|injector| injector.get::<i32>("x").map(|x| x + 1));

        assert_eq!(provider.provide(&injector).unwrap(), 43);
        assert_eq!(provider.provide(&injector).unwrap(), 43);
    }

    #[test]
    fn closure_provider_propagates_errors() {
        let injector = MockInjector::new();
        let provider =
            ClosureProvider::new(|_| Err::<i32, _>(InjectorError::construction("broken")));

        assert!(matches!(
            provider.provide(&injector),
            Err(InjectorError::ObjectConstruction { .. })
        ));
    }
}
