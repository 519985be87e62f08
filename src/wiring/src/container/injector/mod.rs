mod proxy;

use std::any;
use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::Managed;
use crate::provider::TypedProvider;
use crate::util::any::{AsAny, Downcast};

pub use proxy::{ExtendedInjector, Extras};

/// A type-erased source of objects addressed by alias.
///
/// Both containers and the ad-hoc contexts used by
/// [`TypedInjector::create_instance_with`] are injectors. Factories receive a
/// `&dyn Injector` and pull their dependencies from it.
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    /// Resolves the object most recently registered under `alias`.
    fn dyn_get(&self, alias: &str) -> Result<Box<dyn Managed>, InjectorError>;

    /// Resolves every object registered under `alias`, in registration order.
    fn dyn_get_all(&self, alias: &str) -> Result<Vec<Box<dyn Managed>>, InjectorError>;

    /// Returns true if at least one object is registered under `alias`.
    fn has(&self, alias: &str) -> bool;
}

pub trait TypedInjector: Injector {
    /// Resolves the object registered under `alias` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is registered under `alias`, the
    /// resolution runs into a cycle, a factory fails or the object is not a
    /// `T`.
    fn get<T>(&self, alias: &str) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        let boxed = self.dyn_get(alias)?;
        downcast_object(alias, boxed)
    }

    /// Resolves every object registered under `alias` as a `T`.
    ///
    /// # Errors
    ///
    /// Same as [`TypedInjector::get`], for any of the matching objects.
    fn get_all<T>(&self, alias: &str) -> Result<Vec<T>, InjectorError>
    where
        T: Managed,
    {
        self.dyn_get_all(alias)?
            .into_iter()
            .map(|boxed| downcast_object(alias, boxed))
            .collect()
    }

    /// Constructs an object from `provider` without registering it. The
    /// provider pulls its dependencies from `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails.
    fn create_instance<P>(&self, provider: P) -> Result<P::Output, InjectorError>
    where
        P: TypedProvider,
    {
        provider.provide(self)
    }

    /// Constructs an object from `provider`, resolving its dependencies from
    /// `extras` first and from `self` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails.
    fn create_instance_with<P>(&self, provider: P, extras: Extras) -> Result<P::Output, InjectorError>
    where
        P: TypedProvider,
    {
        let injector = ExtendedInjector::new(self.upcast_dyn(), extras);
        provider.provide(&injector)
    }

    fn upcast_dyn(&self) -> &dyn Injector;
}

impl<T> TypedInjector for T
where
    T: Injector,
{
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

impl TypedInjector for dyn Injector + '_ {
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

fn downcast_object<T>(alias: &str, boxed: Box<dyn Managed>) -> Result<T, InjectorError>
where
    T: Managed,
{
    match boxed.downcast::<T>() {
        Ok(object) => Ok(*object),
        Err(boxed) => Err(InjectorError::TypeMismatch {
            alias: alias.to_owned(),
            expected: any::type_name::<T>(),
            found: (*boxed).type_name(),
        }),
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("alias \"{alias}\" is not registered"))]
    #[non_exhaustive]
    NotRegistered { alias: String },
    #[snafu(display("{source}"), context(false))]
    #[non_exhaustive]
    CircularDependency { source: CircularDependencyError },
    #[snafu(display("the object registered as \"{alias}\" is a {found}, not a {expected}"))]
    #[non_exhaustive]
    TypeMismatch {
        alias: String,
        expected: &'static str,
        found: &'static str,
    },
    #[snafu(display("could not construct the object"))]
    #[non_exhaustive]
    ObjectConstruction { source: Arc<dyn Error + Send + Sync> },
}

impl InjectorError {
    /// Wraps an error raised by a factory after its dependencies have been
    /// resolved.
    pub fn construction<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::ObjectConstruction {
            source: Arc::from(err.into()),
        }
    }

    /// Returns the alias stack if this error is a circular dependency.
    pub fn cycle(&self) -> Option<&[String]> {
        if let Self::CircularDependency { source } = self {
            Some(source.stack())
        } else {
            None
        }
    }
}

impl Clone for InjectorError {
    fn clone(&self) -> Self {
        match self {
            Self::NotRegistered { alias } => Self::NotRegistered {
                alias: alias.clone(),
            },
            Self::CircularDependency { source } => Self::CircularDependency {
                source: source.clone(),
            },
            Self::TypeMismatch {
                alias,
                expected,
                found,
            } => Self::TypeMismatch {
                alias: alias.clone(),
                expected,
                found,
            },
            Self::ObjectConstruction { source } => Self::ObjectConstruction {
                source: Arc::clone(source),
            },
        }
    }
}

/// An alias was requested again while it was still being resolved.
///
/// The stack holds every alias on the resolution path, ending with the one
/// that closed the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("circular dependency detected: {}", stack.join(".")))]
pub struct CircularDependencyError {
    stack: Vec<String>,
}

impl CircularDependencyError {
    pub fn new(stack: Vec<String>) -> Self {
        Self { stack }
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn typed_injector_get_succeeds() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .withf(|alias| alias == "answer")
            .returning(|_| Ok(Box::new(42i32)));

        assert_eq!(injector.get::<i32>("answer").unwrap(), 42);
    }

    #[test]
    fn typed_injector_get_fails_when_type_mismatches() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .returning(|_| Ok(Box::new(String::from("text"))));

        let err = injector.get::<Arc<i32>>("answer").unwrap_err();
        assert!(matches!(
            err,
            InjectorError::TypeMismatch { ref alias, .. } if alias == "answer"
        ));
    }

    #[test]
    fn typed_injector_get_all_succeeds() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get_all()
            .returning(|_| Ok(vec![Box::new(1u8) as Box<dyn Managed>, Box::new(2u8)]));

        assert_eq!(injector.get_all::<u8>("numbers").unwrap(), vec![1, 2]);
    }

    #[test]
    fn typed_injector_get_propagates_not_registered() {
        let mut injector = MockInjector::new();
        injector.expect_dyn_get().returning(|alias| {
            Err(InjectorError::NotRegistered {
                alias: alias.to_owned(),
            })
        });

        let err = injector.get::<u8>("missing").unwrap_err();
        assert_eq!(err.to_string(), "alias \"missing\" is not registered");
    }

    #[test]
    fn circular_dependency_error_display_joins_stack() {
        let err = CircularDependencyError::new(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "circular dependency detected: a.b.a");

        let err = InjectorError::from(err);
        assert_eq!(err.to_string(), "circular dependency detected: a.b.a");
        assert_eq!(err.cycle().map(<[String]>::len), Some(3));
    }
}
