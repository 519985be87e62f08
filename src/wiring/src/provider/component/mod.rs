mod wrapper;

use std::error::Error;

use crate::container::injector::{InjectorError, TypedInjector};
use crate::container::{Managed, SharedManaged};

pub use wrapper::ComponentProvider;

/// A type that has a dedicated constructor for dependency injection.
///
/// Usually, you don't need to implement the [`Component`] trait manually for
/// your components, because the [`component`] macro helps with this. In case
/// that you really want to write implementation in your own, take a look at
/// the following code snippet:
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use wiring::container::injector::{TypedInjector, InjectorError};
/// # use wiring::provider::component::Component;
/// #
/// trait Greeter: Send + Sync + 'static {}
///
/// struct EnglishGreeter {
///     name: Arc<String>,
///     punctuation: char,
/// }
///
/// impl Greeter for EnglishGreeter {}
///
/// impl Component for EnglishGreeter {
///     type Constructed = Arc<dyn Greeter>;
///
///     type Error = Infallible;
///
///     fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
///     where
///         I: TypedInjector + ?Sized
///     {
///         let name = injector.get("name")?;
///         let punctuation = injector.get("punctuation")?;
///         Ok(Ok(Self { name, punctuation }))
///     }
///
///     fn post_process(self) -> Self::Constructed {
///         Arc::new(self)
///     }
/// }
/// ```
///
/// Register a component with [`provider::component`], or create one on the
/// spot with [`TypedInjector::create_instance`].
///
/// [`component`]: crate::component
/// [`provider::component`]: crate::provider::component()
pub trait Component: Managed + Sized {
    /// The successfully constructed object. This is usually some shared
    /// form of `Self`, such as `Arc<Self>` and `Arc<dyn Trait>`.
    type Constructed: SharedManaged;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Retrieves the dependencies from the injector and creates the object.
    ///
    /// # Errors
    ///
    /// Returns an error if all dependencies can't be fetched.
    ///
    /// Returns an inner error [`Component::Error`] wrapped in the outer [`Ok`]
    /// if the object construction fails.
    fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
    where
        I: TypedInjector + ?Sized;

    /// Converts `self` to [`Component::Constructed`]. Typical usages are
    /// putting `self` to an [`Arc`] and coercing it to an `Arc<dyn Trait>`.
    ///
    /// [`Arc`]: std::sync::Arc
    fn post_process(self) -> Self::Constructed;
}
