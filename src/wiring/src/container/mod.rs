pub mod accessor;
pub mod injector;
pub mod registry;

mod core;
mod handle;
mod trace;

use crate::util::any::AsAny;

pub use handle::Container;

/// Any object that can be constructed and handed out by a container.
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

/// A [`Managed`] object that a container is able to cache and hand out more
/// than once.
///
/// Every `Clone` object is shareable. Objects whose identity matters should be
/// registered behind an [`Arc`], so that each clone points to the same value.
///
/// [`Arc`]: std::sync::Arc
pub trait SharedManaged: Managed {
    fn dyn_clone(&self) -> Box<dyn SharedManaged>;

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed>;
}

impl<T> SharedManaged for T
where
    T: Managed + Clone,
{
    fn dyn_clone(&self) -> Box<dyn SharedManaged> {
        Box::new(self.clone())
    }

    fn upcast_managed(self: Box<Self>) -> Box<dyn Managed> {
        self
    }
}
