mod builder;
mod instance_map;
mod type_config;

use std::error::Error;

use snafu::prelude::*;

use crate::container::injector::InjectorError;
use crate::container::Container;

pub use builder::{BuilderOptions, ContainerBuilder};
pub use instance_map::{InstanceMap, SingletonStore};
pub use type_config::{TypeConfig, TypeConfigId, RESERVED_ALIASES};

/// A builder from which containers are created.
///
/// [`ContainerBuilder`] is the plain implementation. Applications that want
/// their own registration helpers wrap a [`ContainerBuilder`] in their own
/// type and implement [`Registry`] for it. A container created from such a
/// registry hands out builders of the same type through
/// [`Container::builder`], so the helpers remain available in derived
/// containers.
pub trait Registry: Sized + 'static {
    /// Wraps a builder seeded from a parent container.
    fn from_builder(builder: ContainerBuilder) -> Self;

    fn as_builder(&self) -> &ContainerBuilder;

    fn as_builder_mut(&mut self) -> &mut ContainerBuilder;

    /// Creates a container from the types registered so far. The registry
    /// can still be used afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if constructing any type without an alias fails,
    /// since those are constructed immediately.
    fn container(&self) -> Result<Container<Self>, InjectorError> {
        Container::from_registry(self)
    }
}

impl Registry for ContainerBuilder {
    fn from_builder(builder: ContainerBuilder) -> Self {
        builder
    }

    fn as_builder(&self) -> &ContainerBuilder {
        self
    }

    fn as_builder_mut(&mut self) -> &mut ContainerBuilder {
        self
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("an alias must be a non-empty string"))]
    EmptyAlias,
    #[snafu(display("alias \"{alias}\" is already registered for the type"))]
    #[non_exhaustive]
    AliasDuplicated { alias: String },
    #[snafu(display("alias \"{alias}\" conflicts with a container method"))]
    #[non_exhaustive]
    ReservedAlias { alias: String },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
}
