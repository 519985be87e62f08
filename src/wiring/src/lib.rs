#![allow(clippy::new_without_default)]

pub mod container;
pub mod logger;
pub mod module;
pub mod provider;
pub mod scope;
mod util;

pub use wiring_derive::component;

pub mod prelude {
    pub use crate::component;
    pub use crate::container::accessor::{AliasAccessor, AliasAccessors};
    pub use crate::container::injector::{
        CircularDependencyError, Extras, Injector, InjectorError, TypedInjector,
    };
    pub use crate::container::registry::{
        BuilderOptions, ContainerBuilder, Registry, RegistryError, TypeConfig,
    };
    pub use crate::container::Container;
    pub use crate::logger::{Logger, TracingLogger, LOGGER_ALIAS};
    pub use crate::module::{Configuration, Module};
    pub use crate::provider::{factory, instance};
    pub use crate::scope::Lifetime;
}
