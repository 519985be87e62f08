use std::sync::Arc;

use crate::container::registry::{RegistryError, SingletonStore, TypeConfig};
use crate::container::Managed;
use crate::module::{failed_module, Module};
use crate::provider::{self, TypedProvider};

/// Initial state of a [`ContainerBuilder`].
#[derive(Debug, Default)]
pub struct BuilderOptions {
    /// Types registered before any other.
    pub types: Vec<TypeConfig>,
    /// The singleton store of the container tree the builder belongs to.
    pub singletons: SingletonStore,
}

/// Accumulates type registrations and produces containers from them.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use wiring::prelude::*;
/// struct Config {
///     name: &'static str,
/// }
///
/// let mut builder = ContainerBuilder::new();
/// builder
///     .register_as(factory(|_| Ok(Arc::new(Config { name: "app" }))), "config")?
///     .as_single_instance();
///
/// let container = builder.container()?;
/// let config: Arc<Config> = container.get("config")?;
/// assert_eq!(config.name, "app");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    types: Vec<TypeConfig>,
    singletons: SingletonStore,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            types: options.types,
            singletons: options.singletons,
        }
    }

    /// Registers a provider and returns its configuration for further
    /// setup. A type without any alias is constructed as soon as a container
    /// is created.
    pub fn register<P>(&mut self, provider: P) -> &mut TypeConfig
    where
        P: TypedProvider,
    {
        self.push(TypeConfig::new(provider))
    }

    /// Registers a provider and exposes its object under `alias`.
    ///
    /// # Errors
    ///
    /// Returns an error if `alias` is invalid. Nothing is registered then.
    pub fn register_as<P>(
        &mut self,
        provider: P,
        alias: impl Into<String>,
    ) -> Result<&mut TypeConfig, RegistryError>
    where
        P: TypedProvider,
    {
        let mut config = TypeConfig::new(provider);
        config.as_alias(alias)?;
        Ok(self.push(config))
    }

    /// Registers a ready-made object under `alias`. The object is shared by
    /// the whole container tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `alias` is invalid. Nothing is registered then.
    pub fn register_instance<T>(
        &mut self,
        instance: T,
        alias: impl Into<String>,
    ) -> Result<&mut TypeConfig, RegistryError>
    where
        T: Managed + Clone,
    {
        let mut config = TypeConfig::new(provider::instance(instance));
        config.as_alias(alias)?.as_single_instance();
        Ok(self.push(config))
    }

    /// Lets `module` register its types.
    ///
    /// # Errors
    ///
    /// Returns an error wrapping whatever the module reports. An error
    /// already naming a failing module is passed on unchanged.
    pub fn install<M>(&mut self, module: M) -> Result<&mut Self, RegistryError>
    where
        M: Module,
    {
        match module.configure(self) {
            Ok(()) => Ok(self),
            Err(source) => Err(failed_module(module.name(), source)),
        }
    }

    pub fn types(&self) -> &[TypeConfig] {
        &self.types
    }

    pub fn singletons(&self) -> &SingletonStore {
        &self.singletons
    }

    pub(crate) fn snapshot(&self) -> Arc<[TypeConfig]> {
        Arc::from(self.types.as_slice())
    }

    fn push(&mut self, config: TypeConfig) -> &mut TypeConfig {
        let index = self.types.len();
        self.types.push(config);
        &mut self.types[index]
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::container::registry::Registry;
    use crate::provider::factory;
    use crate::scope::Lifetime;

    use super::*;

    #[test]
    fn container_builder_register_succeeds() {
        let mut builder = ContainerBuilder::new();
        builder.register(factory(|_| Ok(1u8)));
        builder
            .register_as(factory(|_| Ok(2u8)), "two")
            .unwrap()
            .as_instance_per_dependency();

        let types = builder.types();
        assert_eq!(types.len(), 2);
        assert!(types[0].is_anonymous());
        assert_eq!(types[1].aliases(), ["two"]);
        assert_eq!(types[1].lifetime(), Lifetime::PerDependency);
    }

    #[test]
    fn container_builder_register_as_fails_without_registering() {
        let mut builder = ContainerBuilder::new();

        assert!(matches!(
            builder.register_as(factory(|_| Ok(1u8)), "get"),
            Err(RegistryError::ReservedAlias { .. })
        ));
        assert!(matches!(
            builder.register_as(factory(|_| Ok(1u8)), ""),
            Err(RegistryError::EmptyAlias)
        ));
        assert!(builder.types().is_empty());
    }

    #[test]
    fn container_builder_register_instance_is_single_instance() {
        let mut builder = ContainerBuilder::new();
        let config = builder.register_instance(Arc::new(3u16), "three").unwrap();

        assert_eq!(config.lifetime(), Lifetime::SingleInstance);
        assert_eq!(config.aliases(), ["three"]);
    }

    #[test]
    fn container_builder_snapshot_is_not_affected_by_later_registrations() {
        let mut builder = ContainerBuilder::new();
        builder.register_as(factory(|_| Ok(1u8)), "x").unwrap();
        let snapshot = builder.snapshot();

        builder.register_as(factory(|_| Ok(2u8)), "y").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(builder.types().len(), 2);
    }

    #[test]
    fn container_builder_install_fails_when_module_fails() {
        struct FailingModule;

        impl Module for FailingModule {
            fn configure(
                &self,
                _builder: &mut ContainerBuilder,
            ) -> Result<(), Box<dyn Error + Send + Sync>> {
                Err("whatever".into())
            }
        }

        let mut builder = ContainerBuilder::new();
        assert!(matches!(
            builder.install(FailingModule),
            Err(RegistryError::ModuleInner { .. })
        ));
    }

    #[test]
    fn container_builder_install_wraps_registry_error_once() {
        struct EmptyAlias;

        impl Module for EmptyAlias {
            fn configure(
                &self,
                builder: &mut ContainerBuilder,
            ) -> Result<(), Box<dyn Error + Send + Sync>> {
                builder.register_as(provider::instance(0u8), "")?;
                Ok(())
            }
        }

        let mut builder = ContainerBuilder::new();
        match builder.install(EmptyAlias) {
            Err(RegistryError::ModuleInner { module, source }) => {
                assert!(module.ends_with("EmptyAlias"));
                assert!(matches!(
                    source.downcast_ref::<RegistryError>(),
                    Some(RegistryError::EmptyAlias)
                ));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn container_builder_with_options_keeps_singleton_store() {
        let singletons = SingletonStore::new();
        let builder = ContainerBuilder::with_options(BuilderOptions {
            types: Vec::new(),
            singletons: singletons.clone(),
        });

        assert!(builder.singletons().is_shared_with(&singletons));
        assert!(builder.as_builder().types().is_empty());
    }
}
