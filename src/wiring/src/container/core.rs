use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::registry::{InstanceMap, SingletonStore, TypeConfig};
use crate::container::trace::DependencyTraces;
use crate::container::{Managed, SharedManaged};
use crate::logger::{Logger, LOGGER_ALIAS};
use crate::scope::Lifetime;

pub struct ContainerCore {
    types: Arc<[TypeConfig]>,
    instances: Mutex<InstanceMap>,
    singletons: SingletonStore,
    traces: DependencyTraces,
}

impl ContainerCore {
    /// Creates a core and constructs every type registered without an alias.
    pub fn new(types: Arc<[TypeConfig]>, singletons: SingletonStore) -> Result<Self, InjectorError> {
        let core = Self {
            types,
            instances: Mutex::new(InstanceMap::new()),
            singletons,
            traces: DependencyTraces::new(),
        };
        core.construct_anonymous_objects()?;
        Ok(core)
    }

    pub fn types(&self) -> &[TypeConfig] {
        &self.types
    }

    pub fn singletons(&self) -> &SingletonStore {
        &self.singletons
    }

    /// Registered aliases without duplicates, in registration order.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = Vec::new();
        for alias in self.types.iter().flat_map(TypeConfig::aliases) {
            if !aliases.contains(&alias.as_str()) {
                aliases.push(alias);
            }
        }
        aliases
    }

    fn construct_anonymous_objects(&self) -> Result<(), InjectorError> {
        for config in self.types.iter().filter(|config| config.is_anonymous()) {
            tracing::debug!(
                id = %config.id(),
                output = config.output(),
                "constructing type without alias"
            );
            self.get_object_by_entry(config, None)?;
        }
        Ok(())
    }

    fn find_entry(&self, alias: &str) -> Result<&TypeConfig, InjectorError> {
        // The last registration wins.
        self.types
            .iter()
            .rev()
            .find(|config| config.matches(alias))
            .ok_or_else(|| InjectorError::NotRegistered {
                alias: alias.to_owned(),
            })
    }

    fn get_object_by_entry(
        &self,
        config: &TypeConfig,
        tracked: Option<&str>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        if let Some(object) = self.try_get_constructed_object(config) {
            return Ok(object);
        }

        match tracked {
            Some(alias) => {
                let (object, path) = self.construct_tracked_object(config, alias)?;
                let object = self.store_object(config, object);
                self.notify_logger(alias, &path)?;
                Ok(object)
            }
            None => {
                let object = config.provider().dyn_provide(self)?;
                Ok(self.store_object(config, object))
            }
        }
    }

    fn try_get_constructed_object(&self, config: &TypeConfig) -> Option<Box<dyn Managed>> {
        let id = config.id();
        self.singletons
            .get(id)
            .or_else(|| self.instances.lock().get(id))
    }

    fn construct_tracked_object(
        &self,
        config: &TypeConfig,
        alias: &str,
    ) -> Result<(Box<dyn SharedManaged>, String), InjectorError> {
        let _guard = self.traces.enter(alias)?;
        let object = config.provider().dyn_provide(self)?;

        let path = self.traces.path();
        tracing::trace!(%path, lifetime = %config.lifetime(), "instance created");
        Ok((object, path))
    }

    fn notify_logger(&self, alias: &str, path: &str) -> Result<(), InjectorError> {
        if alias == LOGGER_ALIAS || !self.has(LOGGER_ALIAS) || self.traces.contains(LOGGER_ALIAS) {
            return Ok(());
        }

        let logger: Arc<dyn Logger> = self.get(LOGGER_ALIAS)?;
        logger.log(Level::TRACE, &format!("{path} instance created"));
        Ok(())
    }

    fn store_object(&self, config: &TypeConfig, object: Box<dyn SharedManaged>) -> Box<dyn Managed> {
        match config.lifetime() {
            Lifetime::SingleInstance => self.singletons.store(config.id(), object),
            Lifetime::PerContainer => self.instances.lock().store(config.id(), object),
            Lifetime::PerDependency => object.upcast_managed(),
        }
    }
}

impl Injector for ContainerCore {
    fn dyn_get(&self, alias: &str) -> Result<Box<dyn Managed>, InjectorError> {
        let config = self.find_entry(alias)?;
        self.get_object_by_entry(config, Some(alias))
    }

    fn dyn_get_all(&self, alias: &str) -> Result<Vec<Box<dyn Managed>>, InjectorError> {
        let configs: Vec<&TypeConfig> = self
            .types
            .iter()
            .filter(|config| config.matches(alias))
            .collect();

        if configs.is_empty() {
            return Err(InjectorError::NotRegistered {
                alias: alias.to_owned(),
            });
        }

        configs
            .into_iter()
            .map(|config| self.get_object_by_entry(config, None))
            .collect()
    }

    fn has(&self, alias: &str) -> bool {
        self.types.iter().any(|config| config.matches(alias))
    }
}
