use std::any;
use std::error::Error;

use crate::container::registry::{ContainerBuilder, RegistryError};

/// A reusable group of registrations.
///
/// # Examples
///
/// ```rust
/// # use std::error::Error;
/// # use std::sync::Arc;
/// # use wiring::prelude::*;
/// struct StorageModule {
///     path: &'static str,
/// }
///
/// impl Module for StorageModule {
///     fn configure(
///         &self,
///         builder: &mut ContainerBuilder,
///     ) -> Result<(), Box<dyn Error + Send + Sync>> {
///         builder.register_instance(Arc::new(String::from(self.path)), "path")?;
///         Ok(())
///     }
/// }
///
/// let mut builder = ContainerBuilder::new();
/// builder.install(StorageModule { path: "/tmp/db" })?;
///
/// let path: Arc<String> = builder.container()?.get("path")?;
/// assert_eq!(*path, "/tmp/db");
/// # Ok::<(), Box<dyn Error>>(())
/// ```
pub trait Module: 'static {
    fn configure(&self, builder: &mut ContainerBuilder) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// The name reported when the module fails.
    fn name(&self) -> &'static str {
        any::type_name::<Self>()
    }
}

/// Names `module` as the failing module, unless `source` already names one.
pub(crate) fn failed_module(
    module: &'static str,
    source: Box<dyn Error + Send + Sync>,
) -> RegistryError {
    match source.downcast::<RegistryError>() {
        Ok(err) if matches!(*err, RegistryError::ModuleInner { .. }) => *err,
        Ok(err) => RegistryError::ModuleInner {
            module,
            source: err,
        },
        Err(source) => RegistryError::ModuleInner { module, source },
    }
}

/// Modules installed one after another, in the order they were added.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Configuration {
    fn configure(&self, builder: &mut ContainerBuilder) -> Result<(), Box<dyn Error + Send + Sync>> {
        for module in &self.modules {
            module
                .configure(builder)
                .map_err(|source| failed_module(module.name(), source))?;
        }
        Ok(())
    }
}
