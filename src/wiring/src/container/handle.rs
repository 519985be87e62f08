use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::accessor::{AliasAccessor, AliasAccessors};
use crate::container::core::ContainerCore;
use crate::container::injector::{Injector, InjectorError};
use crate::container::registry::{
    BuilderOptions, ContainerBuilder, Registry, SingletonStore, TypeConfig,
};
use crate::container::Managed;

/// Resolves registered aliases to objects.
///
/// A [`Container`] is created by [`Registry::container`] and never changes
/// its registrations afterwards. Cloning a container yields another handle to
/// the same container, sharing all cached objects.
///
/// `R` is the registry type the container was created from. It is also the
/// type handed out by [`Container::builder`].
pub struct Container<R: Registry = ContainerBuilder> {
    core: Arc<ContainerCore>,
    _registry: PhantomData<fn() -> R>,
}

impl<R: Registry> Container<R> {
    pub(crate) fn from_registry(registry: &R) -> Result<Self, InjectorError> {
        let builder = registry.as_builder();
        let core = ContainerCore::new(builder.snapshot(), builder.singletons().clone())?;
        tracing::debug!(types = builder.types().len(), "container created");

        Ok(Self {
            core: Arc::new(core),
            _registry: PhantomData,
        })
    }

    /// Derives a builder for a child container.
    ///
    /// The builder starts with every aliased registration of this container
    /// and shares its single-instance objects. Types without an alias are not
    /// carried over, and per-container objects stay with this container.
    pub fn builder(&self) -> R {
        let types: Vec<TypeConfig> = self
            .core
            .types()
            .iter()
            .filter(|config| !config.is_anonymous())
            .cloned()
            .collect();
        tracing::debug!(types = types.len(), "derived builder created");

        R::from_builder(ContainerBuilder::with_options(BuilderOptions {
            types,
            singletons: self.core.singletons().clone(),
        }))
    }

    /// Returns a read-only accessor for `alias`, if it is registered.
    pub fn accessor(&self, alias: &str) -> Option<AliasAccessor<'_>> {
        self.core
            .aliases()
            .into_iter()
            .find(|own| *own == alias)
            .map(|own| AliasAccessor::new(own, self))
    }

    pub fn accessors(&self) -> AliasAccessors<'_> {
        AliasAccessors::new(self.core.aliases(), self)
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.core.aliases()
    }

    pub fn singletons(&self) -> &SingletonStore {
        self.core.singletons()
    }
}

impl<R: Registry> Clone for Container<R> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            _registry: PhantomData,
        }
    }
}

impl<R: Registry> Debug for Container<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Container")
            .field("aliases", &self.core.aliases())
            .field("singletons", self.core.singletons())
            .finish_non_exhaustive()
    }
}

impl<R: Registry> Injector for Container<R> {
    fn dyn_get(&self, alias: &str) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get(alias)
    }

    fn dyn_get_all(&self, alias: &str) -> Result<Vec<Box<dyn Managed>>, InjectorError> {
        self.core.dyn_get_all(alias)
    }

    fn has(&self, alias: &str) -> bool {
        self.core.has(alias)
    }
}
