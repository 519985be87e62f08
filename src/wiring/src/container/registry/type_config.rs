use std::any;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::container::registry::RegistryError;
use crate::provider::{Provider, TypedProvider};
use crate::scope::Lifetime;

/// Aliases which would shadow the resolution methods of a container.
pub const RESERVED_ALIASES: &[&str] = &["get", "get_all", "create_instance", "has"];

/// Identifies one registration, even after it is copied into a derived
/// builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeConfigId(u64);

impl TypeConfigId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for TypeConfigId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// Describes how to build one type: its provider, lifetime and aliases.
///
/// A [`TypeConfig`] is created by [`ContainerBuilder::register`] and can be
/// configured fluently until the builder produces a container, which keeps a
/// frozen copy.
///
/// [`ContainerBuilder::register`]: crate::container::registry::ContainerBuilder::register
#[derive(Debug, Clone)]
pub struct TypeConfig {
    id: TypeConfigId,
    aliases: Vec<String>,
    lifetime: Lifetime,
    provider: Arc<dyn Provider>,
    output: &'static str,
}

impl TypeConfig {
    pub fn new<P>(provider: P) -> Self
    where
        P: TypedProvider,
    {
        Self {
            id: TypeConfigId::next(),
            aliases: Vec::new(),
            lifetime: Lifetime::default(),
            provider: Arc::new(provider),
            output: any::type_name::<P::Output>(),
        }
    }

    /// Exposes the constructed object under `alias`. Dependents use the alias
    /// to request the object from a container.
    ///
    /// # Errors
    ///
    /// Returns an error if `alias` is empty, already registered for this
    /// type or collides with a container method.
    pub fn as_alias(&mut self, alias: impl Into<String>) -> Result<&mut Self, RegistryError> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(RegistryError::EmptyAlias);
        }
        if self.aliases.contains(&alias) {
            return Err(RegistryError::AliasDuplicated { alias });
        }
        if RESERVED_ALIASES.contains(&alias.as_str()) {
            return Err(RegistryError::ReservedAlias { alias });
        }

        self.aliases.push(alias);
        Ok(self)
    }

    /// Constructs the object once per container tree, i.e. the current
    /// container and every container derived from it.
    pub fn as_single_instance(&mut self) -> &mut Self {
        self.lifetime = Lifetime::SingleInstance;
        self
    }

    /// Constructs a new object on every resolution.
    pub fn as_instance_per_dependency(&mut self) -> &mut Self {
        self.lifetime = Lifetime::PerDependency;
        self
    }

    /// Constructs the object once per container. This is the default.
    pub fn as_instance_per_container(&mut self) -> &mut Self {
        self.lifetime = Lifetime::PerContainer;
        self
    }

    pub fn id(&self) -> TypeConfigId {
        self.id
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The type name of the constructed object.
    pub fn output(&self) -> &'static str {
        self.output
    }

    /// Returns true if the type has no alias. Such types are constructed
    /// eagerly when a container is created.
    pub fn is_anonymous(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn matches(&self, alias: &str) -> bool {
        self.aliases.iter().any(|own| own == alias)
    }

    pub(crate) fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}
