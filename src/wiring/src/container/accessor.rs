use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::{Injector, InjectorError, TypedInjector};
use crate::container::Managed;

/// A read-only view of one registered alias. Reading it resolves the alias
/// through the owning container.
#[derive(Clone, Copy)]
pub struct AliasAccessor<'a> {
    alias: &'a str,
    injector: &'a dyn Injector,
}

impl<'a> AliasAccessor<'a> {
    pub(crate) fn new(alias: &'a str, injector: &'a dyn Injector) -> Self {
        Self { alias, injector }
    }

    pub fn alias(&self) -> &'a str {
        self.alias
    }

    /// Resolves the alias, exactly like `get` on the owning container.
    ///
    /// # Errors
    ///
    /// Returns whatever error the resolution produces.
    pub fn get<T>(&self) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.injector.get(self.alias)
    }
}

impl Debug for AliasAccessor<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("AliasAccessor").field(&self.alias).finish()
    }
}

/// Every alias of a container, enumerable in registration order.
#[derive(Clone)]
pub struct AliasAccessors<'a> {
    aliases: Vec<&'a str>,
    injector: &'a dyn Injector,
}

impl<'a> AliasAccessors<'a> {
    pub(crate) fn new(aliases: Vec<&'a str>, injector: &'a dyn Injector) -> Self {
        Self { aliases, injector }
    }

    pub fn get(&self, alias: &str) -> Option<AliasAccessor<'a>> {
        self.aliases
            .iter()
            .copied()
            .find(|own| *own == alias)
            .map(|own| AliasAccessor::new(own, self.injector))
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.iter().any(|own| *own == alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AliasAccessor<'a>> + '_ {
        self.aliases
            .iter()
            .copied()
            .map(|alias| AliasAccessor::new(alias, self.injector))
    }
}

impl Debug for AliasAccessors<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(&self.aliases).finish()
    }
}
