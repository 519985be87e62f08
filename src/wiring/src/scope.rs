use std::fmt::{Display, Formatter, Result as FmtResult};

/// How long an object produced by one registration is reused.
///
/// Variants are ordered by how long the object outlives a single resolution:
/// a [`Lifetime::SingleInstance`] object outlives every container of a tree,
/// a [`Lifetime::PerContainer`] object lives as long as the container which
/// constructed it, and a [`Lifetime::PerDependency`] object is never reused.
///
/// Note that the lifetime only controls caching inside containers. A cached
/// object can still be held by dependents after its container is dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lifetime {
    /// A new object is constructed on every resolution.
    PerDependency = 1,
    /// One object per container. Derived containers construct their own.
    #[default]
    PerContainer = 2,
    /// One object per container tree, shared by a container and every
    /// container derived from it.
    SingleInstance = 3,
}

impl Lifetime {
    /// Returns true if `self` lives at least as long as `other`.
    pub fn outlive(self, other: Self) -> bool {
        self >= other
    }

    /// Returns true if objects of this lifetime are cached at all.
    pub fn is_cached(self) -> bool {
        self.outlive(Self::PerContainer)
    }

    /// Returns the name of the lifetime in a string literal.
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::PerDependency => "PerDependency",
            Self::PerContainer => "PerContainer",
            Self::SingleInstance => "SingleInstance",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}
