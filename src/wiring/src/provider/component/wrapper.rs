use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{InjectorError, TypedInjector};
use crate::provider::component::Component;
use crate::provider::TypedProvider;

pub struct ComponentProvider<C>
where
    C: Component,
{
    _marker: PhantomData<fn() -> C>,
}

impl<C> ComponentProvider<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Debug for ComponentProvider<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentProvider<C>")
            .finish_non_exhaustive()
    }
}

impl<C> TypedProvider for ComponentProvider<C>
where
    C: Component,
{
    type Output = C::Constructed;

    fn provide<I>(&self, injector: &I) -> Result<Self::Output, InjectorError>
    where
        I: TypedInjector + ?Sized,
    {
        match C::construct(injector) {
            Ok(Ok(obj)) => Ok(obj.post_process()),
            Ok(Err(err)) => Err(InjectorError::construction(err)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::injector::MockInjector;

    use super::*;

    struct Pair {
        left: u8,
        right: u8,
    }

    impl Component for Pair {
        type Constructed = Arc<Self>;

        type Error = String;

        fn construct<I>(injector: &I) -> Result<Result<Self, Self::Error>, InjectorError>
        where
            I: TypedInjector + ?Sized,
        {
            let left = injector.get("left")?;
            let right = injector.get("right")?;
            if left > right {
                Ok(Err(format!("{left} > {right}")))
            } else {
                Ok(Ok(Self { left, right }))
            }
        }

        fn post_process(self) -> Self::Constructed {
            Arc::new(self)
        }
    }

    #[test]
    fn component_provider_succeeds() {
        let mut injector = MockInjector::new();
        injector.expect_dyn_get().returning(|alias| match alias {
            "left" => Ok(Box::new(1u8)),
            _ => Ok(Box::new(2u8)),
        });

        let pair = ComponentProvider::<Pair>::new().provide(&injector).unwrap();
        assert_eq!((pair.left, pair.right), (1, 2));
    }

    #[test]
    fn component_provider_wraps_construction_error() {
        let mut injector = MockInjector::new();
        injector.expect_dyn_get().returning(|alias| match alias {
            "left" => Ok(Box::new(3u8)),
            _ => Ok(Box::new(2u8)),
        });

        let err = ComponentProvider::<Pair>::new()
            .provide(&injector)
            .err()
            .unwrap();
        assert!(matches!(err, InjectorError::ObjectConstruction { .. }));
    }

    #[test]
    fn component_provider_propagates_missing_dependency() {
        let mut injector = MockInjector::new();
        injector.expect_dyn_get().returning(|alias| {
            Err(InjectorError::NotRegistered {
                alias: alias.to_owned(),
            })
        });

        let err = ComponentProvider::<Pair>::new()
            .provide(&injector)
            .err()
            .unwrap();
        assert!(matches!(err, InjectorError::NotRegistered { .. }));
    }
}
