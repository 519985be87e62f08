use std::any::{self, Any};
use std::ops::Deref;

pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

pub trait DowncastRef {
    fn is<T: Any>(&self) -> bool;

    fn downcast_ref<T: Any>(&self) -> Option<&T>;
}

impl<S> DowncastRef for S
where
    S: Deref<Target: AsAny>,
{
    #[inline]
    fn is<T: Any>(&self) -> bool {
        (**self).as_any().is::<T>()
    }

    #[inline]
    fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (**self).as_any().downcast_ref::<T>()
    }
}

pub trait Downcast: DowncastRef + Sized {
    type Output<T>;

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self>;
}

impl<S> Downcast for Box<S>
where
    S: AsAny + ?Sized,
{
    type Output<T> = Box<T>;

    fn downcast<T: Any>(self) -> Result<Self::Output<T>, Self> {
        if self.is::<T>() {
            let res = self
                .into_any()
                .downcast::<T>()
                .unwrap_or_else(|_| std::unreachable!("`self` should be `Box<T>`"));
            Ok(res)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Trait: AsAny + Send + Sync {}

    impl Trait for i32 {}

    #[test]
    fn downcast_ref_succeeds_when_type_matches() {
        let x: Box<dyn Trait> = Box::new(7i32);

        assert!(x.is::<i32>());
        assert_eq!(x.downcast_ref::<i32>(), Some(&7));
        assert_eq!(x.downcast_ref::<u8>(), None);
    }

    #[test]
    fn downcast_returns_original_box_when_type_differs() {
        let x: Box<dyn Trait> = Box::new(1i32);

        let x = x.downcast::<String>().unwrap_err();
        assert_eq!((*x).type_name(), "i32");

        let y = x.downcast::<i32>().unwrap_or(Box::new(0));
        assert_eq!(*y, 1);
    }
}
