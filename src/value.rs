use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::Type;

// -----------------------------------------------------------------------------
// AnyValue

/// The erased value representation every accessor trades in.
///
/// `AnyValue` is implemented for every `'static` type that is [`Send`] and
/// [`Sync`], so arbitrary member values can cross the erased calling shapes
/// without a derive or registration step. On top of [`Any`] it lets erased
/// values self-report their identity for diagnostics.
///
/// # Type Identification
///
/// While `AnyValue` supports [`Any`], note that calling [`ty_id`] on a
/// `Box<dyn AnyValue>` without dereferencing reports the container, not the
/// inner value. Use `is`, `ty` or dereference first:
///
/// ```rust
/// use fieldbind::{AnyValue, BoxedValue};
/// use core::any::TypeId;
///
/// let x: BoxedValue = 32_i32.into_boxed_value();
///
/// assert!(x.ty_id() != TypeId::of::<i32>());    // Container type ID
/// assert!((*x).ty_id() == TypeId::of::<i32>()); // Dereferenced works
/// assert!(x.is::<i32>());                       // Preferred method
/// ```
///
/// # Concrete Access
///
/// Use `downcast_ref`, `downcast_mut`, `downcast` and `take` on
/// `dyn AnyValue` to recover the concrete type:
///
/// ```rust
/// use fieldbind::{AnyValue, BoxedValue};
///
/// let x: BoxedValue = 10_i32.into_boxed_value();
/// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
/// assert_eq!(x.take::<i32>().ok(), Some(10));
/// ```
///
/// [`ty_id`]: AnyValue::ty_id
pub trait AnyValue: Any + Send + Sync {
    /// Casts this value to an erased value reference.
    ///
    /// # Example
    ///
    /// ```
    /// use fieldbind::AnyValue;
    ///
    /// let x = 32;
    /// let v: &dyn AnyValue = x.as_any_value();
    /// // Equal to this:
    /// // let v: &dyn AnyValue = &x;
    /// ```
    #[inline(always)]
    fn as_any_value(&self) -> &dyn AnyValue
    where
        Self: Sized,
    {
        self
    }

    /// Casts this value to a mutable erased value reference.
    #[inline(always)]
    fn as_any_value_mut(&mut self) -> &mut dyn AnyValue
    where
        Self: Sized,
    {
        self
    }

    /// Casts this boxed value to an erased boxed value.
    #[inline(always)]
    fn into_any_value(self: Box<Self>) -> BoxedValue
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value into an erased boxed value.
    ///
    /// # Example
    ///
    /// ```
    /// use fieldbind::AnyValue;
    ///
    /// let v = 32.into_boxed_value();
    /// // Equal to this:
    /// // let v = Box::new(32) as fieldbind::BoxedValue;
    /// ```
    #[inline(always)]
    fn into_boxed_value(self) -> BoxedValue
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// When called on a `Box<dyn AnyValue>` without dereferencing, this
    /// reports the [`TypeId`] of the entire container instead. Prefer
    /// `is` or `ty` on the dereferenced trait object.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the compiler-reported name of the underlying type.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl<T: Any + Send + Sync> AnyValue for T {}

// -----------------------------------------------------------------------------
// Trait object methods

impl dyn AnyValue {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// let x: BoxedValue = 10_i32.into_boxed_value();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Returns the [`Type`] of the underlying value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// use fieldbind::info::Type;
    ///
    /// let x: BoxedValue = 10_i32.into_boxed_value();
    /// assert_eq!(x.ty(), Type::of::<i32>());
    /// ```
    #[inline]
    pub fn ty(&self) -> Type {
        Type::from_parts(self.ty_id(), self.type_name())
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// let x: BoxedValue = 10_i32.into_boxed_value();
    ///
    /// let y = x.downcast_ref::<i32>().unwrap();
    /// assert_eq!(*y, 10);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// let mut x: BoxedValue = 10_i32.into_boxed_value();
    ///
    /// let y = x.downcast_mut::<i32>().unwrap();
    /// *y += 2;
    ///
    /// assert_eq!(*y, 12);
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// let x: BoxedValue = 10_i32.into_boxed_value();
    ///
    /// let x: Box<i32> = x.downcast::<i32>().unwrap();
    /// assert_eq!(*x, 10);
    /// ```
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn AnyValue>) -> Result<Box<T>, Box<dyn AnyValue>> {
        if self.is::<T>() {
            // TODO: replace to `downcast_uncheck` when it's stable,
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fieldbind::{AnyValue, BoxedValue};
    /// let x: BoxedValue = 10_i32.into_boxed_value();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn AnyValue>) -> Result<T, Box<dyn AnyValue>> {
        if self.is::<T>() {
            // TODO: replace to `downcast_uncheck` when it's stable,
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { *<Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyValue({})", self.type_name())
    }
}

// -----------------------------------------------------------------------------
// Aliases

/// An owned, erased member value.
pub type BoxedValue = Box<dyn AnyValue>;

/// An owned, erased failure raised by a raw accessor.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn downcast_roundtrip() {
        let mut value: BoxedValue = String::from("hello").into_boxed_value();

        assert!(value.is::<String>());
        assert!(!value.is::<i32>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hello"));

        value.downcast_mut::<String>().unwrap().push('!');
        assert_eq!(value.take::<String>().unwrap(), "hello!");
    }

    #[test]
    fn take_wrong_type_returns_original() {
        let value: BoxedValue = 7_u16.into_boxed_value();

        let value = value.take::<i64>().unwrap_err();
        assert_eq!(value.take::<u16>().unwrap(), 7);
    }

    #[test]
    fn boxed_ty_id_reports_container() {
        let value: BoxedValue = 3_i32.into_boxed_value();

        // The unqualified call resolves to the box itself.
        assert_ne!(value.ty_id(), TypeId::of::<i32>());
        assert_eq!((*value).ty_id(), TypeId::of::<i32>());
        assert!(value.is::<i32>());
    }

    #[test]
    fn erased_type_reporting() {
        let value: BoxedValue = 3_i32.into_boxed_value();

        assert_eq!(value.ty(), Type::of::<i32>());
        assert_eq!((*value).type_name(), "i32");
    }
}
