//! Raw accessor handles, coerced once into canonical calling shapes.

use alloc::boxed::Box;
use core::fmt;

use crate::handle::shape::{
    AccessShape, InstanceGetFn, InstanceSetFn, RawCallable, StaticGetFn, StaticSetFn,
};
use crate::info::Type;
use crate::{AnyValue, BoxedError};

// -----------------------------------------------------------------------------
// HandleOrigin

/// Where a raw accessor's behavior comes from.
///
/// The origin is a diagnostic tag, carried verbatim into every capability
/// bound from the handle. It lets access policies distinguish handles that
/// reach a member directly from handles that route through owner-provided
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleOrigin {
    /// Reaches the member directly, sidestepping any policy the owner's own
    /// code would enforce.
    Bypass,
    /// Routes through code the owner supplied, such as a hand-written getter
    /// or setter.
    Manual,
}

/// Formats as `bypass` or `manual`.
impl fmt::Display for HandleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bypass => "bypass",
            Self::Manual => "manual",
        })
    }
}

// -----------------------------------------------------------------------------
// TypeMismatchError

/// A call-time disagreement between a handle's compiled-in types and the
/// erased arguments it actually received.
///
/// Raw handles are compiled against concrete owner and value types; the
/// canonical shapes erase both. When an erased argument fails to downcast,
/// the call reports this error through its ordinary error channel instead
/// of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMismatchError {
    /// The erased owner was not the type the handle was compiled against.
    Owner {
        /// The owner type the handle expects.
        expected: Type,
        /// The owner type that actually arrived.
        actual: Type,
    },
    /// The erased value was not the type the handle was compiled against.
    Value {
        /// The value type the handle expects.
        expected: Type,
        /// The value type that actually arrived.
        actual: Type,
    },
}

impl TypeMismatchError {
    /// Returns the [`Type`] the handle was compiled against.
    #[inline]
    pub const fn expected(&self) -> Type {
        match self {
            Self::Owner { expected, .. } | Self::Value { expected, .. } => *expected,
        }
    }

    /// Returns the [`Type`] that actually arrived at call time.
    #[inline]
    pub const fn actual(&self) -> Type {
        match self {
            Self::Owner { actual, .. } | Self::Value { actual, .. } => *actual,
        }
    }
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner { expected, actual } => write!(
                f,
                "expected an owner of type `{}`, found `{}`",
                expected.name(),
                actual.name(),
            ),
            Self::Value { expected, actual } => write!(
                f,
                "expected a value of type `{}`, found `{}`",
                expected.name(),
                actual.name(),
            ),
        }
    }
}

impl core::error::Error for TypeMismatchError {}

// -----------------------------------------------------------------------------
// RawAccessor

/// A type-erased accessor handle in one of the four canonical calling shapes.
///
/// Handles are compiled from plain closures over concrete owner and value
/// types. Construction performs the one and only coercion: the closure is
/// wrapped into its canonical shape, and the concrete types are recorded as
/// [`Type`] witnesses for bind-time checking. After that the handle is an
/// opaque payload; nothing about calling it can fail on shape grounds.
///
/// The `try_` constructors accept fallible closures; their errors cross the
/// erased boundary as [`BoxedError`] with the concrete error type intact.
///
/// # Examples
///
/// ```
/// use fieldbind::handle::{AccessShape, HandleOrigin, RawAccessor};
///
/// struct Probe {
///     gain: u16,
/// }
///
/// let raw = RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain);
///
/// assert_eq!(raw.shape(), AccessShape::InstanceGet);
/// assert_eq!(raw.origin(), HandleOrigin::Bypass);
/// assert!(raw.owner_ty().unwrap().is::<Probe>());
/// assert!(raw.value_ty().is::<u16>());
/// ```
pub struct RawAccessor {
    pub(crate) origin: HandleOrigin,
    pub(crate) owner: Option<Type>,
    pub(crate) value: Type,
    pub(crate) callable: RawCallable,
}

impl RawAccessor {
    /// Compiles an infallible instance getter into canonical shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldbind::handle::{HandleOrigin, RawAccessor};
    ///
    /// struct Probe {
    ///     gain: u16,
    /// }
    ///
    /// let raw = RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain);
    /// assert!(raw.owner_ty().unwrap().is::<Probe>());
    /// ```
    pub fn instance_get<O, V, F>(origin: HandleOrigin, fun: F) -> Self
    where
        O: AnyValue,
        V: AnyValue,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        let fun: InstanceGetFn = Box::new(move |owner| {
            let Some(owner) = owner.downcast_ref::<O>() else {
                return Err(owner_mismatch::<O>(owner));
            };
            Ok(fun(owner).into_boxed_value())
        });

        Self {
            origin,
            owner: Some(Type::of::<O>()),
            value: Type::of::<V>(),
            callable: RawCallable::InstanceGet(fun),
        }
    }

    /// Compiles a fallible instance getter into canonical shape.
    ///
    /// The closure's error crosses the erased boundary as [`BoxedError`];
    /// callers can still downcast it to `E`.
    pub fn try_instance_get<O, V, E, F>(origin: HandleOrigin, fun: F) -> Self
    where
        O: AnyValue,
        V: AnyValue,
        E: core::error::Error + Send + Sync + 'static,
        F: Fn(&O) -> Result<V, E> + Send + Sync + 'static,
    {
        let fun: InstanceGetFn = Box::new(move |owner| {
            let Some(owner) = owner.downcast_ref::<O>() else {
                return Err(owner_mismatch::<O>(owner));
            };
            match fun(owner) {
                Ok(value) => Ok(value.into_boxed_value()),
                Err(error) => Err(Box::new(error)),
            }
        });

        Self {
            origin,
            owner: Some(Type::of::<O>()),
            value: Type::of::<V>(),
            callable: RawCallable::InstanceGet(fun),
        }
    }

    /// Compiles an infallible instance setter into canonical shape.
    pub fn instance_set<O, V, F>(origin: HandleOrigin, fun: F) -> Self
    where
        O: AnyValue,
        V: AnyValue,
        F: Fn(&mut O, V) + Send + Sync + 'static,
    {
        let fun: InstanceSetFn = Box::new(move |owner, value| {
            let value = match value.take::<V>() {
                Ok(value) => value,
                Err(value) => return Err(value_mismatch::<V>(&*value)),
            };
            let Some(owner) = owner.downcast_mut::<O>() else {
                return Err(owner_mismatch::<O>(owner));
            };
            fun(owner, value);
            Ok(())
        });

        Self {
            origin,
            owner: Some(Type::of::<O>()),
            value: Type::of::<V>(),
            callable: RawCallable::InstanceSet(fun),
        }
    }

    /// Compiles a fallible instance setter into canonical shape.
    pub fn try_instance_set<O, V, E, F>(origin: HandleOrigin, fun: F) -> Self
    where
        O: AnyValue,
        V: AnyValue,
        E: core::error::Error + Send + Sync + 'static,
        F: Fn(&mut O, V) -> Result<(), E> + Send + Sync + 'static,
    {
        let fun: InstanceSetFn = Box::new(move |owner, value| {
            let value = match value.take::<V>() {
                Ok(value) => value,
                Err(value) => return Err(value_mismatch::<V>(&*value)),
            };
            let Some(owner) = owner.downcast_mut::<O>() else {
                return Err(owner_mismatch::<O>(owner));
            };
            match fun(owner, value) {
                Ok(()) => Ok(()),
                Err(error) => Err(Box::new(error)),
            }
        });

        Self {
            origin,
            owner: Some(Type::of::<O>()),
            value: Type::of::<V>(),
            callable: RawCallable::InstanceSet(fun),
        }
    }

    /// Compiles an infallible static getter into canonical shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldbind::handle::{AccessShape, HandleOrigin, RawAccessor};
    ///
    /// let raw = RawAccessor::static_get(HandleOrigin::Manual, || 60_u32);
    ///
    /// assert_eq!(raw.shape(), AccessShape::StaticGet);
    /// assert!(raw.owner_ty().is_none());
    /// ```
    pub fn static_get<V, F>(origin: HandleOrigin, fun: F) -> Self
    where
        V: AnyValue,
        F: Fn() -> V + Send + Sync + 'static,
    {
        let fun: StaticGetFn = Box::new(move || Ok(fun().into_boxed_value()));

        Self {
            origin,
            owner: None,
            value: Type::of::<V>(),
            callable: RawCallable::StaticGet(fun),
        }
    }

    /// Compiles a fallible static getter into canonical shape.
    pub fn try_static_get<V, E, F>(origin: HandleOrigin, fun: F) -> Self
    where
        V: AnyValue,
        E: core::error::Error + Send + Sync + 'static,
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
    {
        let fun: StaticGetFn = Box::new(move || match fun() {
            Ok(value) => Ok(value.into_boxed_value()),
            Err(error) => Err(Box::new(error)),
        });

        Self {
            origin,
            owner: None,
            value: Type::of::<V>(),
            callable: RawCallable::StaticGet(fun),
        }
    }

    /// Compiles an infallible static setter into canonical shape.
    pub fn static_set<V, F>(origin: HandleOrigin, fun: F) -> Self
    where
        V: AnyValue,
        F: Fn(V) + Send + Sync + 'static,
    {
        let fun: StaticSetFn = Box::new(move |value| {
            let value = match value.take::<V>() {
                Ok(value) => value,
                Err(value) => return Err(value_mismatch::<V>(&*value)),
            };
            fun(value);
            Ok(())
        });

        Self {
            origin,
            owner: None,
            value: Type::of::<V>(),
            callable: RawCallable::StaticSet(fun),
        }
    }

    /// Compiles a fallible static setter into canonical shape.
    pub fn try_static_set<V, E, F>(origin: HandleOrigin, fun: F) -> Self
    where
        V: AnyValue,
        E: core::error::Error + Send + Sync + 'static,
        F: Fn(V) -> Result<(), E> + Send + Sync + 'static,
    {
        let fun: StaticSetFn = Box::new(move |value| {
            let value = match value.take::<V>() {
                Ok(value) => value,
                Err(value) => return Err(value_mismatch::<V>(&*value)),
            };
            match fun(value) {
                Ok(()) => Ok(()),
                Err(error) => Err(Box::new(error)),
            }
        });

        Self {
            origin,
            owner: None,
            value: Type::of::<V>(),
            callable: RawCallable::StaticSet(fun),
        }
    }

    /// Returns the [`AccessShape`] the handle was coerced into.
    #[inline]
    pub fn shape(&self) -> AccessShape {
        self.callable.shape()
    }

    /// Returns where the handle's behavior comes from.
    #[inline]
    pub const fn origin(&self) -> HandleOrigin {
        self.origin
    }

    /// Returns the concrete owner [`Type`], or `None` for static shapes.
    #[inline]
    pub const fn owner_ty(&self) -> Option<Type> {
        self.owner
    }

    /// Returns the concrete value [`Type`] the handle produces or consumes.
    #[inline]
    pub const fn value_ty(&self) -> Type {
        self.value
    }
}

impl fmt::Debug for RawAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawAccessor")
            .field("origin", &self.origin)
            .field("shape", &self.shape())
            .field("owner", &self.owner)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn owner_mismatch<O: AnyValue>(owner: &dyn AnyValue) -> BoxedError {
    Box::new(TypeMismatchError::Owner {
        expected: Type::of::<O>(),
        actual: owner.ty(),
    })
}

fn value_mismatch<V: AnyValue>(value: &dyn AnyValue) -> BoxedError {
    Box::new(TypeMismatchError::Value {
        expected: Type::of::<V>(),
        actual: value.ty(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use core::fmt;

    use super::*;
    use crate::BoxedValue;

    struct Probe {
        gain: u16,
        label: String,
    }

    fn probe() -> Probe {
        Probe {
            gain: 40,
            label: "left".to_string(),
        }
    }

    fn call_get(raw: &RawAccessor, owner: &dyn AnyValue) -> Result<BoxedValue, BoxedError> {
        match &raw.callable {
            RawCallable::InstanceGet(fun) => fun(owner),
            _ => panic!("expected an instance get payload"),
        }
    }

    fn call_set(
        raw: &RawAccessor,
        owner: &mut dyn AnyValue,
        value: BoxedValue,
    ) -> Result<(), BoxedError> {
        match &raw.callable {
            RawCallable::InstanceSet(fun) => fun(owner, value),
            _ => panic!("expected an instance set payload"),
        }
    }

    #[derive(Debug, PartialEq)]
    struct GainOutOfRange(u16);

    impl fmt::Display for GainOutOfRange {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "gain {} is out of range", self.0)
        }
    }

    impl core::error::Error for GainOutOfRange {}

    #[test]
    fn get_produces_owned_value() {
        let raw = RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain);
        let owner = probe();

        let value = call_get(&raw, &owner).unwrap();
        assert_eq!(value.take::<u16>().unwrap(), 40);
    }

    #[test]
    fn set_consumes_owned_value() {
        let raw = RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
            probe.gain = gain;
        });
        let mut owner = probe();

        call_set(&raw, &mut owner, Box::new(55_u16)).unwrap();
        assert_eq!(owner.gain, 55);
    }

    #[test]
    fn wrong_owner_reports_mismatch() {
        let raw = RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain);
        let not_a_probe = 3_i32;

        let error = call_get(&raw, &not_a_probe).unwrap_err();
        let mismatch = error.downcast_ref::<TypeMismatchError>().unwrap();

        assert!(mismatch.expected().is::<Probe>());
        assert!(mismatch.actual().is::<i32>());
        assert!(matches!(mismatch, TypeMismatchError::Owner { .. }));
    }

    #[test]
    fn wrong_value_reports_mismatch() {
        let raw = RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
            probe.gain = gain;
        });
        let mut owner = probe();

        let error = call_set(&raw, &mut owner, Box::new("loud")).unwrap_err();
        let mismatch = error.downcast_ref::<TypeMismatchError>().unwrap();

        assert!(mismatch.expected().is::<u16>());
        assert!(mismatch.actual().is::<&str>());
        assert!(matches!(mismatch, TypeMismatchError::Value { .. }));
        assert_eq!(owner.gain, 40);
    }

    #[test]
    fn fallible_setter_error_survives_erasure() {
        let raw = RawAccessor::try_instance_set(HandleOrigin::Manual, |probe: &mut Probe, gain| {
            if gain > 100 {
                return Err(GainOutOfRange(gain));
            }
            probe.gain = gain;
            Ok(())
        });
        let mut owner = probe();

        let error = call_set(&raw, &mut owner, Box::new(200_u16)).unwrap_err();
        assert_eq!(*error.downcast_ref::<GainOutOfRange>().unwrap(), GainOutOfRange(200));
        assert_eq!(owner.gain, 40);
    }

    #[test]
    fn static_shapes_have_no_owner() {
        let getter = RawAccessor::static_get(HandleOrigin::Manual, || 7_i64);
        let setter = RawAccessor::static_set(HandleOrigin::Manual, |_value: i64| {});

        assert_eq!(getter.shape(), AccessShape::StaticGet);
        assert_eq!(setter.shape(), AccessShape::StaticSet);
        assert!(getter.owner_ty().is_none());
        assert!(setter.owner_ty().is_none());
        assert!(getter.value_ty().is::<i64>());

        let value = match &getter.callable {
            RawCallable::StaticGet(fun) => fun().unwrap(),
            _ => panic!("expected a static get payload"),
        };
        assert_eq!(value.take::<i64>().unwrap(), 7);
    }

    #[test]
    fn mismatch_display_names_both_types() {
        let error = TypeMismatchError::Owner {
            expected: Type::of::<Probe>(),
            actual: Type::of::<i32>(),
        };
        let text = error.to_string();

        assert!(text.contains("owner"));
        assert!(text.contains("i32"));
    }

    #[test]
    fn string_field_round_trip() {
        let get = RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| {
            probe.label.clone()
        });
        let set = RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, label| {
            probe.label = label;
        });
        let mut owner = probe();

        call_set(&set, &mut owner, Box::new("right".to_string())).unwrap();
        let value = call_get(&get, &owner).unwrap();
        assert_eq!(value.take::<String>().unwrap(), "right");
    }
}
