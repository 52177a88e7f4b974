//! The four canonical calling shapes and their role and scope tags.

use alloc::boxed::Box;
use core::fmt;

use crate::info::MemberScope;
use crate::{AnyValue, BoxedError, BoxedValue};

// -----------------------------------------------------------------------------
// Canonical calling shapes

/// The canonical instance getter: borrows an erased owner, produces an owned
/// value.
pub type InstanceGetFn =
    Box<dyn Fn(&dyn AnyValue) -> Result<BoxedValue, BoxedError> + Send + Sync>;

/// The canonical instance setter: mutably borrows an erased owner, consumes
/// an owned value.
pub type InstanceSetFn =
    Box<dyn Fn(&mut dyn AnyValue, BoxedValue) -> Result<(), BoxedError> + Send + Sync>;

/// The canonical static getter: produces an owned value from a static slot.
pub type StaticGetFn = Box<dyn Fn() -> Result<BoxedValue, BoxedError> + Send + Sync>;

/// The canonical static setter: consumes an owned value into a static slot.
pub type StaticSetFn = Box<dyn Fn(BoxedValue) -> Result<(), BoxedError> + Send + Sync>;

// -----------------------------------------------------------------------------
// AccessRole

/// Whether an accessor reads or writes its member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessRole {
    /// Reads the member value.
    Get,
    /// Writes the member value.
    Set,
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Set => "set",
        })
    }
}

// -----------------------------------------------------------------------------
// AccessShape

/// The four canonical calling shapes a raw accessor can carry.
///
/// A shape is the product of a [`MemberScope`] and an [`AccessRole`]; it
/// fixes the arity and argument placement of the underlying callable.
/// Binding a handle to a capability slot expecting a different shape fails
/// fast with [`BindError::MismatchedShape`](crate::access::BindError).
///
/// # Examples
///
/// ```
/// use fieldbind::handle::{AccessRole, AccessShape};
/// use fieldbind::info::MemberScope;
///
/// let shape = AccessShape::InstanceGet;
///
/// assert_eq!(shape.role(), AccessRole::Get);
/// assert_eq!(shape.scope(), MemberScope::Instance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessShape {
    /// [`InstanceGetFn`]: `(&owner) -> value`.
    InstanceGet,
    /// [`InstanceSetFn`]: `(&mut owner, value) -> ()`.
    InstanceSet,
    /// [`StaticGetFn`]: `() -> value`.
    StaticGet,
    /// [`StaticSetFn`]: `(value) -> ()`.
    StaticSet,
}

impl AccessShape {
    /// Returns the [`AccessRole`] half of the shape.
    #[inline]
    pub const fn role(self) -> AccessRole {
        match self {
            Self::InstanceGet | Self::StaticGet => AccessRole::Get,
            Self::InstanceSet | Self::StaticSet => AccessRole::Set,
        }
    }

    /// Returns the [`MemberScope`] half of the shape.
    #[inline]
    pub const fn scope(self) -> MemberScope {
        match self {
            Self::InstanceGet | Self::InstanceSet => MemberScope::Instance,
            Self::StaticGet | Self::StaticSet => MemberScope::Static,
        }
    }
}

/// Formats as `scope role`, e.g. `instance get`.
impl fmt::Display for AccessShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scope(), self.role())
    }
}

// -----------------------------------------------------------------------------
// RawCallable

/// The erased payload of a raw accessor, already in canonical shape.
pub(crate) enum RawCallable {
    InstanceGet(InstanceGetFn),
    InstanceSet(InstanceSetFn),
    StaticGet(StaticGetFn),
    StaticSet(StaticSetFn),
}

impl RawCallable {
    /// Returns the [`AccessShape`] of the payload.
    pub(crate) fn shape(&self) -> AccessShape {
        match self {
            Self::InstanceGet(_) => AccessShape::InstanceGet,
            Self::InstanceSet(_) => AccessShape::InstanceSet,
            Self::StaticGet(_) => AccessShape::StaticGet,
            Self::StaticSet(_) => AccessShape::StaticSet,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn shape_projections() {
        assert_eq!(AccessShape::InstanceGet.role(), AccessRole::Get);
        assert_eq!(AccessShape::InstanceSet.role(), AccessRole::Set);
        assert_eq!(AccessShape::StaticGet.scope(), MemberScope::Static);
        assert_eq!(AccessShape::InstanceSet.scope(), MemberScope::Instance);
    }

    #[test]
    fn shape_display() {
        assert_eq!(AccessShape::InstanceGet.to_string(), "instance get");
        assert_eq!(AccessShape::StaticSet.to_string(), "static set");
        assert_eq!(AccessRole::Get.to_string(), "get");
    }
}
