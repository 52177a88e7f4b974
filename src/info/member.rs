use alloc::borrow::Cow;
use core::any::Any;
use core::fmt;

use crate::info::Type;

// -----------------------------------------------------------------------------
// MemberScope

/// Whether a member belongs to an object instance or to a static slot.
///
/// The scope decides which canonical calling shapes a member's accessors can
/// have: instance shapes receive an owner argument, static shapes do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberScope {
    /// The member lives inside an owner object; every access names an owner.
    Instance,
    /// The member is a static/global slot; access takes no owner.
    Static,
}

impl fmt::Display for MemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Instance => "instance",
            Self::Static => "static",
        })
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// The immutable descriptor of a single named data member.
///
/// Carries everything binding needs to validate a raw accessor handle: the
/// member name, the declaring (owner) type, the value type and the
/// [`MemberScope`]. Descriptors are produced by whatever frontend resolves
/// members; this crate only consumes them.
///
/// Two descriptors are equal when name, declaring type, value type and scope
/// all match.
///
/// # Examples
///
/// ```
/// use fieldbind::info::{MemberInfo, MemberScope};
///
/// struct Probe {
///     gain: u16,
/// }
///
/// let info = MemberInfo::instance::<Probe, u16>("gain");
///
/// assert_eq!(info.name(), "gain");
/// assert_eq!(info.scope(), MemberScope::Instance);
/// assert!(info.declaring().is::<Probe>());
/// assert!(info.value_ty().is::<u16>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    name: Cow<'static, str>,
    declaring: Type,
    value: Type,
    scope: MemberScope,
}

impl MemberInfo {
    /// Creates a descriptor for the member `name` of type `V`, declared by
    /// `O`, in the given scope.
    #[inline]
    pub fn new<O, V>(name: impl Into<Cow<'static, str>>, scope: MemberScope) -> Self
    where
        O: Any + ?Sized,
        V: Any + ?Sized,
    {
        Self {
            name: name.into(),
            declaring: Type::of::<O>(),
            value: Type::of::<V>(),
            scope,
        }
    }

    /// Creates an instance-scoped descriptor.
    ///
    /// # Example
    ///
    /// ```
    /// # use fieldbind::info::{MemberInfo, MemberScope};
    /// struct Probe;
    ///
    /// let info = MemberInfo::instance::<Probe, u16>("gain");
    /// assert_eq!(info.scope(), MemberScope::Instance);
    /// ```
    #[inline]
    pub fn instance<O, V>(name: impl Into<Cow<'static, str>>) -> Self
    where
        O: Any + ?Sized,
        V: Any + ?Sized,
    {
        Self::new::<O, V>(name, MemberScope::Instance)
    }

    /// Creates a static-scoped descriptor for a slot declared in `O`.
    ///
    /// # Example
    ///
    /// ```
    /// # use fieldbind::info::{MemberInfo, MemberScope};
    /// struct Limits;
    ///
    /// let info = MemberInfo::static_in::<Limits, u32>("max_depth");
    /// assert_eq!(info.scope(), MemberScope::Static);
    /// ```
    #[inline]
    pub fn static_in<O, V>(name: impl Into<Cow<'static, str>>) -> Self
    where
        O: Any + ?Sized,
        V: Any + ?Sized,
    {
        Self::new::<O, V>(name, MemberScope::Static)
    }

    /// Returns the member name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member name as an owned key.
    #[inline]
    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Returns the declaring (owner) type.
    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    /// Returns the value type of the member.
    #[inline]
    pub const fn value_ty(&self) -> Type {
        self.value
    }

    /// Returns the [`MemberScope`] of the member.
    #[inline]
    pub const fn scope(&self) -> MemberScope {
        self.scope
    }
}

/// Formats as `Owner::name: Value` using short type names.
///
/// # Example
///
/// ```
/// # use fieldbind::info::MemberInfo;
/// struct Probe;
///
/// let info = MemberInfo::instance::<Probe, u16>("gain");
/// assert_eq!(info.to_string(), "Probe::gain: u16");
/// ```
impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}: {}",
            self.declaring.ident(),
            self.name,
            self.value.ident()
        )
    }
}

// -----------------------------------------------------------------------------
// Tests
