use core::{error, fmt};

use crate::BoxedError;
use crate::handle::AccessRole;
use crate::info::MemberInfo;

// -----------------------------------------------------------------------------
// AccessError

/// A failure while exercising a bound capability.
///
/// Every `get` and `set` reports through this one type, whatever the raw
/// handle did internally. The member descriptor and role say *where* and
/// *how* the access failed; the cause says *why*, unchanged from the handle
/// that raised it.
///
/// The cause is reachable both through [`source`](core::error::Error::source)
/// for error-chain walkers and through [`cause`](AccessError::cause) for
/// direct downcasting.
///
/// # Examples
///
/// ```
/// use fieldbind::access::InstanceReader;
/// use fieldbind::handle::{HandleOrigin, RawAccessor, TypeMismatchError};
/// use fieldbind::info::MemberInfo;
///
/// struct Probe {
///     gain: u16,
/// }
///
/// let reader = InstanceReader::bind(
///     MemberInfo::instance::<Probe, u16>("gain"),
///     RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain),
/// )
/// .unwrap();
///
/// // Calling with the wrong owner type reports through the error channel.
/// let error = reader.get(&"not a probe").unwrap_err();
///
/// assert_eq!(error.member().name(), "gain");
/// assert!(error.cause().downcast_ref::<TypeMismatchError>().is_some());
/// ```
#[derive(Debug)]
pub struct AccessError {
    member: MemberInfo,
    role: AccessRole,
    cause: BoxedError,
}

impl AccessError {
    pub(crate) fn new(member: MemberInfo, role: AccessRole, cause: BoxedError) -> Self {
        Self {
            member,
            role,
            cause,
        }
    }

    /// Returns the descriptor of the member whose access failed.
    #[inline]
    pub fn member(&self) -> &MemberInfo {
        &self.member
    }

    /// Returns whether the failure happened while reading or writing.
    #[inline]
    pub const fn role(&self) -> AccessRole {
        self.role
    }

    /// Returns the underlying cause, as raised by the handle.
    #[inline]
    pub fn cause(&self) -> &(dyn error::Error + 'static) {
        self.cause.as_ref()
    }

    /// Consumes the error, returning ownership of the underlying cause.
    #[inline]
    pub fn into_cause(self) -> BoxedError {
        self.cause
    }
}

/// Formats as ``failed to get `Owner::member: Type`: cause``.
impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to {} `{}`: {}",
            self.role, self.member, self.cause
        )
    }
}

impl error::Error for AccessError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

// -----------------------------------------------------------------------------
// Tests
