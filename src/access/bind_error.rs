use core::{error, fmt};

use crate::handle::{AccessRole, AccessShape};
use crate::info::{MemberInfo, MemberScope, Type};

// -----------------------------------------------------------------------------
// BindError

/// An enumeration of all the ways a capability can fail to come into
/// existence.
///
/// Binding is the fail-fast stage: every structural disagreement between a
/// member descriptor and a raw handle is caught here, before any capability
/// object exists. A capability that binds successfully can no longer fail on
/// shape or declared-type grounds.
///
/// The `AccessDenied` and `MissingAccessor` variants are not raised by this
/// crate's own checks; they are the vocabulary handed to the collaborator
/// that resolves members and enforces visibility, so that its refusals flow
/// through the same error type as coercion failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The descriptor's scope disagrees with the capability being bound.
    MismatchedScope {
        expected: MemberScope,
        actual: MemberScope,
    },
    /// The handle's calling shape disagrees with the capability being bound.
    MismatchedShape {
        expected: AccessShape,
        actual: AccessShape,
    },
    /// The handle was compiled against a different owner type than the
    /// descriptor declares.
    MismatchedOwner { expected: Type, actual: Type },
    /// The handle was compiled against a different value type than the
    /// descriptor declares.
    MismatchedValue { expected: Type, actual: Type },
    /// Two capabilities being combined describe different members.
    MismatchedMember {
        expected: MemberInfo,
        actual: MemberInfo,
    },
    /// The member resolver refused to hand out any handle for the member.
    AccessDenied { member: MemberInfo },
    /// The member has no accessor in the requested role.
    MissingAccessor {
        member: MemberInfo,
        role: AccessRole,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedScope { expected, actual } => {
                write!(
                    f,
                    "attempted to bind a member in {actual} scope where {expected} scope is required"
                )
            }
            Self::MismatchedShape { expected, actual } => {
                write!(
                    f,
                    "attempted to bind a handle shaped `{actual}` where `{expected}` is required"
                )
            }
            Self::MismatchedOwner { expected, actual } => {
                write!(
                    f,
                    "attempted to bind a handle for owner `{}` to a member of `{}`",
                    actual.name(),
                    expected.name(),
                )
            }
            Self::MismatchedValue { expected, actual } => {
                write!(
                    f,
                    "attempted to bind a handle for value `{}` to a member of type `{}`",
                    actual.name(),
                    expected.name(),
                )
            }
            Self::MismatchedMember { expected, actual } => {
                write!(
                    f,
                    "attempted to pair a capability for `{actual}` with one for `{expected}`"
                )
            }
            Self::AccessDenied { member } => {
                write!(f, "access to `{member}` was denied by its owner")
            }
            Self::MissingAccessor { member, role } => {
                write!(f, "`{member}` has no {role} accessor")
            }
        }
    }
}

impl error::Error for BindError {}

// -----------------------------------------------------------------------------
// Tests
