//! Member descriptors and the type identity they are validated against.
//!
//! ## Menu
//!
//! - [`Type`]: A [`TypeId`](core::any::TypeId) paired with the compiler-reported
//!   type name, compared and hashed by id only.
//!
//! - [`MemberScope`]: Whether a member belongs to an object instance or to a
//!   static/global slot.
//!
//! - [`MemberInfo`]: The immutable descriptor of a single named member:
//!   name, declaring type, value type and scope. Binding validates every raw
//!   handle against one of these.

// -----------------------------------------------------------------------------
// Modules

mod member;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use member::{MemberInfo, MemberScope};
pub use ty::Type;
