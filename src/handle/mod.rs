//! Raw accessor handles and the canonical calling shapes they coerce into.
//!
//! A raw handle wraps a plain closure over concrete owner and value types
//! into one of four canonical, type-erased shapes:
//!
//! - [`InstanceGetFn`]: `(&owner) -> value`
//! - [`InstanceSetFn`]: `(&mut owner, value) -> ()`
//! - [`StaticGetFn`]: `() -> value`
//! - [`StaticSetFn`]: `(value) -> ()`
//!
//! The coercion happens exactly once, inside the [`RawAccessor`]
//! constructors. From then on a handle is an opaque payload plus metadata:
//! its [`AccessShape`], the [`Type`](crate::info::Type) witnesses of its
//! owner and value, and a [`HandleOrigin`] tag used for diagnostics and
//! access policies. Type disagreements discovered when a handle is actually
//! called surface as [`TypeMismatchError`] through the ordinary error
//! channel.
//!
//! # Examples
//!
//! ```
//! use fieldbind::handle::{AccessShape, HandleOrigin, RawAccessor};
//!
//! struct Probe {
//!     gain: u16,
//! }
//!
//! let raw = RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
//!     probe.gain = gain;
//! });
//!
//! assert_eq!(raw.shape(), AccessShape::InstanceSet);
//! assert!(raw.value_ty().is::<u16>());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod raw;
mod shape;

// -----------------------------------------------------------------------------
// Exports

pub use raw::{HandleOrigin, RawAccessor, TypeMismatchError};
pub use shape::{AccessRole, AccessShape, InstanceGetFn, InstanceSetFn, StaticGetFn, StaticSetFn};

pub(crate) use shape::RawCallable;
