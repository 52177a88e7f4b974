#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod value;

pub mod access;
pub mod handle;
pub mod hash;
pub mod info;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use value::{AnyValue, BoxedError, BoxedValue};
