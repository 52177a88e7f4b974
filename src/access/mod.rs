//! Capability objects for reading and writing named members.
//!
//! A capability pairs a [`MemberInfo`](crate::info::MemberInfo) descriptor
//! with one or two raw handles from [`crate::handle`], coerced and checked
//! once by the `bind` constructors:
//!
//! - [`InstanceReader`] / [`InstanceWriter`] / [`InstanceAccessor`]: members
//!   of object instances, addressed through an erased `&dyn AnyValue` owner.
//! - [`StaticReader`] / [`StaticWriter`] / [`StaticAccessor`]: static and
//!   global slots, addressed by the handle itself.
//! - [`MemberTable`]: bound instance capabilities for one owner type,
//!   tabulated for consumers that walk every member.
//!
//! `bind` is the fail-fast stage: scope, shape, owner type, and value type
//! disagreements all surface as [`BindError`] before any capability exists.
//! After binding, every `get` and `set` reports failures as [`AccessError`],
//! which wraps the raising handle's own error unchanged as its cause.
//!
//! Capability objects are immutable and `Send + Sync`; calls never mutate
//! them, so one object can serve any number of threads at once.
//!
//! # Examples
//!
//! ```
//! use fieldbind::access::InstanceAccessor;
//! use fieldbind::handle::{HandleOrigin, RawAccessor};
//! use fieldbind::info::MemberInfo;
//!
//! struct Probe {
//!     gain: u16,
//! }
//!
//! let accessor = InstanceAccessor::bind(
//!     MemberInfo::instance::<Probe, u16>("gain"),
//!     RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain),
//!     RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
//!         probe.gain = gain;
//!     }),
//! )
//! .unwrap();
//!
//! let mut probe = Probe { gain: 40 };
//! accessor.set(&mut probe, 55_u16).unwrap();
//! assert_eq!(accessor.get_as::<u16>(&probe).unwrap(), 55);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod access_error;
mod bind_error;
mod instance;
mod statics;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use access_error::AccessError;
pub use bind_error::BindError;
pub use instance::{InstanceAccessor, InstanceReader, InstanceWriter};
pub use statics::{StaticAccessor, StaticReader, StaticWriter};
pub use table::{BoundMember, MemberTable};

// -----------------------------------------------------------------------------
// Bind-time checks

use crate::info::{MemberInfo, MemberScope, Type};

/// Rejects a descriptor whose scope disagrees with the capability being
/// bound.
fn check_scope(info: &MemberInfo, expected: MemberScope) -> Result<(), BindError> {
    let actual = info.scope();
    if actual != expected {
        return Err(BindError::MismatchedScope { expected, actual });
    }
    Ok(())
}

/// Rejects a handle whose type witnesses disagree with the descriptor.
///
/// Static handles carry no owner witness; `owner` is `None` for them and
/// the owner check is skipped.
fn check_member(info: &MemberInfo, owner: Option<Type>, value: Type) -> Result<(), BindError> {
    if let Some(actual) = owner {
        let expected = info.declaring();
        if actual != expected {
            return Err(BindError::MismatchedOwner { expected, actual });
        }
    }

    let expected = info.value_ty();
    if value != expected {
        return Err(BindError::MismatchedValue {
            expected,
            actual: value,
        });
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::sync::Arc;
    use std::thread;

    use super::*;
    use crate::handle::{AccessRole, HandleOrigin, RawAccessor};

    struct Panel {
        brightness: u16,
    }

    fn brightness_accessor() -> InstanceAccessor {
        InstanceAccessor::bind(
            MemberInfo::instance::<Panel, u16>("brightness"),
            RawAccessor::instance_get(HandleOrigin::Bypass, |panel: &Panel| panel.brightness),
            RawAccessor::instance_set(HandleOrigin::Bypass, |panel: &mut Panel, brightness| {
                panel.brightness = brightness;
            }),
        )
        .unwrap()
    }

    #[test]
    fn capability_objects_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<RawAccessor>();
        assert_send_sync::<InstanceReader>();
        assert_send_sync::<InstanceWriter>();
        assert_send_sync::<InstanceAccessor>();
        assert_send_sync::<StaticReader>();
        assert_send_sync::<StaticWriter>();
        assert_send_sync::<StaticAccessor>();
        assert_send_sync::<MemberTable>();
        assert_send_sync::<AccessError>();
        assert_send_sync::<BindError>();
    }

    #[test]
    fn one_accessor_serves_many_threads() {
        let accessor = Arc::new(brightness_accessor());

        let worker = thread::spawn({
            let accessor = Arc::clone(&accessor);
            move || {
                let mut panel = Panel { brightness: 10 };
                accessor.set(&mut panel, 80_u16).unwrap();
                accessor.get_as::<u16>(&panel).unwrap()
            }
        });

        let mut panel = Panel { brightness: 10 };
        accessor.set(&mut panel, 20_u16).unwrap();

        assert_eq!(worker.join().unwrap(), 80);
        assert_eq!(accessor.get_as::<u16>(&panel).unwrap(), 20);
    }

    /// A stand-in for the member resolver collaborator: it owns the fixture
    /// type, decides what each origin may touch, and speaks [`BindError`]
    /// for its refusals.
    mod resolver {
        use alloc::string::String;

        use crate::access::BindError;
        use crate::handle::{AccessRole, HandleOrigin, RawAccessor};
        use crate::info::MemberInfo;

        pub struct Sensor {
            pub label: String,
            raw_gain: u16,
            serial: u64,
        }

        impl Sensor {
            pub fn new(label: &str, raw_gain: u16, serial: u64) -> Self {
                Self {
                    label: String::from(label),
                    raw_gain,
                    serial,
                }
            }

            /// The only public view of `serial`; there is no setter.
            pub fn serial(&self) -> u64 {
                self.serial
            }
        }

        pub fn reader_handle(
            name: &str,
            origin: HandleOrigin,
        ) -> Result<(MemberInfo, RawAccessor), BindError> {
            match (name, origin) {
                ("label", _) => Ok((
                    MemberInfo::instance::<Sensor, String>("label"),
                    RawAccessor::instance_get(origin, |sensor: &Sensor| sensor.label.clone()),
                )),
                ("raw_gain", HandleOrigin::Bypass) => Ok((
                    MemberInfo::instance::<Sensor, u16>("raw_gain"),
                    RawAccessor::instance_get(origin, |sensor: &Sensor| sensor.raw_gain),
                )),
                ("raw_gain", HandleOrigin::Manual) => Err(BindError::AccessDenied {
                    member: MemberInfo::instance::<Sensor, u16>("raw_gain"),
                }),
                ("serial", HandleOrigin::Bypass) => Ok((
                    MemberInfo::instance::<Sensor, u64>("serial"),
                    RawAccessor::instance_get(origin, |sensor: &Sensor| sensor.serial),
                )),
                // The manual handle routes through the public accessor.
                ("serial", HandleOrigin::Manual) => Ok((
                    MemberInfo::instance::<Sensor, u64>("serial"),
                    RawAccessor::instance_get(origin, |sensor: &Sensor| sensor.serial()),
                )),
                _ => panic!("unknown member `{name}`"),
            }
        }

        pub fn writer_handle(
            name: &str,
            origin: HandleOrigin,
        ) -> Result<(MemberInfo, RawAccessor), BindError> {
            match (name, origin) {
                ("label", _) => Ok((
                    MemberInfo::instance::<Sensor, String>("label"),
                    RawAccessor::instance_set(origin, |sensor: &mut Sensor, label| {
                        sensor.label = label;
                    }),
                )),
                ("raw_gain", HandleOrigin::Bypass) => Ok((
                    MemberInfo::instance::<Sensor, u16>("raw_gain"),
                    RawAccessor::instance_set(origin, |sensor: &mut Sensor, raw_gain| {
                        sensor.raw_gain = raw_gain;
                    }),
                )),
                ("raw_gain", HandleOrigin::Manual) => Err(BindError::AccessDenied {
                    member: MemberInfo::instance::<Sensor, u16>("raw_gain"),
                }),
                ("serial", HandleOrigin::Bypass) => Ok((
                    MemberInfo::instance::<Sensor, u64>("serial"),
                    RawAccessor::instance_set(origin, |sensor: &mut Sensor, serial| {
                        sensor.serial = serial;
                    }),
                )),
                ("serial", HandleOrigin::Manual) => Err(BindError::MissingAccessor {
                    member: MemberInfo::instance::<Sensor, u64>("serial"),
                    role: AccessRole::Set,
                }),
                _ => panic!("unknown member `{name}`"),
            }
        }
    }

    #[test]
    fn bypass_handles_reach_every_member() {
        let mut sensor = resolver::Sensor::new("alpha", 7, 900);

        for name in ["label", "raw_gain", "serial"] {
            let (info, raw) = resolver::reader_handle(name, HandleOrigin::Bypass).unwrap();
            let reader = InstanceReader::bind(info, raw).unwrap();
            assert!(reader.get(&sensor).is_ok());
        }

        // Writes land on all three as well, public setter or not.
        let (info, raw) = resolver::writer_handle("label", HandleOrigin::Bypass).unwrap();
        let writer = InstanceWriter::bind(info, raw).unwrap();
        writer.set(&mut sensor, "gamma".to_string()).unwrap();
        assert_eq!(sensor.label, "gamma");

        let (info, raw) = resolver::writer_handle("raw_gain", HandleOrigin::Bypass).unwrap();
        let writer = InstanceWriter::bind(info, raw).unwrap();
        writer.set(&mut sensor, 55_u16).unwrap();

        let (info, raw) = resolver::reader_handle("raw_gain", HandleOrigin::Bypass).unwrap();
        let reader = InstanceReader::bind(info, raw).unwrap();
        assert_eq!(reader.get_as::<u16>(&sensor).unwrap(), 55);

        let (info, raw) = resolver::writer_handle("serial", HandleOrigin::Bypass).unwrap();
        let writer = InstanceWriter::bind(info, raw).unwrap();
        writer.set(&mut sensor, 901_u64).unwrap();
        assert_eq!(sensor.serial(), 901);
    }

    #[test]
    fn manual_handles_stop_at_the_public_surface() {
        let mut sensor = resolver::Sensor::new("alpha", 7, 900);

        // Both public members can be read manually.
        for name in ["label", "serial"] {
            let (info, raw) = resolver::reader_handle(name, HandleOrigin::Manual).unwrap();
            let reader = InstanceReader::bind(info, raw).unwrap();
            assert_eq!(reader.origin(), HandleOrigin::Manual);
            assert!(reader.get(&sensor).is_ok());
        }

        // Only the public mutable member can be written manually.
        let (info, raw) = resolver::writer_handle("label", HandleOrigin::Manual).unwrap();
        let writer = InstanceWriter::bind(info, raw).unwrap();
        writer.set(&mut sensor, "beta".to_string()).unwrap();
        assert_eq!(sensor.label, "beta");

        // The read-only member has no setter to wrap.
        let error = resolver::writer_handle("serial", HandleOrigin::Manual).unwrap_err();
        assert!(matches!(
            error,
            BindError::MissingAccessor {
                role: AccessRole::Set,
                ..
            },
        ));

        // The private member is refused outright, in either role.
        let error = resolver::reader_handle("raw_gain", HandleOrigin::Manual).unwrap_err();
        assert!(matches!(error, BindError::AccessDenied { .. }));
        let error = resolver::writer_handle("raw_gain", HandleOrigin::Manual).unwrap_err();
        assert!(matches!(error, BindError::AccessDenied { .. }));
    }
}
