//! Capabilities over members of object instances.

use alloc::boxed::Box;
use core::fmt;

use crate::access::{AccessError, BindError, check_member, check_scope};
use crate::handle::{
    AccessRole, AccessShape, HandleOrigin, InstanceGetFn, InstanceSetFn, RawAccessor, RawCallable,
    TypeMismatchError,
};
use crate::info::{MemberInfo, MemberScope, Type};
use crate::{AnyValue, BoxedValue};

// -----------------------------------------------------------------------------
// InstanceReader

/// A read capability over one instance member.
///
/// A reader is a member descriptor plus one canonical getter handle, coerced
/// and checked at [`bind`](Self::bind) time. It holds no other state: calls
/// never mutate it, and it can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use fieldbind::access::InstanceReader;
/// use fieldbind::handle::{HandleOrigin, RawAccessor};
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
/// let probe = Probe { gain: 40 };
/// assert_eq!(reader.get_as::<u16>(&probe).unwrap(), 40);
/// ```
pub struct InstanceReader {
    info: MemberInfo,
    origin: HandleOrigin,
    fun: InstanceGetFn,
}

impl InstanceReader {
    /// Binds a raw getter handle to a member descriptor.
    ///
    /// This is the sole constructor and the single coercion point. The
    /// descriptor must be instance-scoped, the handle must carry the
    /// [`InstanceGet`](AccessShape::InstanceGet) shape, and the handle's
    /// owner and value types must match the descriptor's. Any disagreement
    /// is reported here; a reader that exists cannot fail on these grounds
    /// later.
    pub fn bind(info: MemberInfo, raw: RawAccessor) -> Result<Self, BindError> {
        check_scope(&info, MemberScope::Instance)?;
        let fun = match raw.callable {
            RawCallable::InstanceGet(fun) => fun,
            other => {
                return Err(BindError::MismatchedShape {
                    expected: AccessShape::InstanceGet,
                    actual: other.shape(),
                });
            }
        };
        check_member(&info, raw.owner, raw.value)?;

        Ok(Self {
            info,
            origin: raw.origin,
            fun,
        })
    }

    /// Reads the member out of `owner`.
    ///
    /// The value comes back owned and erased; use [`get_as`](Self::get_as)
    /// to downcast in one step. An owner of the wrong concrete type is
    /// reported through the error channel with a [`TypeMismatchError`]
    /// cause.
    pub fn get(&self, owner: &dyn AnyValue) -> Result<BoxedValue, AccessError> {
        (self.fun)(owner)
            .map_err(|cause| AccessError::new(self.info.clone(), AccessRole::Get, cause))
    }

    /// Reads the member and downcasts the value to `T`.
    pub fn get_as<T: AnyValue>(&self, owner: &dyn AnyValue) -> Result<T, AccessError> {
        match self.get(owner)?.take::<T>() {
            Ok(value) => Ok(value),
            Err(value) => Err(AccessError::new(
                self.info.clone(),
                AccessRole::Get,
                Box::new(TypeMismatchError::Value {
                    expected: Type::of::<T>(),
                    actual: value.ty(),
                }),
            )),
        }
    }

    /// Returns the descriptor the reader was bound with.
    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        &self.info
    }

    /// Returns the origin of the handle the reader was bound from.
    #[inline]
    pub const fn origin(&self) -> HandleOrigin {
        self.origin
    }
}

/// Formats as ``get `Owner::member: Type` (origin)``.
impl fmt::Display for InstanceReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "get `{}` ({})", self.info, self.origin)
    }
}

impl fmt::Debug for InstanceReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceReader")
            .field("info", &self.info)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// InstanceWriter

/// A write capability over one instance member.
///
/// The mirror image of [`InstanceReader`]: one descriptor, one canonical
/// setter handle, checked once at [`bind`](Self::bind) time. Write access
/// exists only where a setter handle was bound; there is no way to conjure
/// one out of a reader.
pub struct InstanceWriter {
    info: MemberInfo,
    origin: HandleOrigin,
    fun: InstanceSetFn,
}

impl InstanceWriter {
    /// Binds a raw setter handle to a member descriptor.
    ///
    /// The same checks as [`InstanceReader::bind`], against the
    /// [`InstanceSet`](AccessShape::InstanceSet) shape.
    pub fn bind(info: MemberInfo, raw: RawAccessor) -> Result<Self, BindError> {
        check_scope(&info, MemberScope::Instance)?;
        let fun = match raw.callable {
            RawCallable::InstanceSet(fun) => fun,
            other => {
                return Err(BindError::MismatchedShape {
                    expected: AccessShape::InstanceSet,
                    actual: other.shape(),
                });
            }
        };
        check_member(&info, raw.owner, raw.value)?;

        Ok(Self {
            info,
            origin: raw.origin,
            fun,
        })
    }

    /// Writes an already-erased value into the member of `owner`.
    pub fn set_boxed(&self, owner: &mut dyn AnyValue, value: BoxedValue) -> Result<(), AccessError> {
        (self.fun)(owner, value)
            .map_err(|cause| AccessError::new(self.info.clone(), AccessRole::Set, cause))
    }

    /// Writes `value` into the member of `owner`, boxing it on the way in.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldbind::access::InstanceWriter;
    /// use fieldbind::handle::{HandleOrigin, RawAccessor};
    /// use fieldbind::info::MemberInfo;
    ///
    /// struct Probe {
    ///     gain: u16,
    /// }
    ///
    /// let writer = InstanceWriter::bind(
    ///     MemberInfo::instance::<Probe, u16>("gain"),
    ///     RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
    ///         probe.gain = gain;
    ///     }),
    /// )
    /// .unwrap();
    ///
    /// let mut probe = Probe { gain: 40 };
    /// writer.set(&mut probe, 55_u16).unwrap();
    /// assert_eq!(probe.gain, 55);
    /// ```
    #[inline]
    pub fn set<T: AnyValue>(&self, owner: &mut dyn AnyValue, value: T) -> Result<(), AccessError> {
        self.set_boxed(owner, value.into_boxed_value())
    }

    /// Returns the descriptor the writer was bound with.
    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        &self.info
    }

    /// Returns the origin of the handle the writer was bound from.
    #[inline]
    pub const fn origin(&self) -> HandleOrigin {
        self.origin
    }
}

/// Formats as ``set `Owner::member: Type` (origin)``.
impl fmt::Display for InstanceWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set `{}` ({})", self.info, self.origin)
    }
}

impl fmt::Debug for InstanceWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceWriter")
            .field("info", &self.info)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// InstanceAccessor

/// A read-write capability over one instance member.
///
/// An accessor is nothing more than a reader and a writer for the same
/// member, bound atomically: either both handles coerce or no object
/// exists. The halves remain reachable through [`reader`](Self::reader) and
/// [`writer`](Self::writer), and the object splits back into them with
/// [`into_parts`](Self::into_parts).
///
/// # Examples
///
/// ```
/// use fieldbind::access::InstanceAccessor;
/// use fieldbind::handle::{HandleOrigin, RawAccessor};
/// use fieldbind::info::MemberInfo;
///
/// struct Probe {
///     gain: u16,
/// }
///
/// let accessor = InstanceAccessor::bind(
///     MemberInfo::instance::<Probe, u16>("gain"),
///     RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain),
///     RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
///         probe.gain = gain;
///     }),
/// )
/// .unwrap();
///
/// let mut probe = Probe { gain: 40 };
/// accessor.set(&mut probe, 55_u16).unwrap();
/// assert_eq!(accessor.get_as::<u16>(&probe).unwrap(), 55);
/// ```
pub struct InstanceAccessor {
    reader: InstanceReader,
    writer: InstanceWriter,
}

impl InstanceAccessor {
    /// Binds a raw getter and a raw setter handle to one member descriptor.
    ///
    /// Both handles go through the full [`InstanceReader::bind`] and
    /// [`InstanceWriter::bind`] checks; the first disagreement wins.
    pub fn bind(info: MemberInfo, get: RawAccessor, set: RawAccessor) -> Result<Self, BindError> {
        let reader = InstanceReader::bind(info.clone(), get)?;
        let writer = InstanceWriter::bind(info, set)?;

        Ok(Self { reader, writer })
    }

    /// Recomposes an accessor from already-bound halves.
    ///
    /// The halves must describe the same member; otherwise they are
    /// discarded and [`BindError::MismatchedMember`] is returned.
    pub fn from_parts(reader: InstanceReader, writer: InstanceWriter) -> Result<Self, BindError> {
        if reader.info != writer.info {
            return Err(BindError::MismatchedMember {
                expected: reader.info,
                actual: writer.info,
            });
        }

        Ok(Self { reader, writer })
    }

    /// Reads the member out of `owner`.
    #[inline]
    pub fn get(&self, owner: &dyn AnyValue) -> Result<BoxedValue, AccessError> {
        self.reader.get(owner)
    }

    /// Reads the member and downcasts the value to `T`.
    #[inline]
    pub fn get_as<T: AnyValue>(&self, owner: &dyn AnyValue) -> Result<T, AccessError> {
        self.reader.get_as(owner)
    }

    /// Writes an already-erased value into the member of `owner`.
    #[inline]
    pub fn set_boxed(&self, owner: &mut dyn AnyValue, value: BoxedValue) -> Result<(), AccessError> {
        self.writer.set_boxed(owner, value)
    }

    /// Writes `value` into the member of `owner`, boxing it on the way in.
    #[inline]
    pub fn set<T: AnyValue>(&self, owner: &mut dyn AnyValue, value: T) -> Result<(), AccessError> {
        self.writer.set(owner, value)
    }

    /// Returns the descriptor both halves were bound with.
    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        self.reader.info()
    }

    /// Returns the read half.
    #[inline]
    pub const fn reader(&self) -> &InstanceReader {
        &self.reader
    }

    /// Returns the write half.
    #[inline]
    pub const fn writer(&self) -> &InstanceWriter {
        &self.writer
    }

    /// Splits the accessor back into its reader and writer halves.
    #[inline]
    pub fn into_parts(self) -> (InstanceReader, InstanceWriter) {
        (self.reader, self.writer)
    }
}

/// Formats as ``get/set `Owner::member: Type` (origin)``, with both origins
/// spelled out when the halves differ.
impl fmt::Display for InstanceAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "get/set `{}` (", self.reader.info)?;
        if self.reader.origin == self.writer.origin {
            write!(f, "{})", self.reader.origin)
        } else {
            write!(f, "{}/{})", self.reader.origin, self.writer.origin)
        }
    }
}

impl fmt::Debug for InstanceAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceAccessor")
            .field("reader", &self.reader)
            .field("writer", &self.writer)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
