//! Capabilities over static and global slots.

use alloc::boxed::Box;
use core::fmt;

use crate::access::{AccessError, BindError, check_member, check_scope};
use crate::handle::{
    AccessRole, AccessShape, HandleOrigin, RawAccessor, RawCallable, StaticGetFn, StaticSetFn,
    TypeMismatchError,
};
use crate::info::{MemberInfo, MemberScope, Type};
use crate::{AnyValue, BoxedValue};

// -----------------------------------------------------------------------------
// StaticReader

/// A read capability over one static member.
///
/// The static-scope analogue of [`InstanceReader`]: the underlying handle
/// closes over its slot, so reads take no owner argument. Static handles
/// carry no owner witness, which leaves the declaring type in the
/// descriptor purely diagnostic.
///
/// [`InstanceReader`]: crate::access::InstanceReader
///
/// # Examples
///
/// ```
/// use fieldbind::access::StaticReader;
/// use fieldbind::handle::{HandleOrigin, RawAccessor};
/// use fieldbind::info::MemberInfo;
///
/// struct Mixer;
///
/// let reader = StaticReader::bind(
///     MemberInfo::static_in::<Mixer, u32>("CHANNELS"),
///     RawAccessor::static_get(HandleOrigin::Manual, || 8_u32),
/// )
/// .unwrap();
///
/// assert_eq!(reader.get_as::<u32>().unwrap(), 8);
/// ```
pub struct StaticReader {
    info: MemberInfo,
    origin: HandleOrigin,
    fun: StaticGetFn,
}

impl StaticReader {
    /// Binds a raw static getter handle to a member descriptor.
    ///
    /// The descriptor must be static-scoped, the handle must carry the
    /// [`StaticGet`](AccessShape::StaticGet) shape, and the handle's value
    /// type must match the descriptor's.
    pub fn bind(info: MemberInfo, raw: RawAccessor) -> Result<Self, BindError> {
        check_scope(&info, MemberScope::Static)?;
        let fun = match raw.callable {
            RawCallable::StaticGet(fun) => fun,
            other => {
                return Err(BindError::MismatchedShape {
                    expected: AccessShape::StaticGet,
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

    /// Reads the member out of its slot.
    pub fn get(&self) -> Result<BoxedValue, AccessError> {
        (self.fun)().map_err(|cause| AccessError::new(self.info.clone(), AccessRole::Get, cause))
    }

    /// Reads the member and downcasts the value to `T`.
    pub fn get_as<T: AnyValue>(&self) -> Result<T, AccessError> {
        match self.get()?.take::<T>() {
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

/// Formats as ``get `Owner::MEMBER: Type` (origin)``.
impl fmt::Display for StaticReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "get `{}` ({})", self.info, self.origin)
    }
}

impl fmt::Debug for StaticReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticReader")
            .field("info", &self.info)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// StaticWriter

/// A write capability over one static member.
pub struct StaticWriter {
    info: MemberInfo,
    origin: HandleOrigin,
    fun: StaticSetFn,
}

impl StaticWriter {
    /// Binds a raw static setter handle to a member descriptor.
    ///
    /// The same checks as [`StaticReader::bind`], against the
    /// [`StaticSet`](AccessShape::StaticSet) shape.
    pub fn bind(info: MemberInfo, raw: RawAccessor) -> Result<Self, BindError> {
        check_scope(&info, MemberScope::Static)?;
        let fun = match raw.callable {
            RawCallable::StaticSet(fun) => fun,
            other => {
                return Err(BindError::MismatchedShape {
                    expected: AccessShape::StaticSet,
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

    /// Writes an already-erased value into the member's slot.
    pub fn set_boxed(&self, value: BoxedValue) -> Result<(), AccessError> {
        (self.fun)(value)
            .map_err(|cause| AccessError::new(self.info.clone(), AccessRole::Set, cause))
    }

    /// Writes `value` into the member's slot, boxing it on the way in.
    #[inline]
    pub fn set<T: AnyValue>(&self, value: T) -> Result<(), AccessError> {
        self.set_boxed(value.into_boxed_value())
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

/// Formats as ``set `Owner::MEMBER: Type` (origin)``.
impl fmt::Display for StaticWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set `{}` ({})", self.info, self.origin)
    }
}

impl fmt::Debug for StaticWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticWriter")
            .field("info", &self.info)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// StaticAccessor

/// A read-write capability over one static member.
///
/// One [`StaticReader`] and one [`StaticWriter`] for the same member, bound
/// atomically.
pub struct StaticAccessor {
    reader: StaticReader,
    writer: StaticWriter,
}

impl StaticAccessor {
    /// Binds a raw static getter and setter handle to one member descriptor.
    pub fn bind(info: MemberInfo, get: RawAccessor, set: RawAccessor) -> Result<Self, BindError> {
        let reader = StaticReader::bind(info.clone(), get)?;
        let writer = StaticWriter::bind(info, set)?;

        Ok(Self { reader, writer })
    }

    /// Recomposes an accessor from already-bound halves.
    ///
    /// The halves must describe the same member; otherwise they are
    /// discarded and [`BindError::MismatchedMember`] is returned.
    pub fn from_parts(reader: StaticReader, writer: StaticWriter) -> Result<Self, BindError> {
        if reader.info != writer.info {
            return Err(BindError::MismatchedMember {
                expected: reader.info,
                actual: writer.info,
            });
        }

        Ok(Self { reader, writer })
    }

    /// Reads the member out of its slot.
    #[inline]
    pub fn get(&self) -> Result<BoxedValue, AccessError> {
        self.reader.get()
    }

    /// Reads the member and downcasts the value to `T`.
    #[inline]
    pub fn get_as<T: AnyValue>(&self) -> Result<T, AccessError> {
        self.reader.get_as()
    }

    /// Writes an already-erased value into the member's slot.
    #[inline]
    pub fn set_boxed(&self, value: BoxedValue) -> Result<(), AccessError> {
        self.writer.set_boxed(value)
    }

    /// Writes `value` into the member's slot, boxing it on the way in.
    #[inline]
    pub fn set<T: AnyValue>(&self, value: T) -> Result<(), AccessError> {
        self.writer.set(value)
    }

    /// Returns the descriptor both halves were bound with.
    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        self.reader.info()
    }

    /// Returns the read half.
    #[inline]
    pub const fn reader(&self) -> &StaticReader {
        &self.reader
    }

    /// Returns the write half.
    #[inline]
    pub const fn writer(&self) -> &StaticWriter {
        &self.writer
    }

    /// Splits the accessor back into its reader and writer halves.
    #[inline]
    pub fn into_parts(self) -> (StaticReader, StaticWriter) {
        (self.reader, self.writer)
    }
}

/// Formats as ``get/set `Owner::MEMBER: Type` (origin)``, with both origins
/// spelled out when the halves differ.
impl fmt::Display for StaticAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "get/set `{}` (", self.reader.info)?;
        if self.reader.origin == self.writer.origin {
            write!(f, "{})", self.reader.origin)
        } else {
            write!(f, "{}/{})", self.reader.origin, self.writer.origin)
        }
    }
}

impl fmt::Debug for StaticAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAccessor")
            .field("reader", &self.reader)
            .field("writer", &self.writer)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
