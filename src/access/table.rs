//! Tabulated capabilities for one owner type.

use alloc::borrow::Cow;
use alloc::vec::{self, Vec};
use core::any::Any;
use core::{fmt, mem, slice};

use crate::access::{BindError, InstanceAccessor, InstanceReader, InstanceWriter};
use crate::hash::{FixedHashState, HashMap};
use crate::info::{MemberInfo, Type};

// -----------------------------------------------------------------------------
// BoundMember

/// A capability stored in a [`MemberTable`], in whichever role combination
/// the member supports.
#[derive(Debug)]
pub enum BoundMember {
    /// The member can only be read.
    ReadOnly(InstanceReader),
    /// The member can only be written.
    WriteOnly(InstanceWriter),
    /// The member can be read and written.
    ReadWrite(InstanceAccessor),
}

impl BoundMember {
    /// Returns the descriptor of the underlying capability.
    #[inline]
    pub const fn info(&self) -> &MemberInfo {
        match self {
            Self::ReadOnly(reader) => reader.info(),
            Self::WriteOnly(writer) => writer.info(),
            Self::ReadWrite(accessor) => accessor.info(),
        }
    }

    /// Returns the read half, if the member is readable.
    #[inline]
    pub const fn reader(&self) -> Option<&InstanceReader> {
        match self {
            Self::ReadOnly(reader) => Some(reader),
            Self::ReadWrite(accessor) => Some(accessor.reader()),
            Self::WriteOnly(_) => None,
        }
    }

    /// Returns the write half, if the member is writable.
    #[inline]
    pub const fn writer(&self) -> Option<&InstanceWriter> {
        match self {
            Self::WriteOnly(writer) => Some(writer),
            Self::ReadWrite(accessor) => Some(accessor.writer()),
            Self::ReadOnly(_) => None,
        }
    }
}

impl From<InstanceReader> for BoundMember {
    #[inline]
    fn from(reader: InstanceReader) -> Self {
        Self::ReadOnly(reader)
    }
}

impl From<InstanceWriter> for BoundMember {
    #[inline]
    fn from(writer: InstanceWriter) -> Self {
        Self::WriteOnly(writer)
    }
}

impl From<InstanceAccessor> for BoundMember {
    #[inline]
    fn from(accessor: InstanceAccessor) -> Self {
        Self::ReadWrite(accessor)
    }
}

// -----------------------------------------------------------------------------
// MemberTable

/// An ordered, name-indexed collection of capabilities over one owner type.
///
/// Consumers that walk every member of a type, such as codec generators,
/// want both iteration in a stable order and by-name lookup. The table
/// stores members in insertion order and keeps a name index beside them,
/// hashed with the crate's fixed-seed state so that layout does not vary
/// between runs.
///
/// Only instance-scoped capabilities can be tabulated, and every entry must
/// declare the table's owner type; a foreign entry is rejected with
/// [`BindError::MismatchedOwner`]. Inserting a member under an existing
/// name replaces the previous entry in place.
///
/// # Examples
///
/// ```
/// use fieldbind::access::{InstanceReader, MemberTable};
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
/// let mut table = MemberTable::new::<Probe>();
/// table.insert(reader).unwrap();
///
/// let probe = Probe { gain: 40 };
/// let member = table.get("gain").unwrap();
/// assert_eq!(member.reader().unwrap().get_as::<u16>(&probe).unwrap(), 40);
/// ```
pub struct MemberTable {
    owner: Type,
    members: Vec<BoundMember>,
    indices: HashMap<Cow<'static, str>, usize>,
}

impl MemberTable {
    /// Creates an empty table for members of `O`.
    pub fn new<O: Any + ?Sized>() -> Self {
        Self {
            owner: Type::of::<O>(),
            members: Vec::new(),
            indices: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates an empty table for members of `O` with at least the
    /// specified capacity.
    pub fn with_capacity<O: Any + ?Sized>(capacity: usize) -> Self {
        Self {
            owner: Type::of::<O>(),
            members: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Inserts a capability, keyed by its member name.
    ///
    /// If the name is already present, the previous entry is replaced in
    /// place and returned. A capability whose descriptor declares a
    /// different owner type is rejected.
    pub fn insert(
        &mut self,
        member: impl Into<BoundMember>,
    ) -> Result<Option<BoundMember>, BindError> {
        let member = member.into();
        let declaring = member.info().declaring();
        if declaring != self.owner {
            return Err(BindError::MismatchedOwner {
                expected: self.owner,
                actual: declaring,
            });
        }

        let name = member.info().name_cow();
        if let Some(&index) = self.indices.get(&name) {
            Ok(Some(mem::replace(&mut self.members[index], member)))
        } else {
            self.indices.insert(name, self.members.len());
            self.members.push(member);
            Ok(None)
        }
    }

    /// Returns the member with the given name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&BoundMember> {
        self.index_of(name).map(|index| &self.members[index])
    }

    /// Returns the insertion index of the member with the given name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the member at the given insertion index.
    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&BoundMember> {
        self.members.get(index)
    }

    /// Returns the number of members in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the table holds no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns an iterator over the members in insertion order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, BoundMember> {
        self.members.iter()
    }

    /// Returns the owner [`Type`] the table was created for.
    #[inline]
    pub const fn owner(&self) -> Type {
        self.owner
    }
}

impl fmt::Debug for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberTable")
            .field("owner", &self.owner)
            .field("members", &self.members)
            .finish()
    }
}

impl<'a> IntoIterator for &'a MemberTable {
    type Item = &'a BoundMember;
    type IntoIter = slice::Iter<'a, BoundMember>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for MemberTable {
    type Item = BoundMember;
    type IntoIter = vec::IntoIter<BoundMember>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;
    use crate::handle::{HandleOrigin, RawAccessor};

    struct Probe {
        gain: u16,
        label: String,
    }

    fn gain_reader() -> InstanceReader {
        InstanceReader::bind(
            MemberInfo::instance::<Probe, u16>("gain"),
            RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain),
        )
        .unwrap()
    }

    fn gain_accessor() -> InstanceAccessor {
        InstanceAccessor::bind(
            MemberInfo::instance::<Probe, u16>("gain"),
            RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.gain),
            RawAccessor::instance_set(HandleOrigin::Bypass, |probe: &mut Probe, gain| {
                probe.gain = gain;
            }),
        )
        .unwrap()
    }

    fn label_reader() -> InstanceReader {
        InstanceReader::bind(
            MemberInfo::instance::<Probe, String>("label"),
            RawAccessor::instance_get(HandleOrigin::Bypass, |probe: &Probe| probe.label.clone()),
        )
        .unwrap()
    }

    #[test]
    fn insert_and_lookup() {
        let mut table = MemberTable::with_capacity::<Probe>(2);
        table.insert(gain_reader()).unwrap();
        table.insert(label_reader()).unwrap();

        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(table.owner().is::<Probe>());

        assert_eq!(table.index_of("gain"), Some(0));
        assert_eq!(table.index_of("label"), Some(1));
        assert_eq!(table.index_of("serial"), None);

        assert_eq!(table.get("label").unwrap().info().name(), "label");
        assert_eq!(table.get_at(0).unwrap().info().name(), "gain");
        assert!(table.get_at(2).is_none());
    }

    #[test]
    fn same_name_insert_replaces_in_place() {
        let mut table = MemberTable::new::<Probe>();
        table.insert(gain_reader()).unwrap();
        table.insert(label_reader()).unwrap();

        let replaced = table.insert(gain_accessor()).unwrap().unwrap();
        assert!(matches!(replaced, BoundMember::ReadOnly(_)));

        // Same slot, same order, upgraded capability.
        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("gain"), Some(0));
        assert!(table.get("gain").unwrap().writer().is_some());
    }

    #[test]
    fn foreign_owner_is_rejected() {
        struct Amplifier {
            gain: u16,
        }

        let foreign = InstanceReader::bind(
            MemberInfo::instance::<Amplifier, u16>("gain"),
            RawAccessor::instance_get(HandleOrigin::Bypass, |amp: &Amplifier| amp.gain),
        )
        .unwrap();

        let mut table = MemberTable::new::<Probe>();
        let error = table.insert(foreign).unwrap_err();

        assert_eq!(
            error,
            BindError::MismatchedOwner {
                expected: Type::of::<Probe>(),
                actual: Type::of::<Amplifier>(),
            },
        );
        assert!(table.is_empty());
    }

    #[test]
    fn role_views_follow_the_variant() {
        let read_only = BoundMember::from(gain_reader());
        assert!(read_only.reader().is_some());
        assert!(read_only.writer().is_none());

        let read_write = BoundMember::from(gain_accessor());
        assert!(read_write.reader().is_some());
        assert!(read_write.writer().is_some());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut table = MemberTable::new::<Probe>();
        table.insert(gain_reader()).unwrap();
        table.insert(label_reader()).unwrap();

        let names: Vec<&str> = table.iter().map(|member| member.info().name()).collect();
        assert_eq!(names, ["gain", "label"]);

        let owned_names: Vec<String> = table
            .into_iter()
            .map(|member| member.info().name().to_string())
            .collect();
        assert_eq!(owned_names, ["gain", "label"]);
    }

    #[test]
    fn read_members_serialize_like_derive() {
        #[derive(serde::Serialize)]
        struct Calibration {
            level: i32,
            comment: String,
        }

        let mut table = MemberTable::new::<Calibration>();
        table
            .insert(
                InstanceReader::bind(
                    MemberInfo::instance::<Calibration, i32>("level"),
                    RawAccessor::instance_get(HandleOrigin::Bypass, |c: &Calibration| c.level),
                )
                .unwrap(),
            )
            .unwrap();
        table
            .insert(
                InstanceReader::bind(
                    MemberInfo::instance::<Calibration, String>("comment"),
                    RawAccessor::instance_get(HandleOrigin::Bypass, |c: &Calibration| {
                        c.comment.clone()
                    }),
                )
                .unwrap(),
            )
            .unwrap();

        let calibration = Calibration {
            level: -3,
            comment: "na".to_string(),
        };

        // Reading every member through the table must see exactly what a
        // plain serializer sees.
        let mut object = serde_json::Map::new();
        for member in &table {
            let reader = member.reader().unwrap();
            let name = member.info().name().to_string();
            let value = if member.info().value_ty().is::<i32>() {
                serde_json::to_value(reader.get_as::<i32>(&calibration).unwrap()).unwrap()
            } else {
                serde_json::to_value(reader.get_as::<String>(&calibration).unwrap()).unwrap()
            };
            object.insert(name, value);
        }

        assert_eq!(
            serde_json::Value::Object(object),
            serde_json::to_value(&calibration).unwrap(),
        );
    }
}
