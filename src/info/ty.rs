use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// Type

/// The base representation of a Rust type.
///
/// Pairs a [`TypeId`] with the compiler-reported type name, so that type
/// mismatches can be both detected and described. Comparison and hashing rely
/// purely on the [`TypeId`]; the name exists for diagnostics only.
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// use fieldbind::info::Type;
///
/// let ty = Type::of::<Option<i32>>();
///
/// assert!(ty.is::<Option<i32>>());
/// assert_eq!(ty.ident(), "Option");
///
/// let type_id: TypeId = ty.id();
/// // ...
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Creates a new [`Type`] of the given type.
    ///
    /// # Example
    ///
    /// ```
    /// # use fieldbind::info::Type;
    /// let ty = Type::of::<i32>();
    /// assert_eq!(ty.name(), "i32");
    /// ```
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Rebuilds a [`Type`] from identity reported by an erased value.
    #[inline]
    pub(crate) const fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Returns the [`TypeId`] of the type.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use fieldbind::info::Type;
    /// let ty = Type::of::<i32>();
    /// assert_eq!(ty.id(), TypeId::of::<i32>());
    /// ```
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Check if the given type matches this one.
    ///
    /// This only compares the [`TypeId`] of the types.
    ///
    /// # Example
    ///
    /// ```
    /// # use fieldbind::info::Type;
    /// let ty = Type::of::<i32>();
    /// assert!(ty.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.id
    }

    /// Returns the full type name, as reported by [`core::any::type_name`].
    ///
    /// The exact contents are not guaranteed across compiler versions and
    /// should only be used for diagnostics.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the short name of the type, without generics and module path.
    ///
    /// # Example
    ///
    /// ```
    /// # use fieldbind::info::Type;
    /// assert_eq!(Type::of::<Option<i32>>().ident(), "Option");
    /// assert_eq!(Type::of::<i32>().ident(), "i32");
    /// ```
    pub fn ident(&self) -> &'static str {
        let name = match self.name.split_once('<') {
            Some((name, _)) => name,
            None => self.name,
        };
        match name.rsplit_once("::") {
            Some((_, ident)) => ident,
            None => name,
        }
    }
}

/// This implementation purely relies on the [`TypeId`] of the type,
impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

/// This implementation purely relies on the [`TypeId`] of the type,
impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// This implementation will only output the name of the type.
impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

// -----------------------------------------------------------------------------
// Tests
