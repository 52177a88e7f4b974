//! Fixed-seed hash support, based on *foldhash* and *hashbrown*.
//!
//! Name lookup tables use a fixed hash seed so that hash results only
//! depend on the input, staying stable across runs.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0xD4A3_91E6_0B57_C82F);

/// A hasher providing hash results that only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`],
/// created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use fieldbind::hash::FixedHashState;
///
/// // The same input always hashes to the same result.
/// assert_eq!(FixedHashState.hash_one("gain"), FixedHashState.hash_one("gain"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// HashMap

/// A [`hashbrown::HashMap`] pre-configured with [`FixedHashState`].
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Tests
