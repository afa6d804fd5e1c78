//! Subspaces: byte-prefix partitions of the keyspace.
//!
//! A subspace wraps a byte-string prefix and scopes tuple-encoded keys
//! under it. Nested subspaces extend the prefix with further tuple
//! encodings, giving each logical namespace its own disjoint slice of the
//! keyspace.
//!
//! # Range Bounds
//!
//! Two bound computations are provided and intentionally kept separate:
//!
//! - [`Subspace::range`] returns `(prefix ++ 0x00, prefix ++ 0xFF)`. This
//!   is the tight bound for tuple-encoded contents: no encoded element
//!   begins with a byte above 0x33, so 0xFF is a strict upper bound. For a
//!   raw binary prefix ending in 0xFF it is unsound (see the method docs).
//! - [`Subspace::prefix_range`] returns `(prefix, strinc(prefix))`, which
//!   covers every key extending the prefix regardless of byte content.
//!
//! # Example
//!
//! ```
//! use ordkey::{Subspace, Tuple};
//!
//! let users = Subspace::new(Tuple::new().push("users"));
//!
//! let key = users.pack(&Tuple::new().push("alice").push("profile"));
//! assert!(users.contains(&key));
//!
//! let unpacked = users.unpack(&key).unwrap();
//! assert_eq!(unpacked, Tuple::new().push("alice").push("profile"));
//! ```

use snafu::ResultExt;
use snafu::Snafu;

use crate::tuple::Tuple;
use crate::tuple::TupleError;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during subspace operations.
#[derive(Debug, Snafu)]
pub enum SubspaceError {
    /// Key does not start with the subspace prefix.
    #[snafu(display("key does not start with subspace prefix"))]
    PrefixMismatch,

    /// No strict upper bound exists within the same or shorter byte length.
    #[snafu(display("cannot increment key: empty or all 0xFF"))]
    CannotIncrement,

    /// Key suffix was not a valid tuple encoding.
    #[snafu(display("failed to decode key within subspace: {source}"))]
    Decode {
        /// The underlying tuple decode error.
        source: TupleError,
    },
}

// =============================================================================
// Subspace Type
// =============================================================================

/// A namespace within the keyspace, identified by a common byte prefix.
///
/// Subspaces are immutable values; [`Subspace::subspace`] returns a new
/// subspace owning a longer prefix rather than mutating the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subspace {
    /// Every key in the subspace begins with these bytes.
    prefix: Vec<u8>,
}

impl Subspace {
    /// Create a subspace from a tuple-encoded prefix.
    ///
    /// A tuple-encoded prefix never ends in 0xFF, which keeps
    /// [`Subspace::range`] sound for this subspace.
    pub fn new(prefix: Tuple) -> Self {
        Self { prefix: prefix.pack() }
    }

    /// Create a subspace from a raw byte prefix.
    ///
    /// No structural invariant is imposed on the bytes; if the prefix ends
    /// in 0xFF, use [`Subspace::prefix_range`] rather than
    /// [`Subspace::range`] for scans.
    pub fn from_bytes(prefix: impl Into<Vec<u8>>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Create a subspace rooted at a tuple-encoded string.
    pub fn from_root(root: &str) -> Self {
        Self::new(Tuple::new().push(root))
    }

    /// Create a nested subspace by extending this prefix with a packed
    /// tuple.
    pub fn subspace(&self, suffix: &Tuple) -> Subspace {
        let mut prefix = self.prefix.clone();
        suffix.pack_into(&mut prefix);
        Subspace { prefix }
    }

    /// Get the raw prefix bytes.
    pub fn raw_prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Pack a key tuple within this subspace.
    ///
    /// The resulting bytes are the concatenation of the subspace prefix and
    /// the packed key tuple.
    pub fn pack(&self, key: &Tuple) -> Vec<u8> {
        let mut buf = self.prefix.clone();
        key.pack_into(&mut buf);
        buf
    }

    /// Pack a key tuple for a versionstamped-key write within this
    /// subspace.
    ///
    /// The offset trailer addresses the placeholder relative to the start
    /// of the full key, prefix included; see
    /// [`Tuple::pack_with_versionstamp`].
    pub fn pack_with_versionstamp(&self, key: &Tuple) -> Result<Vec<u8>, TupleError> {
        key.pack_with_versionstamp(&self.prefix)
    }

    /// Unpack a key from this subspace.
    ///
    /// Strips the prefix and decodes the remainder as a tuple. Fails with
    /// [`SubspaceError::PrefixMismatch`] if the key does not start with the
    /// prefix.
    pub fn unpack(&self, key: &[u8]) -> Result<Tuple, SubspaceError> {
        let suffix = key
            .strip_prefix(self.prefix.as_slice())
            .ok_or(SubspaceError::PrefixMismatch)?;
        Tuple::unpack(suffix).context(DecodeSnafu)
    }

    /// Check if a key belongs to this subspace.
    pub fn contains(&self, key: &[u8]) -> bool {
        key.starts_with(&self.prefix)
    }

    /// Get the range of all tuple-encoded keys in this subspace.
    ///
    /// Returns `(start_key, end_key)` for a half-open `[start, end)` scan:
    /// `(prefix ++ 0x00, prefix ++ 0xFF)`.
    ///
    /// Correct for tuple-encoded prefixes, where no key byte following the
    /// prefix can be 0xFF. For a raw binary prefix ending in 0xFF this
    /// bound is **unsound**: a key like `prefix ++ 0xFF ++ ...` sorts above
    /// `end_key` and is silently excluded. Use [`Subspace::prefix_range`]
    /// for such prefixes.
    pub fn range(&self) -> (Vec<u8>, Vec<u8>) {
        let mut start = self.prefix.clone();
        start.push(0x00);
        let mut end = self.prefix.clone();
        end.push(0xFF);
        (start, end)
    }

    /// Get the range of every possible key extending this prefix.
    ///
    /// Returns `(prefix, strinc(prefix))` for a half-open `[start, end)`
    /// scan. Unlike [`Subspace::range`], this covers keys with arbitrary
    /// trailing byte content, at the cost of failing for prefixes with no
    /// finite successor (empty or all 0xFF).
    pub fn prefix_range(&self) -> Result<(Vec<u8>, Vec<u8>), SubspaceError> {
        let end = strinc(&self.prefix)?;
        Ok((self.prefix.clone(), end))
    }
}

// =============================================================================
// String Increment
// =============================================================================

/// Compute the lexicographically smallest byte string strictly greater
/// than every string having `key` as a prefix.
///
/// Trailing 0xFF bytes are stripped, then the last remaining byte is
/// incremented. Fails with [`SubspaceError::CannotIncrement`] if nothing
/// remains: an empty or all-0xFF key has no successor within the same or
/// shorter byte length.
///
/// # Example
///
/// ```
/// use ordkey::subspace::strinc;
///
/// assert_eq!(strinc(&[0x01, 0x02, 0x03]).unwrap(), vec![0x01, 0x02, 0x04]);
/// assert_eq!(strinc(&[0x01, 0x02, 0xFF]).unwrap(), vec![0x01, 0x03]);
/// assert!(strinc(&[0xFF, 0xFF]).is_err());
/// ```
pub fn strinc(key: &[u8]) -> Result<Vec<u8>, SubspaceError> {
    let last = key
        .iter()
        .rposition(|&b| b != 0xFF)
        .ok_or(SubspaceError::CannotIncrement)?;

    let mut out = key[..=last].to_vec();
    out[last] += 1;
    Ok(out)
}

// =============================================================================
// Tests
// =============================================================================
