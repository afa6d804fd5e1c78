//! Transactional versionstamps.
//!
//! A versionstamp is a 96-bit value the store uses to give every committed
//! write a globally unique, monotonically increasing position: an 80-bit
//! transaction version assigned by the store at commit time, followed by a
//! 16-bit user version that orders writes within a single transaction.
//!
//! # Lifecycle
//!
//! Application code creates an *incomplete* versionstamp before commit; its
//! transaction-version portion is a placeholder of ten 0xFF bytes. When the
//! key is written through the versionstamp-aware packing path, the
//! transaction layer patches the placeholder in place at commit time. Once
//! the real transaction version is known, a *complete* versionstamp can be
//! constructed fresh; the incomplete instance is never mutated.
//!
//! # Wire Format
//!
//! The on-wire form is always exactly 12 bytes: the 10-byte transaction
//! version (or the all-0xFF placeholder), then the user version big-endian.
//! Ordering is lexicographic on this form.
//!
//! # Example
//!
//! ```
//! use ordkey::Versionstamp;
//!
//! let vs = Versionstamp::incomplete(42);
//! assert!(!vs.is_complete());
//!
//! let bytes = vs.to_bytes();
//! assert_eq!(&bytes[..10], &[0xFF; 10]);
//! assert_eq!(&bytes[10..], &[0x00, 0x2A]);
//!
//! assert_eq!(Versionstamp::from_bytes(&bytes).unwrap(), vs);
//! ```

use std::cmp::Ordering;

use snafu::Snafu;

// =============================================================================
// Constants
// =============================================================================

/// Length of the store-assigned transaction version in bytes.
pub const TRANSACTION_VERSION_LEN: usize = 10;

/// Length of the full versionstamp wire form in bytes.
pub const VERSIONSTAMP_LEN: usize = 12;

/// Placeholder written for the transaction version of an incomplete
/// versionstamp. Real transaction versions are store-assigned and never
/// reach all-0xFF, so the placeholder is unambiguous.
const INCOMPLETE_PLACEHOLDER: [u8; TRANSACTION_VERSION_LEN] = [0xFF; TRANSACTION_VERSION_LEN];

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur constructing or decoding versionstamps.
#[derive(Debug, Snafu)]
pub enum VersionstampError {
    /// Transaction version slice was not exactly 10 bytes.
    #[snafu(display("transaction version must be {} bytes, got {len}", TRANSACTION_VERSION_LEN))]
    InvalidTransactionVersionLength {
        /// Length of the rejected slice.
        len: usize,
    },

    /// Versionstamp wire form was not exactly 12 bytes.
    #[snafu(display("versionstamp must be {} bytes, got {len}", VERSIONSTAMP_LEN))]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
}

// =============================================================================
// Versionstamp Type
// =============================================================================

/// A 96-bit transactional versionstamp.
///
/// See the [module docs](self) for the lifecycle and wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Versionstamp {
    /// Store-assigned transaction version; `None` while incomplete.
    transaction_version: Option<[u8; TRANSACTION_VERSION_LEN]>,
    /// User-assigned sub-order within the transaction.
    user_version: u16,
}

impl Versionstamp {
    /// Create an incomplete versionstamp with the given user version.
    ///
    /// The transaction-version portion serializes as the all-0xFF
    /// placeholder until the store patches it at commit time.
    pub fn incomplete(user_version: u16) -> Self {
        Self {
            transaction_version: None,
            user_version,
        }
    }

    /// Create a complete versionstamp from a store-assigned transaction
    /// version.
    ///
    /// Fails unless `transaction_version` is exactly 10 bytes.
    pub fn complete(transaction_version: &[u8], user_version: u16) -> Result<Self, VersionstampError> {
        let version: [u8; TRANSACTION_VERSION_LEN] = transaction_version
            .try_into()
            .map_err(|_| VersionstampError::InvalidTransactionVersionLength {
                len: transaction_version.len(),
            })?;
        Ok(Self {
            transaction_version: Some(version),
            user_version,
        })
    }

    /// Whether the store has assigned this versionstamp's transaction
    /// version.
    pub fn is_complete(&self) -> bool {
        self.transaction_version.is_some()
    }

    /// The 10-byte transaction version, if complete.
    pub fn transaction_version(&self) -> Option<&[u8; TRANSACTION_VERSION_LEN]> {
        self.transaction_version.as_ref()
    }

    /// The 16-bit user version.
    pub fn user_version(&self) -> u16 {
        self.user_version
    }

    /// Serialize to the 12-byte wire form.
    pub fn to_bytes(&self) -> [u8; VERSIONSTAMP_LEN] {
        let mut bytes = [0u8; VERSIONSTAMP_LEN];
        bytes[..TRANSACTION_VERSION_LEN]
            .copy_from_slice(self.transaction_version.as_ref().unwrap_or(&INCOMPLETE_PLACEHOLDER));
        bytes[TRANSACTION_VERSION_LEN..].copy_from_slice(&self.user_version.to_be_bytes());
        bytes
    }

    /// Deserialize from the 12-byte wire form.
    ///
    /// An all-0xFF transaction-version portion decodes as incomplete.
    /// Fails unless `data` is exactly 12 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, VersionstampError> {
        if data.len() != VERSIONSTAMP_LEN {
            return Err(VersionstampError::InvalidLength { len: data.len() });
        }

        let mut version = [0u8; TRANSACTION_VERSION_LEN];
        version.copy_from_slice(&data[..TRANSACTION_VERSION_LEN]);
        let user_version = u16::from_be_bytes([data[TRANSACTION_VERSION_LEN], data[TRANSACTION_VERSION_LEN + 1]]);

        Ok(Self {
            transaction_version: (version != INCOMPLETE_PLACEHOLDER).then_some(version),
            user_version,
        })
    }
}

impl PartialOrd for Versionstamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Versionstamp {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic on the wire form; the incomplete placeholder sorts
        // above every real transaction version
        self.to_bytes().cmp(&other.to_bytes())
    }
}

// =============================================================================
// Tests
// =============================================================================
