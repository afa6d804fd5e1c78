//! Order-preserving key encoding for distributed key-value stores.
//!
//! This crate provides the client-side key codec of a FoundationDB-style
//! layered architecture. These primitives enable:
//!
//! - **Tuple encoding**: Order-preserving serialization of composite keys
//! - **Versionstamps**: Store-assigned commit ordering embedded in keys
//! - **Subspace isolation**: Namespace partitioning for multi-tenant workloads
//! - **Range queries**: Efficient prefix-based scans using lexicographic ordering
//!
//! # Architecture
//!
//! ```text
//! Application Layer (indexes, queues, logs, ...)
//!          ↓
//! ┌─────────────────────────────────────┐
//! │         Subspace Layer              │  Namespace isolation
//! │  ┌─────────────────────────────┐   │
//! │  │   Tuple + Versionstamp      │   │  Ordered key encoding
//! │  └─────────────────────────────┘   │
//! └─────────────────────────────────────┘
//!          ↓
//!    Transaction / storage layer (external; raw byte keys)
//! ```
//!
//! The crate performs no I/O. The transaction layer that commits keys is an
//! external collaborator; the contracts it must honor are byte-level only:
//! the tuple wire format, the 12-byte versionstamp form, the 4-byte
//! little-endian offset trailer of versionstamp-aware packing, and the
//! half-open `[begin, end)` range bounds.
//!
//! # Compatibility
//!
//! The tuple encoding follows the [FoundationDB Tuple Layer specification](
//! https://github.com/apple/foundationdb/blob/main/design/tuple.md),
//! ensuring binary compatibility with the store's other client bindings.
//! Type codes are fixed wire constants and must never be renumbered.
//!
//! # Example
//!
//! ```
//! use ordkey::{Subspace, Tuple, Versionstamp};
//!
//! // Create a namespace for user data
//! let users = Subspace::new(Tuple::new().push("users"));
//!
//! // Create a key: ("users", "alice", "profile")
//! let key = users.pack(&Tuple::new()
//!     .push("alice")
//!     .push("profile"));
//!
//! // Get range for all of alice's data
//! let (start, end) = users.subspace(&Tuple::new().push("alice")).range();
//! assert!(key >= start && key < end);
//!
//! // Stage a versionstamped key for the transaction layer to patch
//! let event = Tuple::new().push(Versionstamp::incomplete(0));
//! let staged = users.pack_with_versionstamp(&event).unwrap();
//! assert_eq!(staged.len(), users.raw_prefix().len() + 13 + 4);
//! ```
//!
//! # References
//!
//! - [FoundationDB Tuple Layer](https://github.com/apple/foundationdb/blob/main/design/tuple.md)
//! - [FoundationDB Data Modeling](https://apple.github.io/foundationdb/data-modeling.html)
//! - [Subspace Pattern](https://forums.foundationdb.org/t/application-design-using-subspace-and-tuple/452)

pub mod subspace;
pub mod tuple;
pub mod versionstamp;

pub use subspace::strinc;
pub use subspace::Subspace;
pub use subspace::SubspaceError;
pub use tuple::Element;
pub use tuple::Tuple;
pub use tuple::TupleError;
pub use versionstamp::Versionstamp;
pub use versionstamp::VersionstampError;

#[cfg(test)]
mod proptest;
