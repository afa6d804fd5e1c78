use std::cmp::Ordering;

use uuid::Uuid;

use super::tuple_type::Tuple;
use super::BYTES_CODE;
use super::DOUBLE_CODE;
use super::FALSE_CODE;
use super::FLOAT_CODE;
use super::NESTED_CODE;
use super::NULL_CODE;
use super::NULL_ESCAPE;
use super::STRING_CODE;
use super::TRUE_CODE;
use super::UUID_CODE;
use super::VERSIONSTAMP_CODE;
use crate::versionstamp::Versionstamp;

// =============================================================================
// Element Type
// =============================================================================

/// A single element within a tuple.
///
/// Elements are typed and can be compared for ordering. The ordering matches
/// the lexicographic ordering of the packed bytes, which is also the
/// cross-type ordering the type-code table defines: nulls sort first, then
/// byte strings, strings, nested tuples, integers by numeric value, floats,
/// booleans, uuids, and versionstamps last.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Null value (sorts first).
    Null,

    /// Byte string.
    Bytes(Vec<u8>),

    /// UTF-8 string.
    String(String),

    /// Signed 64-bit integer.
    Int(i64),

    /// Boolean value.
    Bool(bool),

    /// 32-bit floating point.
    Float(f32),

    /// 64-bit floating point.
    Double(f64),

    /// UUID (16 bytes, big-endian field layout).
    Uuid(Uuid),

    /// Transactional versionstamp (sorts after every other type).
    Versionstamp(Versionstamp),

    /// Nested tuple.
    Tuple(Tuple),
}

impl Eq for Element {}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare by packing - this matches the on-disk key ordering
        let self_packed = self.pack();
        let other_packed = other.pack();
        self_packed.cmp(&other_packed)
    }
}

impl Element {
    /// Pack this element into bytes.
    fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.pack_into(&mut buf, &mut None);
        buf
    }

    /// Pack this element into an existing buffer.
    ///
    /// `placeholder_offset` records the buffer position of the first byte of
    /// the 10-byte transaction-version placeholder of the first incomplete
    /// versionstamp encountered, for versionstamp-aware packing. Callers
    /// that do not care pass `&mut None` and ignore the result.
    pub(super) fn pack_into(&self, buf: &mut Vec<u8>, placeholder_offset: &mut Option<usize>) {
        match self {
            Element::Null => {
                buf.push(NULL_CODE);
            }
            Element::Bytes(bytes) => {
                buf.push(BYTES_CODE);
                super::encoding::encode_bytes_with_null_escaping(bytes, buf);
                buf.push(0x00); // Terminator
            }
            Element::String(s) => {
                buf.push(STRING_CODE);
                super::encoding::encode_bytes_with_null_escaping(s.as_bytes(), buf);
                buf.push(0x00); // Terminator
            }
            Element::Int(n) => {
                super::encoding::encode_int(*n, buf);
            }
            Element::Bool(b) => {
                buf.push(if *b { TRUE_CODE } else { FALSE_CODE });
            }
            Element::Float(f) => {
                buf.push(FLOAT_CODE);
                super::encoding::encode_float(*f, buf);
            }
            Element::Double(d) => {
                buf.push(DOUBLE_CODE);
                super::encoding::encode_double(*d, buf);
            }
            Element::Uuid(u) => {
                buf.push(UUID_CODE);
                buf.extend_from_slice(u.as_bytes());
            }
            Element::Versionstamp(vs) => {
                buf.push(VERSIONSTAMP_CODE);
                if !vs.is_complete() && placeholder_offset.is_none() {
                    // The placeholder starts right after the type code
                    *placeholder_offset = Some(buf.len());
                }
                buf.extend_from_slice(&vs.to_bytes());
            }
            Element::Tuple(t) => {
                buf.push(NESTED_CODE);
                for elem in t.iter() {
                    // Nested elements need special handling for null
                    if matches!(elem, Element::Null) {
                        buf.push(NULL_CODE);
                        buf.push(NULL_ESCAPE); // Escape null in nested context
                    } else {
                        elem.pack_into(buf, placeholder_offset);
                    }
                }
                buf.push(0x00); // Terminator
            }
        }
    }

    /// Count incomplete versionstamps in this element, recursing into
    /// nested tuples.
    pub(super) fn count_incomplete_versionstamps(&self) -> usize {
        match self {
            Element::Versionstamp(vs) if !vs.is_complete() => 1,
            Element::Tuple(t) => t.iter().map(Element::count_incomplete_versionstamps).sum(),
            _ => 0,
        }
    }
}

impl From<()> for Element {
    fn from(_: ()) -> Self {
        Element::Null
    }
}

impl From<Vec<u8>> for Element {
    fn from(v: Vec<u8>) -> Self {
        Element::Bytes(v)
    }
}

impl From<&[u8]> for Element {
    fn from(v: &[u8]) -> Self {
        Element::Bytes(v.to_vec())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::String(s)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::String(s.to_string())
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Int(n)
    }
}

impl From<i32> for Element {
    fn from(n: i32) -> Self {
        Element::Int(n as i64)
    }
}

impl From<u64> for Element {
    fn from(n: u64) -> Self {
        // Handle overflow for very large u64 values
        if n > i64::MAX as u64 {
            // For values > i64::MAX, store as bytes
            // This maintains ordering within the type but loses semantic meaning
            Element::Bytes(n.to_be_bytes().to_vec())
        } else {
            Element::Int(n as i64)
        }
    }
}

impl From<u32> for Element {
    fn from(n: u32) -> Self {
        Element::Int(n as i64)
    }
}

impl From<u8> for Element {
    fn from(n: u8) -> Self {
        Element::Int(n as i64)
    }
}

impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Element::Bool(b)
    }
}

impl From<f32> for Element {
    fn from(f: f32) -> Self {
        Element::Float(f)
    }
}

impl From<f64> for Element {
    fn from(f: f64) -> Self {
        Element::Double(f)
    }
}

impl From<Uuid> for Element {
    fn from(u: Uuid) -> Self {
        Element::Uuid(u)
    }
}

impl From<Versionstamp> for Element {
    fn from(vs: Versionstamp) -> Self {
        Element::Versionstamp(vs)
    }
}

impl From<Tuple> for Element {
    fn from(t: Tuple) -> Self {
        Element::Tuple(t)
    }
}
