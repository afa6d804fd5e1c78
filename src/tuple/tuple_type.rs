use std::cmp::Ordering;

use super::decoding::decode_element;
use super::element::Element;
use super::TupleError;

/// Width of the little-endian offset trailer appended by
/// [`Tuple::pack_with_versionstamp`].
const OFFSET_TRAILER_LEN: usize = 4;

// =============================================================================
// Tuple Type
// =============================================================================

/// An ordered collection of typed elements that can be packed into bytes.
///
/// Tuples are the fundamental building block for structured keys. When packed,
/// they produce bytes that sort lexicographically in the same order as the
/// original tuple elements.
///
/// # Example
///
/// ```
/// use ordkey::Tuple;
///
/// let t1 = Tuple::new().push("users").push(1i64);
/// let t2 = Tuple::new().push("users").push(2i64);
///
/// assert!(t1.pack() < t2.pack()); // Lexicographic ordering preserved
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple {
    pub(crate) elements: Vec<Element>,
}

impl Tuple {
    /// Create a new empty tuple.
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Create a tuple with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Push an element onto the tuple (builder pattern).
    pub fn push<E: Into<Element>>(mut self, element: E) -> Self {
        self.elements.push(element.into());
        self
    }

    /// Push an element onto the tuple (mutating).
    pub fn push_mut<E: Into<Element>>(&mut self, element: E) {
        self.elements.push(element.into());
    }

    /// Get the number of elements in the tuple.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the tuple is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get an element by index.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Get an iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Pack the tuple into bytes.
    ///
    /// The resulting bytes will sort lexicographically in the same order
    /// as the original tuple elements.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.elements.len() * 8);
        self.pack_into(&mut buf);
        buf
    }

    /// Pack the tuple into an existing buffer.
    pub fn pack_into(&self, buf: &mut Vec<u8>) {
        let mut placeholder_offset = None;
        for elem in &self.elements {
            elem.pack_into(buf, &mut placeholder_offset);
        }
    }

    /// Pack the tuple for a versionstamped-key write.
    ///
    /// The output is `prefix ++ packed elements ++ offset`, where `offset`
    /// is a 4-byte little-endian integer addressing the first byte of the
    /// 10-byte transaction-version placeholder inside the tuple's single
    /// incomplete versionstamp, relative to the start of the output. The
    /// transaction layer patches those 10 bytes in place at commit time
    /// without re-parsing the key.
    ///
    /// Fails if the tuple (including nested tuples) does not contain
    /// exactly one incomplete versionstamp, or if the placeholder sits
    /// beyond the range addressable by the trailer.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkey::{Tuple, Versionstamp};
    ///
    /// let t = Tuple::new().push("log").push(Versionstamp::incomplete(0));
    /// let key = t.pack_with_versionstamp(b"app/").unwrap();
    ///
    /// let trailer: [u8; 4] = key[key.len() - 4..].try_into().unwrap();
    /// let offset = u32::from_le_bytes(trailer) as usize;
    /// assert_eq!(&key[offset..offset + 10], &[0xFF; 10]);
    /// ```
    pub fn pack_with_versionstamp(&self, prefix: &[u8]) -> Result<Vec<u8>, TupleError> {
        self.validate_for_versionstamp()?;

        let mut buf = Vec::with_capacity(prefix.len() + self.elements.len() * 8 + OFFSET_TRAILER_LEN);
        buf.extend_from_slice(prefix);

        let mut placeholder_offset = None;
        for elem in &self.elements {
            elem.pack_into(&mut buf, &mut placeholder_offset);
        }

        // validate_for_versionstamp guarantees exactly one placeholder
        let offset = placeholder_offset.ok_or(TupleError::MissingVersionstamp)?;
        let trailer =
            u32::try_from(offset).map_err(|_| TupleError::VersionstampOffsetOverflow { offset })?;
        buf.extend_from_slice(&trailer.to_le_bytes());

        Ok(buf)
    }

    /// Check whether the tuple contains at least one incomplete
    /// versionstamp (recursing into nested tuples).
    pub fn has_incomplete_versionstamp(&self) -> bool {
        self.count_incomplete_versionstamps() > 0
    }

    /// Count incomplete versionstamps in the tuple, recursing into nested
    /// tuples.
    pub fn count_incomplete_versionstamps(&self) -> usize {
        self.elements.iter().map(Element::count_incomplete_versionstamps).sum()
    }

    /// Check the precondition of [`Tuple::pack_with_versionstamp`]: the
    /// tuple must contain exactly one incomplete versionstamp.
    pub fn validate_for_versionstamp(&self) -> Result<(), TupleError> {
        match self.count_incomplete_versionstamps() {
            0 => Err(TupleError::MissingVersionstamp),
            1 => Ok(()),
            count => Err(TupleError::MultipleVersionstamps { count }),
        }
    }

    /// Unpack a tuple from bytes.
    pub fn unpack(data: &[u8]) -> Result<Self, TupleError> {
        let (tuple, _consumed) = Self::unpack_partial(data)?;
        Ok(tuple)
    }

    /// Unpack a tuple from bytes, returning how many bytes were consumed.
    ///
    /// This is useful for parsing nested tuples or concatenated data.
    pub fn unpack_partial(data: &[u8]) -> Result<(Self, usize), TupleError> {
        let mut tuple = Tuple::new();
        let mut offset = 0;

        while offset < data.len() {
            let (elem, consumed) = decode_element(data, offset)?;
            tuple.elements.push(elem);
            offset += consumed;
        }

        Ok((tuple, offset))
    }

    /// Get the range of keys that extend this tuple.
    ///
    /// Returns `(start_key, end_key)` for a half-open `[start, end)` scan:
    /// - `start_key` is the packed tuple followed by 0x00
    /// - `end_key` is the packed tuple followed by 0xFF
    ///
    /// Every packed tuple that has this tuple as a proper prefix falls in
    /// the range; the bare packed tuple itself does not.
    ///
    /// # Example
    ///
    /// ```
    /// use ordkey::Tuple;
    ///
    /// let prefix = Tuple::new().push("users");
    /// let (start, end) = prefix.range();
    ///
    /// let key = Tuple::new().push("users").push(1i64).pack();
    /// assert!(key >= start && key < end);
    /// ```
    pub fn range(&self) -> (Vec<u8>, Vec<u8>) {
        let packed = self.pack();
        let mut start = packed.clone();
        start.push(0x00);
        let mut end = packed;
        end.push(0xFF); // No encoded element starts above 0x33, so this is an exclusive upper bound
        (start, end)
    }
}

impl PartialOrd for Tuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tuple {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare by packing for correct key ordering
        self.pack().cmp(&other.pack())
    }
}

impl FromIterator<Element> for Tuple {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}
