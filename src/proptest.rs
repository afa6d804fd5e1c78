//! Property-based tests for the key encoding layer.
//!
//! These tests verify key invariants of the tuple encoding:
//!
//! 1. **Roundtrip**: unpack(pack(x)) == x for all valid tuples
//! 2. **Ordering**: pack(a) < pack(b) iff a < b (lexicographic preservation)
//! 3. **Prefix stability**: prefix(pack(a, b)) == pack(a) for any b
//! 4. **Type consistency**: Same input always produces same output
//!
//! # References
//!
//! - [FoundationDB Tuple Layer](https://github.com/apple/foundationdb/blob/main/design/tuple.md)
//! - [Proptest Guide](https://proptest-rs.github.io/proptest/proptest/index.html)

use proptest::prelude::*;
use uuid::Uuid;

use crate::subspace::strinc;
use crate::Element;
use crate::Subspace;
use crate::Tuple;
use crate::Versionstamp;

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Strategy for generating arbitrary Element values.
///
/// Incomplete versionstamps are excluded: they are a write-only construct
/// covered by the dedicated packing properties below.
fn arb_element() -> impl Strategy<Value = Element> {
    prop_oneof![
        // Null
        Just(Element::Null),
        // Small strings (most common case)
        "[a-zA-Z0-9_]{0,20}".prop_map(Element::String),
        // Strings with special characters
        ".*".prop_map(|s: String| {
            // Filter to printable ASCII to avoid UTF-8 issues in tests
            Element::String(s.chars().filter(|c| c.is_ascii()).collect())
        }),
        // Bytes
        prop::collection::vec(any::<u8>(), 0..50).prop_map(Element::Bytes),
        // Integers across the full range
        any::<i64>().prop_map(Element::Int),
        // Small integers (common case)
        (-1000i64..1000i64).prop_map(Element::Int),
        // Booleans
        any::<bool>().prop_map(Element::Bool),
        // Floats (avoid NaN for equality testing)
        (-1e10f32..1e10f32).prop_map(Element::Float),
        // Doubles (avoid NaN for equality testing)
        (-1e100f64..1e100f64).prop_map(Element::Double),
        // UUIDs
        any::<[u8; 16]>().prop_map(|b| Element::Uuid(Uuid::from_bytes(b))),
        // Complete versionstamps
        (any::<[u8; 10]>(), any::<u16>()).prop_map(|(v, u)| {
            Element::Versionstamp(Versionstamp::complete(&v, u).expect("10-byte version"))
        }),
    ]
}

/// Strategy for generating tuples with 0-5 elements.
fn arb_tuple() -> impl Strategy<Value = Tuple> {
    prop::collection::vec(arb_element(), 0..5).prop_map(|elements| {
        let mut tuple = Tuple::new();
        for elem in elements {
            tuple.push_mut(elem);
        }
        tuple
    })
}

/// Strategy for generating simple string tuples (for ordering tests).
fn arb_string_tuple() -> impl Strategy<Value = Tuple> {
    prop::collection::vec("[a-z]{1,5}", 1..4).prop_map(|strings| {
        let mut tuple = Tuple::new();
        for s in strings {
            tuple.push_mut(Element::String(s));
        }
        tuple
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Property: pack followed by unpack is identity (roundtrip).
    ///
    /// This is the fundamental correctness property of any serialization format.
    #[test]
    fn prop_roundtrip(tuple in arb_tuple()) {
        let packed = tuple.pack();
        let unpacked = Tuple::unpack(&packed).expect("unpack should succeed");
        prop_assert_eq!(tuple, unpacked, "roundtrip failed");
    }

    /// Property: Integer encoding preserves ordering.
    ///
    /// For any two integers a < b, their packed representations should
    /// maintain the same ordering: pack(a) < pack(b).
    #[test]
    fn prop_int_ordering(a in any::<i64>(), b in any::<i64>()) {
        let tuple_a = Tuple::new().push(a);
        let tuple_b = Tuple::new().push(b);

        let packed_a = tuple_a.pack();
        let packed_b = tuple_b.pack();

        match a.cmp(&b) {
            std::cmp::Ordering::Less => prop_assert!(packed_a < packed_b, "ordering failed: {} < {} but {:?} >= {:?}", a, b, packed_a, packed_b),
            std::cmp::Ordering::Greater => prop_assert!(packed_a > packed_b, "ordering failed: {} > {} but {:?} <= {:?}", a, b, packed_a, packed_b),
            std::cmp::Ordering::Equal => prop_assert_eq!(packed_a, packed_b),
        }
    }

    /// Property: Float encoding preserves ordering, including across zero
    /// and at the infinities.
    #[test]
    fn prop_double_ordering(
        a in prop::num::f64::POSITIVE | prop::num::f64::NEGATIVE | prop::num::f64::NORMAL
            | prop::num::f64::ZERO | prop::num::f64::INFINITE,
        b in prop::num::f64::POSITIVE | prop::num::f64::NEGATIVE | prop::num::f64::NORMAL
            | prop::num::f64::ZERO | prop::num::f64::INFINITE,
    ) {
        let packed_a = Tuple::new().push(a).pack();
        let packed_b = Tuple::new().push(b).pack();

        if a < b {
            prop_assert!(packed_a < packed_b, "ordering failed: {} < {} but {:?} >= {:?}", a, b, packed_a, packed_b);
        } else if a > b {
            prop_assert!(packed_a > packed_b, "ordering failed: {} > {} but {:?} <= {:?}", a, b, packed_a, packed_b);
        }
    }

    /// Property: String encoding preserves ordering.
    ///
    /// For any two strings a < b (lexicographically), their packed
    /// representations should maintain the same ordering.
    #[test]
    fn prop_string_ordering(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
        let tuple_a = Tuple::new().push(&a as &str);
        let tuple_b = Tuple::new().push(&b as &str);

        let packed_a = tuple_a.pack();
        let packed_b = tuple_b.pack();

        match a.cmp(&b) {
            std::cmp::Ordering::Less => prop_assert!(packed_a < packed_b, "ordering failed: {:?} < {:?} but packed {:?} >= {:?}", a, b, packed_a, packed_b),
            std::cmp::Ordering::Greater => prop_assert!(packed_a > packed_b),
            std::cmp::Ordering::Equal => prop_assert_eq!(packed_a, packed_b),
        }
    }

    /// Property: Prefix stability for tuples.
    ///
    /// If tuple A is a prefix of tuple B (A ++ C = B), then
    /// pack(A) is a prefix of pack(B).
    #[test]
    fn prop_prefix_stability(prefix in arb_string_tuple(), suffix in arb_string_tuple()) {
        let packed_prefix = prefix.pack();

        // Create the combined tuple
        let mut combined = prefix.clone();
        for elem in suffix.iter() {
            combined.push_mut(elem.clone());
        }
        let packed_combined = combined.pack();

        // The packed prefix should be a prefix of the packed combined tuple
        prop_assert!(
            packed_combined.starts_with(&packed_prefix),
            "prefix stability violated: packed prefix {:?} is not a prefix of packed combined {:?}",
            packed_prefix,
            packed_combined
        );
    }

    /// Property: Range queries capture all proper extensions of a prefix.
    #[test]
    fn prop_range_captures_prefix(prefix in arb_string_tuple(), suffix in arb_string_tuple()) {
        let (start, end) = prefix.range();

        // Create a key that extends the prefix
        let mut key_tuple = prefix.clone();
        for elem in suffix.iter() {
            key_tuple.push_mut(elem.clone());
        }
        let key = key_tuple.pack();

        // The key should be in range
        prop_assert!(
            key >= start && key < end,
            "range query failed: key {:?} not in range [{:?}, {:?})",
            key,
            start,
            end
        );
    }

    /// Property: Subspace pack/unpack roundtrip.
    ///
    /// For any subspace S and key K, unpack(S, pack(S, K)) == K.
    #[test]
    fn prop_subspace_roundtrip(
        prefix in arb_string_tuple(),
        key in arb_string_tuple()
    ) {
        let subspace = Subspace::new(prefix);
        let packed = subspace.pack(&key);
        let unpacked = subspace.unpack(&packed).expect("unpack should succeed");
        prop_assert_eq!(key, unpacked, "subspace roundtrip failed");
    }

    /// Property: Subspace contains its own keys.
    ///
    /// For any subspace S and key K, S.contains(pack(S, K)) is true.
    #[test]
    fn prop_subspace_contains_own_keys(
        prefix in arb_string_tuple(),
        key in arb_string_tuple()
    ) {
        let subspace = Subspace::new(prefix);
        let packed = subspace.pack(&key);
        prop_assert!(
            subspace.contains(&packed),
            "subspace should contain its own keys"
        );
    }

    /// Property: Different subspaces don't contain each other's keys.
    ///
    /// For subspaces S1 and S2 with different prefixes, keys from S1
    /// should not be contained in S2 (unless S1's prefix is a prefix of S2's).
    #[test]
    fn prop_subspace_isolation(
        prefix1 in "[a-m]{1,3}",
        prefix2 in "[n-z]{1,3}",
        key in arb_string_tuple()
    ) {
        // Ensure prefixes are different (a-m vs n-z guarantees this)
        let sub1 = Subspace::new(Tuple::new().push(&prefix1 as &str));
        let sub2 = Subspace::new(Tuple::new().push(&prefix2 as &str));

        let key1 = sub1.pack(&key);
        let key2 = sub2.pack(&key);

        // Each subspace should contain only its own keys
        prop_assert!(sub1.contains(&key1));
        prop_assert!(!sub1.contains(&key2));
        prop_assert!(sub2.contains(&key2));
        prop_assert!(!sub2.contains(&key1));
    }

    /// Property: Nested subspaces maintain hierarchy.
    ///
    /// If S2 = S1.subspace(X), then S1.contains(key) for all keys in S2.
    #[test]
    fn prop_nested_subspace_hierarchy(
        outer_prefix in arb_string_tuple(),
        inner_suffix in arb_string_tuple(),
        key in arb_string_tuple()
    ) {
        let outer = Subspace::new(outer_prefix);
        let inner = outer.subspace(&inner_suffix);

        let inner_key = inner.pack(&key);

        // Key should be in both inner and outer subspace
        prop_assert!(inner.contains(&inner_key), "key not in inner subspace");
        prop_assert!(outer.contains(&inner_key), "key not in outer subspace");
    }

    /// Property: strinc produces the tight exclusive upper bound.
    ///
    /// For any prefix with at least one non-0xFF byte, every extension of
    /// the prefix sorts strictly below strinc(prefix), and strinc(prefix)
    /// sorts strictly above the prefix itself.
    #[test]
    fn prop_strinc_bounds_extensions(
        prefix in prop::collection::vec(any::<u8>(), 1..20),
        suffix in prop::collection::vec(any::<u8>(), 0..20)
    ) {
        prop_assume!(prefix.iter().any(|&b| b != 0xFF));

        let end = strinc(&prefix).expect("prefix has a non-0xFF byte");

        let mut extended = prefix.clone();
        extended.extend_from_slice(&suffix);

        prop_assert!(prefix < end, "strinc not above prefix");
        prop_assert!(extended < end, "extension {:?} not below strinc bound {:?}", extended, end);
    }

    /// Property: prefix_range covers exactly the keys extending the prefix.
    #[test]
    fn prop_prefix_range_covers_extensions(
        prefix in prop::collection::vec(any::<u8>(), 1..10),
        suffix in prop::collection::vec(any::<u8>(), 0..10)
    ) {
        prop_assume!(prefix.iter().any(|&b| b != 0xFF));

        let sub = Subspace::from_bytes(prefix.clone());
        let (start, end) = sub.prefix_range().expect("prefix has a non-0xFF byte");

        let mut key = prefix;
        key.extend_from_slice(&suffix);

        prop_assert!(key >= start && key < end);
    }

    /// Property: versionstamp-aware packing addresses the placeholder.
    ///
    /// For any tuple with exactly one incomplete versionstamp, the 4-byte
    /// little-endian trailer points at the 10-byte 0xFF placeholder.
    #[test]
    fn prop_pack_with_versionstamp_offset(
        before in arb_string_tuple(),
        after in arb_string_tuple(),
        user_version in any::<u16>(),
        prefix in prop::collection::vec(any::<u8>(), 0..10)
    ) {
        let mut tuple = before;
        tuple.push_mut(Versionstamp::incomplete(user_version));
        for elem in after.iter() {
            tuple.push_mut(elem.clone());
        }

        let key = tuple.pack_with_versionstamp(&prefix).expect("exactly one incomplete versionstamp");

        let trailer: [u8; 4] = key[key.len() - 4..].try_into().expect("4-byte trailer");
        let offset = u32::from_le_bytes(trailer) as usize;

        prop_assert_eq!(&key[offset..offset + 10], &[0xFF; 10][..]);
        // Body equals the plain packing shifted by the caller prefix
        let packed = tuple.pack();
        prop_assert_eq!(&key[prefix.len()..key.len() - 4], packed.as_slice());
    }

    /// Property: Deterministic encoding.
    ///
    /// The same tuple should always produce the same packed bytes.
    #[test]
    fn prop_deterministic(tuple in arb_tuple()) {
        let packed1 = tuple.pack();
        let packed2 = tuple.pack();
        prop_assert_eq!(packed1, packed2, "encoding should be deterministic");
    }
}

// =============================================================================
// Additional Non-Proptest Tests
// =============================================================================

#[test]
fn test_negative_integer_ordering() {
    // Specific test for negative integer ordering edge cases
    let values: Vec<i64> = vec![
        i64::MIN,
        i64::MIN + 1,
        -1_000_000_000_000,
        -1000,
        -256,
        -255,
        -128,
        -127,
        -2,
        -1,
        0,
        1,
        2,
        127,
        128,
        255,
        256,
        1000,
        1_000_000_000_000,
        i64::MAX - 1,
        i64::MAX,
    ];

    let packed: Vec<Vec<u8>> = values.iter().map(|&n| Tuple::new().push(n).pack()).collect();

    for i in 1..packed.len() {
        assert!(
            packed[i - 1] < packed[i],
            "ordering failed: {} < {} but {:?} >= {:?}",
            values[i - 1],
            values[i],
            packed[i - 1],
            packed[i]
        );
    }
}

#[test]
fn test_subspace_range_disjoint() {
    // Test that sibling subspaces have disjoint ranges
    let users = Subspace::new(Tuple::new().push("users"));
    let orders = Subspace::new(Tuple::new().push("orders"));

    let (users_start, users_end) = users.range();
    let (orders_start, orders_end) = orders.range();

    // Since "orders" < "users" lexicographically, orders range should be before users
    assert!(orders_end <= users_start || users_end <= orders_start);
}
