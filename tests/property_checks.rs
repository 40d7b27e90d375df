//! Property checks over the order- and overlap-sensitive primitives.

use proptest::prelude::*;

use biodesign_validate::model::{Identified, Location, Range, is_first_version_newer};
use biodesign_validate::validation::best_practice::locations_overlap;

proptest! {
    /// Overlap is symmetric for spans.
    #[test]
    fn span_overlap_is_symmetric(s1 in 1u64..200, len1 in 0u64..50, s2 in 1u64..200, len2 in 0u64..50) {
        let a = Location::Range(Range {
            ident: Identified::new("urn:loc:a"),
            start: s1,
            end: s1 + len1,
            orientation: None,
        });
        let b = Location::Range(Range {
            ident: Identified::new("urn:loc:b"),
            start: s2,
            end: s2 + len2,
            orientation: None,
        });
        prop_assert_eq!(locations_overlap(&a, &b), locations_overlap(&b, &a));
    }

    /// Two versions are never both strictly newer than each other.
    #[test]
    fn version_ordering_is_antisymmetric(
        a in proptest::collection::vec(0u32..50, 1..4),
        b in proptest::collection::vec(0u32..50, 1..4),
    ) {
        let va = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
        let vb = b.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
        prop_assert!(!(is_first_version_newer(&va, &vb) && is_first_version_newer(&vb, &va)));
    }

    /// A version is never newer than itself.
    #[test]
    fn version_ordering_is_irreflexive(a in proptest::collection::vec(0u32..50, 1..4)) {
        let v = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
        prop_assert!(!is_first_version_newer(&v, &v));
    }
}
