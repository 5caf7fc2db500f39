use crate::*;

const PROBE: u32 = 1024;

fn set(values: &[u32]) -> Bitset {
    values.iter().copied().collect()
}

/// The universe minus `absent`.
fn cofinite(absent: &[u32]) -> Bitset {
    let mut bs = Bitset::universe();
    for &v in absent {
        bs.remove(v);
    }
    bs
}

fn samples() -> Vec<Bitset> {
    vec![
        Bitset::new(),
        Bitset::with_capacity(4096),
        Bitset::universe(),
        set(&[0, 1, 63, 64, 65]),
        set(&[2, 64, 500]),
        set(&[900]),
        cofinite(&[1, 64]),
        cofinite(&[0, 500, 777]),
    ]
}

fn assert_members(result: &Bitset, expected: impl Fn(u32) -> bool, what: &str) {
    for v in (0..PROBE).chain([10_000, 1_000_000, u32::MAX]) {
        assert_eq!(result.contains(v), expected(v), "{what}: contains({v}) mismatch");
    }
}

#[test]
fn test_union_matches_membership() {
    for a in &samples() {
        for b in &samples() {
            let c = a.union(b);
            assert_members(&c, |v| a.contains(v) || b.contains(v), "union");
            assert_eq!(c.is_infinite(), a.is_infinite() || b.is_infinite());
        }
    }
}

#[test]
fn test_intersection_matches_membership() {
    for a in &samples() {
        for b in &samples() {
            let c = a.intersection(b);
            assert_members(&c, |v| a.contains(v) && b.contains(v), "intersection");
            assert_eq!(c.is_infinite(), a.is_infinite() && b.is_infinite());
        }
    }
}

#[test]
fn test_symmetric_difference_matches_membership() {
    for a in &samples() {
        for b in &samples() {
            let c = a.symmetric_difference(b);
            assert_members(&c, |v| a.contains(v) != b.contains(v), "xor");
            assert_eq!(c.is_infinite(), a.is_infinite() != b.is_infinite());
        }
    }
}

#[test]
fn test_difference_matches_membership() {
    for a in &samples() {
        for b in &samples() {
            let c = a.difference(b);
            assert_members(&c, |v| a.contains(v) && !b.contains(v), "difference");
            assert_eq!(c.is_infinite(), a.is_infinite() && !b.is_infinite());
        }
    }
}

#[test]
fn test_in_place_agrees_with_binary() {
    for a in &samples() {
        for b in &samples() {
            let mut c = a.clone();
            c.union_with(b);
            assert_eq!(c.compare(&a.union(b)), SubsetRelation::Equal);

            let mut c = a.clone();
            c.intersect_with(b);
            assert_eq!(c.compare(&a.intersection(b)), SubsetRelation::Equal);

            let mut c = a.clone();
            c.symmetric_difference_with(b);
            assert_eq!(c.compare(&a.symmetric_difference(b)), SubsetRelation::Equal);

            let mut c = a.clone();
            c.difference_with(b);
            assert_eq!(c.compare(&a.difference(b)), SubsetRelation::Equal);
        }
    }
}

#[test]
fn test_in_place_on_wide_destination_updates_every_word() {
    // The destination stores far more words than either significant size.
    let mut dst = Bitset::with_capacity(10_000);
    dst.union_with(&Bitset::universe());
    assert!(dst.contains(5_000));
    assert!(dst.contains(9_999));
    assert!(dst.contains(1_000_000));
    assert_eq!(dst.cardinality(), Cardinality::Infinite);

    let mut dst = Bitset::universe_with_capacity(10_000);
    dst.intersect_with(&set(&[3]));
    assert!(dst.contains(3));
    assert!(!dst.contains(5_000));
    assert_eq!(dst.cardinality(), Cardinality::Finite(1));
}

#[test]
fn test_binary_ops_leave_operands_untouched() {
    let a = set(&[1, 5000]);
    let b = cofinite(&[2]);
    let (alloc_a, alloc_b) = (a.allocated(), b.allocated());

    let _ = a.union(&b);
    let _ = a.intersection(&b);
    let _ = a.symmetric_difference(&b);
    let _ = a.difference(&b);

    assert_eq!(a.allocated(), alloc_a);
    assert_eq!(b.allocated(), alloc_b);
    assert_eq!(a.cardinality(), Cardinality::Finite(2));
    assert!(!b.contains(2));
}

#[test]
fn test_in_place_leaves_source_untouched() {
    let mut a = set(&[1]);
    let b = set(&[1, 5000]);
    let alloc_b = b.allocated();

    a.union_with(&b);
    assert!(a.contains(5000));
    assert_eq!(b.allocated(), alloc_b);
    assert_eq!(b.cardinality(), Cardinality::Finite(2));
}

#[test]
fn test_idempotence() {
    for a in &samples() {
        assert_eq!(a.union(a).compare(a), SubsetRelation::Equal);
        assert_eq!(a.intersection(a).compare(a), SubsetRelation::Equal);
        assert!(a.difference(a).is_empty());
        assert!(a.symmetric_difference(a).is_empty());
    }
}

#[test]
fn test_universe_algebra() {
    let universe = Bitset::universe();
    let empty = Bitset::new();

    for a in &samples() {
        let u = universe.union(a);
        assert_eq!(u.compare(&universe), SubsetRelation::Equal);
        assert_eq!(u.cardinality(), Cardinality::Infinite);

        let e = empty.intersection(a);
        assert!(e.is_empty());
        assert_eq!(e.cardinality(), Cardinality::Finite(0));
    }

    assert_eq!(universe.cardinality(), Cardinality::Infinite);
}

#[test]
fn test_result_caches_are_recomputed() {
    let a = set(&[1, 2, 3]);
    let b = set(&[3, 4]);

    let c = a.union(&b);
    assert_eq!(c.cardinality(), Cardinality::Finite(4));
    assert_eq!(c.significant_size(), 1);

    let mut d = a.clone();
    assert_eq!(d.cardinality(), Cardinality::Finite(3));
    d.difference_with(&b);
    assert_eq!(d.cardinality(), Cardinality::Finite(2));
}

#[test]
fn test_difference_of_cofinite_sets_is_finite() {
    let a = cofinite(&[1]);
    let b = cofinite(&[1, 2, 3]);
    let c = a.difference(&b);
    assert!(!c.is_infinite());
    assert_eq!(c.iter().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn test_complement() {
    let a = set(&[0, 7, 300]);
    let c = a.complement();
    assert!(c.is_infinite());
    assert!(!c.contains(7));
    assert!(c.contains(8));
    assert_eq!(c.significant_size(), a.significant_size());
    assert_eq!(c.complement().compare(&a), SubsetRelation::Equal);

    let mut b = cofinite(&[4]);
    b.complement_in_place();
    assert_eq!(b.cardinality(), Cardinality::Finite(1));
    assert!(b.contains(4));

    assert_eq!((!&a).compare(&c), SubsetRelation::Equal);
}

#[test]
fn test_adapt_grows_both() {
    let mut a = set(&[1]);
    let mut b = set(&[1000]);
    let len = a.adapt(&mut b);

    assert_eq!(len, b.significant_size() + 1);
    assert!(a.allocated() >= len);
    assert!(b.allocated() >= len);
    assert!(a.contains(1));
    assert!(b.contains(1000));
    assert_eq!(a.cardinality(), Cardinality::Finite(1));

    let mut u = Bitset::universe();
    let len = u.adapt(&mut a);
    assert_eq!(len, 2);
    assert!(u.contains(5_000));
}

#[test]
fn test_compare() {
    let a = set(&[1, 2]);
    let b = set(&[1, 2, 3]);
    let c = set(&[4]);

    assert_eq!(a.compare(&a), SubsetRelation::Equal);
    assert_eq!(a.compare(&b), SubsetRelation::Subset);
    assert_eq!(b.compare(&a), SubsetRelation::Superset);
    assert_eq!(a.compare(&c), SubsetRelation::Incomparable);

    assert_eq!(SubsetRelation::Equal.code(), 0);
    assert_eq!(a.compare(&b).code(), 1);
    assert_eq!(b.compare(&a).code(), 2);
    assert_eq!(a.compare(&c).code(), 3);
}

#[test]
fn test_compare_ignores_capacity() {
    let mut a = Bitset::with_capacity(64 * 100);
    a.add(3);
    let b = set(&[3]);
    assert_eq!(a.compare(&b), SubsetRelation::Equal);
    assert_eq!(a, b);

    let mut u = Bitset::universe();
    u.resize_to(50);
    assert_eq!(u, Bitset::universe());
}

#[test]
fn test_compare_with_cofinite() {
    let finite = set(&[1, 2, 3]);
    let almost = cofinite(&[9]);
    let universe = Bitset::universe();

    assert_eq!(finite.compare(&almost), SubsetRelation::Subset);
    assert_eq!(almost.compare(&finite), SubsetRelation::Superset);
    assert_eq!(almost.compare(&universe), SubsetRelation::Subset);
    assert_eq!(set(&[9]).compare(&almost), SubsetRelation::Incomparable);
    assert_eq!(cofinite(&[1]).compare(&cofinite(&[2])), SubsetRelation::Incomparable);
    assert_eq!(Bitset::new().compare(&universe), SubsetRelation::Subset);
}

#[test]
fn test_compare_equal_iff_symmetric_difference_empty() {
    for a in &samples() {
        for b in &samples() {
            assert_eq!(
                a.compare(b) == SubsetRelation::Equal,
                a.symmetric_difference(b).is_empty()
            );
        }
    }
}

#[test]
fn test_subset_ordering() {
    let a = set(&[1]);
    let b = set(&[1, 2]);
    let c = set(&[3]);

    assert!(a < b);
    assert!(b > a);
    assert!(a <= a.clone());
    assert_eq!(a.partial_cmp(&c), None);
    assert!(a.is_subset(&b));
    assert!(b.is_superset(&a));
    assert!(!b.is_subset(&a));
    assert!(a.is_subset(&Bitset::universe()));
}

#[test]
fn test_subset_relation_from_code() {
    for code in 0..4u8 {
        assert_eq!(SubsetRelation::from_code(code).code(), code);
    }
    assert_eq!(SubsetRelation::from_code(0b111), SubsetRelation::Incomparable);
}

#[test]
fn test_operators() {
    let a = set(&[1, 2, 3]);
    let b = set(&[3, 4]);

    assert_eq!(&a | &b, set(&[1, 2, 3, 4]));
    assert_eq!(&a & &b, set(&[3]));
    assert_eq!(&a ^ &b, set(&[1, 2, 4]));
    assert_eq!(&a - &b, set(&[1, 2]));

    let mut c = a.clone();
    c |= &b;
    assert_eq!(c, set(&[1, 2, 3, 4]));
    c &= &b;
    assert_eq!(c, set(&[3, 4]));
    c ^= &set(&[4, 5]);
    assert_eq!(c, set(&[3, 5]));
    c -= &set(&[3]);
    assert_eq!(c, set(&[5]));
}

/// Run `op` on `dst` after its significant size has been cached, then check
/// the size and the exported words against the expected result.
fn check_in_place_refreshes_size(
    mut dst: Bitset,
    src: &Bitset,
    op: fn(&mut Bitset, &Bitset),
    expected: &Bitset,
) {
    let _ = dst.significant_size();
    op(&mut dst, src);

    assert_eq!(dst.significant_size(), expected.significant_size());
    assert_eq!(dst.to_words(), expected.to_words());

    let restored = Bitset::from_words(&dst.to_words()).unwrap();
    assert_eq!(restored, *expected);
    for v in 0..PROBE {
        assert_eq!(restored.contains(v), expected.contains(v), "contains({v})");
    }
}

#[test]
fn test_in_place_ops_refresh_cached_size() {
    check_in_place_refreshes_size(
        set(&[1]),
        &set(&[1000]),
        Bitset::union_with,
        &set(&[1, 1000]),
    );
    check_in_place_refreshes_size(
        set(&[1, 1000]),
        &set(&[1]),
        Bitset::intersect_with,
        &set(&[1]),
    );
    check_in_place_refreshes_size(
        set(&[1]),
        &set(&[1000]),
        Bitset::symmetric_difference_with,
        &set(&[1, 1000]),
    );
    check_in_place_refreshes_size(
        set(&[1, 1000]),
        &set(&[1000]),
        Bitset::difference_with,
        &set(&[1]),
    );

    check_in_place_refreshes_size(
        cofinite(&[3]),
        &cofinite(&[700]),
        Bitset::intersect_with,
        &cofinite(&[3, 700]),
    );
    check_in_place_refreshes_size(
        cofinite(&[3, 700]),
        &cofinite(&[3]),
        Bitset::union_with,
        &cofinite(&[3]),
    );

    let mut grown = set(&[1]);
    assert_eq!(grown.significant_size(), 1);
    grown.union_with(&set(&[1000]));
    assert_eq!(grown.significant_size(), 1000 / 64 + 1);
    assert!(Bitset::from_words(&grown.to_words()).unwrap().contains(1000));
}
