#![no_main]

use intbitset::{Bitset, Cardinality, SubsetRelation};
use libfuzzer_sys::arbitrary::{self, Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use roaring::RoaringBitmap;
use std::mem;

// Values are folded into this range so that cofinite iteration stays cheap.
const LIMIT: u32 = 1 << 16;

#[derive(Debug, Copy, Clone)]
struct Num(u32);

impl<'a> Arbitrary<'a> for Num {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(u.arbitrary::<u32>()? % LIMIT))
    }
}

#[derive(Arbitrary, Debug)]
enum Operation {
    Add(Num),
    Remove(Num),
    Reset,
    Complement,
    Contains(Num),
    NextMember(Num),
    CheckCardinality,
    CheckIter,
    Union,
    Intersect,
    Xor,
    Difference,
    UnionInPlace,
    IntersectInPlace,
    XorInPlace,
    DifferenceInPlace,
    Compare,
    SwapSides,
    BufferRoundtrip,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    lhs_universe: bool,
    rhs_universe: bool,
    initial_lhs: Vec<Num>,
    initial_rhs: Vec<Num>,
    ops: Vec<Operation>,
}

/// Reference model: a roaring bitmap, complemented when `cofinite` is set.
#[derive(Clone)]
struct Model {
    rb: RoaringBitmap,
    cofinite: bool,
}

impl Model {
    fn contains(&self, v: u32) -> bool {
        self.rb.contains(v) != self.cofinite
    }

    fn add(&mut self, v: u32) {
        if self.cofinite {
            self.rb.remove(v);
        } else {
            self.rb.insert(v);
        }
    }

    fn remove(&mut self, v: u32) {
        if self.cofinite {
            self.rb.insert(v);
        } else {
            self.rb.remove(v);
        }
    }

    fn complement(&self) -> Model {
        Model {
            rb: self.rb.clone(),
            cofinite: !self.cofinite,
        }
    }

    fn union(&self, other: &Model) -> Model {
        let (rb, cofinite) = match (self.cofinite, other.cofinite) {
            (false, false) => (&self.rb | &other.rb, false),
            (false, true) => (&other.rb - &self.rb, true),
            (true, false) => (&self.rb - &other.rb, true),
            (true, true) => (&self.rb & &other.rb, true),
        };
        Model { rb, cofinite }
    }

    fn intersection(&self, other: &Model) -> Model {
        let (rb, cofinite) = match (self.cofinite, other.cofinite) {
            (false, false) => (&self.rb & &other.rb, false),
            (false, true) => (&self.rb - &other.rb, false),
            (true, false) => (&other.rb - &self.rb, false),
            (true, true) => (&self.rb | &other.rb, true),
        };
        Model { rb, cofinite }
    }

    fn symmetric_difference(&self, other: &Model) -> Model {
        Model {
            rb: &self.rb ^ &other.rb,
            cofinite: self.cofinite != other.cofinite,
        }
    }

    fn difference(&self, other: &Model) -> Model {
        self.intersection(&other.complement())
    }

    fn next_member(&self, after: u32) -> Option<u32> {
        (after + 1..LIMIT + 1).find(|&v| self.contains(v))
    }
}

fn build(universe: bool, vals: &[Num]) -> (Bitset, Model) {
    let mut bs = if universe { Bitset::universe() } else { Bitset::new() };
    let mut model = Model {
        rb: RoaringBitmap::new(),
        cofinite: universe,
    };
    for &Num(v) in vals {
        bs.add(v);
        model.add(v);
    }
    (bs, model)
}

fn check_equal(bs: &Bitset, model: &Model) {
    let expected = if model.cofinite {
        Cardinality::Infinite
    } else {
        Cardinality::Finite(model.rb.len())
    };
    assert_eq!(bs.cardinality(), expected, "cardinality mismatch");
    assert_eq!(bs.is_empty(), !model.cofinite && model.rb.is_empty(), "is_empty mismatch");

    let actual: Vec<u32> = bs.iter().take_while(|&v| v <= LIMIT).collect();
    let expected: Vec<u32> = if model.cofinite {
        (0..=LIMIT).filter(|&v| model.contains(v)).collect()
    } else {
        model.rb.iter().collect()
    };
    assert_eq!(actual, expected, "iter mismatch");
}

fn relation(x: &Model, y: &Model) -> SubsetRelation {
    let x_extra = !x.difference(y).rb.is_empty() || (x.cofinite && !y.cofinite);
    let y_extra = !y.difference(x).rb.is_empty() || (y.cofinite && !x.cofinite);
    SubsetRelation::from_code((u8::from(x_extra) << 1) | u8::from(y_extra))
}

fuzz_target!(|input: FuzzInput| {
    let (mut lhs, mut lhs_m) = build(input.lhs_universe, &input.initial_lhs);
    let (mut rhs, mut rhs_m) = build(input.rhs_universe, &input.initial_rhs);

    check_equal(&lhs, &lhs_m);
    check_equal(&rhs, &rhs_m);

    for op in &input.ops {
        match *op {
            Operation::Add(Num(v)) => {
                lhs.add(v);
                lhs_m.add(v);
            }
            Operation::Remove(Num(v)) => {
                lhs.remove(v);
                lhs_m.remove(v);
            }
            Operation::Reset => {
                lhs.reset();
                lhs_m.rb.clear();
            }
            Operation::Complement => {
                lhs.complement_in_place();
                lhs_m = lhs_m.complement();
            }
            Operation::Contains(Num(v)) => {
                assert_eq!(lhs.contains(v), lhs_m.contains(v), "contains({}) mismatch", v);
            }
            Operation::NextMember(Num(v)) => {
                assert_eq!(
                    lhs.next_member(Some(v)),
                    lhs_m.next_member(v),
                    "next_member({}) mismatch",
                    v
                );
            }
            Operation::CheckCardinality => {
                let expected = if lhs_m.cofinite {
                    Cardinality::Infinite
                } else {
                    Cardinality::Finite(lhs_m.rb.len())
                };
                assert_eq!(lhs.cardinality(), expected, "cardinality mismatch");
            }
            Operation::CheckIter => check_equal(&lhs, &lhs_m),
            Operation::Union => {
                lhs = lhs.union(&rhs);
                lhs_m = lhs_m.union(&rhs_m);
            }
            Operation::Intersect => {
                lhs = lhs.intersection(&rhs);
                lhs_m = lhs_m.intersection(&rhs_m);
            }
            Operation::Xor => {
                lhs = lhs.symmetric_difference(&rhs);
                lhs_m = lhs_m.symmetric_difference(&rhs_m);
            }
            Operation::Difference => {
                lhs = lhs.difference(&rhs);
                lhs_m = lhs_m.difference(&rhs_m);
            }
            Operation::UnionInPlace => {
                lhs |= &rhs;
                lhs_m = lhs_m.union(&rhs_m);
            }
            Operation::IntersectInPlace => {
                lhs &= &rhs;
                lhs_m = lhs_m.intersection(&rhs_m);
            }
            Operation::XorInPlace => {
                lhs ^= &rhs;
                lhs_m = lhs_m.symmetric_difference(&rhs_m);
            }
            Operation::DifferenceInPlace => {
                lhs -= &rhs;
                lhs_m = lhs_m.difference(&rhs_m);
            }
            Operation::Compare => {
                assert_eq!(lhs.compare(&rhs), relation(&lhs_m, &rhs_m), "compare mismatch");
            }
            Operation::SwapSides => {
                mem::swap(&mut lhs, &mut rhs);
                mem::swap(&mut lhs_m, &mut rhs_m);
            }
            Operation::BufferRoundtrip => {
                let restored = Bitset::from_bytes(&lhs.to_bytes()).unwrap();
                assert_eq!(restored.compare(&lhs), SubsetRelation::Equal, "roundtrip mismatch");
                lhs = restored;
            }
        }
    }

    check_equal(&lhs, &lhs_m);
    check_equal(&rhs, &rhs_m);
});
