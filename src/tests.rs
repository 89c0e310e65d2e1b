//! Crate-level fixture battery.
//!
//! Each fixture is a small named structure given in the textual population
//! format, together with its full expected property profile.

use crate::prelude::*;
use concat_idents::concat_idents;

/// Generates one test per fixture, asserting every property of the structure
/// and the consistency of the classification ladder with the expected kind.
macro_rules! fixtures {
    ($($name: ident: $input: expr => {
        closed: $closed: expr,
        commutative: $commutative: expr,
        associative: $associative: expr,
        idempotent: $idempotent: expr,
        identity: $identity: expr,
        zero: $zero: expr,
        kind: $kind: expr,
    })*) => {$(
        concat_idents!(fn_name = classify_, $name {
            /// Full property profile of one fixture.
            #[test]
            fn fn_name() {
                let mut system: Algebra<u32> = $input.parse().unwrap();
                let kind: Option<Kind> = $kind;

                assert_eq!(system.is_closed(), $closed, "closure");
                assert_eq!(system.is_commutative(), $commutative, "commutativity");
                assert_eq!(system.is_associative(), $associative, "associativity");
                assert_eq!(system.is_idempotent(), $idempotent, "idempotence");
                assert_eq!(system.identity_index(), $identity, "identity");
                assert_eq!(system.zero_index(), $zero, "zero");

                assert_eq!(system.kind(), kind, "kind");
                assert_eq!(system.is_groupoid(), kind >= Some(Kind::Groupoid));
                assert_eq!(system.is_semigroup(), kind >= Some(Kind::Semigroup));
                assert_eq!(system.is_monoid(), kind >= Some(Kind::Monoid));
                assert_eq!(system.is_group(), kind >= Some(Kind::Group));
            }
        });
    )*};
}

fixtures! {
    // Addition modulo 3: the classic worked example. Every element has
    // exactly one two-sided inverse.
    z3_add: "3  0 1 2  0 1 2 1 2 0 2 0 1" => {
        closed: true,
        commutative: true,
        associative: true,
        idempotent: false,
        identity: Some(0),
        zero: None,
        kind: Some(Kind::Group),
    }

    // Addition modulo 4.
    z4_add: "4  0 1 2 3  0 1 2 3 1 2 3 0 2 3 0 1 3 0 1 2" => {
        closed: true,
        commutative: true,
        associative: true,
        idempotent: false,
        identity: Some(0),
        zero: None,
        kind: Some(Kind::Group),
    }

    // The constant operation: everything collapses to 0, which is therefore
    // a zero element; no identity can exist.
    constant: "2  0 1  0 0 0 0" => {
        closed: true,
        commutative: true,
        associative: true,
        idempotent: false,
        identity: None,
        zero: Some(0),
        kind: Some(Kind::Semigroup),
    }

    // Boolean AND: a monoid with identity 1, kept from being a group by its
    // zero element 0.
    bool_and: "2  0 1  0 0 0 1" => {
        closed: true,
        commutative: true,
        associative: true,
        idempotent: true,
        identity: Some(1),
        zero: Some(0),
        kind: Some(Kind::Monoid),
    }

    // A table with the entry 9 outside the set: not closed, hence nothing at
    // all; associativity fails without inspecting any triple.
    open_table: "2  5 7  5 7 9 5" => {
        closed: false,
        commutative: false,
        associative: false,
        idempotent: false,
        identity: None,
        zero: None,
        kind: None,
    }

    // Subtraction modulo 3: closed but neither commutative nor associative,
    // and 0 is only an identity on the right.
    sub_mod3: "3  0 1 2  0 2 1 1 0 2 2 1 0" => {
        closed: true,
        commutative: false,
        associative: false,
        idempotent: false,
        identity: None,
        zero: None,
        kind: Some(Kind::Groupoid),
    }

    // The one-element monoid: its sole element is identity and zero at once,
    // and the zero rules the group out.
    trivial: "1  0  0" => {
        closed: true,
        commutative: true,
        associative: true,
        idempotent: true,
        identity: Some(0),
        zero: Some(0),
        kind: Some(Kind::Monoid),
    }
}

/// The group of units modulo 8 under multiplication, built through the
/// cell-by-cell population path rather than the parser.
#[test]
fn units_mod_8() {
    use gcd::Gcd;

    let units: Vec<u32> = (1..8).filter(|k| k.gcd(8) == 1).collect();
    let mut system = Algebra::<u32>::new();
    system.resize(units.len()).unwrap();
    for (i, &unit) in units.iter().enumerate() {
        system.set_elem(i, unit).unwrap();
    }
    for (i, &a) in units.iter().enumerate() {
        for (j, &b) in units.iter().enumerate() {
            system.set_entry(i, j, a * b % 8).unwrap();
        }
    }

    assert_eq!(system.elems().as_slice(), &[1, 3, 5, 7]);
    assert_eq!(system.identity_index(), Some(0));
    assert_eq!(system.zero_index(), None);
    assert!(system.is_group());

    // the Klein four-group: every element is its own inverse
    for (index, inverses) in system.inverses().iter().enumerate() {
        assert_eq!(inverses.two_sided(), Some(index));
    }
    assert_eq!(system.kind(), Some(Kind::Group));
}

/// Elements need not be numeric: the free semilattice on `{a, b}` over
/// string elements, with join written as concatenation-free tokens.
#[test]
fn string_elements() {
    let mut system: Algebra<String> = "3  a b ab  a ab ab ab b ab ab ab ab".parse().unwrap();
    assert!(system.is_closed());
    assert!(system.is_commutative());
    assert!(system.is_associative());
    assert!(system.is_idempotent());
    assert_eq!(system.identity_index(), None);
    assert_eq!(system.zero_index(), Some(2));
    assert_eq!(system.kind(), Some(Kind::Semigroup));
}
