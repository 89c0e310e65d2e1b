//! # Cayley table classification

#![warn(clippy::pedantic)]

mod cache;

pub mod algebra;
pub mod elems;
pub mod prelude;
pub mod table;
use prelude::*;

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 2]>;

/// [`smallvec::smallvec`] coerced into [`SmallVec`].
#[macro_export]
macro_rules! smallvec {
    ($elem: expr; $n: expr) => (
        SmallVec::from_elem($elem, $n)
    );
    ($($x: expr), *$(,)*) => ({
        let vec: SmallVec<_> = smallvec::smallvec![$($x,)*];
        vec
    });
}

fn main() -> Result<(), Error> {
    let mut z3: Algebra<u32> = "3  0 1 2  0 1 2 1 2 0 2 0 1".parse()?;

    println!("S: {}", z3.elems());
    println!("{}", z3.table());
    match z3.kind() {
        Some(kind) => println!("(S, ∘) is a {kind}"),
        None => println!("(S, ∘) is not closed"),
    }
    Ok(())
}
