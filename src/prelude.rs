//! Crate prelude.

// The actual prelude.
pub use crate::{
    algebra::{Algebra, Error, Inverses, Kind, ParseError},
    elems::Elems,
    table::{AllocError, IndexError, Table},
};

// Convenient imports within the crate.
pub(crate) use crate::{cache::Slot, SmallVec};
pub(crate) use derive_more::IntoIterator;
pub(crate) use std::{
    collections::TryReserveError,
    fmt::{Debug, Display, Formatter, Result as FmtResult, Write},
    str::FromStr,
};
