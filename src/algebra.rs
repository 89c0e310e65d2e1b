//! The property engine [`Algebra`].

use crate::prelude::*;

/// A finite set together with the full table of a binary operation on it,
/// and the machinery to decide the algebraic properties of that operation.
///
/// The element sequence and table start empty. [`Algebra::resize`] allocates
/// both to a given cardinality, population fills them cell by cell, and the
/// property accessors then evaluate lazily: each one computes its answer at
/// most once and serves it from a cache slot afterwards.
///
/// ## Invariants
///
/// - The table side always equals the element cardinality.
/// - Every mutation (resize or population write) bumps the epoch, so a cached
///   answer can never outlive the data it was computed from.
#[derive(Clone, Debug)]
pub struct Algebra<E> {
    /// The element sequence S.
    elems: Elems<E>,
    /// The operation table over S.
    table: Table<E>,
    /// Current data generation; bumped on every mutation.
    epoch: u64,
    /// One memoization slot per property.
    cache: PropCache,
}

/// One memoization slot per property of an [`Algebra`].
#[derive(Clone, Debug, Default)]
struct PropCache {
    /// Whether the operation is closed over the set.
    closure: Slot<bool>,
    /// Whether the operation commutes.
    commutative: Slot<bool>,
    /// Whether the operation associates.
    associative: Slot<bool>,
    /// Whether every element is idempotent.
    idempotent: Slot<bool>,
    /// Whether the structure is a groupoid.
    groupoid: Slot<bool>,
    /// Whether the structure is a semigroup.
    semigroup: Slot<bool>,
    /// Whether the structure is a monoid.
    monoid: Slot<bool>,
    /// Whether the structure is a group.
    group: Slot<bool>,
    /// Index of the identity element, if one exists.
    identity: Slot<Option<usize>>,
    /// Index of the zero element, if one exists.
    zero: Slot<Option<usize>>,
    /// Per-element left and right inverses.
    inverses: Slot<Vec<Inverses>>,
}

// -------------------- Errors -------------------- //

/// A token that could not be converted during population.
///
/// Population works one field at a time: tokens consumed before the failing
/// one stay applied, and nothing is silently defaulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The size token is not a non-negative integer.
    Size {
        /// The rejected token.
        token: String,
    },
    /// An element token failed to convert.
    Elem {
        /// Position of the element being read.
        index: usize,
        /// The rejected token.
        token: String,
    },
    /// A table entry token failed to convert.
    Entry {
        /// Row of the cell being read.
        row: usize,
        /// Column of the cell being read.
        col: usize,
        /// The rejected token.
        token: String,
    },
    /// The input ran out before the expected token.
    Eof,
    /// Tokens remained after a complete system was read.
    Trailing {
        /// The first leftover token.
        token: String,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Size { token } => write!(f, "malformed size token {token:?}"),
            Self::Elem { index, token } => {
                write!(f, "malformed token {token:?} for element {index}")
            }
            Self::Entry { row, col, token } => {
                write!(f, "malformed token {token:?} for cell ({row}, {col})")
            }
            Self::Eof => f.write_str("input ended before the expected token"),
            Self::Trailing { token } => write!(f, "trailing token {token:?} after the table"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Any failure the crate can report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A population token failed to convert.
    Parse(ParseError),
    /// An out-of-range access.
    Index(IndexError),
    /// A resize could not be satisfied.
    Alloc(AllocError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<IndexError> for Error {
    fn from(err: IndexError) -> Self {
        Self::Index(err)
    }
}

impl From<AllocError> for Error {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Index(err) => write!(f, "{err}"),
            Self::Alloc(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Index(err) => Some(err),
            Self::Alloc(err) => Some(err),
        }
    }
}

// -------------------- Inverses and classification -------------------- //

/// The left and right inverses of one element, as indices into the element
/// sequence, in the order the table sweep finds them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inverses {
    /// Indices b with b ∘ a = identity.
    left: SmallVec<usize>,
    /// Indices b with a ∘ b = identity.
    right: SmallVec<usize>,
}

impl Inverses {
    /// Indices of the left inverses, i.e. every b with b ∘ a = identity.
    #[must_use]
    pub fn left(&self) -> &[usize] {
        &self.left
    }

    /// Indices of the right inverses, i.e. every b with a ∘ b = identity.
    #[must_use]
    pub fn right(&self) -> &[usize] {
        &self.right
    }

    /// The unique two-sided inverse: the sole left inverse when it is also
    /// the sole right inverse. This is the per-element group criterion.
    #[must_use]
    pub fn two_sided(&self) -> Option<usize> {
        match (self.left.as_slice(), self.right.as_slice()) {
            ([left], [right]) if left == right => Some(*left),
            _ => None,
        }
    }
}

/// The strongest classification of a structure, ordered by strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Closed binary operation, no further axioms.
    Groupoid,
    /// Closed and associative.
    Semigroup,
    /// Semigroup with an identity element.
    Monoid,
    /// Monoid where every element has a unique two-sided inverse and no zero
    /// element exists.
    Group,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(match self {
            Self::Groupoid => "groupoid",
            Self::Semigroup => "semigroup",
            Self::Monoid => "monoid",
            Self::Group => "group",
        })
    }
}

// -------------------- Construction and population -------------------- //

impl<E> Default for Algebra<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Algebra<E> {
    /// An empty system over zero elements.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elems: Elems::default(),
            table: Table::default(),
            epoch: 0,
            cache: PropCache::default(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn card(&self) -> usize {
        self.elems.card()
    }

    /// Whether the system has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// The element sequence.
    #[must_use]
    pub fn elems(&self) -> &Elems<E> {
        &self.elems
    }

    /// The operation table.
    #[must_use]
    pub fn table(&self) -> &Table<E> {
        &self.table
    }

    /// Marks the data as changed, invalidating every cached property.
    fn touch(&mut self) {
        self.epoch += 1;
    }

    /// Reallocates the element sequence and table to cardinality `card`,
    /// default-initialized. All previous contents and every cached property
    /// are discarded.
    ///
    /// ## Errors
    ///
    /// Fails under host resource exhaustion; the system is then left empty
    /// and must be resized again before use.
    pub fn resize(&mut self, card: usize) -> Result<(), AllocError>
    where
        E: Default,
    {
        self.touch();
        let result = self
            .elems
            .resize(card)
            .and_then(|()| self.table.resize(card));
        if result.is_err() {
            // keep the lockstep invariant
            self.elems.clear();
            self.table.clear();
        }
        result
    }

    /// Overwrites the element at `index`, invalidating every cached property.
    pub fn set_elem(&mut self, index: usize, elem: E) -> Result<(), IndexError> {
        self.touch();
        self.elems.set(index, elem)
    }

    /// Overwrites the table cell at `(row, col)`, invalidating every cached
    /// property.
    pub fn set_entry(&mut self, row: usize, col: usize, value: E) -> Result<(), IndexError> {
        self.touch();
        self.table.set(row, col, value)
    }
}

impl<E> Algebra<E> {
    /// Reads one size token and resizes the system to it.
    ///
    /// ## Errors
    ///
    /// Fails if the token is missing or not a non-negative integer, or if the
    /// resize cannot be satisfied.
    pub fn read_size<'a, I>(&mut self, tokens: &mut I) -> Result<(), Error>
    where
        E: Default,
        I: Iterator<Item = &'a str>,
    {
        let token = tokens.next().ok_or(ParseError::Eof)?;
        let card = token.parse().map_err(|_| ParseError::Size {
            token: token.into(),
        })?;
        self.resize(card)?;
        Ok(())
    }

    /// Reads exactly [`card`](Algebra::card) element tokens into the element
    /// sequence, in order.
    ///
    /// ## Errors
    ///
    /// Fails on the first missing or malformed token; elements read before it
    /// stay applied.
    pub fn read_elems<'a, I>(&mut self, tokens: &mut I) -> Result<(), Error>
    where
        E: FromStr,
        I: Iterator<Item = &'a str>,
    {
        self.touch();
        for index in 0..self.card() {
            let token = tokens.next().ok_or(ParseError::Eof)?;
            let elem = token.parse().map_err(|_| ParseError::Elem {
                index,
                token: token.into(),
            })?;
            self.elems.set(index, elem)?;
        }
        Ok(())
    }

    /// Reads exactly [`card`](Algebra::card)² entry tokens into the table, in
    /// row-major order.
    ///
    /// ## Errors
    ///
    /// Fails on the first missing or malformed token; entries read before it
    /// stay applied.
    pub fn read_table<'a, I>(&mut self, tokens: &mut I) -> Result<(), Error>
    where
        E: FromStr,
        I: Iterator<Item = &'a str>,
    {
        self.touch();
        let side = self.card();
        for row in 0..side {
            for col in 0..side {
                let token = tokens.next().ok_or(ParseError::Eof)?;
                let value = token.parse().map_err(|_| ParseError::Entry {
                    row,
                    col,
                    token: token.into(),
                })?;
                self.table.set(row, col, value)?;
            }
        }
        Ok(())
    }
}

/// Parses a whole system from whitespace-separated tokens: the cardinality,
/// then the elements, then the table entries in row-major order.
impl<E: Default + FromStr> FromStr for Algebra<E> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut system = Self::new();
        let mut tokens = s.split_whitespace();
        system.read_size(&mut tokens)?;
        system.read_elems(&mut tokens)?;
        system.read_table(&mut tokens)?;
        match tokens.next() {
            Some(token) => Err(ParseError::Trailing {
                token: token.into(),
            }
            .into()),
            None => Ok(system),
        }
    }
}

// -------------------- Properties -------------------- //

impl<E: PartialEq> Algebra<E> {
    /// Whether the operation is closed: every table entry is a member of the
    /// element sequence.
    #[must_use]
    pub fn is_closed(&mut self) -> bool {
        if let Some(&known) = self.cache.closure.get(self.epoch) {
            return known;
        }
        let closed = check_closure(&self.elems, &self.table);
        self.cache.closure.put(self.epoch, closed);
        closed
    }

    /// Whether the operation commutes: a ∘ b = b ∘ a for all a, b.
    #[must_use]
    pub fn is_commutative(&mut self) -> bool {
        if let Some(&known) = self.cache.commutative.get(self.epoch) {
            return known;
        }
        let commutative = check_commutative(&self.table);
        self.cache.commutative.put(self.epoch, commutative);
        commutative
    }

    /// Whether the operation associates: (a ∘ b) ∘ c = a ∘ (b ∘ c) for all
    /// a, b, c. A non-closed operation is never associative, as the nested
    /// products are undefined.
    #[must_use]
    pub fn is_associative(&mut self) -> bool {
        if let Some(&known) = self.cache.associative.get(self.epoch) {
            return known;
        }
        let associative = self.is_closed() && check_associative(&self.elems, &self.table);
        self.cache.associative.put(self.epoch, associative);
        associative
    }

    /// Whether every element is idempotent: a ∘ a = a for all a.
    #[must_use]
    pub fn is_idempotent(&mut self) -> bool {
        if let Some(&known) = self.cache.idempotent.get(self.epoch) {
            return known;
        }
        let idempotent = check_idempotent(&self.elems, &self.table);
        self.cache.idempotent.put(self.epoch, idempotent);
        idempotent
    }

    /// Index of the identity element: the first i with a ∘ eᵢ = eᵢ ∘ a = a
    /// for all a.
    #[must_use]
    pub fn identity_index(&mut self) -> Option<usize> {
        if let Some(&known) = self.cache.identity.get(self.epoch) {
            return known;
        }
        let identity = find_identity(&self.elems, &self.table);
        self.cache.identity.put(self.epoch, identity);
        identity
    }

    /// The identity element, if one exists.
    #[must_use]
    pub fn identity(&mut self) -> Option<&E> {
        self.identity_index().map(|index| &self.elems[index])
    }

    /// Index of the zero element: the first i with a ∘ eᵢ = eᵢ ∘ a = eᵢ for
    /// all a.
    #[must_use]
    pub fn zero_index(&mut self) -> Option<usize> {
        if let Some(&known) = self.cache.zero.get(self.epoch) {
            return known;
        }
        let zero = find_zero(&self.elems, &self.table);
        self.cache.zero.put(self.epoch, zero);
        zero
    }

    /// The zero (absorbing) element, if one exists.
    #[must_use]
    pub fn zero(&mut self) -> Option<&E> {
        self.zero_index().map(|index| &self.elems[index])
    }

    /// The left and right inverses of every element, indexed like the element
    /// sequence. Without an identity element, every list is empty.
    pub fn inverses(&mut self) -> &[Inverses] {
        let identity = self.identity_index();
        let Self {
            elems,
            table,
            epoch,
            cache,
        } = self;
        cache
            .inverses
            .or_insert_with(*epoch, || find_inverses(elems, table, identity))
    }

    /// Whether the structure is a groupoid: the operation is closed.
    #[must_use]
    pub fn is_groupoid(&mut self) -> bool {
        if let Some(&known) = self.cache.groupoid.get(self.epoch) {
            return known;
        }
        let groupoid = self.is_closed();
        self.cache.groupoid.put(self.epoch, groupoid);
        groupoid
    }

    /// Whether the structure is a semigroup: a groupoid whose operation
    /// associates.
    #[must_use]
    pub fn is_semigroup(&mut self) -> bool {
        if let Some(&known) = self.cache.semigroup.get(self.epoch) {
            return known;
        }
        let semigroup = self.is_groupoid() && self.is_associative();
        self.cache.semigroup.put(self.epoch, semigroup);
        semigroup
    }

    /// Whether the structure is a monoid: a semigroup with an identity
    /// element.
    #[must_use]
    pub fn is_monoid(&mut self) -> bool {
        if let Some(&known) = self.cache.monoid.get(self.epoch) {
            return known;
        }
        let monoid = self.is_semigroup() && self.identity_index().is_some();
        self.cache.monoid.put(self.epoch, monoid);
        monoid
    }

    /// Whether the structure is a group: a monoid without a zero element in
    /// which every element has a unique two-sided inverse.
    ///
    /// A zero element disqualifies the structure outright. This also rejects
    /// the one-element monoid, whose sole element is both identity and zero.
    #[must_use]
    pub fn is_group(&mut self) -> bool {
        if let Some(&known) = self.cache.group.get(self.epoch) {
            return known;
        }
        let group = self.check_group();
        self.cache.group.put(self.epoch, group);
        group
    }

    /// Decides the group axioms on top of the memoized prerequisites.
    fn check_group(&mut self) -> bool {
        if !self.is_monoid() {
            return false;
        }
        if self.zero_index().is_some() {
            return false;
        }
        self.inverses()
            .iter()
            .all(|inverses| inverses.two_sided().is_some())
    }

    /// The strongest classification of the structure, or `None` when the
    /// operation is not even closed.
    #[must_use]
    pub fn kind(&mut self) -> Option<Kind> {
        if self.is_group() {
            Some(Kind::Group)
        } else if self.is_monoid() {
            Some(Kind::Monoid)
        } else if self.is_semigroup() {
            Some(Kind::Semigroup)
        } else if self.is_groupoid() {
            Some(Kind::Groupoid)
        } else {
            None
        }
    }
}

// -------------------- Checks -------------------- //
//
// The decision procedures, as pure functions over an (elems, table) snapshot.
// The accessors above wire their dependencies and cache their results.

/// Every cell of the table is a member of `elems`.
fn check_closure<E: PartialEq>(elems: &Elems<E>, table: &Table<E>) -> bool {
    table.cells().all(|cell| elems.contains(cell))
}

/// The table is symmetric. Scans the upper triangle only, so each unordered
/// pair is compared once.
fn check_commutative<E: PartialEq>(table: &Table<E>) -> bool {
    let side = table.side();
    for a in 0..side {
        for b in (a + 1)..side {
            if table[(a, b)] != table[(b, a)] {
                return false;
            }
        }
    }
    true
}

/// (a ∘ b) ∘ c = a ∘ (b ∘ c) for every triple. Each intermediate product is
/// located in `elems` to reapply the operation; a product outside the set
/// leaves the triple undefined and fails the check.
fn check_associative<E: PartialEq>(elems: &Elems<E>, table: &Table<E>) -> bool {
    let n = elems.card();
    for a in 0..n {
        for b in 0..n {
            let ab = match elems.position(&table[(a, b)]) {
                Some(index) => index,
                None => return false,
            };
            for c in 0..n {
                let bc = match elems.position(&table[(b, c)]) {
                    Some(index) => index,
                    None => return false,
                };
                if table[(ab, c)] != table[(a, bc)] {
                    return false;
                }
            }
        }
    }
    true
}

/// The diagonal reproduces the element sequence.
fn check_idempotent<E: PartialEq>(elems: &Elems<E>, table: &Table<E>) -> bool {
    (0..elems.card()).all(|a| table[(a, a)] == elems[a])
}

/// First index whose row and column both reproduce the element sequence,
/// i.e. that acts as identity on the left and on the right. Falls through to
/// `None` on an empty sequence.
fn find_identity<E: PartialEq>(elems: &Elems<E>, table: &Table<E>) -> Option<usize> {
    let n = elems.card();
    (0..n).find(|&i| {
        (0..n).all(|col| table[(i, col)] == elems[col])
            && (0..n).all(|row| table[(row, i)] == elems[row])
    })
}

/// First index whose row and column hold nothing but the element itself,
/// i.e. that absorbs on the left and on the right.
fn find_zero<E: PartialEq>(elems: &Elems<E>, table: &Table<E>) -> Option<usize> {
    let n = elems.card();
    (0..n).find(|&i| {
        let zero = &elems[i];
        (0..n).all(|col| table[(i, col)] == *zero) && (0..n).all(|row| table[(row, i)] == *zero)
    })
}

/// One sweep over the table: whenever a ∘ b equals the identity, b is a right
/// inverse of a and a is a left inverse of b. Without an identity, every
/// element gets empty lists.
fn find_inverses<E: PartialEq>(
    elems: &Elems<E>,
    table: &Table<E>,
    identity: Option<usize>,
) -> Vec<Inverses> {
    let n = elems.card();
    let mut inverses = vec![Inverses::default(); n];
    let identity = match identity {
        Some(index) => &elems[index],
        None => return inverses,
    };

    for a in 0..n {
        for b in 0..n {
            if table[(a, b)] == *identity {
                inverses[a].right.push(b);
                inverses[b].left.push(a);
            }
        }
    }
    inverses
}
