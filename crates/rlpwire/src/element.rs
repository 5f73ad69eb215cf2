//! The typed element tree produced by [`decode_tree`](crate::decode_tree).
//!
//! The two node shapes deliberately retain different things:
//!
//! - [`Leaf`] keeps only its decoded payload; its prefix bytes are
//!   dropped.
//! - [`List`] keeps its ordered children **and** the full encoded span
//!   it was parsed from, prefix and length bytes included, so a list
//!   can be re-serialized verbatim without re-encoding its children.
//!
//! Elements are built once per decode from an immutable input buffer
//! and are never mutated afterwards.

use std::slice::Iter;

/// A decoded RLP element: a byte-string leaf or a list of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A byte string payload.
    Leaf(Leaf),
    /// An ordered sequence of child elements.
    List(List),
}

impl Element {
    /// This element as a leaf, if it is one.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::List(_) => None,
        }
    }

    /// This element as a list, if it is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::Leaf(_) => None,
            Self::List(list) => Some(list),
        }
    }

    /// Whether this element is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Whether this element is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// A byte-string element. Owns the decoded payload only; an empty
/// payload is the format's null sentinel (`0x80`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    payload: Vec<u8>,
}

impl Leaf {
    pub(crate) const fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// The decoded payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty (the null sentinel).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// A list element: ordered children plus the raw encoded span the
/// list was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    children: Vec<Element>,
    raw: Vec<u8>,
}

impl List {
    pub(crate) const fn new(children: Vec<Element>, raw: Vec<u8>) -> Self {
        Self { children, raw }
    }

    /// The child elements, in encoded order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The child at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// Iterate over the children in encoded order.
    pub fn iter(&self) -> Iter<'_, Element> {
        self.children.iter()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the list has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The full encoded bytes of this list, its own prefix and any
    /// length-of-length bytes included.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.raw
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Element;
    type IntoIter = Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
