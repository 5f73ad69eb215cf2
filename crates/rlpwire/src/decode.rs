//! RLP prefix classification and the recursive-descent decoder.
//!
//! Every decode entry point in this crate funnels through one
//! canonical parse routine ([`parse_at`]) that produces an internal
//! offset-based node tree. [`decode_tree`] and [`decode_sequential`]
//! are thin adapters that materialize that tree as an [`Element`] or a
//! [`DecodedValue`] respectively, so the prefix grammar is implemented
//! exactly once.
//!
//! # Prefix grammar
//!
//! The first byte of every element classifies it:
//!
//! | range          | meaning      | header                               |
//! |----------------|--------------|--------------------------------------|
//! | `0x00..=0x7f`  | single byte  | none, the byte is its own encoding   |
//! | `0x80..=0xb7`  | short string | 1 byte, payload length = byte - 0x80 |
//! | `0xb8..=0xbf`  | long string  | 1 + (byte - 0xb7) length bytes       |
//! | `0xc0..=0xf7`  | short list   | 1 byte, payload length = byte - 0xc0 |
//! | `0xf8..=0xfe`  | long list    | 1 + (byte - 0xf7) length bytes       |
//!
//! Long-form length bytes are a big-endian unsigned integer. `0xff` is
//! rejected as an invalid prefix.

use std::ops::Range;

use rlpwire_core::error::{DecodeError, RlpResult};

use crate::element::{Element, Leaf, List};

/// Maximum list nesting depth accepted by every decode entry point.
///
/// A buffer can be crafted with one list level per byte, so recursion
/// over untrusted input must be bounded. Inputs nested deeper than
/// this fail with [`DecodeError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 64;

/// First byte of a short string encoding (`0x80` alone is the empty
/// string, the format's null sentinel).
const OFFSET_SHORT_STRING: u8 = 0x80;
/// Base byte for long string encodings.
const OFFSET_LONG_STRING: u8 = 0xb7;
/// First byte of a short list encoding.
const OFFSET_SHORT_LIST: u8 = 0xc0;
/// Base byte for long list encodings.
const OFFSET_LONG_LIST: u8 = 0xf7;

/// The five prefix classes of the RLP grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A byte in `0x00..=0x7f`, which is its own encoding.
    Byte,
    /// A string of 0 to 55 payload bytes.
    ShortString,
    /// A string whose payload length needs its own length field.
    LongString,
    /// A list with 0 to 55 bytes of payload.
    ShortList,
    /// A list whose payload length needs its own length field.
    LongList,
}

/// A classified element header: its prefix class and the byte counts
/// needed to locate the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Prefix class of the element.
    pub kind: Kind,
    /// Bytes occupied by the prefix and any length-of-length field.
    /// Zero for [`Kind::Byte`], whose payload is the prefix itself.
    pub header_len: usize,
    /// Declared payload length in bytes.
    pub payload_len: usize,
}

impl Header {
    /// Total encoded size of the element, header included.
    #[must_use]
    pub const fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }

    /// Whether this element is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.kind, Kind::ShortList | Kind::LongList)
    }

    /// Whether this element is a string (including a raw single byte).
    #[must_use]
    pub const fn is_string(&self) -> bool {
        !self.is_list()
    }
}

/// Classify the element starting at `pos`.
///
/// Returns the element's [`Header`], after validating that the header
/// bytes and the declared payload fit inside the buffer.
///
/// # Errors
///
/// - [`DecodeError::InvalidPrefix`] if `pos` is out of bounds or the
///   byte at `pos` is `0xff`.
/// - [`DecodeError::BufferUnderrun`] if the length-of-length bytes or
///   the declared payload extend past the end of the buffer.
///
/// # Example
///
/// ```
/// use rlpwire::{classify, Kind};
///
/// // "dog": short string, 3 payload bytes
/// let buf = [0x83, b'd', b'o', b'g'];
/// let header = classify(&buf, 0).unwrap();
/// assert_eq!(header.kind, Kind::ShortString);
/// assert_eq!(header.header_len, 1);
/// assert_eq!(header.payload_len, 3);
/// ```
pub fn classify(buf: &[u8], pos: usize) -> RlpResult<Header> {
    let &prefix = buf.get(pos).ok_or(DecodeError::InvalidPrefix { offset: pos })?;

    let header = match prefix {
        0x00..=0x7f => Header {
            kind: Kind::Byte,
            header_len: 0,
            payload_len: 1,
        },
        0x80..=0xb7 => Header {
            kind: Kind::ShortString,
            header_len: 1,
            payload_len: usize::from(prefix - OFFSET_SHORT_STRING),
        },
        0xb8..=0xbf => {
            let length_of_length = usize::from(prefix - OFFSET_LONG_STRING);
            Header {
                kind: Kind::LongString,
                header_len: 1 + length_of_length,
                payload_len: read_length(buf, pos + 1, length_of_length)?,
            }
        }
        0xc0..=0xf7 => Header {
            kind: Kind::ShortList,
            header_len: 1,
            payload_len: usize::from(prefix - OFFSET_SHORT_LIST),
        },
        0xf8..=0xfe => {
            let length_of_length = usize::from(prefix - OFFSET_LONG_LIST);
            Header {
                kind: Kind::LongList,
                header_len: 1 + length_of_length,
                payload_len: read_length(buf, pos + 1, length_of_length)?,
            }
        }
        0xff => return Err(DecodeError::InvalidPrefix { offset: pos }),
    };

    // read_length already proved the header bytes exist, so the
    // payload start cannot be past the buffer end.
    let payload_start = pos + header.header_len;
    let available = buf.len() - payload_start;
    if header.payload_len > available {
        return Err(DecodeError::buffer_underrun(
            payload_start,
            header.payload_len,
            available,
        ));
    }

    Ok(header)
}

/// Read `count` bytes starting at `at` as a big-endian unsigned
/// integer. This is the payload length field of a long string or
/// long list.
fn read_length(buf: &[u8], at: usize, count: usize) -> RlpResult<usize> {
    let end = at
        .checked_add(count)
        .ok_or(DecodeError::InvalidPrefix { offset: at })?;
    let bytes = buf.get(at..end).ok_or(DecodeError::buffer_underrun(
        at,
        count,
        buf.len().saturating_sub(at),
    ))?;

    let mut length: u64 = 0;
    for &byte in bytes {
        length = (length << 8) | u64::from(byte);
    }
    // A length that does not fit in usize cannot fit in any real
    // buffer either.
    usize::try_from(length)
        .map_err(|_| DecodeError::buffer_underrun(end, usize::MAX, buf.len().saturating_sub(end)))
}

// ============================================================================
// Canonical parse engine
// ============================================================================

/// An element parsed as offset ranges into the input buffer.
///
/// `children` is `None` for strings and `Some` (possibly empty) for
/// lists. Both decode representations materialize from this.
#[derive(Debug)]
pub(crate) struct Node {
    /// Full encoded span, header included.
    pub span: Range<usize>,
    /// Payload span, header excluded.
    pub payload: Range<usize>,
    /// Child nodes, in encoded order, if this is a list.
    pub children: Option<Vec<Node>>,
}

/// Parse one element at `pos`, recursing into list payloads.
pub(crate) fn parse_at(buf: &[u8], pos: usize, depth: usize) -> RlpResult<Node> {
    let header = classify(buf, pos)?;
    parse_with_header(buf, pos, header, depth)
}

fn parse_with_header(buf: &[u8], pos: usize, header: Header, depth: usize) -> RlpResult<Node> {
    let payload_start = pos + header.header_len;
    let payload_end = payload_start + header.payload_len;
    let span = match header.kind {
        // A raw byte has no header; its payload is its span.
        Kind::Byte => pos..pos + 1,
        _ => pos..payload_end,
    };
    let payload = match header.kind {
        Kind::Byte => pos..pos + 1,
        _ => payload_start..payload_end,
    };

    if header.is_string() {
        return Ok(Node {
            span,
            payload,
            children: None,
        });
    }

    if depth >= MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let mut children = Vec::new();
    let mut at = payload_start;
    while at < payload_end {
        let child_header = classify(buf, at)?;
        let child_end = at + child_header.total_len();
        // A child never reads past its parent's declared end.
        if child_end > payload_end {
            return Err(DecodeError::length_mismatch(
                header.payload_len,
                child_end - payload_start,
            ));
        }
        let child = parse_with_header(buf, at, child_header, depth + 1)?;
        at = child.span.end;
        children.push(child);
    }

    Ok(Node {
        span,
        payload,
        children: Some(children),
    })
}

// ============================================================================
// Typed tree entry point
// ============================================================================

/// Decode a buffer holding exactly one top-level element into an
/// [`Element`] tree.
///
/// Leaves own their decoded payload bytes only; lists own their
/// children plus the full raw span they were parsed from, so a list
/// node can be re-serialized verbatim without re-encoding its
/// children.
///
/// Trailing bytes after the top-level element are rejected; use
/// [`decode_sequential`] to consume several values packed in one
/// buffer.
///
/// # Errors
///
/// Any [`DecodeError`]: decoding fails fast and never returns a
/// partial tree.
///
/// # Example
///
/// ```
/// use rlpwire::decode_tree;
///
/// // ["cat", "dog"]
/// let buf = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
/// let element = decode_tree(&buf).unwrap();
/// let list = element.as_list().unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.children()[0].as_leaf().unwrap().payload(), b"cat");
/// assert_eq!(list.children()[1].as_leaf().unwrap().payload(), b"dog");
/// ```
pub fn decode_tree(buf: &[u8]) -> RlpResult<Element> {
    let node = parse_at(buf, 0, 0)?;
    if node.span.end != buf.len() {
        return Err(DecodeError::length_mismatch(buf.len(), node.span.end));
    }
    Ok(element_from_node(buf, &node))
}

fn element_from_node(buf: &[u8], node: &Node) -> Element {
    match &node.children {
        None => Element::Leaf(Leaf::new(buf[node.payload.clone()].to_vec())),
        Some(children) => {
            let materialized = children
                .iter()
                .map(|child| element_from_node(buf, child))
                .collect();
            Element::List(List::new(materialized, buf[node.span.clone()].to_vec()))
        }
    }
}

// ============================================================================
// Generic position-tracking entry point
// ============================================================================

/// An untyped decoded value: a byte string or an ordered sequence of
/// values.
///
/// This is the result representation of [`decode_sequential`]. Unlike
/// [`Element`], it retains no raw spans, and it can be constructed
/// directly to drive the encoder (see [`DecodedValue::encode`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// A decoded byte string payload (possibly empty).
    Bytes(Vec<u8>),
    /// A decoded list, children in encoded order.
    Sequence(Vec<DecodedValue>),
}

impl DecodedValue {
    /// Whether this value is a byte string.
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// The payload bytes, if this value is a byte string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Sequence(_) => None,
        }
    }

    /// The child values, if this value is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            Self::Bytes(_) => None,
            Self::Sequence(children) => Some(children),
        }
    }
}

/// Decode one value starting at `pos` and return it together with the
/// offset one past its last byte.
///
/// The returned offset lets callers consume several independent
/// top-level values packed back-to-back in one buffer:
///
/// ```
/// use rlpwire::{decode_sequential, DecodedValue};
///
/// // Two values in one buffer: "cat" then 0x05.
/// let buf = [0x83, b'c', b'a', b't', 0x05];
/// let (first, next) = decode_sequential(&buf, 0).unwrap();
/// assert_eq!(first, DecodedValue::Bytes(b"cat".to_vec()));
/// let (second, end) = decode_sequential(&buf, next).unwrap();
/// assert_eq!(second, DecodedValue::Bytes(vec![0x05]));
/// assert_eq!(end, buf.len());
/// ```
///
/// # Errors
///
/// Any [`DecodeError`]; in particular [`DecodeError::LengthMismatch`]
/// when a list's children overrun its declared payload length.
pub fn decode_sequential(buf: &[u8], pos: usize) -> RlpResult<(DecodedValue, usize)> {
    let node = parse_at(buf, pos, 0)?;
    let next = node.span.end;
    Ok((value_from_node(buf, &node), next))
}

fn value_from_node(buf: &[u8], node: &Node) -> DecodedValue {
    match &node.children {
        None => DecodedValue::Bytes(buf[node.payload.clone()].to_vec()),
        Some(children) => DecodedValue::Sequence(
            children
                .iter()
                .map(|child| value_from_node(buf, child))
                .collect(),
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    // ------------------------------------------------------------------------
    // classify
    // ------------------------------------------------------------------------

    #[test]
    fn test_classify_single_byte() {
        let header = classify(&[0x00], 0).unwrap();
        assert_eq!(header.kind, Kind::Byte);
        assert_eq!(header.header_len, 0);
        assert_eq!(header.payload_len, 1);

        let header = classify(&[0x7f], 0).unwrap();
        assert_eq!(header.kind, Kind::Byte);
    }

    #[test]
    fn test_classify_short_string() {
        // Empty string sentinel
        let header = classify(&[0x80], 0).unwrap();
        assert_eq!(header.kind, Kind::ShortString);
        assert_eq!(header.payload_len, 0);

        // 55-byte short string, the upper bound of the short form
        let mut buf = vec![0xb7];
        buf.extend_from_slice(&[0xaa; 55]);
        let header = classify(&buf, 0).unwrap();
        assert_eq!(header.kind, Kind::ShortString);
        assert_eq!(header.payload_len, 55);
    }

    #[test]
    fn test_classify_long_string() {
        // 56 bytes, the smallest payload requiring the long form
        let mut buf = vec![0xb8, 0x38];
        buf.extend_from_slice(&[0xaa; 56]);
        let header = classify(&buf, 0).unwrap();
        assert_eq!(header.kind, Kind::LongString);
        assert_eq!(header.header_len, 2);
        assert_eq!(header.payload_len, 56);

        // Two length bytes: 1024 = 0x0400
        let mut buf = vec![0xb9, 0x04, 0x00];
        buf.extend_from_slice(&[0xbb; 1024]);
        let header = classify(&buf, 0).unwrap();
        assert_eq!(header.header_len, 3);
        assert_eq!(header.payload_len, 1024);
    }

    #[test]
    fn test_classify_lists() {
        let header = classify(&[0xc0], 0).unwrap();
        assert_eq!(header.kind, Kind::ShortList);
        assert_eq!(header.payload_len, 0);

        let mut buf = vec![0xf8, 0x38];
        buf.extend_from_slice(&[0x01; 56]);
        let header = classify(&buf, 0).unwrap();
        assert_eq!(header.kind, Kind::LongList);
        assert_eq!(header.header_len, 2);
        assert_eq!(header.payload_len, 56);
    }

    #[test]
    fn test_classify_rejects_0xff() {
        assert_eq!(
            classify(&[0xff, 0x00], 0),
            Err(DecodeError::InvalidPrefix { offset: 0 })
        );
    }

    #[test]
    fn test_classify_out_of_bounds() {
        assert_eq!(
            classify(&[], 0),
            Err(DecodeError::InvalidPrefix { offset: 0 })
        );
        assert_eq!(
            classify(&[0x01], 5),
            Err(DecodeError::InvalidPrefix { offset: 5 })
        );
    }

    #[test]
    fn test_classify_truncated_length_of_length() {
        // 0xb9 declares two length bytes but only one follows
        let result = classify(&[0xb9, 0x04], 0);
        assert!(matches!(result, Err(DecodeError::BufferUnderrun { .. })));
    }

    #[test]
    fn test_classify_payload_past_end() {
        // Declares 3 payload bytes, only 2 present
        let result = classify(&[0x83, b'd', b'o'], 0);
        assert_eq!(
            result,
            Err(DecodeError::buffer_underrun(1, 3, 2))
        );
    }

    // ------------------------------------------------------------------------
    // decode_tree
    // ------------------------------------------------------------------------

    #[test]
    fn test_tree_null_sentinel() {
        let element = decode_tree(&[0x80]).unwrap();
        let leaf = element.as_leaf().unwrap();
        assert!(leaf.is_empty());
    }

    #[test]
    fn test_tree_zero_byte() {
        let element = decode_tree(&[0x00]).unwrap();
        assert_eq!(element.as_leaf().unwrap().payload(), &[0x00]);
    }

    #[test]
    fn test_tree_short_string() {
        let element = decode_tree(&[0x83, b'd', b'o', b'g']).unwrap();
        assert_eq!(element.as_leaf().unwrap().payload(), b"dog");
    }

    #[test]
    fn test_tree_long_string() {
        let mut buf = vec![0xb8, 0x38];
        buf.extend_from_slice(&[0x5a; 56]);
        let element = decode_tree(&buf).unwrap();
        assert_eq!(element.as_leaf().unwrap().len(), 56);
    }

    #[test]
    fn test_tree_empty_list() {
        let element = decode_tree(&[0xc0]).unwrap();
        let list = element.as_list().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.as_raw(), &[0xc0]);
    }

    #[test]
    fn test_tree_two_strings() {
        let buf = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let element = decode_tree(&buf).unwrap();
        let list = element.as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.children()[0].as_leaf().unwrap().payload(), b"cat");
        assert_eq!(list.children()[1].as_leaf().unwrap().payload(), b"dog");
        // The list keeps its own full encoding, header included.
        assert_eq!(list.as_raw(), &buf);
    }

    #[test]
    fn test_tree_nested_list_raw_spans() {
        // [[1, 2], 3]
        let buf = [0xc4, 0xc2, 0x01, 0x02, 0x03];
        let element = decode_tree(&buf).unwrap();
        let outer = element.as_list().unwrap();
        assert_eq!(outer.len(), 2);
        let inner = outer.children()[0].as_list().unwrap();
        assert_eq!(inner.as_raw(), &[0xc2, 0x01, 0x02]);
        assert_eq!(inner.children()[0].as_leaf().unwrap().payload(), &[0x01]);
        assert_eq!(outer.children()[1].as_leaf().unwrap().payload(), &[0x03]);
    }

    #[test]
    fn test_tree_underrun_is_never_truncated() {
        // Declares 56 payload bytes, provides 3
        let result = decode_tree(&[0xb8, 0x38, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::BufferUnderrun { .. })));
    }

    #[test]
    fn test_tree_rejects_trailing_bytes() {
        let result = decode_tree(&[0x80, 0x01]);
        assert_eq!(result, Err(DecodeError::length_mismatch(2, 1)));
    }

    #[test]
    fn test_tree_child_overruns_list_payload() {
        // List declares 1 payload byte; its child claims 2 more that
        // exist in the buffer but belong outside the list.
        let result = decode_tree(&[0xc1, 0x82, 0x61, 0x61]);
        assert!(matches!(result, Err(DecodeError::LengthMismatch { .. })));
    }

    #[test]
    fn test_tree_nesting_limit() {
        // One list per byte: depth == MAX_NESTING_DEPTH is rejected,
        // one level less is accepted.
        let mut too_deep = vec![0xc1; MAX_NESTING_DEPTH];
        too_deep.push(0xc0);
        assert_eq!(
            decode_tree(&too_deep),
            Err(DecodeError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );

        let mut deepest_valid = vec![0xc1; MAX_NESTING_DEPTH - 1];
        deepest_valid.push(0xc0);
        assert!(decode_tree(&deepest_valid).is_ok());
    }

    #[test]
    fn test_tree_empty_buffer() {
        assert_eq!(
            decode_tree(&[]),
            Err(DecodeError::InvalidPrefix { offset: 0 })
        );
    }

    // ------------------------------------------------------------------------
    // decode_sequential
    // ------------------------------------------------------------------------

    #[test]
    fn test_sequential_null_sentinel() {
        let (value, next) = decode_sequential(&[0x80], 0).unwrap();
        assert_eq!(value, DecodedValue::Bytes(vec![]));
        assert_eq!(next, 1);
    }

    #[test]
    fn test_sequential_single_byte() {
        let (value, next) = decode_sequential(&[0x2a], 0).unwrap();
        assert_eq!(value, DecodedValue::Bytes(vec![0x2a]));
        assert_eq!(next, 1);
    }

    #[test]
    fn test_sequential_list() {
        let buf = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let (value, next) = decode_sequential(&buf, 0).unwrap();
        assert_eq!(next, buf.len());
        let children = value.as_sequence().unwrap();
        assert_eq!(children[0], DecodedValue::Bytes(b"cat".to_vec()));
        assert_eq!(children[1], DecodedValue::Bytes(b"dog".to_vec()));
    }

    #[test]
    fn test_sequential_consumes_values_back_to_back() {
        // "cat", [0x01], empty string
        let buf = [0x83, b'c', b'a', b't', 0xc1, 0x01, 0x80];
        let mut pos = 0;
        let mut values = Vec::new();
        while pos < buf.len() {
            let (value, next) = decode_sequential(&buf, pos).unwrap();
            values.push(value);
            pos = next;
        }
        assert_eq!(
            values,
            vec![
                DecodedValue::Bytes(b"cat".to_vec()),
                DecodedValue::Sequence(vec![DecodedValue::Bytes(vec![0x01])]),
                DecodedValue::Bytes(vec![]),
            ]
        );
    }

    #[test]
    fn test_sequential_mid_buffer_offset() {
        let buf = [0x01, 0x02, 0x83, b'c', b'a', b't'];
        let (value, next) = decode_sequential(&buf, 2).unwrap();
        assert_eq!(value, DecodedValue::Bytes(b"cat".to_vec()));
        assert_eq!(next, 6);
    }

    #[test]
    fn test_sequential_child_overrun_fails() {
        let result = decode_sequential(&[0xc1, 0x82, 0x61, 0x61], 0);
        assert!(matches!(result, Err(DecodeError::LengthMismatch { .. })));
    }

    #[test]
    fn test_decoded_value_accessors() {
        let bytes = DecodedValue::Bytes(vec![1, 2]);
        assert!(bytes.is_bytes());
        assert_eq!(bytes.as_bytes(), Some(&[1u8, 2][..]));
        assert!(bytes.as_sequence().is_none());

        let seq = DecodedValue::Sequence(vec![bytes.clone()]);
        assert!(!seq.is_bytes());
        assert_eq!(seq.as_sequence().unwrap().len(), 1);
        assert!(seq.as_bytes().is_none());
    }
}
