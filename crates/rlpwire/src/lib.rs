//! # rlpwire
//!
//! A Recursive Length Prefix (RLP) codec.
//!
//! RLP encodes arbitrarily nested byte strings and lists behind a
//! single classifying prefix byte plus optional big-endian length
//! bytes. It is the canonical serialization for Ethereum protocol
//! data; atomic types (integers, text, addresses) are layered on top
//! by convention, with unsigned integers in minimal big-endian form.
//!
//! ## Entry points
//!
//! - [`decode_tree`] — materialize one top-level element as a typed
//!   [`Element`] tree. Lists retain their raw encoded span for
//!   verbatim re-serialization.
//! - [`decode_sequential`] — decode one untyped [`DecodedValue`] plus
//!   the offset just past it, for buffers holding several values
//!   back-to-back.
//! - Scalar extractors ([`decode_uint`], [`decode_u64`],
//!   [`decode_u32`], [`decode_string`], [`decode_bytes`],
//!   [`decode_ip4`]) — pull a typed value out of a known offset.
//! - [`offsets_at_depth`] — find every element at one nesting depth
//!   without building a tree.
//! - The encoder ([`encode_bytes`], [`encode_uint`],
//!   [`DecodedValue::encode`]) — the direct inversion of the decode
//!   grammar.
//!
//! ## Example
//!
//! ```
//! use rlpwire::{decode_tree, encode_bytes, DecodedValue};
//!
//! // ["cat", "dog"]
//! let buf = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
//! let list = decode_tree(&buf).unwrap();
//! let list = list.as_list().unwrap();
//! assert_eq!(list.children()[0].as_leaf().unwrap().payload(), b"cat");
//!
//! // And back again.
//! let value = DecodedValue::Sequence(vec![
//!     DecodedValue::Bytes(b"cat".to_vec()),
//!     DecodedValue::Bytes(b"dog".to_vec()),
//! ]);
//! assert_eq!(value.encode(), buf.to_vec());
//! ```
//!
//! ## Untrusted input
//!
//! All decode entry points are pure functions over an immutable
//! buffer: no shared state, no I/O, deterministic failures. Declared
//! lengths are checked against the remaining buffer before any read,
//! and list nesting is capped at [`MAX_NESTING_DEPTH`], so arbitrary
//! bytes (network responses, transaction blobs) can be fed in
//! directly. Any [`DecodeError`] means the whole buffer is rejected;
//! partial results are never returned.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decode;
pub mod element;
pub mod encode;
pub mod scalar;
pub mod traverse;

pub use rlpwire_core::error::{DecodeError, RlpResult};

pub use decode::{
    classify, decode_sequential, decode_tree, DecodedValue, Header, Kind, MAX_NESTING_DEPTH,
};
pub use element::{Element, Leaf, List};
pub use encode::{encode_bytes, encode_str, encode_u64, encode_uint};
pub use scalar::{decode_bytes, decode_ip4, decode_string, decode_u32, decode_u64, decode_uint};
pub use traverse::{first_list_payload_offset, next_element_offset, offsets_at_depth};
