//! The symmetric RLP encoder.
//!
//! Encoding is the direct inversion of the prefix table the decoder
//! classifies by: a single byte under `0x80` is its own encoding,
//! payloads of up to 55 bytes take the short form, longer payloads
//! get a big-endian length field, and the same split applies to list
//! payloads at the `0xc0`/`0xf7` bases. Unsigned integers encode in
//! minimal big-endian form, zero as the empty string.

use alloy_primitives::U256;

use crate::decode::DecodedValue;
use crate::element::Element;

/// Payloads up to this length use the short encoding form.
const SHORT_FORM_MAX: usize = 55;

/// Encode a byte string.
///
/// # Example
///
/// ```
/// use rlpwire::encode_bytes;
///
/// assert_eq!(encode_bytes(b"dog"), vec![0x83, b'd', b'o', b'g']);
/// assert_eq!(encode_bytes(&[]), vec![0x80]);
/// assert_eq!(encode_bytes(&[0x2a]), vec![0x2a]);
/// ```
#[must_use]
pub fn encode_bytes(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    write_string(payload, &mut out);
    out
}

/// Encode an unsigned 256-bit integer in minimal big-endian form.
///
/// Zero encodes as the empty string (`0x80`).
#[must_use]
pub fn encode_uint(value: U256) -> Vec<u8> {
    let be = value.to_be_bytes::<32>();
    let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    encode_bytes(&be[first..])
}

/// Encode an unsigned 64-bit integer in minimal big-endian form.
///
/// Zero encodes as the empty string (`0x80`).
#[must_use]
pub fn encode_u64(value: u64) -> Vec<u8> {
    let be = value.to_be_bytes();
    let first = be.iter().position(|&b| b != 0).unwrap_or(be.len());
    encode_bytes(&be[first..])
}

/// Encode text as a byte string.
#[must_use]
pub fn encode_str(value: &str) -> Vec<u8> {
    encode_bytes(value.as_bytes())
}

impl DecodedValue {
    /// Encode this value, recursing through sequences.
    ///
    /// # Example
    ///
    /// ```
    /// use rlpwire::DecodedValue;
    ///
    /// let value = DecodedValue::Sequence(vec![
    ///     DecodedValue::Bytes(b"cat".to_vec()),
    ///     DecodedValue::Bytes(b"dog".to_vec()),
    /// ]);
    /// assert_eq!(
    ///     value.encode(),
    ///     vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
    /// );
    /// ```
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Bytes(payload) => write_string(payload, out),
            Self::Sequence(children) => {
                let mut payload = Vec::new();
                for child in children {
                    child.encode_into(&mut payload);
                }
                write_header(payload.len(), 0xc0, out);
                out.extend_from_slice(&payload);
            }
        }
    }
}

impl Element {
    /// Encode this element.
    ///
    /// A list node re-emits the raw span it was parsed from verbatim;
    /// its children are not re-encoded. A leaf re-encodes its payload.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Leaf(leaf) => encode_bytes(leaf.payload()),
            Self::List(list) => list.as_raw().to_vec(),
        }
    }
}

/// Write one string encoding: a raw byte for single bytes under
/// `0x80`, prefixed payload otherwise.
fn write_string(payload: &[u8], out: &mut Vec<u8>) {
    match payload {
        [byte] if *byte < 0x80 => out.push(*byte),
        _ => {
            write_header(payload.len(), 0x80, out);
            out.extend_from_slice(payload);
        }
    }
}

/// Write a payload-length header at the given base (`0x80` for
/// strings, `0xc0` for lists).
#[allow(clippy::cast_possible_truncation)] // both pushed values are provably < 0x100
fn write_header(payload_len: usize, base: u8, out: &mut Vec<u8>) {
    if payload_len <= SHORT_FORM_MAX {
        out.push(base + payload_len as u8);
    } else {
        let be = payload_len.to_be_bytes();
        let first = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
        let length_bytes = &be[first..];
        out.push(base + SHORT_FORM_MAX as u8 + length_bytes.len() as u8);
        out.extend_from_slice(length_bytes);
    }
}

// ============================================================================
// Tests
// ============================================================================
