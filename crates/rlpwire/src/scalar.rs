//! Scalar extractors for callers that know the field layout a priori.
//!
//! Each extractor takes the buffer and an offset assumed to point at a
//! leaf encoding, classifies it, and reinterprets the payload. Payload
//! bytes are always widened as unsigned values before being shifted
//! into an accumulator; a sign-extending accumulation would corrupt
//! any value whose payload has a high bit set.
//!
//! The fixed-width extractors ([`decode_u32`], [`decode_u64`]) accept
//! the short-string form only: they target small known-width fields
//! such as ports or nonces. [`decode_uint`] is the general-purpose
//! numeric decode for values of any string form.

use alloy_primitives::U256;
use rlpwire_core::error::{DecodeError, RlpResult};

use crate::decode::{classify, Kind};

/// Widest payload accepted by [`decode_uint`], in bytes.
const UINT_MAX_BYTES: usize = 32;

/// Locate the payload of a short-string item at `pos`, requiring a
/// non-empty payload of at most `max_width` bytes.
fn short_item_payload<'a>(
    buf: &'a [u8],
    pos: usize,
    max_width: usize,
    expected: &'static str,
) -> RlpResult<&'a [u8]> {
    let header = classify(buf, pos)?;
    if header.kind != Kind::ShortString || header.payload_len == 0 || header.payload_len > max_width
    {
        return Err(DecodeError::invalid_shape(pos, expected));
    }
    Ok(&buf[pos + 1..pos + 1 + header.payload_len])
}

/// Decode the short-string item at `pos` as an unsigned 32-bit
/// big-endian integer.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if the element is a list, a raw
/// single byte, the empty string, or wider than four payload bytes;
/// otherwise any classification error.
///
/// # Example
///
/// ```
/// use rlpwire::decode_u32;
///
/// // 21000 = 0x5208
/// assert_eq!(decode_u32(&[0x82, 0x52, 0x08], 0).unwrap(), 21000);
/// ```
pub fn decode_u32(buf: &[u8], pos: usize) -> RlpResult<u32> {
    let payload = short_item_payload(buf, pos, 4, "unsigned 32-bit integer")?;
    let mut value: u32 = 0;
    for &byte in payload {
        value = (value << 8) | u32::from(byte);
    }
    Ok(value)
}

/// Decode the short-string item at `pos` as an unsigned 64-bit
/// big-endian integer.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if the element is a list, a raw
/// single byte, the empty string, or wider than eight payload bytes;
/// otherwise any classification error.
pub fn decode_u64(buf: &[u8], pos: usize) -> RlpResult<u64> {
    let payload = short_item_payload(buf, pos, 8, "unsigned 64-bit integer")?;
    let mut value: u64 = 0;
    for &byte in payload {
        value = (value << 8) | u64::from(byte);
    }
    Ok(value)
}

/// Decode the string item at `pos` as an unsigned big-endian integer
/// of up to 256 bits.
///
/// This is the canonical numeric decode for values that may exceed
/// machine word width. It accepts every string form: a raw single
/// byte, short strings (the empty string decodes to zero), and long
/// strings.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if the element is a list or the
/// payload exceeds 32 bytes; otherwise any classification error.
///
/// # Example
///
/// ```
/// use alloy_primitives::U256;
/// use rlpwire::decode_uint;
///
/// // 256 = 0x0100
/// assert_eq!(decode_uint(&[0x82, 0x01, 0x00], 0).unwrap(), U256::from(256u64));
/// // The empty string is zero.
/// assert_eq!(decode_uint(&[0x80], 0).unwrap(), U256::ZERO);
/// ```
pub fn decode_uint(buf: &[u8], pos: usize) -> RlpResult<U256> {
    let header = classify(buf, pos)?;
    let payload = match header.kind {
        Kind::Byte => &buf[pos..=pos],
        Kind::ShortString | Kind::LongString => {
            &buf[pos + header.header_len..pos + header.total_len()]
        }
        Kind::ShortList | Kind::LongList => {
            return Err(DecodeError::invalid_shape(pos, "unsigned integer string"));
        }
    };
    if payload.len() > UINT_MAX_BYTES {
        return Err(DecodeError::invalid_shape(
            pos,
            "unsigned integer of at most 32 bytes",
        ));
    }
    Ok(U256::from_be_slice(payload))
}

/// Decode the string item at `pos` as raw payload bytes.
///
/// Accepts short and long string forms; the empty string yields an
/// empty vector.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if the element is a list or a raw
/// single byte; otherwise any classification error.
pub fn decode_bytes(buf: &[u8], pos: usize) -> RlpResult<Vec<u8>> {
    let header = classify(buf, pos)?;
    match header.kind {
        Kind::ShortString | Kind::LongString => {
            Ok(buf[pos + header.header_len..pos + header.total_len()].to_vec())
        }
        _ => Err(DecodeError::invalid_shape(pos, "string")),
    }
}

/// Decode the string item at `pos` as text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the
/// format carries no charset information and callers wanting strict
/// validation should use [`decode_bytes`] and validate themselves.
///
/// # Errors
///
/// Same as [`decode_bytes`].
pub fn decode_string(buf: &[u8], pos: usize) -> RlpResult<String> {
    let bytes = decode_bytes(buf, pos)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode four consecutive single-byte leaves starting at `pos` as a
/// 4-octet network address.
///
/// The four fields are packed back-to-back without a list wrapper;
/// each is either a raw byte (`0x00..=0x7f`), the empty-string
/// sentinel (`0x80`, decoding to zero), or a one-byte short string
/// (`0x81` followed by the octet). A running offset is advanced across
/// each field.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if any field is not a single-byte
/// leaf; [`DecodeError::InvalidPrefix`] or
/// [`DecodeError::BufferUnderrun`] if the buffer ends mid-address.
///
/// # Example
///
/// ```
/// use rlpwire::decode_ip4;
///
/// // 10.0.0.255: high-bit octets need the 0x81 short form.
/// let buf = [0x0a, 0x80, 0x80, 0x81, 0xff];
/// assert_eq!(decode_ip4(&buf, 0).unwrap(), [10, 0, 0, 255]);
/// ```
pub fn decode_ip4(buf: &[u8], pos: usize) -> RlpResult<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut at = pos;
    for octet in &mut octets {
        let (value, next) = decode_octet(buf, at)?;
        *octet = value;
        at = next;
    }
    Ok(octets)
}

/// Decode one single-byte leaf and return it with the offset of the
/// following element.
fn decode_octet(buf: &[u8], at: usize) -> RlpResult<(u8, usize)> {
    let &prefix = buf.get(at).ok_or(DecodeError::InvalidPrefix { offset: at })?;
    match prefix {
        0x00..=0x7f => Ok((prefix, at + 1)),
        0x80 => Ok((0, at + 1)),
        0x81 => {
            let &value = buf
                .get(at + 1)
                .ok_or(DecodeError::buffer_underrun(at + 1, 1, 0))?;
            Ok((value, at + 2))
        }
        _ => Err(DecodeError::invalid_shape(at, "single-byte item")),
    }
}

// ============================================================================
// Tests
// ============================================================================
