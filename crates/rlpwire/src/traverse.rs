//! Depth-targeted traversal and element navigation without
//! materialization.
//!
//! [`offsets_at_depth`] walks a buffer and records the start offset of
//! every element sitting at one specific nesting depth. It builds no
//! tree and does not descend past the target depth, which makes field
//! lookup in fixed-shape structures cheap: decode only the element you
//! want, at the offset the traversal handed you.

use std::ops::Range;

use rlpwire_core::error::{DecodeError, RlpResult};

use crate::decode::{classify, MAX_NESTING_DEPTH};

/// Collect the start offsets of every element at nesting depth
/// `depth`.
///
/// Top-level elements are at depth 0, their children at depth 1, and
/// so on. An element recorded at the target depth is not descended
/// into; a list there contributes one offset, not one per descendant.
/// An empty buffer yields no offsets.
///
/// # Errors
///
/// [`DecodeError::NestingTooDeep`] if `depth` exceeds the supported
/// maximum; otherwise any structural error found on the path down to
/// the target depth.
///
/// # Example
///
/// ```
/// use rlpwire::offsets_at_depth;
///
/// // [[1, 2], [3, [4, 5]]]
/// let buf = [0xc8, 0xc2, 0x01, 0x02, 0xc4, 0x03, 0xc2, 0x04, 0x05];
/// // Depth 2: the scalars 1, 2, 3 and the inner list [4, 5] as one
/// // element.
/// assert_eq!(offsets_at_depth(&buf, 2).unwrap(), vec![2, 3, 5, 6]);
/// ```
pub fn offsets_at_depth(buf: &[u8], depth: usize) -> RlpResult<Vec<usize>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }
    let mut offsets = Vec::new();
    walk(buf, 0..buf.len(), 0, depth, &mut offsets)?;
    Ok(offsets)
}

/// Scan the elements inside `region`, recording offsets at the target
/// level and recursing into list payloads below it.
fn walk(
    buf: &[u8],
    region: Range<usize>,
    level: usize,
    target: usize,
    offsets: &mut Vec<usize>,
) -> RlpResult<()> {
    let mut at = region.start;
    while at < region.end {
        let header = classify(buf, at)?;
        let end = at + header.total_len();
        if end > region.end {
            return Err(DecodeError::length_mismatch(
                region.end - region.start,
                end - region.start,
            ));
        }
        if level == target {
            offsets.push(at);
        } else if header.is_list() && header.payload_len > 0 {
            walk(buf, at + header.header_len..end, level + 1, target, offsets)?;
        }
        at = end;
    }
    Ok(())
}

/// Offset one past the element starting at `pos`, without decoding it.
///
/// Useful for skipping fields in fixed-shape structures.
///
/// # Errors
///
/// Any classification error for the element at `pos`.
///
/// # Example
///
/// ```
/// use rlpwire::next_element_offset;
///
/// let buf = [0x83, b'c', b'a', b't', 0x05];
/// assert_eq!(next_element_offset(&buf, 0).unwrap(), 4);
/// ```
pub fn next_element_offset(buf: &[u8], pos: usize) -> RlpResult<usize> {
    let header = classify(buf, pos)?;
    Ok(pos + header.total_len())
}

/// Offset of the first child of the list starting at `pos`.
///
/// # Errors
///
/// [`DecodeError::InvalidShape`] if the element at `pos` is not a
/// list; otherwise any classification error.
pub fn first_list_payload_offset(buf: &[u8], pos: usize) -> RlpResult<usize> {
    let header = classify(buf, pos)?;
    if !header.is_list() {
        return Err(DecodeError::invalid_shape(pos, "list"));
    }
    Ok(pos + header.header_len)
}

// ============================================================================
// Tests
// ============================================================================
