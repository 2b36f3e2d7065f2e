//! RLEW (run-length encoded words) expansion
//!
//! Words are copied through verbatim unless they equal the archive's tag
//! word, in which case the next two words are a repeat count and the value
//! to repeat. The tag can never appear as literal data.

use crate::{Result, WolfError};

/// Expand an RLEW stream into exactly `length` bytes
///
/// Literal words and runs are written little-endian. A run that crosses
/// `length` is cut off there; a stream that ends first is an error.
pub fn rlew_expand(tag: u16, length: usize, data: &[u8]) -> Result<Vec<u8>> {
    // a tagged run is three words expanding to at most 0xFFFF words
    let reachable = (data.len() / 6)
        .saturating_mul(2 * u16::MAX as usize)
        .saturating_add(data.len());
    let mut out = Vec::with_capacity(length.min(reachable));
    let mut words = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    let exhausted = |written: usize| WolfError::RunLengthExhausted {
        written,
        expected: length,
    };

    while out.len() < length {
        let word = words.next().ok_or_else(|| exhausted(out.len()))?;
        if word != tag {
            push_clipped(&mut out, word, 1, length);
            continue;
        }

        let count = words.next().ok_or_else(|| exhausted(out.len()))?;
        let value = words.next().ok_or_else(|| exhausted(out.len()))?;
        push_clipped(&mut out, value, count as usize, length);
    }

    Ok(out)
}

fn push_clipped(out: &mut Vec<u8>, word: u16, count: usize, limit: usize) {
    let bytes = word.to_le_bytes();
    for _ in 0..count {
        for byte in bytes {
            if out.len() == limit {
                return;
            }
            out.push(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[u16]) -> Vec<u8> {
        ws.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_literal_and_run() {
        let data = words(&[0x1111, 0xABCD, 0x0003, 0x2222]);
        let out = rlew_expand(0xABCD, 8, &data).unwrap();
        assert_eq!(out, vec![0x11, 0x11, 0x22, 0x22, 0x22, 0x22, 0x22, 0x22]);
    }

    #[test]
    fn test_short_request_clips_run() {
        let data = words(&[0x1111, 0xABCD, 0x0003, 0x2222]);
        let out = rlew_expand(0xABCD, 6, &data).unwrap();
        assert_eq!(out, vec![0x11, 0x11, 0x22, 0x22, 0x22, 0x22]);
    }

    #[test]
    fn test_long_request_fails() {
        let data = words(&[0x1111, 0xABCD, 0x0003, 0x2222]);
        assert!(matches!(
            rlew_expand(0xABCD, 10, &data),
            Err(WolfError::RunLengthExhausted {
                written: 8,
                expected: 10
            })
        ));
    }

    #[test]
    fn test_truncated_run_record() {
        let data = words(&[0x1111, 0xABCD, 0x0003]);
        assert!(matches!(
            rlew_expand(0xABCD, 8, &data),
            Err(WolfError::RunLengthExhausted { written: 2, .. })
        ));
    }

    #[test]
    fn test_zero_count_run() {
        let data = words(&[0xABCD, 0x0000, 0x7777, 0x0102]);
        assert_eq!(rlew_expand(0xABCD, 2, &data).unwrap(), vec![0x02, 0x01]);
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(rlew_expand(0xABCD, 0, &[]).unwrap(), Vec::<u8>::new());
    }
}
