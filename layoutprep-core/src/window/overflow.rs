//! Overflow window geometry

use crate::error::{CoreError, Result};
use std::ops::Range;

/// Split `len` positions into windows of `window_size` sharing `overlap` positions
///
/// Window `k` starts at `k * (window_size - overlap)`; the last window ends at
/// `len`. Zero positions produce zero windows.
pub fn overflow_ranges(len: usize, window_size: usize, overlap: usize) -> Result<Vec<Range<usize>>> {
    if window_size == 0 || overlap >= window_size {
        return Err(CoreError::InvalidWindow {
            max_length: window_size,
            stride: overlap,
        });
    }

    let step = window_size - overlap;
    let mut ranges = Vec::with_capacity(window_count(len, window_size, overlap));
    let mut start = 0;

    while start < len {
        let end = (start + window_size).min(len);
        ranges.push(start..end);

        if end == len {
            break;
        }
        start += step;
    }

    Ok(ranges)
}

/// Number of windows [`overflow_ranges`] produces
pub fn window_count(len: usize, window_size: usize, overlap: usize) -> usize {
    if len == 0 || overlap >= window_size {
        return 0;
    }
    if len <= window_size {
        return 1;
    }
    1 + (len - window_size).div_ceil(window_size - overlap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_window() {
        assert_eq!(overflow_ranges(5, 10, 2).unwrap(), vec![0..5]);
        assert_eq!(overflow_ranges(10, 10, 2).unwrap(), vec![0..10]);
    }

    #[test]
    fn test_overlapping_windows() {
        let ranges = overflow_ranges(25, 10, 4).unwrap();
        assert_eq!(ranges, vec![0..10, 6..16, 12..22, 18..25]);
        assert_eq!(window_count(25, 10, 4), 4);
    }

    #[test]
    fn test_exact_fit_does_not_emit_tail() {
        let ranges = overflow_ranges(16, 10, 4).unwrap();
        assert_eq!(ranges, vec![0..10, 6..16]);
        assert_eq!(window_count(16, 10, 4), 2);
    }

    #[test]
    fn test_no_overlap() {
        assert_eq!(overflow_ranges(7, 3, 0).unwrap(), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn test_empty() {
        assert!(overflow_ranges(0, 10, 2).unwrap().is_empty());
        assert_eq!(window_count(0, 10, 2), 0);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(overflow_ranges(10, 4, 4).is_err());
        assert!(overflow_ranges(10, 0, 0).is_err());
    }
}
