//! Indexed aggregator over timestamp slots
//!
//! Classic Fenwick tree (binary indexed tree), 1-indexed.
//! Slot i owns the range (i - lowbit(i), i].
//!   point_update: climb i += lowbit(i)
//!   prefix_sum:   descend i -= lowbit(i)
//! Both touch at most ⌊log2 N⌋ + 1 cells.
//!
//! Knows nothing about trees; callers map nodes to slots.

use std::ops::{AddAssign, Sub};

use thiserror::Error;

/// Error type returned by Fenwick tree updates and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenwickError {
    /// Slot index outside `[1, len]` (or `[0, len]` for prefix queries).
    #[error("slot index {index} out of range for {len} slots")]
    IndexOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of slots in the tree.
        len: usize,
    },
}

/// Lowest set bit of `i`.
#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// Fenwick tree supporting point update and prefix/range sums in O(log N).
#[derive(Debug, Clone)]
pub struct FenwickTree<T> {
    /// Internal cells; `cells[0]` is unused.
    cells: Vec<T>,
}

impl<T> FenwickTree<T>
where
    T: Copy + Default + AddAssign + Sub<Output = T>,
{
    /// Create a tree of `len` slots, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![T::default(); len + 1],
        }
    }

    /// Build from slot values in O(N).
    ///
    /// `values[i]` lands in slot `i + 1`. Equivalent to `len` point updates.
    pub fn from_slice(values: &[T]) -> Self {
        let len = values.len();
        let mut cells = Vec::with_capacity(len + 1);
        cells.push(T::default());
        cells.extend_from_slice(values);

        // Push each cell's partial sum into its parent once.
        for i in 1..=len {
            let parent = i + lowbit(i);
            if parent <= len {
                let child = cells[i];
                cells[parent] += child;
            }
        }

        Self { cells }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    /// True when the tree has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add `delta` to slot `index` (1-based).
    pub fn point_update(&mut self, index: usize, delta: T) -> Result<(), FenwickError> {
        let len = self.len();
        if index == 0 || index > len {
            return Err(FenwickError::IndexOutOfRange { index, len });
        }

        let mut i = index;
        while i <= len {
            self.cells[i] += delta;
            i += lowbit(i);
        }
        Ok(())
    }

    /// Sum of slots `1..=index`. `prefix_sum(0)` is zero.
    pub fn prefix_sum(&self, index: usize) -> Result<T, FenwickError> {
        let len = self.len();
        if index > len {
            return Err(FenwickError::IndexOutOfRange { index, len });
        }

        let mut sum = T::default();
        let mut i = index;
        while i > 0 {
            sum += self.cells[i];
            i -= lowbit(i);
        }
        Ok(sum)
    }

    /// Sum of slots `lo..=hi`; zero when `lo > hi`.
    ///
    /// `lo == hi` is the single-slot range of a leaf interval.
    pub fn range_sum(&self, lo: usize, hi: usize) -> Result<T, FenwickError> {
        let len = self.len();
        if lo == 0 || lo > len + 1 {
            return Err(FenwickError::IndexOutOfRange { index: lo, len });
        }
        if hi > len {
            return Err(FenwickError::IndexOutOfRange { index: hi, len });
        }
        if lo > hi {
            return Ok(T::default());
        }
        Ok(self.prefix_sum(hi)? - self.prefix_sum(lo - 1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_prefix(values: &[i64], index: usize) -> i64 {
        values[..index].iter().sum()
    }

    #[test]
    fn test_lowbit() {
        assert_eq!(lowbit(1), 1);
        assert_eq!(lowbit(6), 2);
        assert_eq!(lowbit(8), 8);
        assert_eq!(lowbit(12), 4);
    }

    #[test]
    fn test_prefix_sums_match_naive() {
        let values = [3i64, -1, 4, 1, -5, 9, 2, 6, 5, 3, 5];
        let mut tree = FenwickTree::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            tree.point_update(i + 1, v).unwrap();
        }

        for idx in 0..=values.len() {
            assert_eq!(tree.prefix_sum(idx).unwrap(), naive_prefix(&values, idx));
        }
    }

    #[test]
    fn test_from_slice_matches_point_updates() {
        let values: Vec<i64> = (1..=37).map(|v| v * 7 % 13 - 6).collect();
        let bulk = FenwickTree::from_slice(&values);
        let mut incremental = FenwickTree::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            incremental.point_update(i + 1, v).unwrap();
        }

        assert_eq!(bulk.cells, incremental.cells);
    }

    #[test]
    fn test_range_sum() {
        let tree = FenwickTree::from_slice(&[10i64, 20, 30, 40, 50]);
        assert_eq!(tree.range_sum(2, 4).unwrap(), 90);
        assert_eq!(tree.range_sum(3, 3).unwrap(), 30);
        assert_eq!(tree.range_sum(1, 5).unwrap(), 150);
        assert_eq!(tree.range_sum(4, 3).unwrap(), 0);
    }

    #[test]
    fn test_update_shifts_covering_prefixes_only() {
        let mut tree = FenwickTree::from_slice(&[1i64; 8]);
        tree.point_update(5, 10).unwrap();

        for idx in 0..5 {
            assert_eq!(tree.prefix_sum(idx).unwrap(), idx as i64);
        }
        for idx in 5..=8 {
            assert_eq!(tree.prefix_sum(idx).unwrap(), idx as i64 + 10);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut tree: FenwickTree<i64> = FenwickTree::new(4);
        assert_eq!(
            tree.point_update(0, 1),
            Err(FenwickError::IndexOutOfRange { index: 0, len: 4 })
        );
        assert_eq!(
            tree.point_update(5, 1),
            Err(FenwickError::IndexOutOfRange { index: 5, len: 4 })
        );
        assert!(tree.prefix_sum(5).is_err());
        assert!(tree.range_sum(0, 2).is_err());
        assert!(tree.range_sum(1, 5).is_err());

        // Rejected calls leave the tree untouched.
        assert_eq!(tree.prefix_sum(4).unwrap(), 0);
    }

    #[test]
    fn test_empty_tree() {
        let tree: FenwickTree<i64> = FenwickTree::new(0);
        assert!(tree.is_empty());
        assert_eq!(tree.prefix_sum(0).unwrap(), 0);
    }
}
