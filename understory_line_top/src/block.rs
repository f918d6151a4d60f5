// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block decorations: identifiers and row-anchored height entries.

use core::fmt;

use smallvec::SmallVec;

use crate::Scalar;

/// Identifier of a block inserted into a [`LineTopIndex`](crate::LineTopIndex).
///
/// Identifiers are handed out by a counter owned by each index and are never
/// reused by that index, even after the block is removed. An identifier from
/// one index carries no meaning in another.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u64);

impl BlockId {
    #[inline]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value behind this identifier.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockId").field(&self.0).finish()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

/// Blocks whose anchor row fell inside a replaced range during
/// [`LineTopIndex::splice`](crate::LineTopIndex::splice).
pub type ReanchoredBlocks = SmallVec<[BlockId; 4]>;

/// Which side of its anchor row's content a block occupies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockPlacement {
    /// Between the anchor row's content and the next row.
    #[default]
    After,
    /// Between the previous row and the anchor row's content, following any
    /// blocks placed after the previous row.
    Before,
}

/// A decoration occupying extra vertical space next to its anchor row.
///
/// With the default [`BlockPlacement::After`], the height of a block anchored
/// at row `r` is added to the top offset of every row after `r`, so it appears
/// between the content of row `r` and the content of row `r + 1`. A
/// [`BlockPlacement::Before`] block at `r` also pushes down row `r` itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Block<S: Scalar> {
    id: BlockId,
    row: usize,
    height: S,
    placement: BlockPlacement,
}

impl<S: Scalar> Block<S> {
    pub(crate) fn new(id: BlockId, row: usize, height: S, placement: BlockPlacement) -> Self {
        Self {
            id,
            row,
            height,
            placement,
        }
    }

    /// Returns the identifier of this block.
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Returns the row this block is anchored at.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the vertical extent of this block.
    #[must_use]
    pub fn height(&self) -> S {
        self.height
    }

    /// Returns which side of its anchor row this block occupies.
    #[must_use]
    pub fn placement(&self) -> BlockPlacement {
        self.placement
    }

    /// Sort key placing blocks in vertical order.
    ///
    /// The first component is the gap the block sits in, gap `g` lying above
    /// the content of row `g`. Within a gap, blocks placed after the previous
    /// row come before blocks placed before the next one.
    pub(crate) fn order_key(&self) -> (usize, bool) {
        match self.placement {
            BlockPlacement::After => (self.row.saturating_add(1), false),
            BlockPlacement::Before => (self.row, true),
        }
    }

    /// Row whose content the block follows, as seen by the offset to row scan.
    ///
    /// Blocks before row 0 report row 0.
    pub(crate) fn scan_row(&self) -> usize {
        match self.placement {
            BlockPlacement::After => self.row,
            BlockPlacement::Before => self.row.saturating_sub(1),
        }
    }

    pub(crate) fn set_row(&mut self, row: usize) {
        self.row = row;
    }

    pub(crate) fn set_height(&mut self, height: S) {
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::{Block, BlockId, BlockPlacement};

    #[test]
    fn block_id_formats() {
        let id = BlockId::new(7);
        assert_eq!(id.get(), 7);
        assert_eq!(format!("{id}"), "BlockId(7)");
        assert_eq!(format!("{id:?}"), "BlockId(7)");
    }

    #[test]
    fn block_ids_order_by_allocation() {
        assert!(BlockId::new(1) < BlockId::new(2));
    }

    #[test]
    fn block_setters_update_fields() {
        let mut block = Block::new(BlockId::new(0), 3, 10.0_f64, BlockPlacement::After);
        block.set_row(5);
        block.set_height(12.0);
        assert_eq!(block.row(), 5);
        assert!((block.height() - 12.0).abs() < f64::EPSILON);
        assert_eq!(block.id(), BlockId::new(0));
        assert_eq!(block.placement(), BlockPlacement::After);
    }

    #[test]
    fn order_key_shares_a_gap_between_neighbouring_rows() {
        let after = Block::new(BlockId::new(0), 2, 1.0_f64, BlockPlacement::After);
        let before = Block::new(BlockId::new(1), 3, 1.0_f64, BlockPlacement::Before);
        let next = Block::new(BlockId::new(2), 3, 1.0_f64, BlockPlacement::After);
        assert!(after.order_key() < before.order_key());
        assert!(before.order_key() < next.order_key());
        assert_eq!(after.scan_row(), 2);
        assert_eq!(before.scan_row(), 2);
    }

    #[test]
    fn before_row_zero_scans_as_row_zero() {
        let block = Block::new(BlockId::new(0), 0, 1.0_f32, BlockPlacement::Before);
        assert_eq!(block.order_key(), (0, true));
        assert_eq!(block.scan_row(), 0);
    }
}
