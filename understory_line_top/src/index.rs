// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row to vertical offset index.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{Block, BlockId, BlockPlacement, ReanchoredBlocks, Scalar};

/// Maps document rows to vertical offsets and back, accounting for blocks.
///
/// Every row is `default_line_height` tall. Blocks add extra height below the
/// row they are anchored at, so the top of row `r` sits at
/// `r * default_line_height + sum(height of blocks with row < r)`, plus the
/// height of any blocks placed before row `r`.
///
/// Blocks are kept in vertical order; blocks sharing a row and placement keep
/// the order in which they were inserted or moved there. Blocks may instead be
/// placed before their row's content with [`BlockPlacement::Before`]; blocks
/// inserted with [`LineTopIndex::insert_block`] sit after it.
///
/// The default line height must be positive. A zero or negative height makes
/// [`LineTopIndex::row_for_top_pixel_position`] meaningless; it is not checked
/// in release builds.
///
/// # Example
///
/// ```rust
/// use understory_line_top::LineTopIndex;
///
/// let mut index = LineTopIndex::new(10.0, 12);
/// let diagnostic = index.insert_block(3, 20.0);
///
/// assert_eq!(index.top_pixel_position_for_row(3), 30.0);
/// assert_eq!(index.top_pixel_position_for_row(4), 60.0);
/// assert_eq!(index.row_for_top_pixel_position(60.0), 4);
///
/// index.remove_block(diagnostic);
/// assert_eq!(index.top_pixel_position_for_row(4), 40.0);
/// ```
#[derive(Clone, Debug)]
pub struct LineTopIndex<S: Scalar = f64> {
    default_line_height: S,
    max_row: usize,
    blocks: Vec<Block<S>>,
    next_id: u64,
}

impl<S: Scalar> LineTopIndex<S> {
    /// Creates an index for a document with rows `0..=max_row` and no blocks.
    #[must_use]
    pub fn new(default_line_height: S, max_row: usize) -> Self {
        debug_assert!(
            default_line_height > S::zero(),
            "default line height must be positive"
        );
        Self {
            default_line_height,
            max_row,
            blocks: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the height of a row without blocks.
    #[must_use]
    pub fn default_line_height(&self) -> S {
        self.default_line_height
    }

    /// Sets the height of a row without blocks.
    ///
    /// Existing blocks are unaffected; the new height applies to all
    /// subsequent queries.
    pub fn set_default_line_height(&mut self, height: S) {
        debug_assert!(height > S::zero(), "default line height must be positive");
        self.default_line_height = height;
    }

    /// Returns the last valid row.
    #[must_use]
    pub fn max_row(&self) -> usize {
        self.max_row
    }

    /// Sets the last valid row.
    ///
    /// Block rows are not adjusted. Use [`LineTopIndex::splice`] to report
    /// edits that insert or remove rows.
    pub fn set_max_row(&mut self, max_row: usize) {
        self.max_row = max_row;
    }

    /// Returns the number of rows, `max_row + 1`.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.max_row.saturating_add(1)
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if at least one block is present.
    #[must_use]
    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Returns the block with the given identifier.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block<S>> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    /// Iterates over all blocks in vertical order, which is also row order.
    pub fn blocks(&self) -> impl ExactSizeIterator<Item = &Block<S>> + '_ {
        self.blocks.iter()
    }

    /// Iterates over the blocks anchored at rows in `rows`, in row order.
    pub fn blocks_in_rows(&self, rows: Range<usize>) -> impl Iterator<Item = &Block<S>> + '_ {
        let start = self.blocks.partition_point(|block| block.row() < rows.start);
        let end = self
            .blocks
            .partition_point(|block| block.row() < rows.end)
            .max(start);
        self.blocks[start..end].iter()
    }

    /// Returns the total height of the blocks anchored exactly at `row`.
    #[must_use]
    pub fn blocks_height_for_row(&self, row: usize) -> S {
        self.blocks_in_rows(row..row.saturating_add(1))
            .fold(S::zero(), |sum, block| sum + block.height())
    }

    /// Returns the full vertical extent of the document, blocks included.
    #[must_use]
    pub fn content_height(&self) -> S {
        let blocks_height = self
            .blocks
            .iter()
            .fold(S::zero(), |sum, block| sum + block.height());
        S::from_usize(self.row_count()) * self.default_line_height + blocks_height
    }

    /// Inserts a block of `height` below `row` and returns its identifier.
    ///
    /// The block is placed after any blocks already anchored below `row`.
    pub fn insert_block(&mut self, row: usize, height: S) -> BlockId {
        self.insert_block_with_placement(row, height, BlockPlacement::After)
    }

    /// Inserts a block of `height` on the given side of `row`'s content and
    /// returns its identifier.
    ///
    /// ```rust
    /// use understory_line_top::{BlockPlacement, LineTopIndex};
    ///
    /// let mut index = LineTopIndex::new(10.0, 12);
    /// index.insert_block_with_placement(3, 20.0, BlockPlacement::Before);
    ///
    /// assert_eq!(index.pixel_position_before_blocks_for_row(3), 30.0);
    /// assert_eq!(index.top_pixel_position_for_row(3), 50.0);
    /// ```
    pub fn insert_block_with_placement(
        &mut self,
        row: usize,
        height: S,
        placement: BlockPlacement,
    ) -> BlockId {
        let id = BlockId::new(self.next_id);
        self.next_id += 1;
        let block = Block::new(id, row, height, placement);
        let at = self.insertion_point(block.order_key());
        self.blocks.insert(at, block);
        #[cfg(feature = "tracing")]
        tracing::trace!(id = id.get(), row, height = ?height, ?placement, "inserted block");
        id
    }

    /// Changes the height of a block.
    ///
    /// Returns `false`, leaving the index untouched, if `id` is unknown.
    pub fn change_block_height(&mut self, id: BlockId, height: S) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|block| block.id() == id) else {
            return false;
        };
        block.set_height(height);
        #[cfg(feature = "tracing")]
        tracing::trace!(id = id.get(), height = ?height, "resized block");
        true
    }

    /// Re-anchors a block at `row`, keeping its placement, after any blocks
    /// already anchored on that side of the row.
    ///
    /// Returns `false`, leaving the index untouched, if `id` is unknown.
    pub fn move_block(&mut self, id: BlockId, row: usize) -> bool {
        let Some(mut block) = self.take_block(id) else {
            return false;
        };
        block.set_row(row);
        let at = self.insertion_point(block.order_key());
        self.blocks.insert(at, block);
        #[cfg(feature = "tracing")]
        tracing::trace!(id = id.get(), row, "moved block");
        true
    }

    /// Removes a block, returning it if `id` was known.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block<S>> {
        let removed = self.take_block(id);
        #[cfg(feature = "tracing")]
        if removed.is_some() {
            tracing::trace!(id = id.get(), "removed block");
        }
        removed
    }

    /// Removes every block. Identifiers handed out so far are not reused.
    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
    }

    /// Reports that rows `start_row..start_row + old_extent` were replaced by
    /// `new_extent` rows.
    ///
    /// Blocks after the replaced range shift by `new_extent - old_extent`.
    /// Blocks anchored inside the replaced range lose their position and snap
    /// to `start_row + new_extent`, the first row after the new content; their
    /// identifiers are returned so the host can re-resolve them with
    /// [`LineTopIndex::move_block`] or drop them. Blocks before `start_row`
    /// are untouched, apart from clamping: after the edit every block row is
    /// clamped to the new `max_row`.
    ///
    /// Extents saturate instead of overflowing. Passing `usize::MAX` for both
    /// extents from row 0 therefore resets the document: every block snaps to
    /// row 0 and is reported, and `max_row` collapses to 0. Hosts resetting
    /// this way must call [`LineTopIndex::set_max_row`] with the new document
    /// size afterwards.
    ///
    /// ```rust
    /// use understory_line_top::LineTopIndex;
    ///
    /// let mut index = LineTopIndex::new(10.0, 12);
    /// let inside = index.insert_block(5, 20.0);
    /// let after = index.insert_block(9, 20.0);
    ///
    /// // Rows 4..7 become a single row.
    /// let reanchored = index.splice(4, 3, 1);
    /// assert_eq!(reanchored.as_slice(), &[inside]);
    /// assert_eq!(index.block(inside).map(|b| b.row()), Some(5));
    /// assert_eq!(index.block(after).map(|b| b.row()), Some(7));
    /// assert_eq!(index.max_row(), 10);
    /// ```
    pub fn splice(
        &mut self,
        start_row: usize,
        old_extent: usize,
        new_extent: usize,
    ) -> ReanchoredBlocks {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "line_top_splice",
            start_row,
            old_extent,
            new_extent,
            blocks = self.blocks.len()
        )
        .entered();

        let old_end = start_row.saturating_add(old_extent);
        let reanchor_row = start_row.saturating_add(new_extent);
        self.max_row = shift_row(self.max_row, old_extent, new_extent);

        let mut reanchored = ReanchoredBlocks::new();
        for block in &mut self.blocks {
            let row = block.row();
            let row = if row < start_row {
                row
            } else if row >= old_end {
                shift_row(row, old_extent, new_extent)
            } else {
                reanchored.push(block.id());
                reanchor_row
            };
            block.set_row(row.min(self.max_row));
        }

        // Rows collapsing together can put a block placed after a row behind
        // one placed before it.
        if !self.blocks.is_sorted_by_key(Block::order_key) {
            self.blocks.sort_by_key(Block::order_key);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            max_row = self.max_row,
            reanchored = reanchored.len(),
            "spliced rows"
        );
        reanchored
    }

    /// Returns the offset of the top edge of `row`.
    ///
    /// Rows past `max_row` are clamped to `max_row`. Blocks anchored after
    /// `row` itself are not included; they sit below the row's content. Blocks
    /// placed before `row` are included.
    #[must_use]
    pub fn top_pixel_position_for_row(&self, row: usize) -> S {
        self.offset_for_row(row.min(self.max_row), true)
    }

    /// Returns the offset where the blocks placed before `row` begin.
    ///
    /// This is below the blocks placed after `row - 1`. Without blocks placed
    /// before `row`, it equals [`LineTopIndex::top_pixel_position_for_row`].
    /// Rows past `max_row` are clamped.
    #[must_use]
    pub fn pixel_position_before_blocks_for_row(&self, row: usize) -> S {
        self.offset_for_row(row.min(self.max_row), false)
    }

    /// Returns the offset where `row`'s content begins, below the blocks
    /// placed before it.
    ///
    /// Same as [`LineTopIndex::top_pixel_position_for_row`].
    #[must_use]
    pub fn pixel_position_after_blocks_for_row(&self, row: usize) -> S {
        self.top_pixel_position_for_row(row)
    }

    /// Returns the top offset of `row + 1` minus one default line height.
    ///
    /// This is the bottom of the row's content plus the height of the blocks
    /// between it and the content of `row + 1`, less one line. At `max_row` the clamping of
    /// [`LineTopIndex::top_pixel_position_for_row`] applies to `row + 1`.
    #[must_use]
    pub fn bottom_pixel_position_for_row(&self, row: usize) -> S {
        self.top_pixel_position_for_row(row.saturating_add(1)) - self.default_line_height
    }

    /// Returns the row displayed at vertical offset `top`.
    ///
    /// Blocks are walked in row order. While `top` lies before the end of the
    /// next block, it resolves to the row whose top edge is nearest, never
    /// past that block's anchor; an offset exactly on a row midpoint resolves
    /// to the earlier row. Once every block has been passed, the remaining
    /// distance is rounded to whole rows, a midpoint resolving to the later
    /// row. The result is clamped to `0..=max_row`.
    ///
    /// A block's end is measured as its anchor row's top edge plus the
    /// block's height, so the last line-height of a block's gap already
    /// counts towards the following row.
    ///
    /// ```rust
    /// use understory_line_top::LineTopIndex;
    ///
    /// let index = LineTopIndex::new(10.0, 12);
    /// assert_eq!(index.row_for_top_pixel_position(44.0), 4);
    /// assert_eq!(index.row_for_top_pixel_position(46.0), 5);
    /// assert_eq!(index.row_for_top_pixel_position(-5.0), 0);
    /// assert_eq!(index.row_for_top_pixel_position(1000.0), 12);
    /// ```
    #[must_use]
    pub fn row_for_top_pixel_position(&self, top: S) -> usize {
        let line_height = self.default_line_height;
        let mut blocks_height = S::zero();
        let mut last_row = 0;
        let mut last_top = S::zero();

        for block in &self.blocks {
            let next_blocks_height = blocks_height + block.height();
            let row = block.scan_row();
            let lines_height = S::from_usize(row) * line_height;
            if next_blocks_height + lines_height > top {
                // Rows past `last_row` whose midpoint lies above `top`.
                let steps = ((top - last_top) / line_height - S::from_usize(1).half())
                    .ceil_to_usize()
                    .min(row.saturating_sub(last_row));
                return (last_row + steps).min(self.max_row);
            }
            blocks_height = next_blocks_height;
            last_row = row;
            last_top = blocks_height + lines_height;
        }

        let remaining_height = (top - last_top).max(S::zero());
        let remaining_rows = (remaining_height / line_height).round_half_up_to_usize();
        last_row.saturating_add(remaining_rows).min(self.max_row)
    }

    fn insertion_point(&self, key: (usize, bool)) -> usize {
        self.blocks.partition_point(|block| block.order_key() <= key)
    }

    /// Lines above `row` plus the blocks above its content, leaving out those
    /// placed before `row` unless `include_before` is set.
    fn offset_for_row(&self, row: usize, include_before: bool) -> S {
        let key = (row, true);
        let blocks_height = self
            .blocks
            .iter()
            .take_while(|block| {
                if include_before {
                    block.order_key() <= key
                } else {
                    block.order_key() < key
                }
            })
            .fold(S::zero(), |sum, block| sum + block.height());
        S::from_usize(row) * self.default_line_height + blocks_height
    }

    fn take_block(&mut self, id: BlockId) -> Option<Block<S>> {
        let position = self.blocks.iter().position(|block| block.id() == id)?;
        Some(self.blocks.remove(position))
    }
}

fn shift_row(row: usize, old_extent: usize, new_extent: usize) -> usize {
    row.saturating_add(new_extent).saturating_sub(old_extent)
}
