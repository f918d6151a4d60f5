// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_line_top --heading-base-level=0

//! Understory Line Top: vertical layout index for text views.
//!
//! This crate maps between logical document rows and vertical offsets
//! (typically logical pixels) for a text view whose rows share a uniform
//! height, interleaved with variable-height **blocks**: decorations such as
//! diagnostics, diff hunks, or inline previews that occupy extra space below a
//! given row.
//!
//! The core type is [`LineTopIndex`], which owns:
//!
//! - the default line height and the last valid row,
//! - a row-ordered collection of [`Block`]s, each addressed by a stable
//!   [`BlockId`] and placed after (or, with [`BlockPlacement::Before`],
//!   before) its row's content.
//!
//! and answers two inverse queries that stay consistent under mutation:
//!
//! - [`LineTopIndex::top_pixel_position_for_row`]: where a row starts.
//! - [`LineTopIndex::row_for_top_pixel_position`]: which row sits at an offset.
//!
//! Document edits are reported with [`LineTopIndex::splice`], which shifts
//! block anchors the way a text buffer reports row-range replacements
//! (`start_row`, `old_extent`, `new_extent`).
//!
//! This crate deliberately does **not** know about text buffers, wrapping,
//! folding, or painting. Host frameworks are responsible for:
//!
//! - Calling [`LineTopIndex::splice`] whenever the buffer replaces a row range,
//!   before issuing queries that depend on the new row numbering.
//! - Inserting, resizing, and removing blocks as decorations come and go.
//! - Re-resolving blocks reported by [`LineTopIndex::splice`] whose anchor row
//!   was replaced, typically via [`LineTopIndex::move_block`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_line_top::LineTopIndex;
//!
//! // 13 rows (0..=12), each 10 logical pixels tall.
//! let mut index = LineTopIndex::new(10.0, 12);
//! index.insert_block(0, 10.0);
//! index.insert_block(3, 20.0);
//! index.insert_block(5, 20.0);
//!
//! assert_eq!(index.top_pixel_position_for_row(1), 20.0);
//! assert_eq!(index.top_pixel_position_for_row(4), 70.0);
//! assert_eq!(index.row_for_top_pixel_position(70.0), 4);
//!
//! // Four rows inserted at the top of the document push every block down.
//! index.splice(0, 0, 4);
//! assert_eq!(index.top_pixel_position_for_row(5), 60.0);
//! assert_eq!(index.max_row(), 16);
//! ```
//!
//! All heights and offsets live in a caller-chosen 1D coordinate space and are
//! expected to be finite; the default line height must be positive.
//! Out-of-range rows and offsets are clamped rather than rejected.
//!
//! ## Features
//!
//! - `std` (default): no-op marker for dependants that prefer `std` builds.
//! - `tracing`: emits `tracing` events for block mutations and splices.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod block;
mod index;
mod scalar;

pub use block::{Block, BlockId, BlockPlacement, ReanchoredBlocks};
pub use index::LineTopIndex;
pub use scalar::Scalar;
