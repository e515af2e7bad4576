// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What can go wrong before carving starts.
//!
//! The algorithm itself is total over well-formed input; everything
//! here is a precondition check on the shape of that input.

use failure::Fail;

/// Rejections raised before (or between) seam removals.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CarveError {
    /// The pixel matrix has no rows or no columns.
    #[fail(display = "image must be at least 1x1, got {}x{}", width, height)]
    InvalidDimensions { width: usize, height: usize },

    /// A row's length differs from the first row's.
    #[fail(
        display = "row {} has {} columns, expected {}",
        row, found, expected
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Removing this many seams would leave no columns at all.
    #[fail(
        display = "cannot remove {} seams from an image {} pixels wide",
        seams, width
    )]
    SeamCountExceedsWidth { seams: u32, width: u32 },

    /// A single step was requested on an image that is one column wide.
    #[fail(display = "image is already a single column wide")]
    ImageTooNarrow,
}
