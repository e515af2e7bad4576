// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A two-dimensional map that only ever gets narrower.
//!
//! Every matrix the carver tracks (pixels, luminance, energy, the cost
//! table and the patcher's stale mask) is one of these.  The allocation
//! is made once with the original width as its stride; removing a
//! seam compacts each row in place and shrinks the *effective* width
//! by one.  Cells at or past the effective width are leftovers and
//! nothing reads them.

use crate::errors::CarveError;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of `P`, row-major, with a
/// fixed stride and a shrinking logical width.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    stride: u32,
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            stride: width,
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map from a vector of rows.  The rows must all be the
    /// same, non-zero, length, and there must be at least one.
    pub fn from_rows(rows: Vec<Vec<P>>) -> Result<Self, CarveError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidDimensions { width, height });
        }
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(CarveError::RaggedRows {
                row,
                expected: width,
                found,
            });
        }

        Ok(TwoDimensionalMap {
            stride: width as u32,
            width: width as u32,
            height: height as u32,
            data: rows.into_iter().flatten().collect(),
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  The
    // stride, not the effective width, is what addresses memory.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.stride as usize) + (x as usize)
    }

    /// The current logical width.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The width the map was allocated with.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// The valid prefix of row `y`.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let start = self.get_index(0, y);
        let width = self.width as usize;
        &mut self.data[start..start + width]
    }

    /// Iterate over the valid prefix of every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// A copy of the logically valid cells, one vector per row.
    pub fn to_rows(&self) -> Vec<Vec<P>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// The entire allocation, including stale cells past the
    /// effective width.
    pub fn as_raw(&self) -> &[P] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    /// Change the logical width without touching the allocation.  Used
    /// to keep a rebuilt table in step with the matrix it was built
    /// from.
    pub(crate) fn set_width(&mut self, width: u32) {
        debug_assert!(width <= self.stride);
        self.width = width;
    }

    /// Delete one cell per row at the seam's column, shifting the rest
    /// of the row left by one.  The last valid cell of each row is left
    /// behind as a stale duplicate; the effective width shrinks by one.
    pub fn remove_seam(&mut self, seam: &[u32]) {
        debug_assert_eq!(seam.len(), self.height as usize);
        debug_assert!(self.width > 1);
        let width = self.width as usize;
        for (y, &column) in seam.iter().enumerate() {
            let start = self.get_index(0, y as u32);
            let column = column as usize;
            debug_assert!(column < width);
            self.data
                .copy_within(start + column + 1..start + width, start + column);
        }
        self.width -= 1;
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
