// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Incremental energy updates.
//!
//! Removing a seam only changes the 3×3 neighbourhoods of cells that
//! were within one step of it.  Rather than recompute the whole energy
//! map after every removal, the patcher marks that window *before* the
//! seam is removed, lets the mark be compacted along with everything
//! else, and afterwards recomputes only the marked cells.
//!
//! Marks live in a parallel boolean map, never in the energy map
//! itself.
//!
//! After compaction the marked cells on row `y` form one contiguous run
//! that contains columns `seam[y] - 1` and `seam[y]` (where those
//! exist), so scanning outward from the seam and stopping at the first
//! unmarked cell finds every one of them.

use crate::energy::energy_at;
use crate::twodmap::TwoDimensionalMap;
use log::trace;

/// Tracks which energy cells are stale.
#[derive(Debug, Clone)]
pub struct EnergyPatcher {
    stale: TwoDimensionalMap<bool>,
}

impl EnergyPatcher {
    /// A patcher for maps allocated `stride` wide and `height` tall.
    pub fn new(stride: u32, height: u32) -> Self {
        EnergyPatcher {
            stale: TwoDimensionalMap::new(stride, height),
        }
    }

    /// Mark every cell within one row and one column of the seam.  Must
    /// be called before the seam is removed.
    pub fn mark(&mut self, seam: &[u32]) {
        let (width, height) = (self.stale.width(), self.stale.height());
        for (cy, &cx) in seam.iter().enumerate() {
            let cy = cy as u32;
            let rows = cy.saturating_sub(1)..=(cy + 1).min(height - 1);
            let columns = cx.saturating_sub(1)..=(cx + 1).min(width - 1);
            for y in rows {
                for x in columns.clone() {
                    self.stale[(x, y)] = true;
                }
            }
        }
    }

    /// Compact the marks along with the seam, exactly as the tracked
    /// matrices are compacted.
    pub fn remove_seam(&mut self, seam: &[u32]) {
        self.stale.remove_seam(seam);
    }

    /// Recompute every marked cell of `energy` from `lum` and clear the
    /// marks.  `seam` is the seam just removed.  Returns the number of
    /// cells recomputed.
    pub fn patch(
        &mut self,
        lum: &TwoDimensionalMap<f64>,
        energy: &mut TwoDimensionalMap<f64>,
        seam: &[u32],
    ) -> usize {
        debug_assert_eq!(lum.width(), energy.width());
        debug_assert_eq!(lum.width(), self.stale.width());

        let width = self.stale.width();
        let mut patched = 0;
        for (y, &column) in seam.iter().enumerate() {
            let y = y as u32;

            let mut x = column;
            while x < width && self.stale[(x, y)] {
                energy[(x, y)] = energy_at(lum, x, y);
                self.stale[(x, y)] = false;
                patched += 1;
                x += 1;
            }

            let mut x = column;
            while x > 0 && self.stale[(x - 1, y)] {
                x -= 1;
                energy[(x, y)] = energy_at(lum, x, y);
                self.stale[(x, y)] = false;
                patched += 1;
            }

            debug_assert!(self.stale.row(y).iter().all(|s| !s));
        }
        trace!("patched {} energy cells", patched);
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::calculate_energy;

    fn lum() -> TwoDimensionalMap<f64> {
        TwoDimensionalMap::from_rows(vec![
            vec![0.1, 0.9, 0.3, 0.4, 0.0, 0.6],
            vec![0.5, 0.2, 0.8, 0.0, 1.0, 0.3],
            vec![0.6, 0.7, 0.25, 1.0, 0.1, 0.9],
            vec![0.2, 0.3, 0.5, 0.8, 0.4, 0.0],
        ])
        .unwrap()
    }

    fn remove_and_patch(seam: &[u32]) -> usize {
        let mut lum = lum();
        let mut energy = calculate_energy(&lum);
        let mut patcher = EnergyPatcher::new(lum.stride(), lum.height());

        patcher.mark(seam);
        patcher.remove_seam(seam);
        lum.remove_seam(seam);
        energy.remove_seam(seam);
        let patched = patcher.patch(&lum, &mut energy, seam);

        assert_eq!(energy.to_rows(), calculate_energy(&lum).to_rows());
        patched
    }

    #[test]
    fn straight_seam_patches_a_narrow_band() {
        // Two cells per row: one either side of the removed column.
        assert_eq!(remove_and_patch(&[3, 3, 3, 3]), 8);
    }

    #[test]
    fn wandering_seam_matches_full_recompute() {
        remove_and_patch(&[1, 2, 3, 2]);
        remove_and_patch(&[4, 3, 2, 1]);
    }

    #[test]
    fn edge_seams_match_full_recompute() {
        assert_eq!(remove_and_patch(&[0, 0, 0, 0]), 4);
        assert_eq!(remove_and_patch(&[5, 5, 5, 5]), 4);
        remove_and_patch(&[0, 1, 0, 1]);
        remove_and_patch(&[5, 4, 5, 4]);
    }

    #[test]
    fn marks_stay_inside_the_map() {
        let mut patcher = EnergyPatcher::new(2, 1);
        patcher.mark(&[1]);
        assert_eq!(patcher.stale.to_rows(), vec![vec![true, true]]);
    }
}
