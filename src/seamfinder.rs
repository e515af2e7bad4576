// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! From an energy map to a vertical seam.
//!
//! The cost table holds, for every cell, the cheapest total energy of
//! any connected path from the top row down to that cell.  The seam is
//! recovered by walking the table back up from the cheapest cell on
//! the bottom row.  No back-pointers are stored; the walk re-examines
//! the three candidates above each step instead.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;

/// One column index per row, top to bottom.
pub type Seam = Vec<u32>;

/// The column in `columns` with the lowest cost on row `y`.  Ties go
/// to the first candidate, and `columns` is always scanned left to
/// right, so ties go to the leftmost column.
fn cheapest<I>(cost: &TwoDimensionalMap<f64>, y: u32, columns: I) -> u32
where
    I: Iterator<Item = u32>,
{
    columns.fold(None, |best: Option<u32>, x| match best {
        Some(b) if cost[(b, y)] <= cost[(x, y)] => Some(b),
        _ => Some(x),
    })
    .unwrap_or(0)
}

/// Rebuild `cost` from `energy`.  The table is sized to the energy
/// map's stride once and then reused; its width follows the energy
/// map's.
pub fn fill_cost_table(energy: &TwoDimensionalMap<f64>, cost: &mut TwoDimensionalMap<f64>) {
    debug_assert_eq!(energy.stride(), cost.stride());
    let (width, height) = (energy.width(), energy.height());
    cost.set_width(width);

    cost.row_mut(0).copy_from_slice(energy.row(0));

    let maxwidth = width - 1;
    // Each cell is its own energy plus the cheapest of the (up to)
    // three cells above it.  Columns off either edge are simply not
    // candidates.
    for y in 1..height {
        for x in 0..width {
            let above = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let parent = above
                .map(|px| cost[(px, y - 1)])
                .fold(std::f64::INFINITY, f64::min);
            cost[(x, y)] = energy[(x, y)] + parent;
        }
    }
}

/// Build a fresh cost table for an energy map.
pub fn cost_table(energy: &TwoDimensionalMap<f64>) -> TwoDimensionalMap<f64> {
    let mut cost = TwoDimensionalMap::new(energy.stride(), energy.height());
    fill_cost_table(energy, &mut cost);
    cost
}

/// Walk a cost table from its cheapest bottom cell back to the top
/// row.  Each step up considers the column directly above and its two
/// neighbours, so the seam is connected by construction.
pub fn find_vertical_seam(cost: &TwoDimensionalMap<f64>) -> Seam {
    let (width, height) = (cost.width(), cost.height());
    let maxwidth = width - 1;

    let mut seam = vec![0; height as usize];
    let mut column = cheapest(cost, height - 1, 0..width);
    seam[(height - 1) as usize] = column;

    for y in (0..height - 1).rev() {
        let above = cq!(column == 0, 0, column - 1)..=cq!(column == maxwidth, maxwidth, column + 1);
        column = cheapest(cost, y, above);
        seam[y as usize] = column;
    }
    seam
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(rows: Vec<Vec<f64>>) -> TwoDimensionalMap<f64> {
        TwoDimensionalMap::from_rows(rows).unwrap()
    }

    #[test]
    fn cost_table_accumulates_down() {
        let energy = map(vec![
            vec![2.0, 8.0, 2.0],
            vec![8.0, 0.0, 8.0],
            vec![2.0, 8.0, 2.0],
        ]);
        assert_eq!(
            cost_table(&energy).to_rows(),
            vec![
                vec![2.0, 8.0, 2.0],
                vec![10.0, 2.0, 10.0],
                vec![4.0, 10.0, 4.0],
            ]
        );
    }

    #[test]
    fn edges_ignore_missing_neighbours() {
        // Treating off-edge neighbours as zero would give column 0 a
        // cost of 5 on the second row.
        let energy = map(vec![vec![9.0, 9.0], vec![5.0, 5.0]]);
        assert_eq!(cost_table(&energy).row(1), &[14.0, 14.0]);
    }

    #[test]
    fn ties_go_left() {
        let energy = map(vec![
            vec![2.0, 8.0, 2.0],
            vec![8.0, 0.0, 8.0],
            vec![2.0, 8.0, 2.0],
        ]);
        assert_eq!(find_vertical_seam(&cost_table(&energy)), vec![0, 1, 0]);
    }

    #[test]
    fn seam_follows_the_valley() {
        let energy = map(vec![
            vec![9.0, 9.0, 0.0, 9.0, 9.0],
            vec![9.0, 1.0, 9.0, 8.0, 9.0],
            vec![9.0, 9.0, 9.0, 9.0, 0.0],
            vec![9.0, 9.0, 9.0, 0.0, 9.0],
        ]);
        assert_eq!(find_vertical_seam(&cost_table(&energy)), vec![2, 3, 4, 3]);
    }

    #[test]
    fn one_column_is_its_own_seam() {
        let energy = map(vec![vec![3.0], vec![1.0], vec![4.0]]);
        let cost = cost_table(&energy);
        assert_eq!(cost.to_rows(), vec![vec![3.0], vec![4.0], vec![8.0]]);
        assert_eq!(find_vertical_seam(&cost), vec![0, 0, 0]);
    }

    #[test]
    fn reused_table_tracks_width() {
        let mut energy = map(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let mut cost = cost_table(&energy);
        energy.remove_seam(&[0, 0]);
        fill_cost_table(&energy, &mut cost);
        assert_eq!(cost.width(), 2);
        assert_eq!(cost.to_rows(), vec![vec![2.0, 3.0], vec![7.0, 8.0]]);
    }
}
