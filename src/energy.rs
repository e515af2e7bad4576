// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a luminance map
//!
//! The energy of a pixel is the squared magnitude of the Sobel gradient
//! of the luminance around it.  Neighbours that fall outside the map
//! contribute zero; they are neither skipped nor mirrored, so a flat
//! image still has energy along its border.  That bias is deliberate
//! and reproduced exactly.
//!
//! The single-cell form, `energy_at`, is the one true formula: the full
//! pass and the incremental patcher both go through it, so their
//! results agree to the bit.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;

const SOBEL_X: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// The energy of a single cell, computed against the map's current
/// effective width.
pub fn energy_at(lum: &TwoDimensionalMap<f64>, x: u32, y: u32) -> f64 {
    let (width, height) = (i64::from(lum.width()), i64::from(lum.height()));
    let (cx, cy) = (i64::from(x), i64::from(y));

    let (sx, sy) = iproduct!(0..3usize, 0..3usize).fold((0.0, 0.0), |(sx, sy), (ky, kx)| {
        let (nx, ny) = (cx + kx as i64 - 1, cy + ky as i64 - 1);
        let c = cq!(
            nx < 0 || ny < 0 || nx >= width || ny >= height,
            0.0,
            lum[(nx as u32, ny as u32)]
        );
        (sx + c * SOBEL_X[ky][kx], sy + c * SOBEL_Y[ky][kx])
    });
    sx * sx + sy * sy
}

/// Compute the energy of every valid cell of a luminance map.
pub fn calculate_energy(lum: &TwoDimensionalMap<f64>) -> TwoDimensionalMap<f64> {
    let mut energy = TwoDimensionalMap::new(lum.stride(), lum.height());
    fill_energy(lum, &mut energy);
    energy
}

/// Recompute `energy` from scratch, in place.  The two maps must share
/// a stride; the energy map takes on the luminance map's width.
#[cfg(not(feature = "threaded"))]
pub fn fill_energy(lum: &TwoDimensionalMap<f64>, energy: &mut TwoDimensionalMap<f64>) {
    debug_assert_eq!(lum.stride(), energy.stride());
    energy.set_width(lum.width());
    for y in 0..lum.height() {
        for x in 0..lum.width() {
            energy[(x, y)] = energy_at(lum, x, y);
        }
    }
}

/// Recompute `energy` from scratch, in place.  The two maps must share
/// a stride; the energy map takes on the luminance map's width.
///
/// Rows are independent of one another here, so the map is cut into
/// horizontal bands, one per CPU, and each band is written by its own
/// scoped thread.
#[cfg(feature = "threaded")]
pub fn fill_energy(lum: &TwoDimensionalMap<f64>, energy: &mut TwoDimensionalMap<f64>) {
    debug_assert_eq!(lum.stride(), energy.stride());
    energy.set_width(lum.width());

    let (width, height) = (lum.width(), lum.height() as usize);
    let stride = lum.stride() as usize;
    if width == 0 || height == 0 {
        return;
    }

    let bands = num_cpus::get().max(1);
    let rows_per_band = (height + bands - 1) / bands;

    let result = crossbeam::scope(|scope| {
        for (band, chunk) in energy
            .as_raw_mut()
            .chunks_mut(rows_per_band * stride)
            .enumerate()
        {
            scope.spawn(move |_| {
                for (offset, row) in chunk.chunks_mut(stride).enumerate() {
                    let y = (band * rows_per_band + offset) as u32;
                    for x in 0..width {
                        row[x as usize] = energy_at(lum, x, y);
                    }
                }
            });
        }
    });

    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}
