// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pixels to luminance.
//!
//! Uses the Rec. 709 luma weights on channels normalised to [0, 1].
//! Alpha plays no part.

use crate::packed::unpack_rgba;
use crate::twodmap::TwoDimensionalMap;
use num_traits::clamp;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

/// The luminance of a single packed pixel, in [0, 1].
#[inline]
pub fn rgb_to_luminance(pixel: u32) -> f64 {
    let [r, g, b, _] = unpack_rgba(pixel);
    let luma = RED_WEIGHT * (f64::from(r) / 255.0)
        + GREEN_WEIGHT * (f64::from(g) / 255.0)
        + BLUE_WEIGHT * (f64::from(b) / 255.0);
    // The weights sum to one, but only up to rounding.
    clamp(luma, 0.0, 1.0)
}

/// Convert every valid cell of a pixel map.  The result has the same
/// stride and effective width as the input.
pub fn calculate_luminance(pixels: &TwoDimensionalMap<u32>) -> TwoDimensionalMap<f64> {
    let mut lum = TwoDimensionalMap::new(pixels.stride(), pixels.height());
    lum.set_width(pixels.width());
    for y in 0..pixels.height() {
        for (cell, &pixel) in lum.row_mut(y).iter_mut().zip(pixels.row(y)) {
            *cell = rgb_to_luminance(pixel);
        }
    }
    lum
}
