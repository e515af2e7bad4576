// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moving maps in and out of `image` buffers.
//!
//! The carver itself only knows about packed pixels and floating-point
//! maps; these helpers are what the command line uses to load a file,
//! write the result, and dump the auxiliary maps as greyscale images.

use crate::packed::{pack_rgba, unpack_rgba};
use crate::twodmap::TwoDimensionalMap;
use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgba, RgbaImage};
use num_traits::{clamp, NumCast};

/// Pack an RGBA image into a pixel map.
pub fn image_to_pixels(image: &RgbaImage) -> TwoDimensionalMap<u32> {
    let (width, height) = image.dimensions();
    let mut pixels = TwoDimensionalMap::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let c = pixel.channels();
        pixels[(x, y)] = pack_rgba([c[0], c[1], c[2], c[3]]);
    }
    pixels
}

/// Unpack the valid part of a pixel map.  Alpha is forced opaque, since
/// the carved result is meant to be displayed as is.
pub fn pixels_to_image(pixels: &TwoDimensionalMap<u32>) -> RgbaImage {
    let mut out: RgbaImage = ImageBuffer::new(pixels.width(), pixels.height());
    for (y, row) in pixels.rows().enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            let [r, g, b, _] = unpack_rgba(pixel);
            out.put_pixel(x as u32, y as u32, *Rgba::from_slice(&[r, g, b, 255]));
        }
    }
    out
}

// Scale a [0, max] value to a byte.
fn to_grey(value: f64, max: f64) -> Luma<u8> {
    let scaled = if max > 0.0 { value * 255.0 / max } else { 0.0 };
    let byte: u8 = NumCast::from(clamp(scaled.round(), 0.0, 255.0)).unwrap_or(0);
    *Luma::from_slice(&[byte])
}

fn map_to_image(map: &TwoDimensionalMap<f64>, max: f64) -> GrayImage {
    let mut out: GrayImage = ImageBuffer::new(map.width(), map.height());
    for (y, row) in map.rows().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, to_grey(value, max));
        }
    }
    out
}

/// Render an energy map, brightest at the map's maximum energy.
pub fn energy_to_image(energy: &TwoDimensionalMap<f64>) -> GrayImage {
    let max = energy.rows().flatten().cloned().fold(0.0, f64::max);
    map_to_image(energy, max)
}

/// Render a luminance map, which is already in [0, 1].
pub fn luminance_to_image(lum: &TwoDimensionalMap<f64>) -> GrayImage {
    map_to_image(lum, 1.0)
}
