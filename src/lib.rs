// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving on packed RGBA pixels.
//!
//! Luminance is taken with the Rec. 709 weights, energy is the squared
//! Sobel gradient of that luminance, and vertical seams are found by
//! dynamic programming.  After each removal only the energy cells next
//! to the removed seam are recomputed.

pub mod ternary;

pub mod errors;
pub use errors::CarveError;

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod packed;
pub use packed::{pack_rgba, unpack_rgba};

pub mod luminance;
pub use luminance::{calculate_luminance, rgb_to_luminance};

pub mod energy;
pub use energy::{calculate_energy, energy_at};

pub mod seamfinder;
pub use seamfinder::{cost_table, find_vertical_seam, Seam};

pub mod patcher;
pub use patcher::EnergyPatcher;

pub mod seamcarver;
pub use seamcarver::{seamcarve, CarveState, Carved, EnergyUpdate, SeamCarver};

pub mod dump;
pub use dump::{energy_to_image, image_to_pixels, luminance_to_image, pixels_to_image};
