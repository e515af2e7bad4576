// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Luminance and energy are computed once, up front.  After that every
//! seam costs one cost-table pass, one walk back up the table, one
//! in-place compaction of each tracked matrix, and a patch of the
//! energy cells next to the seam.
//!
//! ```text
//! Idle -> LuminanceComputed -> EnergyComputed
//!      -> { CostTableBuilt -> SeamFound -> SeamRemoved -> EnergyPatched }*
//!      -> Done
//! ```

use crate::energy::{calculate_energy, fill_energy};
use crate::errors::CarveError;
use crate::luminance::calculate_luminance;
use crate::patcher::EnergyPatcher;
use crate::seamfinder::{fill_cost_table, find_vertical_seam, Seam};
use crate::twodmap::TwoDimensionalMap;
use log::{debug, trace};

/// Where a carver is in its run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarveState {
    Idle,
    LuminanceComputed,
    EnergyComputed,
    CostTableBuilt,
    SeamFound,
    SeamRemoved,
    EnergyPatched,
    Done,
}

fn transition(state: &mut CarveState, next: CarveState) {
    trace!("{:?} -> {:?}", state, next);
    *state = next;
}

/// How the energy map is brought up to date after a removal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnergyUpdate {
    /// Recompute only the cells next to the removed seam.
    Incremental,
    /// Recompute the whole map.  Slow; kept as a reference.
    Full,
}

impl Default for EnergyUpdate {
    fn default() -> Self {
        EnergyUpdate::Incremental
    }
}

/// Everything a run leaves behind.  All maps keep their original
/// allocation; only the first `width` cells of each row are valid.
#[derive(Debug, Clone)]
pub struct Carved {
    pub pixels: TwoDimensionalMap<u32>,
    pub luminance: TwoDimensionalMap<f64>,
    pub energy: TwoDimensionalMap<f64>,
    /// The table the last seam was found in.  `None` if no seam was
    /// removed.
    pub cost: Option<TwoDimensionalMap<f64>>,
    pub width: u32,
    /// Every removed seam, in removal order, each in the coordinates
    /// of the image it was removed from.
    pub seams: Vec<Seam>,
}

/// An image being carved, along with its derived maps.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    pixels: TwoDimensionalMap<u32>,
    luminance: TwoDimensionalMap<f64>,
    energy: TwoDimensionalMap<f64>,
    cost: Option<TwoDimensionalMap<f64>>,
    patcher: EnergyPatcher,
    update: EnergyUpdate,
    state: CarveState,
    seams: Vec<Seam>,
}

impl SeamCarver {
    /// Take ownership of a pixel map and compute its luminance and
    /// energy.
    pub fn new(pixels: TwoDimensionalMap<u32>) -> Result<Self, CarveError> {
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }

        // A map that has already been narrowed elsewhere is repacked so
        // that every tracked matrix starts out with stride == width.
        let pixels = if width < pixels.stride() {
            TwoDimensionalMap::from_rows(pixels.to_rows())?
        } else {
            pixels
        };
        debug!("carving a {}x{} image", width, height);

        let mut carver = SeamCarver {
            luminance: TwoDimensionalMap::new(0, 0),
            energy: TwoDimensionalMap::new(0, 0),
            cost: None,
            patcher: EnergyPatcher::new(width, height),
            update: EnergyUpdate::default(),
            state: CarveState::Idle,
            seams: Vec::new(),
            pixels,
        };

        carver.luminance = calculate_luminance(&carver.pixels);
        transition(&mut carver.state, CarveState::LuminanceComputed);
        carver.energy = calculate_energy(&carver.luminance);
        transition(&mut carver.state, CarveState::EnergyComputed);
        Ok(carver)
    }

    /// Build a carver straight from rows of packed pixels.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, CarveError> {
        SeamCarver::new(TwoDimensionalMap::from_rows(rows)?)
    }

    /// Choose how energy is updated after each removal.
    pub fn with_energy_update(mut self, update: EnergyUpdate) -> Self {
        self.update = update;
        self
    }

    pub fn state(&self) -> CarveState {
        self.state
    }

    /// The current effective width.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &TwoDimensionalMap<u32> {
        &self.pixels
    }

    pub fn luminance(&self) -> &TwoDimensionalMap<f64> {
        &self.luminance
    }

    pub fn energy(&self) -> &TwoDimensionalMap<f64> {
        &self.energy
    }

    pub fn cost(&self) -> Option<&TwoDimensionalMap<f64>> {
        self.cost.as_ref()
    }

    /// Find and remove one seam.  Returns the seam, in the coordinates
    /// of the image before removal.
    pub fn step(&mut self) -> Result<Seam, CarveError> {
        if self.width() <= 1 {
            return Err(CarveError::ImageTooNarrow);
        }

        let (stride, height) = (self.pixels.stride(), self.pixels.height());
        let cost = self
            .cost
            .get_or_insert_with(|| TwoDimensionalMap::new(stride, height));
        fill_cost_table(&self.energy, cost);
        transition(&mut self.state, CarveState::CostTableBuilt);

        let seam = find_vertical_seam(cost);
        transition(&mut self.state, CarveState::SeamFound);

        if self.update == EnergyUpdate::Incremental {
            self.patcher.mark(&seam);
        }
        self.pixels.remove_seam(&seam);
        self.luminance.remove_seam(&seam);
        self.energy.remove_seam(&seam);
        self.patcher.remove_seam(&seam);
        transition(&mut self.state, CarveState::SeamRemoved);

        match self.update {
            EnergyUpdate::Incremental => {
                self.patcher.patch(&self.luminance, &mut self.energy, &seam);
            }
            EnergyUpdate::Full => fill_energy(&self.luminance, &mut self.energy),
        }
        transition(&mut self.state, CarveState::EnergyPatched);

        debug!("removed seam {}, width now {}", self.seams.len() + 1, self.width());
        self.seams.push(seam.clone());
        Ok(seam)
    }

    /// Remove `seams` seams.  At least one column must survive, so
    /// `seams` must be less than the current width.
    pub fn carve(&mut self, seams: u32) -> Result<(), CarveError> {
        let width = self.width();
        if seams >= width {
            return Err(CarveError::SeamCountExceedsWidth { seams, width });
        }
        for _ in 0..seams {
            self.step()?;
        }
        transition(&mut self.state, CarveState::Done);
        Ok(())
    }

    /// Hand back the carved image and its derived maps.
    pub fn finish(self) -> Carved {
        Carved {
            width: self.pixels.width(),
            pixels: self.pixels,
            luminance: self.luminance,
            energy: self.energy,
            cost: self.cost,
            seams: self.seams,
        }
    }
}

/// Remove `seams` vertical seams from `pixels`.
pub fn seamcarve(pixels: TwoDimensionalMap<u32>, seams: u32) -> Result<Carved, CarveError> {
    let mut carver = SeamCarver::new(pixels)?;
    carver.carve(seams)?;
    Ok(carver.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0xffff_ffff;
    const BLACK: u32 = 0xff00_0000;

    fn diagonal(width: usize, height: usize) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_rows(
            (0..height)
                .map(|y| (0..width).map(|x| shade(x == y)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn shade(bright: bool) -> u32 {
        if bright {
            WHITE
        } else {
            BLACK
        }
    }

    #[test]
    fn new_carver_has_computed_energy() {
        let carver = SeamCarver::new(diagonal(3, 3)).unwrap();
        assert_eq!(carver.state(), CarveState::EnergyComputed);
        assert_eq!(carver.energy().row(1), &[8.0, 0.0, 8.0]);
        assert!(carver.cost().is_none());
    }

    #[test]
    fn one_step_narrows_by_one() {
        let mut carver = SeamCarver::new(diagonal(3, 3)).unwrap();
        let seam = carver.step().unwrap();
        assert_eq!(seam, vec![0, 1, 0]);
        assert_eq!(carver.state(), CarveState::EnergyPatched);
        assert_eq!((carver.width(), carver.height()), (2, 3));
        assert_eq!(
            carver.pixels().to_rows(),
            vec![
                vec![BLACK, BLACK],
                vec![BLACK, BLACK],
                vec![BLACK, WHITE],
            ]
        );
    }

    #[test]
    fn zero_seams_is_a_no_op() {
        let carved = seamcarve(diagonal(4, 3), 0).unwrap();
        assert_eq!(carved.pixels, diagonal(4, 3));
        assert_eq!(carved.width, 4);
        assert!(carved.cost.is_none());
        assert!(carved.seams.is_empty());
    }

    #[test]
    fn carve_to_a_single_column() {
        let mut carver = SeamCarver::new(diagonal(5, 4)).unwrap();
        carver.carve(4).unwrap();
        assert_eq!(carver.state(), CarveState::Done);
        assert_eq!(carver.width(), 1);
        assert_eq!(carver.step(), Err(CarveError::ImageTooNarrow));
    }

    #[test]
    fn too_many_seams_are_rejected() {
        assert_eq!(
            seamcarve(diagonal(3, 3), 3).map(|c| c.width),
            Err(CarveError::SeamCountExceedsWidth { seams: 3, width: 3 })
        );
    }

    #[test]
    fn incremental_and_full_updates_agree() {
        let mut fast = SeamCarver::new(diagonal(7, 5)).unwrap();
        let mut slow = SeamCarver::new(diagonal(7, 5))
            .unwrap()
            .with_energy_update(EnergyUpdate::Full);
        for _ in 0..6 {
            assert_eq!(fast.step().unwrap(), slow.step().unwrap());
            assert_eq!(fast.energy().to_rows(), slow.energy().to_rows());
        }
    }

    #[test]
    fn narrowed_input_is_repacked() {
        let mut pixels = diagonal(4, 2);
        pixels.remove_seam(&[3, 3]);
        let carver = SeamCarver::new(pixels).unwrap();
        assert_eq!(carver.pixels().stride(), 3);
        assert_eq!(carver.energy().width(), 3);
    }
}
