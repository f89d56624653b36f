// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HEALPix map helpers.
//!
//! Pixel indexing comes from `cdshealpix`. All maps here use the NESTED
//! scheme; this means the children of a pixel at a finer resolution are a
//! contiguous block of indices, which makes changing resolution cheap.

mod error;

pub use error::HealpixError;

use cdshealpix::nested;

use crate::constants::{FULL_SKY_DEG2, UNSEEN};

/// The deepest HEALPix layer supported by `cdshealpix`.
const MAX_DEPTH: u8 = 29;

/// A full-sky HEALPix map in the NESTED scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct HealpixMap<T> {
    depth: u8,
    values: Vec<T>,
}

impl<T> HealpixMap<T> {
    /// Wrap values as a map. The number of values must be `12 * nside^2`.
    pub fn from_values(nside: u32, values: Vec<T>) -> Result<Self, HealpixError> {
        let depth = nside_to_depth(nside)?;
        let expected = npix(depth);
        if values.len() != expected {
            return Err(HealpixError::WrongNumValues {
                nside,
                expected,
                got: values.len(),
            });
        }
        Ok(Self { depth, values })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn nside(&self) -> u32 {
        1 << self.depth
    }

    pub fn npix(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Apply a function to every pixel value.
    pub fn map_values<U>(&self, f: impl Fn(&T) -> U) -> HealpixMap<U> {
        HealpixMap {
            depth: self.depth,
            values: self.values.iter().map(f).collect(),
        }
    }

    /// The area of a single pixel of this map \[deg^2\].
    pub fn pixel_area_deg2(&self) -> f64 {
        FULL_SKY_DEG2 / self.npix() as f64
    }
}

impl<T: Clone> HealpixMap<T> {
    /// A map with every pixel set to `value`.
    pub fn filled(nside: u32, value: T) -> Result<Self, HealpixError> {
        let depth = nside_to_depth(nside)?;
        Ok(Self {
            depth,
            values: vec![value; npix(depth)],
        })
    }
}

impl HealpixMap<bool> {
    /// The number of pixels that are `true`.
    pub fn count_valid(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    /// Change the resolution of a boolean mask. When degrading, a pixel is
    /// valid if any of its children are valid.
    pub fn ud_grade(&self, nside_out: u32) -> Result<HealpixMap<bool>, HealpixError> {
        let resampled = self
            .map_values(|&v| if v { 1.0 } else { 0.0 })
            .ud_grade(nside_out)?;
        Ok(resampled.map_values(|&v| v > 0.0))
    }
}

impl HealpixMap<f64> {
    /// Change the resolution of a map.
    ///
    /// When degrading, each output pixel is the mean of its children,
    /// ignoring [UNSEEN] and non-finite children; if no child is left then the
    /// output pixel is [UNSEEN]. When upgrading, each child inherits its parent's value.
    pub fn ud_grade(&self, nside_out: u32) -> Result<HealpixMap<f64>, HealpixError> {
        let depth_out = nside_to_depth(nside_out)?;
        let values = match depth_out.cmp(&self.depth) {
            std::cmp::Ordering::Equal => self.values.clone(),

            std::cmp::Ordering::Less => {
                let num_children = 1 << (2 * (self.depth - depth_out));
                self.values
                    .chunks_exact(num_children)
                    .map(|children| {
                        let (sum, count) = children
                            .iter()
                            .filter(|&&v| v.is_finite() && !is_unseen(v))
                            .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
                        if count == 0 {
                            UNSEEN
                        } else {
                            sum / count as f64
                        }
                    })
                    .collect()
            }

            std::cmp::Ordering::Greater => {
                let shift = 2 * (depth_out - self.depth);
                (0..npix(depth_out))
                    .map(|child| self.values[child >> shift])
                    .collect()
            }
        };

        Ok(HealpixMap {
            depth: depth_out,
            values,
        })
    }

    /// Set every pixel outside `mask` to [UNSEEN].
    pub fn masked(mut self, mask: &HealpixMap<bool>) -> Result<HealpixMap<f64>, HealpixError> {
        if mask.depth != self.depth {
            return Err(HealpixError::NsideMismatch {
                map_nside: self.nside(),
                mask_nside: mask.nside(),
            });
        }
        self.values
            .iter_mut()
            .zip(mask.values.iter())
            .filter(|(_, &valid)| !valid)
            .for_each(|(v, _)| *v = UNSEEN);
        Ok(self)
    }

    /// Mean over the pixels that are neither [UNSEEN] nor NaN. `None` if there
    /// are no such pixels.
    pub fn valid_mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter(|v| !v.is_nan() && !is_unseen(**v))
            .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// Is this value the HEALPix missing-value sentinel?
pub fn is_unseen(v: f64) -> bool {
    (v - UNSEEN).abs() <= 1e-7 * UNSEEN.abs()
}

/// Convert an NSIDE to a HEALPix depth (NSIDE = 2^depth).
pub fn nside_to_depth(nside: u32) -> Result<u8, HealpixError> {
    if nside == 0 || !nside.is_power_of_two() {
        return Err(HealpixError::InvalidNside(nside.into()));
    }
    let depth = nside.trailing_zeros() as u8;
    if depth > MAX_DEPTH {
        return Err(HealpixError::InvalidNside(nside.into()));
    }
    Ok(depth)
}

/// The number of pixels at a depth, i.e. `12 * nside^2`.
pub fn npix(depth: u8) -> usize {
    cdshealpix::n_hash(depth) as usize
}

fn check_position(ra_deg: f64, dec_deg: f64) -> Result<(), HealpixError> {
    if !ra_deg.is_finite() {
        return Err(HealpixError::InvalidRa(ra_deg));
    }
    if !(-90.0..=90.0).contains(&dec_deg) {
        return Err(HealpixError::InvalidDec(dec_deg));
    }
    Ok(())
}

/// The NESTED pixel containing a sky position.
pub fn ang_to_pix(depth: u8, ra_deg: f64, dec_deg: f64) -> Result<u64, HealpixError> {
    check_position(ra_deg, dec_deg)?;
    Ok(nested::get(depth).hash(ra_deg.to_radians(), dec_deg.to_radians()))
}

/// All NESTED pixels whose centres lie within `radius_deg` of a sky position.
pub fn query_disc(
    depth: u8,
    ra_deg: f64,
    dec_deg: f64,
    radius_deg: f64,
) -> Result<Vec<u64>, HealpixError> {
    check_position(ra_deg, dec_deg)?;
    let layer = nested::get(depth);
    let (lon, lat) = (ra_deg.to_radians(), dec_deg.to_radians());
    let radius = radius_deg.to_radians();

    // The approximate coverage is a superset; keep only the pixels whose
    // centres are inside the disc.
    let bmoc = nested::cone_coverage_approx(depth, lon, lat, radius);
    let pixels = bmoc
        .flat_iter()
        .filter(|&hash| {
            let (c_lon, c_lat) = layer.center(hash);
            angular_separation(lon, lat, c_lon, c_lat) <= radius
        })
        .collect();
    Ok(pixels)
}

/// Reorder RING-scheme values into the NESTED scheme.
pub fn ring_to_nested<T: Copy>(depth: u8, ring_values: &[T]) -> Vec<T> {
    let layer = nested::get(depth);
    (0..ring_values.len() as u64)
        .map(|hash| ring_values[layer.to_ring(hash) as usize])
        .collect()
}

/// Count the number of positions in each pixel.
pub fn count_map(
    nside: u32,
    ra_deg: &[f64],
    dec_deg: &[f64],
) -> Result<HealpixMap<f64>, HealpixError> {
    if ra_deg.len() != dec_deg.len() {
        return Err(HealpixError::ColumnLengths {
            ra: ra_deg.len(),
            dec: dec_deg.len(),
            values: ra_deg.len(),
        });
    }
    let mut map = HealpixMap::filled(nside, 0.0)?;
    let depth = map.depth;
    for (&ra, &dec) in ra_deg.iter().zip(dec_deg) {
        let pix = ang_to_pix(depth, ra, dec)?;
        map.values[pix as usize] += 1.0;
    }
    Ok(map)
}

/// Average `values` over the positions in each pixel. Pixels without any
/// position are NaN.
pub fn mean_map(
    nside: u32,
    ra_deg: &[f64],
    dec_deg: &[f64],
    values: &[f64],
) -> Result<HealpixMap<f64>, HealpixError> {
    if ra_deg.len() != dec_deg.len() || ra_deg.len() != values.len() {
        return Err(HealpixError::ColumnLengths {
            ra: ra_deg.len(),
            dec: dec_deg.len(),
            values: values.len(),
        });
    }
    let counts = count_map(nside, ra_deg, dec_deg)?;
    let mut sums = HealpixMap::filled(nside, 0.0)?;
    let depth = sums.depth;
    for ((&ra, &dec), &value) in ra_deg.iter().zip(dec_deg).zip(values) {
        let pix = ang_to_pix(depth, ra, dec)?;
        sums.values[pix as usize] += value;
    }
    sums.values
        .iter_mut()
        .zip(counts.values.iter())
        .for_each(|(sum, &count)| {
            *sum = if count > 0.0 { *sum / count } else { f64::NAN };
        });
    Ok(sums)
}

/// Great-circle distance between two positions, all in radians.
pub(crate) fn angular_separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let d_lat = (lat2 - lat1) / 2.0;
    let d_lon = (lon2 - lon1) / 2.0;
    let a = d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * d_lon.sin().powi(2);
    2.0 * a.sqrt().min(1.0).asin()
}
