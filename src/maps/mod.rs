// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Count and noise maps of a source catalog.

mod error;
#[cfg(test)]
mod tests;

pub use error::MapError;

use log::{debug, info};

use crate::{
    catalog::Catalog,
    config::DataConfig,
    constants::DEFAULT_NOISE_NSIDE,
    healpix::{count_map, mean_map, HealpixMap},
    mask::{get_lotss_mask, DataRelease},
};

/// The maps made from a catalog.
#[derive(Debug, Clone)]
pub struct SurveyMaps {
    /// Sources per pixel, [UNSEEN](crate::constants::UNSEEN) outside the
    /// footprint.
    pub counts: HealpixMap<f64>,

    /// The footprint, at the resolution of `counts`.
    pub mask: HealpixMap<bool>,

    /// Mean island noise per pixel \[mJy\], at a coarser resolution.
    pub noise: HealpixMap<f64>,
}

/// Bin a catalog into a count map at the resolution of `mask` and a mean-noise
/// map at `noise_nside`. Noise pixels without any source take the mean of the
/// others. Both maps are masked.
pub fn build_lotss_maps(
    catalog: &Catalog,
    mask: HealpixMap<bool>,
    noise_nside: u32,
) -> Result<SurveyMaps, MapError> {
    debug!(
        "Binning {} sources into NSIDE {} counts and NSIDE {noise_nside} noise",
        catalog.len(),
        mask.nside()
    );
    let counts = count_map(mask.nside(), catalog.ra(), catalog.dec())?.masked(&mask)?;

    let mut noise = mean_map(noise_nside, catalog.ra(), catalog.dec(), catalog.isl_rms())?;
    let mean_noise = noise.valid_mean().ok_or(MapError::NoNoise)?;
    let mut num_filled = 0;
    for v in noise.values_mut().iter_mut().filter(|v| v.is_nan()) {
        *v = mean_noise;
        num_filled += 1;
    }
    info!(
        "Filled {num_filled} empty noise pixels ({:.2} deg²) with the mean noise {mean_noise:.4} mJy",
        num_filled as f64 * noise.pixel_area_deg2()
    );
    let noise = noise.masked(&mask.ud_grade(noise_nside)?)?;

    Ok(SurveyMaps {
        counts,
        mask,
        noise,
    })
}

/// Build the maps of a data release at `nside`. The noise map is always at
/// NSIDE 256. `mask_filename` picks a DR2 mask other than the default.
pub fn get_lotss_map(
    catalog: &Catalog,
    release: DataRelease,
    config: &DataConfig,
    mask_filename: Option<&str>,
    nside: u32,
) -> Result<SurveyMaps, MapError> {
    let mask = get_lotss_mask(release, config, nside, mask_filename)?;
    build_lotss_maps(catalog, mask, DEFAULT_NOISE_NSIDE)
}
