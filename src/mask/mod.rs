// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Survey footprint masks.
//!
//! DR1 covers the HETDEX field; its footprint is the union of discs around
//! each pointing. DR2 footprints are distributed as HEALPix maps.

mod error;

pub use error::MaskError;

use std::{path::Path, str::FromStr};

use log::{debug, info, trace};
use strum_macros::Display;

use crate::{
    config::DataConfig,
    healpix::{is_unseen, npix, nside_to_depth, query_disc, ring_to_nested, HealpixMap},
    io::read::fits::{
        fits_get_flat_f64_col, fits_get_optional_key, fits_open, fits_open_hdu,
    },
};

/// A LoTSS data release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DataRelease {
    #[strum(serialize = "DR1")]
    Dr1,
    #[strum(serialize = "DR2")]
    Dr2,
}

impl FromStr for DataRelease {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "dr1" => Ok(DataRelease::Dr1),
            "2" | "dr2" => Ok(DataRelease::Dr2),
            _ => Err(MaskError::UnsupportedRelease(s.to_string())),
        }
    }
}

impl TryFrom<u8> for DataRelease {
    type Error = MaskError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DataRelease::Dr1),
            2 => Ok(DataRelease::Dr2),
            _ => Err(MaskError::UnsupportedRelease(value.to_string())),
        }
    }
}

/// Read pointing centres (RA, Dec) \[degrees\] from a whitespace-separated
/// text file. Blank lines and lines starting with `#` are ignored.
pub fn read_pointings(file: &Path) -> Result<Vec<[f64; 2]>, MaskError> {
    debug!("Reading pointings from {}", file.display());
    let contents = std::fs::read_to_string(file).map_err(|err| MaskError::Pointings {
        file: file.to_path_buf(),
        err,
    })?;

    let mut pointings = vec![];
    for (i_line, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let bad_pointing = || MaskError::BadPointing {
            file: file.to_path_buf(),
            line_num: i_line + 1,
            line: line.to_string(),
        };
        let mut fields = trimmed.split_whitespace().map(f64::from_str);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(ra)), Some(Ok(dec)), None) => pointings.push([ra, dec]),
            _ => return Err(bad_pointing()),
        }
    }
    debug!("Read {} pointings", pointings.len());
    Ok(pointings)
}

/// Mark every pixel whose centre is within `radius_deg` of a pointing. Pointings
/// exactly equal to an entry of `skip` don't contribute.
pub fn pointings_mask(
    nside: u32,
    pointings: &[[f64; 2]],
    skip: &[[f64; 2]],
    radius_deg: f64,
) -> Result<HealpixMap<bool>, MaskError> {
    let mut mask = HealpixMap::filled(nside, false)?;
    let depth = mask.depth();
    let mut num_used = 0;
    for &[ra, dec] in pointings {
        if skip.contains(&[ra, dec]) {
            trace!("Skipping pointing ({ra}, {dec})");
            continue;
        }
        num_used += 1;
        for pix in query_disc(depth, ra, dec, radius_deg)? {
            mask.values_mut()[pix as usize] = true;
        }
    }
    debug!(
        "{num_used} of {} pointings make up the mask",
        pointings.len()
    );
    Ok(mask)
}

/// The DR1 (HETDEX) footprint at the given resolution.
pub fn get_lotss_hetdex_mask(
    nside: u32,
    config: &DataConfig,
) -> Result<HealpixMap<bool>, MaskError> {
    let pointings = read_pointings(&config.dr1_pointings_path())?;
    pointings_mask(
        nside,
        &pointings,
        &config.dr1_pointings_to_skip,
        config.dr1_pointing_radius_deg,
    )
}

/// Read a full-sky HEALPix map from the first column of the first table HDU
/// of a FITS file. The map is returned in the NESTED scheme; files without an
/// `ORDERING` key are taken to be RING.
pub fn read_healpix_map(file: &Path) -> Result<HealpixMap<f64>, MaskError> {
    debug!("Reading HEALPix map {}", file.display());
    let mut fptr = fits_open(file)?;
    let hdu = fits_open_hdu(&mut fptr, 1)?;
    let ordering: Option<String> = fits_get_optional_key(&mut fptr, &hdu, "ORDERING")?;
    let nside: Option<u32> = fits_get_optional_key(&mut fptr, &hdu, "NSIDE")?;
    let values = fits_get_flat_f64_col(&mut fptr, &hdu, 0)?;

    let nside = match nside {
        Some(n) => n,
        None => {
            // npix = 12 * nside^2
            let n = ((values.len() / 12) as f64).sqrt().round() as u32;
            if 12 * (n as usize).pow(2) != values.len() {
                return Err(MaskError::NotFullSky {
                    file: file.to_path_buf(),
                    num_values: values.len(),
                });
            }
            n
        }
    };
    let depth = nside_to_depth(nside)?;
    if values.len() != npix(depth) {
        return Err(MaskError::NotFullSky {
            file: file.to_path_buf(),
            num_values: values.len(),
        });
    }

    let ordering = ordering.unwrap_or_else(|| "RING".to_string());
    let values = match ordering.trim().to_uppercase().as_str() {
        "RING" => ring_to_nested(depth, &values),
        "NESTED" | "NEST" => values,
        _ => {
            return Err(MaskError::UnknownOrdering {
                file: file.to_path_buf(),
                ordering,
            })
        }
    };
    Ok(HealpixMap::from_values(nside, values)?)
}

/// Read a DR2 footprint map and resample it to `nside`. A pixel is inside the
/// footprint when its resampled value is positive.
pub fn dr2_mask_from_file(nside: u32, file: &Path) -> Result<HealpixMap<bool>, MaskError> {
    let map = read_healpix_map(file)?.ud_grade(nside)?;
    Ok(map.map_values(|&v| !v.is_nan() && !is_unseen(v) && v > 0.0))
}

/// The DR2 footprint named `filename` (or the default one) at the given
/// resolution.
pub fn get_lotss_dr2_mask(
    nside: u32,
    config: &DataConfig,
    filename: Option<&str>,
) -> Result<HealpixMap<bool>, MaskError> {
    dr2_mask_from_file(nside, &config.dr2_mask_path(filename))
}

/// The footprint of a data release. `mask_filename` only applies to DR2.
pub fn get_lotss_mask(
    release: DataRelease,
    config: &DataConfig,
    nside: u32,
    mask_filename: Option<&str>,
) -> Result<HealpixMap<bool>, MaskError> {
    let mask = match release {
        DataRelease::Dr1 => get_lotss_hetdex_mask(nside, config)?,
        DataRelease::Dr2 => get_lotss_dr2_mask(nside, config, mask_filename)?,
    };
    let num_valid = mask.count_valid();
    info!(
        "{release} mask: {num_valid} of {} pixels ({:.2} deg²) are in the footprint",
        mask.npix(),
        num_valid as f64 * mask.pixel_area_deg2()
    );
    Ok(mask)
}
