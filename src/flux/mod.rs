// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The flux distribution of radio sources, built from the SKADS simulation.

mod error;

pub use error::FluxModelError;

use std::path::Path;

use log::{debug, info};
use vec1::Vec1;

use crate::{
    config::DataConfig,
    constants::{
        DEFAULT_FLUX_MAX_MJY, DEFAULT_NUM_FLUX_BINS, FLUX_INTEGRAL_TOLERANCE, LOTSS_FREQ_MHZ,
        SKADS_FREQ_MHZ, SPECTRAL_INDEX,
    },
    io::read::fits::{fits_get_col, fits_open, fits_open_hdu},
    math::{simpson, Histogram},
    misc::expensive_op,
};

/// The SKADS column with the natural log of the 151 MHz flux density \[Jy\].
pub(crate) const SKADS_LOG_FLUX_COL: &str = "i_151";

/// Extrapolate a 151 MHz flux density to 144 MHz with a power law.
pub fn flux_151_to_144(s_151: f64) -> f64 {
    s_151 * LOTSS_FREQ_MHZ.powf(SPECTRAL_INDEX) / SKADS_FREQ_MHZ.powf(SPECTRAL_INDEX)
}

/// Convert SKADS `ln(S_151 / Jy)` values to 144 MHz flux densities \[mJy\].
pub fn skads_fluxes_144(log_i_151: &[f64]) -> Vec<f64> {
    log_i_151
        .iter()
        .map(|&l| flux_151_to_144(l.exp() * 1e3))
        .collect()
}

/// A normalised flux probability density over equal-width flux bins.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxProbability {
    /// Bin centres \[mJy\].
    flux: Vec1<f64>,

    /// Probability density in each bin \[1/mJy\].
    proba: Vec1<f64>,

    /// Bin width \[mJy\].
    d_flux: f64,
}

impl FluxProbability {
    /// Histogram the fluxes below `flux_max` \[mJy\] into `num_bins` bins and
    /// normalise the counts with Simpson's rule. Fails if the result doesn't
    /// sum to 1 within the tolerance.
    pub fn from_fluxes(
        fluxes: &[f64],
        num_bins: usize,
        flux_max: f64,
    ) -> Result<FluxProbability, FluxModelError> {
        if num_bins == 0 {
            return Err(FluxModelError::BadNumBins { num_bins });
        }
        let kept: Vec<f64> = fluxes.iter().copied().filter(|&f| f < flux_max).collect();
        debug!(
            "{} of {} fluxes are below {flux_max} mJy",
            kept.len(),
            fluxes.len()
        );
        let hist = Histogram::new(&kept, num_bins).ok_or(FluxModelError::NoFluxes { flux_max })?;

        let d_flux = hist.bin_width();
        let area = simpson(&hist.counts, d_flux);
        let proba: Vec<f64> = hist.counts.iter().map(|&c| c / area).collect();

        let integral_error = (proba.iter().sum::<f64>() * d_flux - 1.0).abs();
        info!("Flux probability integral error: {integral_error:.4}");
        info!("d flux: {d_flux:.4} (mJy)");
        if integral_error.is_nan() || integral_error >= FLUX_INTEGRAL_TOLERANCE {
            return Err(FluxModelError::Normalisation {
                error: integral_error,
                tolerance: FLUX_INTEGRAL_TOLERANCE,
            });
        }

        FluxProbability::new(hist.centres(), proba, d_flux)
    }

    /// Wrap an existing table. The bin centres and densities must be
    /// non-empty and of equal length.
    pub fn new(
        flux: Vec<f64>,
        proba: Vec<f64>,
        d_flux: f64,
    ) -> Result<FluxProbability, FluxModelError> {
        if flux.len() != proba.len() {
            return Err(FluxModelError::TableLengths {
                flux: flux.len(),
                proba: proba.len(),
            });
        }
        let num_bins = flux.len();
        let flux = Vec1::try_from_vec(flux).map_err(|_| FluxModelError::BadNumBins { num_bins })?;
        let proba =
            Vec1::try_from_vec(proba).map_err(|_| FluxModelError::BadNumBins { num_bins })?;
        Ok(FluxProbability {
            flux,
            proba,
            d_flux,
        })
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn proba(&self) -> &[f64] {
        &self.proba
    }

    pub fn d_flux(&self) -> f64 {
        self.d_flux
    }

    pub fn num_bins(&self) -> usize {
        self.flux.len()
    }
}

/// Read the SKADS log-flux column from a FITS file.
pub fn read_skads_log_fluxes(file: &Path) -> Result<Vec<f64>, FluxModelError> {
    debug!("Reading SKADS catalog {}", file.display());
    let mut fptr = fits_open(file)?;
    let hdu = fits_open_hdu(&mut fptr, 1)?;
    Ok(fits_get_col(&mut fptr, &hdu, SKADS_LOG_FLUX_COL)?)
}

/// Build the 144 MHz flux probability distribution from the configured SKADS
/// catalog with the standard binning.
pub fn load_flux_probability(config: &DataConfig) -> Result<FluxProbability, FluxModelError> {
    let file = config.skads_catalog_path();
    let log_fluxes = expensive_op(
        || read_skads_log_fluxes(&file),
        &format!("Still reading {}", file.display()),
    )?;
    let fluxes = skads_fluxes_144(&log_fluxes);
    FluxProbability::from_fluxes(&fluxes, DEFAULT_NUM_FLUX_BINS, DEFAULT_FLUX_MAX_MJY)
}
