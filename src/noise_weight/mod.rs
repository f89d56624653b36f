// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Noise-weight maps: the fraction of the source population that is detected
//! in each pixel, given the pixel's noise level.
//!
//! A source of true flux `S` in a pixel with noise `σ` is measured above the
//! threshold `S_thr = max(5σ, S_cut)` with probability
//! `0.5 * erfc((S - S_thr) / (√2 σ))`. The weight of a pixel is this
//! probability integrated over the flux distribution of the sources.

mod error;

pub use error::NoiseWeightError;

use std::{
    f64::consts::SQRT_2,
    sync::atomic::{AtomicUsize, Ordering},
};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    cli::Warn,
    config::DataConfig,
    constants::DETECTION_SIGMA,
    flux::{load_flux_probability, FluxProbability},
    healpix::{is_unseen, HealpixMap},
    PROGRESS_BARS,
};

/// The noise weight of a single pixel with noise `noise` \[mJy\].
///
/// A noise of exactly zero turns the erfc into a step at the threshold: bins
/// below it are fully counted, bins on it are half counted and bins above it
/// aren't counted. Negative, infinite and NaN noises have no meaningful
/// weight and give 0.
pub fn pixel_noise_weight(noise: f64, flux_min_cut: f64, table: &FluxProbability) -> f64 {
    if !noise.is_finite() || noise < 0.0 {
        return 0.0;
    }

    let flux_thr = (DETECTION_SIGMA * noise).max(flux_min_cut);
    let a = 0.5 * table.d_flux();
    let fluxes = table.flux().iter().zip(table.proba());
    if noise == 0.0 {
        fluxes
            .map(|(&flux, &proba)| {
                let erfc_limit = match flux.partial_cmp(&flux_thr) {
                    Some(std::cmp::Ordering::Less) => 2.0,
                    Some(std::cmp::Ordering::Equal) => 1.0,
                    _ => 0.0,
                };
                a * proba * erfc_limit
            })
            .sum()
    } else {
        let b = SQRT_2 * noise;
        fluxes
            .map(|(&flux, &proba)| a * proba * libm::erfc((flux - flux_thr) / b))
            .sum()
    }
}

/// Compute the noise weight of every pixel of `noise` that isn't
/// [UNSEEN](crate::constants::UNSEEN) or NaN, resample the result to
/// `nside_out` and mask it with `mask` (resampled to `nside_out`). Pixels
/// without a noise value have a weight of 0 before resampling.
pub fn noise_weight_map(
    noise: &HealpixMap<f64>,
    mask: &HealpixMap<bool>,
    flux_min_cut: f64,
    table: &FluxProbability,
    nside_out: u32,
) -> Result<HealpixMap<f64>, NoiseWeightError> {
    debug!(
        "Computing noise weights of {} NSIDE {} pixels against {} flux bins",
        noise.npix(),
        noise.nside(),
        table.num_bins()
    );

    let pb = ProgressBar::with_draw_target(
        Some(noise.npix() as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_position(0)
    .with_message("Noise weights");
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg:17}: [{wide_bar:.blue}] {pos}/{len} pixels ({elapsed_precise}<{eta_precise})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let num_bad_noise = AtomicUsize::new(0);
    let weights: Vec<f64> = noise
        .values()
        .par_iter()
        .progress_with(pb.clone())
        .map(|&sigma| {
            if sigma.is_nan() || is_unseen(sigma) {
                0.0
            } else {
                if sigma < 0.0 || sigma.is_infinite() {
                    num_bad_noise.fetch_add(1, Ordering::Relaxed);
                }
                pixel_noise_weight(sigma, flux_min_cut, table)
            }
        })
        .collect();
    pb.finish_and_clear();

    let num_bad_noise = num_bad_noise.into_inner();
    if num_bad_noise > 0 {
        format!("{num_bad_noise} pixels have negative or infinite noise; their noise weights are 0")
            .warn();
    }

    let weights = HealpixMap::from_values(noise.nside(), weights)?;
    let weights = weights
        .ud_grade(nside_out)?
        .masked(&mask.ud_grade(nside_out)?)?;
    info!("Made NSIDE {nside_out} noise-weight map with flux cut {flux_min_cut} mJy");
    Ok(weights)
}

/// Build the flux distribution from the configured SKADS catalog and use it to
/// make a noise-weight map.
pub fn get_lotss_noise_weight_map(
    noise: &HealpixMap<f64>,
    mask: &HealpixMap<bool>,
    flux_min_cut: f64,
    nside_out: u32,
    config: &DataConfig,
) -> Result<HealpixMap<f64>, NoiseWeightError> {
    let table = load_flux_probability(config)?;
    noise_weight_map(noise, mask, flux_min_cut, &table, nside_out)
}
