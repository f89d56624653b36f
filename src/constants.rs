// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Fluxes are in mJy, frequencies in
MHz and angles in degrees unless stated otherwise.
 */

/// The frequency of the SKADS simulated fluxes \[MHz\].
pub const SKADS_FREQ_MHZ: f64 = 151.0;

/// The observing frequency of LoTSS \[MHz\].
pub const LOTSS_FREQ_MHZ: f64 = 144.0;

/// The spectral index used to extrapolate SKADS fluxes to the LoTSS frequency.
pub const SPECTRAL_INDEX: f64 = -0.7;

/// The number of histogram bins of the flux probability distribution.
pub const DEFAULT_NUM_FLUX_BINS: usize = 1000;

/// Simulated fluxes at or above this value are excluded from the flux
/// probability distribution \[mJy\].
pub const DEFAULT_FLUX_MAX_MJY: f64 = 2000.0;

/// The largest tolerated deviation of the flux probability integral from 1.
pub const FLUX_INTEGRAL_TOLERANCE: f64 = 0.1;

/// Sources must be brighter than this many times the local noise to be
/// detected.
pub const DETECTION_SIGMA: f64 = 5.0;

/// The resolution of LoTSS noise maps.
pub const DEFAULT_NOISE_NSIDE: u32 = 256;

/// The default resolution of LoTSS count maps and masks.
pub const DEFAULT_NSIDE: u32 = 2048;

/// The radius of a LoTSS DR1 pointing \[degrees\].
pub const DEFAULT_POINTING_RADIUS_DEG: f64 = 1.7;

/// Characteristic redshift of the LoTSS redshift distribution.
pub const REDSHIFT_Z0: f64 = 0.1;

/// Tail slope of the LoTSS redshift distribution.
pub const REDSHIFT_GAMMA: f64 = 3.5;

/// Redshift sampling step.
pub const REDSHIFT_STEP: f64 = 0.01;

/// The largest sampled redshift.
pub const REDSHIFT_MAX: f64 = 100.0;

/// The HEALPix "missing value" sentinel.
pub const UNSEEN: f64 = -1.6375e30;

/// Square degrees on the whole sky.
pub const FULL_SKY_DEG2: f64 = 129600.0 / std::f64::consts::PI;

/// The minimum total flux of catalog sources used when none is given \[mJy\].
pub const DEFAULT_FLUX_MIN_CUT_MJY: f64 = 1.0;

/// The redshift distribution tail parameter used when none is given.
pub const DEFAULT_Z_TAIL: f64 = 1.0;
