// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The redshift distribution of LoTSS sources.

use crate::constants::{REDSHIFT_GAMMA, REDSHIFT_MAX, REDSHIFT_STEP, REDSHIFT_Z0};

/// Unnormalised source density at redshift `z`:
/// `(z/z0)^2 / (1 + (z/z0)^2) / (1 + (z/z_tail)^gamma)`.
pub fn redshift_density(z: f64, z_tail: f64) -> f64 {
    let x = (z / REDSHIFT_Z0).powi(2);
    x / (1.0 + x) / (1.0 + (z / z_tail).powf(REDSHIFT_GAMMA))
}

/// Sample the redshift distribution from 0 to 100 inclusive in steps of 0.01.
/// Returns the redshifts and the densities.
pub fn get_lotss_redshift_distribution(z_tail: f64) -> (Vec<f64>, Vec<f64>) {
    let num_samples = (REDSHIFT_MAX / REDSHIFT_STEP).round() as usize + 1;
    let z: Vec<f64> = (0..num_samples).map(|i| i as f64 * REDSHIFT_STEP).collect();
    let n = z.iter().map(|&z| redshift_density(z, z_tail)).collect();
    (z, n)
}
