// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with the source flux model.

use thiserror::Error;

use crate::io::read::fits::FitsError;

#[derive(Error, Debug)]
pub enum FluxModelError {
    #[error("The flux probability integrates to 1 ± {error:.4}, which exceeds the tolerance of {tolerance}")]
    Normalisation { error: f64, tolerance: f64 },

    #[error("No simulated fluxes are below {flux_max} mJy; cannot build a flux probability distribution")]
    NoFluxes { flux_max: f64 },

    #[error("Couldn't make {num_bins} flux bins")]
    BadNumBins { num_bins: usize },

    #[error("A flux table needs as many densities as bins, but got {flux} bins and {proba} densities")]
    TableLengths { flux: usize, proba: usize },

    #[error(transparent)]
    Fits(#[from] FitsError),
}
