// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with noise-weight maps.

use thiserror::Error;

use crate::{flux::FluxModelError, healpix::HealpixError};

#[derive(Error, Debug)]
pub enum NoiseWeightError {
    #[error(transparent)]
    FluxModel(#[from] FluxModelError),

    #[error(transparent)]
    Healpix(#[from] HealpixError),
}
