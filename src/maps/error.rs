// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with building survey maps.

use thiserror::Error;

use crate::{healpix::HealpixError, mask::MaskError};

#[derive(Error, Debug)]
pub enum MapError {
    #[error("No source has a usable noise value, so empty noise pixels can't be filled")]
    NoNoise,

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Healpix(#[from] HealpixError),
}
