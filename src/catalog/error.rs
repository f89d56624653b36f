// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with source catalogs.

use thiserror::Error;

use crate::io::read::fits::FitsError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog columns have different lengths: RA {ra}, Dec {dec}, flux {flux}, noise {noise}")]
    ColumnLengths {
        ra: usize,
        dec: usize,
        flux: usize,
        noise: usize,
    },

    #[error(transparent)]
    Fits(#[from] FitsError),
}
