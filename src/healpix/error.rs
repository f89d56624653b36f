// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with HEALPix maps.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealpixError {
    #[error("NSIDE {0} is not a power of two between 1 and 2^29")]
    InvalidNside(u64),

    #[error("A map with NSIDE {nside} needs {expected} values, but {got} were supplied")]
    WrongNumValues {
        nside: u32,
        expected: usize,
        got: usize,
    },

    #[error("Can't apply a mask with NSIDE {mask_nside} to a map with NSIDE {map_nside}")]
    NsideMismatch { map_nside: u32, mask_nside: u32 },

    #[error("Coordinate and value columns have different lengths ({ra}, {dec}, {values})")]
    ColumnLengths { ra: usize, dec: usize, values: usize },

    #[error("Declination {0}° is outside [-90°, 90°]")]
    InvalidDec(f64),

    #[error("Right ascension {0}° is not a finite number")]
    InvalidRa(f64),
}
