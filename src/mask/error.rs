// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with survey footprint masks.

use std::path::PathBuf;

use thiserror::Error;

use crate::{healpix::HealpixError, io::read::fits::FitsError};

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Unsupported LoTSS data release '{0}'; supported releases are 1 (DR1) and 2 (DR2)")]
    UnsupportedRelease(String),

    #[error("{file} line {line_num}: Expected two numbers (RA, Dec), but got '{line}'")]
    BadPointing {
        file: PathBuf,
        line_num: usize,
        line: String,
    },

    #[error("Couldn't read pointings file {file}: {err}")]
    Pointings { file: PathBuf, err: std::io::Error },

    #[error("{file}: Unknown HEALPix ordering '{ordering}'; expected RING or NESTED")]
    UnknownOrdering { file: PathBuf, ordering: String },

    #[error("{file}: {num_values} values is not a full-sky HEALPix map")]
    NotFullSky { file: PathBuf, num_values: usize },

    #[error(transparent)]
    Fits(#[from] FitsError),

    #[error(transparent)]
    Healpix(#[from] HealpixError),
}
