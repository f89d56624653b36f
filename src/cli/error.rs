// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all command-line errors. This should be the *only* error
//! enum that the binary sees.

use thiserror::Error;

use crate::{
    catalog::CatalogError,
    config::ConfigError,
    flux::FluxModelError,
    healpix::HealpixError,
    io::{read::fits::FitsError, write::WriteError},
    maps::MapError,
    mask::MaskError,
    noise_weight::NoiseWeightError,
};

const BIN: &str = env!("CARGO_PKG_NAME");

/// Every message ends with a pointer to the most relevant help, unless it's
/// "generic".
#[derive(Error, Debug)]
pub enum LotssError {
    /// An error related to the maps subcommand.
    #[error("{0}\n\nSee for more info: {BIN} maps --help")]
    Maps(String),

    /// An error related to noise-weight maps.
    #[error("{0}\n\nSee for more info: {BIN} noise-weight --help")]
    NoiseWeight(String),

    /// An error related to the SKADS flux model.
    #[error("{0}\n\nSee for more info: {BIN} flux-model --help")]
    FluxModel(String),

    /// An error related to source catalogs or pointing lists.
    #[error("{0}\n\nCheck the input files under the data root (--data-root) and the data config (--data-config)")]
    Catalog(String),

    /// An error related to footprint masks.
    #[error("{0}\n\nSee for more info: {BIN} maps --help")]
    Mask(String),

    /// An error related to survey arguments.
    #[error("{0}\n\nSee for more info: {BIN} maps --help")]
    Survey(String),

    /// An error related to HEALPix maps.
    #[error("{0}\n\nHEALPix NSIDEs must be powers of 2 no larger than 2^29")]
    Healpix(String),

    /// An error related to data config files.
    #[error("{0}\n\nData configs may be toml or json, with keys named like the fields of DataConfig")]
    Config(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files use the same names as the command-line flags")]
    ArgFile(String),

    /// A cfitsio error. Because these are usually quite spartan, some
    /// suggestions are provided here.
    #[error("cfitsio error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv) and maybe disabling progress bars.")]
    Cfitsio(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CatalogError> for LotssError {
    fn from(e: CatalogError) -> Self {
        let s = e.to_string();
        match e {
            CatalogError::ColumnLengths { .. } => Self::Catalog(s),
            CatalogError::Fits(e) => Self::from(e),
        }
    }
}

impl From<FluxModelError> for LotssError {
    fn from(e: FluxModelError) -> Self {
        let s = e.to_string();
        match e {
            FluxModelError::Normalisation { .. }
            | FluxModelError::NoFluxes { .. }
            | FluxModelError::BadNumBins { .. }
            | FluxModelError::TableLengths { .. } => Self::FluxModel(s),
            FluxModelError::Fits(e) => Self::from(e),
        }
    }
}

impl From<MaskError> for LotssError {
    fn from(e: MaskError) -> Self {
        let s = e.to_string();
        match e {
            MaskError::UnsupportedRelease(_)
            | MaskError::BadPointing { .. }
            | MaskError::UnknownOrdering { .. }
            | MaskError::NotFullSky { .. } => Self::Mask(s),
            MaskError::Pointings { .. } => Self::Generic(s),
            MaskError::Fits(e) => Self::from(e),
            MaskError::Healpix(e) => Self::from(e),
        }
    }
}

impl From<MapError> for LotssError {
    fn from(e: MapError) -> Self {
        let s = e.to_string();
        match e {
            MapError::NoNoise => Self::Maps(s),
            MapError::Mask(e) => Self::from(e),
            MapError::Healpix(e) => Self::from(e),
        }
    }
}

impl From<NoiseWeightError> for LotssError {
    fn from(e: NoiseWeightError) -> Self {
        match e {
            NoiseWeightError::FluxModel(e) => Self::from(e),
            NoiseWeightError::Healpix(e) => Self::from(e),
        }
    }
}

impl From<HealpixError> for LotssError {
    fn from(e: HealpixError) -> Self {
        let s = e.to_string();
        match e {
            HealpixError::InvalidNside(_) => Self::Healpix(s),
            HealpixError::ColumnLengths { .. }
            | HealpixError::InvalidDec(_)
            | HealpixError::InvalidRa(_) => Self::Catalog(s),
            HealpixError::WrongNumValues { .. } | HealpixError::NsideMismatch { .. } => {
                Self::Generic(s)
            }
        }
    }
}

impl From<ConfigError> for LotssError {
    fn from(e: ConfigError) -> Self {
        let s = e.to_string();
        match e {
            ConfigError::UnknownFileType(_, _)
            | ConfigError::Toml { .. }
            | ConfigError::Json { .. }
            | ConfigError::BadPointingRadius(_) => Self::Config(s),
            ConfigError::IO { .. } => Self::Generic(s),
        }
    }
}

impl From<FitsError> for LotssError {
    fn from(e: FitsError) -> Self {
        let s = e.to_string();
        match e {
            FitsError::MissingColumn { .. } => Self::Catalog(s),
            FitsError::Open { .. }
            | FitsError::MissingKey { .. }
            | FitsError::NotTable { .. }
            | FitsError::Fitsio { .. }
            | FitsError::Parse { .. } => Self::Cfitsio(s),
        }
    }
}

impl From<WriteError> for LotssError {
    fn from(e: WriteError) -> Self {
        let s = e.to_string();
        match e {
            WriteError::Fitsio(_) => Self::Cfitsio(s),
            WriteError::FileNotWritable { .. }
            | WriteError::NewDirectory(_)
            | WriteError::ColumnNames { .. }
            | WriteError::ColumnLength { .. }
            | WriteError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<std::io::Error> for LotssError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
