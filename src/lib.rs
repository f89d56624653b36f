// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HEALPix count, noise and selection-function maps of the LOFAR Two-metre Sky
//! Survey (LoTSS).
//!
//! The pipeline reads a source catalog, applies a flux cut, bins the sources
//! into a count map and a mean-noise map over the survey footprint, and turns
//! the noise map into a noise-weight map using the flux distribution of the
//! SKADS simulation.

pub mod catalog;
mod cli;
pub mod config;
pub mod constants;
pub mod flux;
pub mod healpix;
pub mod io;
pub mod maps;
pub mod mask;
pub(crate) mod math;
pub(crate) mod misc;
pub mod noise_weight;
pub mod redshift;

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use catalog::{load_lotss_catalog, Catalog, CatalogError};
pub use cli::{LotssError, LotssMaps};
pub use config::{ConfigError, DataConfig};
pub use flux::{load_flux_probability, FluxModelError, FluxProbability};
pub use healpix::{HealpixError, HealpixMap};
pub use io::read::fits::FitsError;
pub use maps::{build_lotss_maps, get_lotss_map, MapError, SurveyMaps};
pub use mask::{get_lotss_mask, DataRelease, MaskError};
pub use noise_weight::{
    get_lotss_noise_weight_map, noise_weight_map, pixel_noise_weight, NoiseWeightError,
};
pub use redshift::get_lotss_redshift_distribution;
