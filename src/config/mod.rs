// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where survey data lives on disk.
//!
//! Every path is stored relative to a data root unless it is absolute. The
//! defaults match the directory layout of the public LoTSS and SKADS
//! releases.

mod error;
#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{constants::DEFAULT_POINTING_RADIUS_DEG, mask::DataRelease};

/// The environment variable consulted for the data root when nothing else
/// sets it.
pub const DATA_PATH_ENV_VAR: &str = "LOTSS_DATA_PATH";

/// HETDEX pointings that are not part of DR1 \[degrees\].
const DR1_POINTINGS_TO_SKIP: [[f64; 2]; 5] = [
    [164.633, 54.685],
    [211.012, 49.912],
    [221.510, 47.461],
    [225.340, 47.483],
    [227.685, 52.515],
];

/// Supported formats of data configs and argument files.
#[derive(Debug, Display, EnumIter, EnumString)]
pub(crate) enum InputFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

impl InputFileType {
    /// The type of a file, going by its (case-insensitive) extension.
    pub(crate) fn from_path(file: &Path) -> Option<InputFileType> {
        file.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| InputFileType::from_str(&e).ok())
    }
}

/// Locations of input data and survey-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Relative paths are joined onto this directory.
    pub data_root: PathBuf,

    /// The SKADS simulated catalog.
    pub skads_catalog: PathBuf,

    /// The LoTSS DR1 (HETDEX) source catalog.
    pub dr1_catalog: PathBuf,

    /// The LoTSS DR2 source catalog.
    pub dr2_catalog: PathBuf,

    /// Two columns (RA, Dec) of DR1 pointing centres \[degrees\].
    pub dr1_pointings: PathBuf,

    /// The directory of DR2 mask FITS files.
    pub dr2_mask_dir: PathBuf,

    /// The DR2 mask used when no other is named (without ".fits").
    pub dr2_default_mask: String,

    /// DR1 pointings to leave out of the mask \[degrees\]. Matching is exact.
    pub dr1_pointings_to_skip: Vec<[f64; 2]>,

    /// The radius of each DR1 pointing \[degrees\].
    pub dr1_pointing_radius_deg: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            skads_catalog: PathBuf::from("SKADS/100sqdeg_5uJy_s1400_components_fixed.fits"),
            dr1_catalog: PathBuf::from("LoTSS/DR1/LOFAR_HBA_T1_DR1_merge_ID_optical_f_v1.2.fits"),
            dr2_catalog: PathBuf::from("LoTSS/DR2/LoTSS_DR2_v100.srl.fits"),
            dr1_pointings: PathBuf::from("LoTSS/DR1/pointings.txt"),
            dr2_mask_dir: PathBuf::from("LoTSS/DR2/masks"),
            dr2_default_mask: "Mask_default".to_string(),
            dr1_pointings_to_skip: DR1_POINTINGS_TO_SKIP.to_vec(),
            dr1_pointing_radius_deg: DEFAULT_POINTING_RADIUS_DEG,
        }
    }
}

impl DataConfig {
    /// Read a config from a toml or json file. Keys that aren't present take
    /// their default values.
    pub fn from_file(file: &Path) -> Result<DataConfig, ConfigError> {
        debug!("Attempting to parse data config file {}", file.display());
        let file_type = match InputFileType::from_path(file) {
            Some(t) => t,
            None => {
                return Err(ConfigError::UnknownFileType(
                    file.to_path_buf(),
                    InputFileType::iter().join(", "),
                ))
            }
        };

        let contents = std::fs::read_to_string(file).map_err(|err| ConfigError::IO {
            file: file.to_path_buf(),
            err,
        })?;
        let config: DataConfig = match file_type {
            InputFileType::Toml => toml::from_str(&contents).map_err(|err| ConfigError::Toml {
                file: file.to_path_buf(),
                err,
            })?,
            InputFileType::Json => {
                serde_json::from_str(&contents).map_err(|err| ConfigError::Json {
                    file: file.to_path_buf(),
                    err,
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Use the data root in [`DATA_PATH_ENV_VAR`], if it's set.
    pub fn with_env_data_root(mut self) -> Self {
        if let Some(root) = std::env::var_os(DATA_PATH_ENV_VAR) {
            debug!("Using data root from {DATA_PATH_ENV_VAR}: {root:?}");
            self.data_root = PathBuf::from(root);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.dr1_pointing_radius_deg;
        if r.is_nan() || r <= 0.0 {
            return Err(ConfigError::BadPointingRadius(r));
        }
        Ok(())
    }

    /// Join a path onto the data root, unless it's absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_root.join(path)
        }
    }

    pub fn skads_catalog_path(&self) -> PathBuf {
        self.resolve(&self.skads_catalog)
    }

    pub fn catalog_path(&self, release: DataRelease) -> PathBuf {
        match release {
            DataRelease::Dr1 => self.resolve(&self.dr1_catalog),
            DataRelease::Dr2 => self.resolve(&self.dr2_catalog),
        }
    }

    pub fn dr1_pointings_path(&self) -> PathBuf {
        self.resolve(&self.dr1_pointings)
    }

    /// The path to a named DR2 mask, or the default one.
    pub fn dr2_mask_path(&self, name: Option<&str>) -> PathBuf {
        let name = name.unwrap_or(&self.dr2_default_mask);
        self.resolve(&self.dr2_mask_dir.join(format!("{name}.fits")))
    }
}
