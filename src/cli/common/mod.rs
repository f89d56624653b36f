// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. e.g. the `maps` and
//! `noise-weight` subcommands both read a catalog and a mask, so the same
//! survey arguments are shared between them.

mod printers;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::LotssError;
use crate::{
    config::{DataConfig, InputFileType, DATA_PATH_ENV_VAR},
    constants::{DEFAULT_FLUX_MIN_CUT_MJY, DEFAULT_NSIDE},
    healpix::nside_to_depth,
    mask::DataRelease,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = InputFileType::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref DATA_ROOT_HELP: String =
        format!("The directory that relative data paths are joined onto. If not given here or in a data config, {DATA_PATH_ENV_VAR} is used, and then the current directory");

    static ref FLUX_MIN_CUT_HELP: String =
        format!("Only sources with a total flux greater than this are used [mJy]. Default: {DEFAULT_FLUX_MIN_CUT_MJY}");

    static ref NSIDE_HELP: String =
        format!("The HEALPix NSIDE of the count map and mask. Must be a power of 2. Default: {DEFAULT_NSIDE}");
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read};

        use crate::{cli::common::ARG_FILE_TYPES_COMMA_SEPARATED, config::InputFileType};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = InputFileType::from_path(&$arg_file);

        match arg_file_type {
            Some(InputFileType::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(LotssError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(InputFileType::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(LotssError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(LotssError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Where the input data lives.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DataArgs {
    /// A toml or json file describing where input data lives and survey
    /// settings (e.g. the DR1 pointings to skip).
    #[clap(long, parse(from_os_str), help_heading = "INPUT DATA")]
    pub(super) data_config: Option<PathBuf>,

    #[clap(long, parse(from_os_str), help = DATA_ROOT_HELP.as_str(), help_heading = "INPUT DATA")]
    pub(super) data_root: Option<PathBuf>,
}

impl DataArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            data_config: self.data_config.or(other.data_config),
            data_root: self.data_root.or(other.data_root),
        }
    }

    /// Build the data config. A data root given here beats the one in the
    /// data config file; the environment is only consulted when neither is
    /// given.
    pub(super) fn parse(self) -> Result<DataConfig, LotssError> {
        let DataArgs {
            data_config,
            data_root,
        } = self;

        let mut config = match data_config {
            Some(file) => DataConfig::from_file(&file)?,
            None => DataConfig::default().with_env_data_root(),
        };
        if let Some(data_root) = data_root {
            debug!("Using data root {}", data_root.display());
            config.data_root = data_root;
        }
        Ok(config)
    }
}

/// Which catalog to use and how to bin it.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SurveyArgs {
    /// The LoTSS data release: 1 (DR1, HETDEX) or 2 (DR2). Default: 1
    #[clap(short, long, help_heading = "SURVEY")]
    pub(super) release: Option<String>,

    #[clap(short, long, help = FLUX_MIN_CUT_HELP.as_str(), help_heading = "SURVEY")]
    pub(super) flux_min_cut: Option<f64>,

    /// The name of the DR2 mask to use (without ".fits"). Ignored for DR1.
    #[clap(short, long, help_heading = "SURVEY")]
    pub(super) mask: Option<String>,

    #[clap(short, long, help = NSIDE_HELP.as_str(), help_heading = "SURVEY")]
    pub(super) nside: Option<u32>,
}

/// [`SurveyArgs`] after validation.
#[derive(Debug, Clone)]
pub(super) struct SurveyParams {
    pub(super) release: DataRelease,
    pub(super) flux_min_cut: f64,
    pub(super) mask: Option<String>,
    pub(super) nside: u32,
}

impl SurveyArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            release: self.release.or(other.release),
            flux_min_cut: self.flux_min_cut.or(other.flux_min_cut),
            mask: self.mask.or(other.mask),
            nside: self.nside.or(other.nside),
        }
    }

    pub(super) fn parse(self) -> Result<SurveyParams, LotssError> {
        let SurveyArgs {
            release,
            flux_min_cut,
            mask,
            nside,
        } = self;

        let release = match release {
            Some(r) => r.parse::<DataRelease>()?,
            None => DataRelease::Dr1,
        };
        let flux_min_cut = flux_min_cut.unwrap_or(DEFAULT_FLUX_MIN_CUT_MJY);
        if !flux_min_cut.is_finite() {
            return Err(LotssError::Survey(format!(
                "The flux cut must be a finite number, but got {flux_min_cut}"
            )));
        }
        let nside = nside.unwrap_or(DEFAULT_NSIDE);
        nside_to_depth(nside)?;
        if mask.is_some() && release == DataRelease::Dr1 {
            "A mask name was given, but DR1 masks are made from pointings; ignoring it".warn();
        }

        Ok(SurveyParams {
            release,
            flux_min_cut,
            mask,
            nside,
        })
    }
}
