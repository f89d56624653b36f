// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Make count, mask and noise maps from a LoTSS catalog.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, DataArgs, InfoPrinter, SurveyArgs, SurveyParams, ARG_FILE_HELP,
};
use crate::{
    catalog::load_lotss_catalog,
    config::DataConfig,
    io::write::{can_write_to_file, write_healpix_map, write_healpix_mask},
    maps::get_lotss_map,
    LotssError,
};

pub(super) const COUNTS_FILENAME: &str = "counts.fits";
pub(super) const MASK_FILENAME: &str = "mask.fits";
pub(super) const NOISE_FILENAME: &str = "noise.fits";

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct MapsCliArgs {
    /// The directory to write counts.fits, mask.fits and noise.fits into.
    /// Default: the current directory
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,
}

impl MapsCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            output_dir: self.output_dir.or(other.output_dir),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct MapsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "data")]
    #[serde(default)]
    pub(super) data_args: DataArgs,

    #[clap(flatten)]
    #[serde(rename = "survey")]
    #[serde(default)]
    pub(super) survey_args: SurveyArgs,

    #[clap(flatten)]
    #[serde(rename = "maps")]
    #[serde(default)]
    pub(super) maps_args: MapsCliArgs,
}

impl MapsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<MapsArgs, LotssError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let MapsArgs {
                args_file: _,
                data_args,
                survey_args,
                maps_args,
            } = unpack_arg_file!(arg_file);

            Ok(MapsArgs {
                args_file: None,
                data_args: cli_args.data_args.merge(data_args),
                survey_args: cli_args.survey_args.merge(survey_args),
                maps_args: cli_args.maps_args.merge(maps_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(DataConfig, SurveyParams, PathBuf), LotssError> {
        let MapsArgs {
            args_file: _,
            data_args,
            survey_args,
            maps_args: MapsCliArgs { output_dir },
        } = self;

        let config = data_args.parse()?;
        let survey = survey_args.parse()?;
        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
        for name in [COUNTS_FILENAME, MASK_FILENAME, NOISE_FILENAME] {
            can_write_to_file(&output_dir.join(name))?;
        }

        let mut printer = InfoPrinter::new(format!("Making LoTSS {} maps", survey.release).into());
        printer.push_block(vec![
            format!("Catalog: {}", config.catalog_path(survey.release).display()).into(),
            format!("Total flux > {} mJy", survey.flux_min_cut).into(),
        ]);
        printer.push_line(format!("NSIDE: {}", survey.nside).into());
        printer.push_line(format!("Output directory: {}", output_dir.display()).into());
        printer.display();
        display_warnings();

        Ok((config, survey, output_dir))
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), LotssError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let (config, survey, output_dir) = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let catalog = load_lotss_catalog(&config, survey.release, survey.flux_min_cut)?;
        let maps = get_lotss_map(
            &catalog,
            survey.release,
            &config,
            survey.mask.as_deref(),
            survey.nside,
        )?;
        display_warnings();

        write_healpix_map(&output_dir.join(COUNTS_FILENAME), &maps.counts, "COUNTS")?;
        write_healpix_mask(&output_dir.join(MASK_FILENAME), &maps.mask)?;
        write_healpix_map(&output_dir.join(NOISE_FILENAME), &maps.noise, "NOISE")?;
        info!("Wrote maps to {}", output_dir.display());
        Ok(())
    }
}
