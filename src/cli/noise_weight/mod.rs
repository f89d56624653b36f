// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Make a noise-weight (selection function) map from a LoTSS catalog and the
//! SKADS flux distribution.

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
    healpix::nside_to_depth,
    io::write::{can_write_to_file, write_healpix_map},
    maps::get_lotss_map,
    noise_weight::get_lotss_noise_weight_map,
    LotssError,
};

const DEFAULT_OUTPUT_FILENAME: &str = "noise_weight.fits";

lazy_static::lazy_static! {
    static ref OUTPUT_HELP: String =
        format!("The FITS file to write the noise-weight map to. Default: {DEFAULT_OUTPUT_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct NoiseWeightCliArgs {
    /// The NSIDE of the output map. Default: the same as --nside
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) nside_out: Option<u32>,

    #[clap(short, long, parse(from_os_str), help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl NoiseWeightCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            nside_out: self.nside_out.or(other.nside_out),
            output: self.output.or(other.output),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct NoiseWeightArgs {
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
    #[serde(rename = "noise-weight")]
    #[serde(default)]
    pub(super) noise_weight_args: NoiseWeightCliArgs,
}

struct NoiseWeightParams {
    config: DataConfig,
    survey: SurveyParams,
    nside_out: u32,
    output: PathBuf,
}

impl NoiseWeightArgs {
    pub(super) fn merge(self) -> Result<NoiseWeightArgs, LotssError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let NoiseWeightArgs {
                args_file: _,
                data_args,
                survey_args,
                noise_weight_args,
            } = unpack_arg_file!(arg_file);

            Ok(NoiseWeightArgs {
                args_file: None,
                data_args: cli_args.data_args.merge(data_args),
                survey_args: cli_args.survey_args.merge(survey_args),
                noise_weight_args: cli_args.noise_weight_args.merge(noise_weight_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<NoiseWeightParams, LotssError> {
        let NoiseWeightArgs {
            args_file: _,
            data_args,
            survey_args,
            noise_weight_args: NoiseWeightCliArgs { nside_out, output },
        } = self;

        let config = data_args.parse()?;
        let survey = survey_args.parse()?;
        let nside_out = nside_out.unwrap_or(survey.nside);
        nside_to_depth(nside_out)?;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));
        can_write_to_file(&output)?;

        let mut printer =
            InfoPrinter::new(format!("Making a LoTSS {} noise-weight map", survey.release).into());
        printer.push_block(vec![
            format!("Catalog: {}", config.catalog_path(survey.release).display()).into(),
            format!("SKADS: {}", config.skads_catalog_path().display()).into(),
        ]);
        printer.push_line(format!("Total flux > {} mJy", survey.flux_min_cut).into());
        printer.push_line(format!("NSIDE: {} -> {nside_out}", survey.nside).into());
        printer.push_line(format!("Output: {}", output.display()).into());
        printer.display();
        display_warnings();

        Ok(NoiseWeightParams {
            config,
            survey,
            nside_out,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), LotssError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let NoiseWeightParams {
            config,
            survey,
            nside_out,
            output,
        } = self.parse()?;

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
        let weights = get_lotss_noise_weight_map(
            &maps.noise,
            &maps.mask,
            survey.flux_min_cut,
            nside_out,
            &config,
        )?;
        display_warnings();

        write_healpix_map(&output, &weights, "WEIGHT")?;
        info!("Wrote noise-weight map to {}", output.display());
        Ok(())
    }
}
