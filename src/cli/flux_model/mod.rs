// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write the 144 MHz flux probability distribution made from SKADS.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, DataArgs, InfoPrinter, ARG_FILE_HELP};
use crate::{
    flux::load_flux_probability,
    io::write::{can_write_to_file, write_columns},
    LotssError,
};

const DEFAULT_OUTPUT_FILENAME: &str = "flux_model.txt";

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct FluxModelArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "data")]
    #[serde(default)]
    pub(super) data_args: DataArgs,

    /// The text file to write flux bin centres [mJy] and probability
    /// densities [1/mJy] to. Default: flux_model.txt
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl FluxModelArgs {
    pub(super) fn merge(self) -> Result<FluxModelArgs, LotssError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let FluxModelArgs {
                args_file: _,
                data_args,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(FluxModelArgs {
                args_file: None,
                data_args: cli_args.data_args.merge(data_args),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), LotssError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let FluxModelArgs {
            args_file: _,
            data_args,
            output,
        } = self;
        let config = data_args.parse()?;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));
        can_write_to_file(&output)?;

        let mut printer = InfoPrinter::new("Building the SKADS flux model".into());
        printer.push_line(format!("SKADS: {}", config.skads_catalog_path().display()).into());
        printer.push_line(format!("Output: {}", output.display()).into());
        printer.display();
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let table = load_flux_probability(&config)?;
        write_columns(&output, &["flux", "proba"], &[table.flux(), table.proba()])?;
        info!(
            "Wrote {} flux bins to {}",
            table.num_bins(),
            output.display()
        );
        Ok(())
    }
}
