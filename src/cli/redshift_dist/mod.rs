// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write the LoTSS redshift distribution.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{InfoPrinter, ARG_FILE_HELP};
use crate::{
    constants::DEFAULT_Z_TAIL,
    io::write::{can_write_to_file, write_columns},
    redshift::get_lotss_redshift_distribution,
    LotssError,
};

const DEFAULT_OUTPUT_FILENAME: &str = "redshift_distribution.txt";

lazy_static::lazy_static! {
    static ref Z_TAIL_HELP: String =
        format!("The redshift where the distribution's tail sets in. Default: {DEFAULT_Z_TAIL}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RedshiftDistArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = Z_TAIL_HELP.as_str())]
    pub(super) z_tail: Option<f64>,

    /// The text file to write redshifts and densities to. Default:
    /// redshift_distribution.txt
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl RedshiftDistArgs {
    pub(super) fn merge(self) -> Result<RedshiftDistArgs, LotssError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let RedshiftDistArgs {
                args_file: _,
                z_tail,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(RedshiftDistArgs {
                args_file: None,
                z_tail: cli_args.z_tail.or(z_tail),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), LotssError> {
        trace!("{:#?}", self);
        let RedshiftDistArgs {
            args_file: _,
            z_tail,
            output,
        } = self;
        let z_tail = z_tail.unwrap_or(DEFAULT_Z_TAIL);
        if !z_tail.is_finite() || z_tail <= 0.0 {
            return Err(LotssError::Generic(format!(
                "z_tail must be a positive number, but got {z_tail}"
            )));
        }
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));
        can_write_to_file(&output)?;

        let mut printer = InfoPrinter::new("LoTSS redshift distribution".into());
        printer.push_line(format!("z_tail: {z_tail}").into());
        printer.push_line(format!("Output: {}", output.display()).into());
        printer.display();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let (z, n) = get_lotss_redshift_distribution(z_tail);
        write_columns(&output, &["z", "n"], &[&z, &n])?;
        info!("Wrote {} samples to {}", z.len(), output.display());
        Ok(())
    }
}
