// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cli;
mod maps;
mod tables;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};
use fitsio::{
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use tempfile::TempDir;

fn lotss_maps() -> Command {
    Command::cargo_bin("lotss-maps").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Write a FITS binary table of double columns.
fn write_table(file: &Path, columns: &[(&str, &[f64])]) {
    let mut fptr = FitsFile::create(file).open().unwrap();
    let descriptions: Vec<_> = columns
        .iter()
        .map(|(name, _)| {
            ColumnDescription::new(*name)
                .with_type(ColumnDataType::Double)
                .create()
                .unwrap()
        })
        .collect();
    let hdu = fptr.create_table("SOURCES", &descriptions).unwrap();
    for (name, values) in columns {
        hdu.write_col(&mut fptr, *name, *values).unwrap();
    }
}

/// Read the single column of a HEALPix map written by the binary.
fn read_map_column(file: &Path, column: &str) -> Vec<f64> {
    let mut fptr = FitsFile::open(file).unwrap();
    let hdu = fptr.hdu(1).unwrap();
    hdu.read_col(&mut fptr, column).unwrap()
}

/// A small data tree laid out like the default data config: one DR1 pointing
/// at (180, 50) with a handful of sources in and around it, and a synthetic
/// SKADS catalog.
fn make_data_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    let dr1 = dir.path().join("LoTSS").join("DR1");
    std::fs::create_dir_all(&dr1).unwrap();
    std::fs::create_dir_all(dir.path().join("SKADS")).unwrap();

    let (_, mut pointings) = make_file_in_dir("pointings.txt", &dr1);
    writeln!(pointings, "# RA Dec").unwrap();
    writeln!(pointings, "180.0 50.0").unwrap();

    let ra = [180.0, 180.1, 179.9, 180.3, 180.0, 20.0];
    let dec = [50.0, 50.1, 49.9, 50.2, 50.5, -30.0];
    let flux = [2.0, 3.0, 0.5, 10.0, 1.5, 4.0];
    let rms = [0.1, 0.2, 0.1, 0.15, 0.12, 0.1];
    write_table(
        &dr1.join("LOFAR_HBA_T1_DR1_merge_ID_optical_f_v1.2.fits"),
        &[
            ("RA", &ra),
            ("DEC", &dec),
            ("Total_flux", &flux),
            ("Isl_rms", &rms),
        ],
    );

    // Natural logs of 151 MHz fluxes spanning roughly 0.1 mJy to 1.5 Jy.
    let log_fluxes: Vec<f64> = (0..50000)
        .map(|i| (1e-4 + i as f64 * 3e-5_f64).ln())
        .collect();
    write_table(
        &dir.path()
            .join("SKADS")
            .join("100sqdeg_5uJy_s1400_components_fixed.fits"),
        &[("i_151", &log_fluxes)],
    );

    dir
}

/// Non-comment lines of a text table.
fn read_rows(file: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(file)
        .unwrap()
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| {
            l.split_whitespace()
                .map(|s| s.parse::<f64>().unwrap())
                .collect()
        })
        .collect()
}
