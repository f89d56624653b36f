// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from writing output files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Cannot write to the specified file '{file}'. Do you have write permissions set?")]
    FileNotWritable { file: String },

    #[error(
        "Couldn't create directory '{0}' for output files. Do you have write permissions set?"
    )]
    NewDirectory(PathBuf),

    #[error("Tried to write {num_columns} columns with {num_names} column names")]
    ColumnNames {
        num_columns: usize,
        num_names: usize,
    },

    #[error("Column {index} has {got} rows, but column 0 has {expected}")]
    ColumnLength {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Fitsio(#[from] fitsio::errors::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
