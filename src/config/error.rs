// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with data configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Data config file '{0}' doesn't have a recognised file extension! Valid extensions are: {1}")]
    UnknownFileType(PathBuf, String),

    #[error("Couldn't decode toml structure from {file}:\n{err}")]
    Toml { file: PathBuf, err: toml::de::Error },

    #[error("Couldn't decode json structure from {file}:\n{err}")]
    Json {
        file: PathBuf,
        err: serde_json::Error,
    },

    #[error("A DR1 pointing radius must be positive, but got {0}°")]
    BadPointingRadius(f64),

    #[error("Couldn't read data config file {file}: {err}")]
    IO { file: PathBuf, err: std::io::Error },
}
