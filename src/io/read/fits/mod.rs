// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions for reading FITS files.

mod error;

pub use error::FitsError;

use std::fmt::Display;

use fitsio::{hdu::*, tables::ConcreteColumnDescription, FitsFile};

/// Open a fits file.
#[track_caller]
pub(crate) fn fits_open<P: AsRef<std::path::Path>>(file: P) -> Result<FitsFile, FitsError> {
    FitsFile::open(file.as_ref()).map_err(|e| {
        let caller = std::panic::Location::caller();
        FitsError::Open {
            fits_error: Box::new(e),
            fits_filename: file.as_ref().to_path_buf().into_boxed_path(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Open a fits file's HDU.
#[track_caller]
pub(crate) fn fits_open_hdu<T: DescribesHdu + Display + Copy>(
    fits_fptr: &mut FitsFile,
    hdu_description: T,
) -> Result<FitsHdu, FitsError> {
    fits_fptr.hdu(hdu_description).map_err(|e| {
        let caller = std::panic::Location::caller();
        FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_description: format!("{hdu_description}").into_boxed_str(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Given a FITS file pointer, a HDU that belongs to it, and a keyword that may
/// or may not exist, pull out the value of the keyword, parsing it into the
/// desired type.
#[track_caller]
pub(crate) fn fits_get_optional_key<T: std::str::FromStr>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    keyword: &str,
) -> Result<Option<T>, FitsError> {
    let unparsed_value: String = match hdu.read_key(fits_fptr, keyword) {
        Ok(key_value) => key_value,
        Err(e) => {
            // 202 = KEY_NO_EXIST, 204 = VALUE_UNDEFINED
            if let fitsio::errors::Error::Fits(fe) = &e {
                if matches!(fe.status, 202 | 204) {
                    return Ok(None);
                }
            }
            let caller = std::panic::Location::caller();
            return Err(FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            });
        }
    };

    match unparsed_value.trim().parse() {
        Ok(parsed_value) => Ok(Some(parsed_value)),
        Err(_) => {
            let caller = std::panic::Location::caller();
            Err(FitsError::Parse {
                key: keyword.to_string().into_boxed_str(),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Given a FITS file pointer, a HDU that belongs to it, and a keyword, pull out
/// the value of the keyword, parsing it into the desired type.
#[track_caller]
pub(crate) fn fits_get_required_key<T: std::str::FromStr>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    keyword: &str,
) -> Result<T, FitsError> {
    match fits_get_optional_key(fits_fptr, hdu, keyword) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => {
            let caller = std::panic::Location::caller();
            Err(FitsError::MissingKey {
                key: keyword.to_string().into_boxed_str(),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
        Err(error) => Err(error),
    }
}

/// Get the column descriptions of a table HDU.
#[track_caller]
fn fits_get_col_descriptions<'a>(
    fits_fptr: &FitsFile,
    hdu: &'a FitsHdu,
) -> Result<&'a [ConcreteColumnDescription], FitsError> {
    match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => Ok(column_descriptions),
        _ => {
            let caller = std::panic::Location::caller();
            Err(FitsError::NotTable {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Get the column names of a table HDU.
#[track_caller]
pub(crate) fn fits_get_col_names(
    fits_fptr: &FitsFile,
    hdu: &FitsHdu,
) -> Result<Vec<String>, FitsError> {
    Ok(fits_get_col_descriptions(fits_fptr, hdu)?
        .iter()
        .map(|cd| cd.name.clone())
        .collect())
}

/// Get a column from a fits file's HDU. A missing column is reported with the
/// names of the columns that are available.
#[track_caller]
pub(crate) fn fits_get_col<T: fitsio::tables::ReadsCol>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    col_name: &str,
) -> Result<Vec<T>, FitsError> {
    let caller = std::panic::Location::caller();
    let col_names = fits_get_col_names(fits_fptr, hdu)?;
    if !col_names.iter().any(|n| n == col_name) {
        return Err(FitsError::MissingColumn {
            column: col_name.to_string().into_boxed_str(),
            available: col_names.join(", ").into_boxed_str(),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_num: hdu.number + 1,
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        });
    }

    hdu.read_col(fits_fptr, col_name).map_err(|e| FitsError::Fitsio {
        fits_error: Box::new(e),
        fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
        hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
        source_file: caller.file(),
        source_line: caller.line(),
        source_column: caller.column(),
    })
}

/// Read every element of a (possibly vector-valued) table column as `f64`s,
/// in row-major order. HEALPix maps are commonly stored with many pixels per
/// row (e.g. TFORM = 1024E), which `fitsio`'s column reader doesn't flatten.
/// `col_index` is zero-indexed.
#[track_caller]
pub(crate) fn fits_get_flat_f64_col(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    col_index: usize,
) -> Result<Vec<f64>, FitsError> {
    let caller = std::panic::Location::caller();
    let (repeat, num_rows) = {
        let col_descriptions = fits_get_col_descriptions(fits_fptr, hdu)?;
        let num_rows = match &hdu.info {
            HduInfo::TableInfo { num_rows, .. } => *num_rows,
            _ => 0,
        };
        match col_descriptions.get(col_index) {
            Some(cd) => (cd.data_type.repeat.max(1), num_rows),
            None => {
                return Err(FitsError::MissingColumn {
                    column: format!("#{}", col_index + 1).into_boxed_str(),
                    available: col_descriptions
                        .iter()
                        .map(|cd| cd.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                        .into_boxed_str(),
                    fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                    hdu_num: hdu.number + 1,
                    source_file: caller.file(),
                    source_line: caller.line(),
                    source_column: caller.column(),
                })
            }
        }
    };

    let num_elements = repeat * num_rows;
    let mut buffer = vec![0.0; num_elements];
    if num_elements == 0 {
        return Ok(buffer);
    }
    unsafe {
        let mut status = 0;
        let mut any_null = 0;
        // ffgcvd = fits_read_col_dbl
        fitsio_sys::ffgcvd(
            fits_fptr.as_raw(),
            (col_index + 1) as _,
            1,
            1,
            num_elements as _,
            f64::NAN,
            buffer.as_mut_ptr(),
            &mut any_null,
            &mut status,
        );
        fitsio::errors::check_status(status).map_err(|e| FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        })?;
    }
    Ok(buffer)
}
