// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to write out maps and tables.

mod error;
#[cfg(test)]
mod tests;

pub use error::WriteError;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use fitsio::{
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use log::{debug, trace};

use crate::{cli::Warn, constants::UNSEEN, healpix::HealpixMap};

/// Write a HEALPix map to a FITS file, following the HEALPix "implicit"
/// binary-table convention (one value per row, NESTED ordering). The file is
/// overwritten if it exists.
pub fn write_healpix_map(
    file: &Path,
    map: &HealpixMap<f64>,
    column_name: &str,
) -> Result<(), WriteError> {
    debug!(
        "Writing NSIDE {} map '{column_name}' to {}",
        map.nside(),
        file.display()
    );
    if file.exists() {
        std::fs::remove_file(file)?;
    }
    let mut fptr = FitsFile::create(file).open()?;
    let col = ColumnDescription::new(column_name)
        .with_type(ColumnDataType::Double)
        .create()?;
    let hdu = fptr.create_table("xtension", &[col])?;
    hdu.write_col(&mut fptr, column_name, map.values())?;

    hdu.write_key(&mut fptr, "PIXTYPE", "HEALPIX")?;
    hdu.write_key(&mut fptr, "ORDERING", "NESTED")?;
    hdu.write_key(&mut fptr, "COORDSYS", "C")?;
    hdu.write_key(&mut fptr, "NSIDE", i64::from(map.nside()))?;
    hdu.write_key(&mut fptr, "FIRSTPIX", 0_i64)?;
    hdu.write_key(&mut fptr, "LASTPIX", map.npix() as i64 - 1)?;
    hdu.write_key(&mut fptr, "INDXSCHM", "IMPLICIT")?;
    hdu.write_key(&mut fptr, "OBJECT", "FULLSKY")?;
    hdu.write_key(&mut fptr, "BAD_DATA", UNSEEN)?;
    hdu.write_key(
        &mut fptr,
        "SOFTWARE",
        format!(
            "Created by {} v{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
    )?;

    Ok(())
}

/// Write a boolean mask as a HEALPix map of ones and zeros.
pub fn write_healpix_mask(file: &Path, mask: &HealpixMap<bool>) -> Result<(), WriteError> {
    let as_float = mask.map_values(|&v| if v { 1.0 } else { 0.0 });
    write_healpix_map(file, &as_float, "MASK")
}

/// Write equal-length columns as a whitespace-separated text table, with the
/// column names in a `#` comment on the first line.
pub fn write_columns(file: &Path, names: &[&str], columns: &[&[f64]]) -> Result<(), WriteError> {
    if names.len() != columns.len() {
        return Err(WriteError::ColumnNames {
            num_columns: columns.len(),
            num_names: names.len(),
        });
    }
    let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);
    for (index, column) in columns.iter().enumerate() {
        if column.len() != num_rows {
            return Err(WriteError::ColumnLength {
                index,
                expected: num_rows,
                got: column.len(),
            });
        }
    }

    debug!("Writing {num_rows} rows to {}", file.display());
    let mut f = BufWriter::new(File::create(file)?);
    writeln!(f, "# {}", names.join(" "))?;
    for i_row in 0..num_rows {
        let row: Vec<String> = columns.iter().map(|c| c[i_row].to_string()).collect();
        writeln!(f, "{}", row.join(" "))?;
    }
    f.flush()?;
    Ok(())
}

/// Attempt to write to the specified file. If we can't, we return an error.
/// The existing contents of the file are left alone.
pub(crate) fn can_write_to_file(file: &Path) -> Result<(), WriteError> {
    trace!("Testing whether we can write to {}", file.display());

    let file_exists = file.exists();
    if file_exists {
        format!("Will overwrite the existing file '{}'", file.display()).warn();
    }

    match std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable. If it didn't exist before, `OpenOptions::new`
        // created it; we don't want to keep the 0-sized file.
        Ok(_) => {
            if !file_exists {
                std::fs::remove_file(file)?;
            }
        }

        // File doesn't exist. Attempt to make the directories leading up to the
        // file; if this fails, then we can't write the file anyway.
        Err(std::io::ErrorKind::NotFound) => {
            if let Some(p) = file.parent() {
                match std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .map_err(|e| e.kind())
                {
                    Ok(()) => (),
                    Err(std::io::ErrorKind::PermissionDenied) => {
                        return Err(WriteError::NewDirectory(p.to_path_buf()))
                    }
                    Err(e) => return Err(WriteError::IO(e.into())),
                }
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(WriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => return Err(WriteError::IO(e.into())),
    }

    Ok(())
}
