// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::{NamedTempFile, TempDir};

use super::*;
use crate::io::read::fits::*;

#[test]
fn test_write_columns() {
    let tmp = NamedTempFile::new().unwrap();
    let z = [0.0, 0.5, 1.0];
    let n = [0.0, 0.25, 0.125];
    write_columns(tmp.path(), &["z", "n"], &[&z, &n]).unwrap();

    let contents = std::fs::read_to_string(tmp.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["# z n", "0 0", "0.5 0.25", "1 0.125"]);
}

#[test]
fn test_write_columns_bad_input() {
    let tmp = NamedTempFile::new().unwrap();
    let result = write_columns(tmp.path(), &["z"], &[&[1.0], &[2.0]]);
    assert!(matches!(
        result,
        Err(WriteError::ColumnNames {
            num_columns: 2,
            num_names: 1
        })
    ));

    let result = write_columns(tmp.path(), &["a", "b"], &[&[1.0, 2.0], &[2.0]]);
    assert!(matches!(
        result,
        Err(WriteError::ColumnLength {
            index: 1,
            expected: 2,
            got: 1
        })
    ));
}

#[test]
fn test_write_healpix_map() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("map.fits");
    let values: Vec<f64> = (0..48).map(|i| i as f64 * 0.5).collect();
    let map = HealpixMap::from_values(2, values.clone()).unwrap();
    write_healpix_map(&file, &map, "WEIGHT").unwrap();
    // Writing again replaces the file rather than failing.
    write_healpix_map(&file, &map, "WEIGHT").unwrap();

    let mut fptr = fits_open(&file).unwrap();
    let hdu = fits_open_hdu(&mut fptr, 1).unwrap();
    let nside: u32 = fits_get_required_key(&mut fptr, &hdu, "NSIDE").unwrap();
    let ordering: String = fits_get_required_key(&mut fptr, &hdu, "ORDERING").unwrap();
    assert_eq!(nside, 2);
    assert_eq!(ordering, "NESTED");
    let read: Vec<f64> = fits_get_col(&mut fptr, &hdu, "WEIGHT").unwrap();
    assert_eq!(read.len(), 48);
    for (r, v) in read.iter().zip(values.iter()) {
        assert_abs_diff_eq!(r, v);
    }
}

#[test]
fn test_write_healpix_mask() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("mask.fits");
    let mut mask = HealpixMap::filled(1, false).unwrap();
    mask.values_mut()[3] = true;
    write_healpix_mask(&file, &mask).unwrap();

    let mut fptr = fits_open(&file).unwrap();
    let hdu = fits_open_hdu(&mut fptr, 1).unwrap();
    let read = fits_get_flat_f64_col(&mut fptr, &hdu, 0).unwrap();
    assert_eq!(read.len(), 12);
    assert_abs_diff_eq!(read.iter().sum::<f64>(), 1.0);
    assert_abs_diff_eq!(read[3], 1.0);
}

#[test]
fn test_can_write_to_file_keeps_contents() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("existing.txt");
    std::fs::write(&file, "hello").unwrap();
    can_write_to_file(&file).unwrap();
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello");

    // A file that doesn't exist yet isn't left behind, but its directory is
    // made.
    let new = dir.path().join("sub").join("new.txt");
    can_write_to_file(&new).unwrap();
    assert!(!new.exists());
    assert!(new.parent().unwrap().exists());
}
