// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The text-table subcommands.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_redshift_dist() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nz.txt");
    let cmd = lotss_maps()
        .args(["redshift-dist", "-o"])
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 10001);
    assert_abs_diff_eq!(rows[0][0], 0.0);
    assert_abs_diff_eq!(rows[10000][0], 100.0, epsilon = 1e-9);
    assert!(rows.iter().all(|r| r.len() == 2 && r[1] >= 0.0));
}

#[test]
fn test_redshift_dist_tail_changes_shape() {
    let dir = TempDir::new().unwrap();
    let short = dir.path().join("short.txt");
    let long = dir.path().join("long.txt");
    for (z_tail, output) in [("0.5", &short), ("2", &long)] {
        let cmd = lotss_maps()
            .args(["nz", "-z", z_tail, "-o"])
            .arg(output)
            .ok();
        assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    }
    let short = read_rows(&short);
    let long = read_rows(&long);
    // A longer tail keeps more weight at high redshift.
    assert!(long[150][1] > short[150][1]);
}

#[test]
fn test_flux_model() {
    let data_root = make_data_root();
    let output = data_root.path().join("flux.txt");
    let cmd = lotss_maps()
        .args(["flux-model", "--data-root"])
        .arg(data_root.path())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1000);
    let d_flux = rows[1][0] - rows[0][0];
    let integral: f64 = rows.iter().map(|r| r[1]).sum::<f64>() * d_flux;
    assert_abs_diff_eq!(integral, 1.0, epsilon = 0.1);
}
