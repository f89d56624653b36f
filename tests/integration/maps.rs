// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The HEALPix map subcommands.

use super::*;

const UNSEEN: f64 = -1.6375e30;

#[test]
fn test_maps_dr1() {
    let data_root = make_data_root();
    let out = TempDir::new().unwrap();
    let cmd = lotss_maps()
        .args(["maps", "-n", "64", "-f", "1", "--data-root"])
        .arg(data_root.path())
        .arg("-o")
        .arg(out.path())
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let counts = read_map_column(&out.path().join("counts.fits"), "COUNTS");
    let mask = read_map_column(&out.path().join("mask.fits"), "MASK");
    let noise = read_map_column(&out.path().join("noise.fits"), "NOISE");
    assert_eq!(counts.len(), 12 * 64 * 64);
    assert_eq!(mask.len(), 12 * 64 * 64);
    assert_eq!(noise.len(), 12 * 256 * 256);

    // Sources at or below 1 mJy and outside the footprint don't count.
    assert_eq!(counts.iter().filter(|&&c| c != UNSEEN).sum::<f64>(), 4.0);
    assert!(mask.iter().any(|&m| m == 1.0));
    assert!(mask.iter().all(|&m| m == 0.0 || m == 1.0));
    for (&c, &m) in counts.iter().zip(mask.iter()) {
        if m == 0.0 {
            assert_eq!(c, UNSEEN);
        }
    }
    assert!(noise.iter().any(|&n| n != UNSEEN && n > 0.0));
}

#[test]
fn test_noise_weight_dr1() {
    let data_root = make_data_root();
    let output = data_root.path().join("weights.fits");
    let cmd = lotss_maps()
        .args(["noise-weight", "-n", "64", "--nside-out", "32", "--data-root"])
        .arg(data_root.path())
        .arg("-o")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let weights = read_map_column(&output, "WEIGHT");
    assert_eq!(weights.len(), 12 * 32 * 32);
    let seen: Vec<f64> = weights.iter().copied().filter(|&w| w != UNSEEN).collect();
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|&w| (0.0..=1.1).contains(&w)));
    assert!(seen.iter().any(|&w| w > 0.0));
}
