// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use crate::healpix::{ang_to_pix, is_unseen, query_disc};

fn ten_sources() -> Catalog {
    let ra: Vec<f64> = (0..10).map(|i| 150.0 + i as f64 * 3.0).collect();
    let dec: Vec<f64> = (0..10).map(|i| 30.0 + i as f64 * 2.0).collect();
    let flux: Vec<f64> = (0..10).map(|i| 1.0 + i as f64).collect();
    let rms: Vec<f64> = (0..10).map(|i| 0.1 + 0.01 * i as f64).collect();
    Catalog::new(ra, dec, flux, rms).unwrap()
}

#[test]
fn test_counts_with_all_valid_mask() {
    let catalog = ten_sources();
    let mask = HealpixMap::filled(16, true).unwrap();
    let maps = build_lotss_maps(&catalog, mask, 8).unwrap();

    assert_eq!(maps.counts.nside(), 16);
    assert_abs_diff_eq!(maps.counts.values().iter().sum::<f64>(), 10.0);
    for (&ra, &dec) in catalog.ra().iter().zip(catalog.dec()) {
        let pix = ang_to_pix(4, ra, dec).unwrap();
        assert!(maps.counts.values()[pix as usize] >= 1.0);
    }
    assert!(maps.noise.values().iter().all(|v| !is_unseen(*v)));
}

#[test]
fn test_noise_map_is_filled_and_masked() {
    let catalog = ten_sources();
    let mean_rms = catalog.isl_rms().iter().sum::<f64>() / 10.0;
    let mut mask = HealpixMap::filled(8, false).unwrap();
    for pix in query_disc(3, 160.0, 40.0, 20.0).unwrap() {
        mask.values_mut()[pix as usize] = true;
    }
    let maps = build_lotss_maps(&catalog, mask.clone(), 4).unwrap();

    // No empty pixels are left.
    assert!(maps.noise.values().iter().all(|v| !v.is_nan()));
    // Pixels outside the degraded mask are UNSEEN; others hold noise values.
    let coarse_mask = mask.ud_grade(4).unwrap();
    for (&v, &valid) in maps.noise.values().iter().zip(coarse_mask.values()) {
        assert_eq!(is_unseen(v), !valid);
        if valid {
            assert!(v > 0.099 && v < 0.191, "{v} vs mean {mean_rms}");
        }
    }

    // Counts outside the mask are UNSEEN.
    for (&c, &valid) in maps.counts.values().iter().zip(mask.values()) {
        if !valid {
            assert!(is_unseen(c));
        }
    }
}

#[test]
fn test_empty_catalog_has_no_noise() {
    let catalog = Catalog::new(vec![], vec![], vec![], vec![]).unwrap();
    let mask = HealpixMap::filled(4, true).unwrap();
    assert!(matches!(
        build_lotss_maps(&catalog, mask, 4),
        Err(MapError::NoNoise)
    ));
}

#[test]
fn test_invalid_noise_nside() {
    let catalog = ten_sources();
    let mask = HealpixMap::filled(4, true).unwrap();
    assert!(matches!(
        build_lotss_maps(&catalog, mask, 3),
        Err(MapError::Healpix(_))
    ));
}

#[test]
fn test_get_lotss_map_dr1() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pointings.txt"), "160.0 40.0\n").unwrap();
    let config = DataConfig {
        data_root: dir.path().to_path_buf(),
        dr1_pointings: "pointings.txt".into(),
        ..Default::default()
    };
    let catalog = Catalog::new(
        vec![160.0, 160.5, 200.0],
        vec![40.0, 40.5, 10.0],
        vec![2.0, 3.0, 4.0],
        vec![0.1, 0.2, 0.3],
    )
    .unwrap();
    let maps = get_lotss_map(&catalog, DataRelease::Dr1, &config, None, 64).unwrap();
    assert_eq!(maps.noise.nside(), DEFAULT_NOISE_NSIDE);
    assert_eq!(maps.counts.nside(), 64);
    // The source at (200, 10) is outside the footprint.
    let in_footprint: f64 = maps
        .counts
        .values()
        .iter()
        .filter(|v| !is_unseen(**v))
        .sum();
    assert_abs_diff_eq!(in_footprint, 2.0);
}
