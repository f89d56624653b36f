// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use indoc::indoc;
use serial_test::serial;
use tempfile::Builder;

use super::*;

#[test]
fn test_defaults() {
    let c = DataConfig::default();
    assert_eq!(c.dr1_pointings_to_skip.len(), 5);
    assert_eq!(c.dr1_pointings_to_skip[0], [164.633, 54.685]);
    assert_abs_diff_eq!(c.dr1_pointing_radius_deg, 1.7);
    assert_eq!(
        c.dr2_mask_path(None),
        PathBuf::from("./LoTSS/DR2/masks/Mask_default.fits")
    );
    assert_eq!(
        c.catalog_path(DataRelease::Dr2),
        PathBuf::from("./LoTSS/DR2/LoTSS_DR2_v100.srl.fits")
    );
}

#[test]
fn test_path_joining() {
    let c = DataConfig {
        data_root: PathBuf::from("/data"),
        skads_catalog: PathBuf::from("/elsewhere/skads.fits"),
        ..Default::default()
    };
    assert_eq!(c.skads_catalog_path(), PathBuf::from("/elsewhere/skads.fits"));
    assert_eq!(
        c.dr1_pointings_path(),
        PathBuf::from("/data/LoTSS/DR1/pointings.txt")
    );
    assert_eq!(
        c.dr2_mask_path(Some("Mask_coverage")),
        PathBuf::from("/data/LoTSS/DR2/masks/Mask_coverage.fits")
    );
}

#[test]
fn test_read_toml() {
    let mut f = Builder::new().suffix(".toml").tempfile().unwrap();
    f.write_all(
        indoc! {r#"
            data_root = "/survey"
            dr2_default_mask = "Mask_noise"
            dr1_pointings_to_skip = [[1.0, 2.0]]
        "#}
        .as_bytes(),
    )
    .unwrap();
    let c = DataConfig::from_file(f.path()).unwrap();
    assert_eq!(c.data_root, PathBuf::from("/survey"));
    assert_eq!(c.dr2_default_mask, "Mask_noise");
    assert_eq!(c.dr1_pointings_to_skip, vec![[1.0, 2.0]]);
    // Unspecified keys keep their defaults.
    assert_eq!(c.dr1_catalog, DataConfig::default().dr1_catalog);
}

#[test]
fn test_read_json() {
    let mut f = Builder::new().suffix(".json").tempfile().unwrap();
    f.write_all(
        indoc! {r#"
            {
                "data_root": "/survey",
                "dr1_pointing_radius_deg": 2.0
            }
        "#}
        .as_bytes(),
    )
    .unwrap();
    let c = DataConfig::from_file(f.path()).unwrap();
    assert_abs_diff_eq!(c.dr1_pointing_radius_deg, 2.0);
}

#[test]
fn test_bad_config_files() {
    let f = Builder::new().suffix(".yaml").tempfile().unwrap();
    assert!(matches!(
        DataConfig::from_file(f.path()),
        Err(ConfigError::UnknownFileType(_, _))
    ));

    let mut f = Builder::new().suffix(".toml").tempfile().unwrap();
    f.write_all(b"dr1_pointing_radius_deg = -1.0\n").unwrap();
    assert!(matches!(
        DataConfig::from_file(f.path()),
        Err(ConfigError::BadPointingRadius(_))
    ));

    let mut f = Builder::new().suffix(".toml").tempfile().unwrap();
    f.write_all(b"data_root = [\n").unwrap();
    assert!(matches!(
        DataConfig::from_file(f.path()),
        Err(ConfigError::Toml { .. })
    ));
}

#[test]
#[serial]
fn test_env_data_root() {
    std::env::set_var(DATA_PATH_ENV_VAR, "/from/env");
    let c = DataConfig::default().with_env_data_root();
    std::env::remove_var(DATA_PATH_ENV_VAR);
    assert_eq!(c.data_root, PathBuf::from("/from/env"));

    let c = DataConfig::default().with_env_data_root();
    assert_eq!(c.data_root, PathBuf::from("."));
}

#[test]
fn test_input_file_type_from_path() {
    assert!(matches!(
        InputFileType::from_path(Path::new("args.toml")),
        Some(InputFileType::Toml)
    ));
    assert!(matches!(
        InputFileType::from_path(Path::new("/data/Config.JSON")),
        Some(InputFileType::Json)
    ));
    assert!(InputFileType::from_path(Path::new("args.yaml")).is_none());
    assert!(InputFileType::from_path(Path::new("toml")).is_none());
}
