// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Argument handling of the binary.

use std::io::Write;

use super::*;

#[test]
fn test_help_lists_subcommands() {
    let cmd = lotss_maps().arg("--help").ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    for sub in ["maps", "noise-weight", "flux-model", "redshift-dist"] {
        assert!(stdout.contains(sub), "missing {sub} in:\n{stdout}");
    }
}

#[test]
fn test_unsupported_release_is_rejected() {
    let dir = TempDir::new().unwrap();
    let cmd = lotss_maps()
        .args(["maps", "-r", "3", "--data-root"])
        .arg(dir.path())
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains('3'), "{stderr}");
}

#[test]
fn test_bad_z_tail_is_rejected() {
    let dir = TempDir::new().unwrap();
    let cmd = lotss_maps()
        .args(["redshift-dist", "-z", "0", "-o"])
        .arg(dir.path().join("nz.txt"))
        .ok();
    assert!(cmd.is_err());
    assert!(!dir.path().join("nz.txt").exists());
}

#[test]
fn test_missing_catalog_is_an_error() {
    let dir = TempDir::new().unwrap();
    let cmd = lotss_maps()
        .args(["maps", "--data-root"])
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path())
        .ok();
    assert!(cmd.is_err());
    assert!(!dir.path().join("counts.fits").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nz.txt");
    let cmd = lotss_maps()
        .args(["--dry-run", "redshift-dist", "-o"])
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!output.exists());
}

#[test]
fn test_args_file_is_used() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("from_file.txt");
    let (args_file, mut f) = make_file_in_dir("args.toml", dir.path());
    writeln!(f, "z_tail = 0.5").unwrap();
    writeln!(f, "output = \"{}\"", output.display()).unwrap();
    drop(f);

    let cmd = lotss_maps().arg("redshift-dist").arg(&args_file).ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(output.exists());
}

#[test]
fn test_unknown_args_file_type() {
    let dir = TempDir::new().unwrap();
    let (args_file, _) = make_file_in_dir("args.yaml", dir.path());
    let cmd = lotss_maps().arg("redshift-dist").arg(&args_file).ok();
    assert!(cmd.is_err());
}
