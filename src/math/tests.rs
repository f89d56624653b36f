// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_simpson_exact_for_cubics_odd() {
    // Integral of x^3 over [0, 2] is 4.
    let dx = 0.25;
    let y: Vec<f64> = (0..9).map(|i| (i as f64 * dx).powi(3)).collect();
    assert_abs_diff_eq!(simpson(&y, dx), 4.0, epsilon = 1e-12);
}

#[test]
fn test_simpson_even_number_of_samples() {
    // Integral of x^2 over [0, 1.5] is 1.125. With an even number of samples
    // the leftover trapezoids make it inexact, but close.
    let dx = 0.3;
    let y: Vec<f64> = (0..6).map(|i| (i as f64 * dx).powi(2)).collect();
    assert_abs_diff_eq!(simpson(&y, dx), 1.1295, epsilon = 1e-12);

    // Constants are integrated exactly regardless.
    let y = vec![2.0; 10];
    assert_abs_diff_eq!(simpson(&y, 0.5), 9.0, epsilon = 1e-12);
}

#[test]
fn test_simpson_degenerate() {
    assert_abs_diff_eq!(simpson(&[], 1.0), 0.0);
    assert_abs_diff_eq!(simpson(&[3.0], 1.0), 0.0);
    // Two samples is a trapezoid.
    assert_abs_diff_eq!(simpson(&[1.0, 3.0], 2.0), 4.0);
}

#[test]
fn test_histogram() {
    let samples = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0];
    let h = Histogram::new(&samples, 4).unwrap();
    assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    // The last bin includes its right edge.
    assert_eq!(h.counts, vec![2.0, 2.0, 2.0, 2.0]);
    assert_eq!(h.centres(), vec![0.5, 1.5, 2.5, 3.5]);
    assert_abs_diff_eq!(h.bin_width(), 1.0);
}

#[test]
fn test_histogram_conserves_samples() {
    let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
    let h = Histogram::new(&samples, 37).unwrap();
    assert_abs_diff_eq!(h.counts.iter().sum::<f64>(), 1000.0);
    assert_eq!(h.edges.len(), 38);
}

#[test]
fn test_histogram_single_value() {
    let h = Histogram::new(&[5.0, 5.0], 2).unwrap();
    assert_eq!(h.edges, vec![4.5, 5.0, 5.5]);
    assert_eq!(h.counts, vec![0.0, 2.0]);
}

#[test]
fn test_histogram_empty() {
    assert!(Histogram::new(&[], 10).is_none());
    assert!(Histogram::new(&[1.0], 0).is_none());
}
