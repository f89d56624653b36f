// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.

#[cfg(test)]
mod tests;

/// Equal-width bins over a range of samples.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Histogram {
    /// The number of samples in each bin.
    pub(crate) counts: Vec<f64>,

    /// The bin edges; there is one more edge than there are bins.
    pub(crate) edges: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `num_bins` equal-width bins spanning the smallest and
    /// largest sample. Every bin is half-open except the last, which includes
    /// its right edge. If all samples are equal, the range is widened by 0.5
    /// either side.
    ///
    /// Returns `None` if there are no samples or no bins.
    pub(crate) fn new(samples: &[f64], num_bins: usize) -> Option<Histogram> {
        if samples.is_empty() || num_bins == 0 {
            return None;
        }

        let (mut lo, mut hi) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / num_bins as f64;
        let edges: Vec<f64> = (0..=num_bins)
            .map(|i| {
                if i == num_bins {
                    hi
                } else {
                    lo + width * i as f64
                }
            })
            .collect();

        let mut counts = vec![0.0; num_bins];
        for &s in samples {
            let mut i_bin = (((s - lo) / (hi - lo)) * num_bins as f64) as usize;
            i_bin = i_bin.min(num_bins - 1);
            // Guard against float error putting a sample on the wrong side of
            // an edge.
            if s < edges[i_bin] {
                i_bin -= 1;
            } else if i_bin + 1 < num_bins && s >= edges[i_bin + 1] {
                i_bin += 1;
            }
            counts[i_bin] += 1.0;
        }

        Some(Histogram { counts, edges })
    }

    /// The midpoint of each bin.
    pub(crate) fn centres(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|w| w[0] + (w[1] - w[0]) / 2.0)
            .collect()
    }

    /// The width of the first bin. All bins have the same width, give or take
    /// float error.
    pub(crate) fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }
}

/// Integrate evenly-spaced samples with Simpson's rule.
///
/// With an even number of samples there is one interval left over. Like
/// SciPy's "avg" treatment, this returns the average of (Simpson over the
/// first N-1 samples plus a trapezoid over the last interval) and (a
/// trapezoid over the first interval plus Simpson over the last N-1
/// samples).
pub(crate) fn simpson(y: &[f64], dx: f64) -> f64 {
    let n = y.len();
    if n < 2 {
        return 0.0;
    }

    if n % 2 == 1 {
        basic_simpson(y, dx)
    } else {
        let first = basic_simpson(&y[..n - 1], dx) + 0.5 * dx * (y[n - 2] + y[n - 1]);
        let last = 0.5 * dx * (y[0] + y[1]) + basic_simpson(&y[1..], dx);
        (first + last) / 2.0
    }
}

/// Composite Simpson's rule over an odd number of samples.
fn basic_simpson(y: &[f64], dx: f64) -> f64 {
    y.windows(3)
        .step_by(2)
        .map(|w| dx / 3.0 * (w[0] + 4.0 * w[1] + w[2]))
        .sum()
}
