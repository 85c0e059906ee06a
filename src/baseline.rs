//! Noise-floor (baseline) estimation.
//!
//! The baseline is a smooth dB curve fitted to the quiet parts of the
//! log-power spectrum:
//!
//! 1. Sample the 500–2500 Hz fit window at six Chebyshev-of-second-kind
//!    nodes; around each node take the 10th-percentile dB value, which
//!    tracks the noise floor while rejecting signal peaks.
//! 2. Fit a degree-5 polynomial to the six points by least squares, solved
//!    with a column-pivoted Householder QR for numerical stability.
//! 3. Evaluate across the requested bin range (+0.65 dB), extrapolating
//!    flat outside it.

use std::f64::consts::PI;

/// Polynomial degree of the fit.
pub const BASELINE_DEGREE: usize = 5;
/// Percentile sampled per node window.
pub const BASELINE_PERCENTILE: usize = 10;
/// Lower edge of the fit window in Hz.
pub const BASELINE_MIN_HZ: f32 = 500.0;
/// Upper edge of the fit window in Hz.
pub const BASELINE_MAX_HZ: f32 = 2500.0;
/// Constant dB offset added to the fitted curve.
const BASELINE_OFFSET_DB: f32 = 0.65;

const NUM_NODES: usize = BASELINE_DEGREE + 1;

/// Chebyshev-of-second-kind sample nodes on [0, 1].
fn chebyshev_nodes() -> [f64; NUM_NODES] {
    let mut nodes = [0.0f64; NUM_NODES];
    let slice = PI / (2.0 * NUM_NODES as f64);
    for (i, node) in nodes.iter_mut().enumerate() {
        *node = 0.5 * (1.0 - (slice * (2.0 * i as f64 + 1.0)).cos());
    }
    nodes
}

/// Estimate the noise floor of `spectrum` in dB, one value per bin.
///
/// `df` is the bin width in Hz; `[ia, ib]` is the bin range the polynomial
/// is evaluated over (bins outside copy the edge values). An empty spectrum
/// or inverted range yields an all-zero baseline rather than an error.
pub fn compute_baseline(spectrum: &[f32], df: f32, ia: usize, ib: usize, baseline: &mut Vec<f32>) {
    baseline.clear();
    baseline.resize(spectrum.len(), 0.0);
    if spectrum.is_empty() || ia >= ib || ib >= spectrum.len() {
        return;
    }

    let log_spectrum: Vec<f32> =
        spectrum.iter().map(|&p| 10.0 * p.max(1e-10).log10()).collect();

    let bmin = ((BASELINE_MIN_HZ / df) as usize).min(spectrum.len() - 1);
    let bmax = ((BASELINE_MAX_HZ / df) as usize).min(spectrum.len() - 1);
    if bmin >= bmax {
        return;
    }
    let size = bmax - bmin + 1;
    let arm = size / (2 * NUM_NODES);

    // Lower-envelope sample points at the Chebyshev nodes
    let mut xs = [0.0f64; NUM_NODES];
    let mut ys = [0.0f64; NUM_NODES];
    let mut points = 0usize;
    let mut window = Vec::with_capacity(2 * arm + 1);
    for node in chebyshev_nodes() {
        let x = size as f64 * node;
        let base = bmin + x.round() as usize;
        let start = base.saturating_sub(arm).max(bmin);
        let end = (base + arm).min(bmax);
        if start >= end {
            continue;
        }
        window.clear();
        window.extend_from_slice(&log_spectrum[start..end]);
        let rank = (window.len() * BASELINE_PERCENTILE / 100).min(window.len() - 1);
        window.select_nth_unstable_by(rank, |a, b| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        });
        xs[points] = x;
        ys[points] = window[rank] as f64;
        points += 1;
    }
    if points == 0 {
        return;
    }

    let coeffs = fit_polynomial(&xs[..points], &ys[..points]);

    let last = (size - 1) as f64;
    let span = (ib - ia) as f64;
    for i in ia..=ib {
        let x = (i - ia) as f64 * last / span;
        baseline[i] = evaluate(&coeffs, x) as f32 + BASELINE_OFFSET_DB;
    }
    for i in 0..ia {
        baseline[i] = baseline[ia];
    }
    for i in ib + 1..spectrum.len() {
        baseline[i] = baseline[ib];
    }
}

fn evaluate(coeffs: &[f64; NUM_NODES], x: f64) -> f64 {
    // Horner
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Least-squares fit of a degree-5 polynomial through `(xs, ys)`.
///
/// Solves the Vandermonde system `V c = y` via Householder QR with column
/// pivoting. With fewer than six points the trailing coefficients stay zero.
fn fit_polynomial(xs: &[f64], ys: &[f64]) -> [f64; NUM_NODES] {
    let m = xs.len();
    let n = NUM_NODES.min(m);

    // Vandermonde matrix, column-major
    let mut a = vec![0.0f64; m * n];
    for (row, &x) in xs.iter().enumerate() {
        let mut power = 1.0;
        for col in 0..n {
            a[col * m + row] = power;
            power *= x;
        }
    }
    let mut y: Vec<f64> = ys.to_vec();
    let mut perm: Vec<usize> = (0..n).collect();

    // Householder QR with column pivoting
    for k in 0..n {
        // Pivot on the column with the largest remaining norm
        let mut best = k;
        let mut best_norm = 0.0f64;
        for col in k..n {
            let norm: f64 = (k..m).map(|r| a[col * m + r] * a[col * m + r]).sum();
            if norm > best_norm {
                best_norm = norm;
                best = col;
            }
        }
        if best != k {
            for r in 0..m {
                a.swap(best * m + r, k * m + r);
            }
            perm.swap(best, k);
        }
        if best_norm <= f64::EPSILON {
            break;
        }

        // Householder reflector for column k
        let alpha = best_norm.sqrt() * if a[k * m + k] > 0.0 { -1.0 } else { 1.0 };
        let mut v = vec![0.0f64; m - k];
        v[0] = a[k * m + k] - alpha;
        for r in k + 1..m {
            v[r - k] = a[k * m + r];
        }
        let vnorm: f64 = v.iter().map(|x| x * x).sum();
        if vnorm <= f64::EPSILON {
            continue;
        }

        // Apply the reflector to the remaining columns and to y
        for col in k..n {
            let dot: f64 = (k..m).map(|r| v[r - k] * a[col * m + r]).sum();
            let scale = 2.0 * dot / vnorm;
            for r in k..m {
                a[col * m + r] -= scale * v[r - k];
            }
        }
        let dot: f64 = (k..m).map(|r| v[r - k] * y[r]).sum();
        let scale = 2.0 * dot / vnorm;
        for r in k..m {
            y[r] -= scale * v[r - k];
        }
    }

    // Back substitution on the triangular factor
    let mut solution = vec![0.0f64; n];
    for k in (0..n).rev() {
        let mut sum = y[k];
        for col in k + 1..n {
            sum -= a[col * m + k] * solution[col];
        }
        let diag = a[k * m + k];
        solution[k] = if diag.abs() > f64::EPSILON { sum / diag } else { 0.0 };
    }

    let mut coeffs = [0.0f64; NUM_NODES];
    for k in 0..n {
        coeffs[perm[k]] = solution[k];
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_nodes_span_unit_interval() {
        let nodes = chebyshev_nodes();
        assert!(nodes[0] > 0.0 && nodes[0] < 0.05);
        assert!(nodes[5] > 0.95 && nodes[5] < 1.0);
        for pair in nodes.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_fit_recovers_exact_polynomial() {
        // y = 2 - 3x + 0.5x^2 sampled at six points
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|&x| 2.0 - 3.0 * x + 0.5 * x * x).collect();
        let coeffs = fit_polynomial(&xs, &ys);
        assert!((coeffs[0] - 2.0).abs() < 1e-8);
        assert!((coeffs[1] + 3.0).abs() < 1e-8);
        assert!((coeffs[2] - 0.5).abs() < 1e-8);
        for &c in &coeffs[3..] {
            assert!(c.abs() < 1e-8);
        }
    }

    #[test]
    fn test_flat_spectrum_baseline() {
        // Constant 1e-6 power = -60 dB; baseline must sit at -60 + 0.65
        let spectrum = vec![1e-6f32; 2048];
        let df = 2.93;
        let mut baseline = Vec::new();
        compute_baseline(&spectrum, df, 0, 2047, &mut baseline);

        let lo = (500.0 / df) as usize;
        let hi = (2500.0 / df) as usize;
        for i in lo..hi {
            assert!(
                (baseline[i] - (-60.0 + 0.65)).abs() < 0.5,
                "bin {}: {}",
                i,
                baseline[i]
            );
        }
    }

    #[test]
    fn test_narrow_tone_does_not_lift_baseline() {
        let df = 2.93;
        let flat = vec![1e-6f32; 2048];
        let mut spiked = flat.clone();
        let center = (700.0 / df) as usize;
        for i in center - 2..=center + 2 {
            spiked[i] = 1.0;
        }

        let mut base_flat = Vec::new();
        let mut base_spiked = Vec::new();
        compute_baseline(&flat, df, 0, 2047, &mut base_flat);
        compute_baseline(&spiked, df, 0, 2047, &mut base_spiked);

        for i in center - 2..=center + 2 {
            assert!(
                (base_spiked[i] - base_flat[i]).abs() < 1.0,
                "bin {}: {} vs {}",
                i,
                base_spiked[i],
                base_flat[i]
            );
        }
    }

    #[test]
    fn test_degenerate_inputs_give_zero_baseline() {
        let mut baseline = vec![1.0f32; 4];
        compute_baseline(&[], 2.93, 0, 10, &mut baseline);
        assert!(baseline.is_empty());

        let spectrum = vec![1e-6f32; 64];
        compute_baseline(&spectrum, 2.93, 50, 10, &mut baseline);
        assert_eq!(baseline.len(), 64);
        assert!(baseline.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn test_baseline_extrapolates_flat_outside_range() {
        let spectrum = vec![1e-6f32; 2048];
        let mut baseline = Vec::new();
        compute_baseline(&spectrum, 2.93, 100, 1900, &mut baseline);
        for i in 0..100 {
            assert_eq!(baseline[i], baseline[100]);
        }
        for i in 1901..2048 {
            assert_eq!(baseline[i], baseline[1900]);
        }
    }
}
