//! Shared test utilities for rollstat tests.
//!
//! Provides brute-force reference implementations that materialize every
//! window explicitly and compute each statistic from scratch, plus small
//! comparison helpers. The fast streaming implementations are validated
//! against these oracles.

use rollstat::Boundary;

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Slightly looser epsilon for passes that accumulate incremental updates.
#[allow(dead_code)]
pub const MOMENT_EPSILON: f64 = 1e-9;

/// Approximate equality check for floating-point values.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Asserts element-wise approximate equality of two slices.
#[allow(dead_code)]
pub fn assert_vectors_eq(got: &[f64], want: &[f64], eps: f64, desc: &str) {
    assert_eq!(got.len(), want.len(), "{desc}: length");
    for i in 0..got.len() {
        assert!(
            approx_eq(got[i], want[i], eps),
            "{desc}: i={i} got {} want {}",
            got[i],
            want[i]
        );
    }
}

/// Materializes the window centered on sample `idx` under `boundary`.
#[allow(dead_code)]
pub fn build_window(boundary: Boundary, x: &[f64], idx: usize, h: usize, j: usize) -> Vec<f64> {
    let n = x.len() as isize;
    let idx = idx as isize;
    let (lo, hi) = if boundary == Boundary::Truncate {
        ((idx - h as isize).max(0), (idx + j as isize).min(n - 1))
    } else {
        (idx - h as isize, idx + j as isize)
    };

    (lo..=hi)
        .map(|pos| {
            if pos < 0 {
                match boundary {
                    Boundary::PadZero => 0.0,
                    _ => x[0],
                }
            } else if pos >= n {
                match boundary {
                    Boundary::PadZero => 0.0,
                    _ => x[(n - 1) as usize],
                }
            } else {
                x[pos as usize]
            }
        })
        .collect()
}

/// Computes a moving statistic by recomputing `stat` on every materialized
/// window.
#[allow(dead_code)]
pub fn slow_moving(
    boundary: Boundary,
    x: &[f64],
    h: usize,
    j: usize,
    stat: impl Fn(&[f64]) -> f64,
) -> Vec<f64> {
    (0..x.len())
        .map(|i| stat(&build_window(boundary, x, i, h, j)))
        .collect()
}

/// Median by sorting.
#[allow(dead_code)]
pub fn stat_median(window: &[f64]) -> f64 {
    let mut v = window.to_vec();
    v.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        (v[n / 2 - 1] + v[n / 2]) / 2.0
    }
}

#[allow(dead_code)]
pub fn stat_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Sample variance; zero for fewer than two samples.
#[allow(dead_code)]
pub fn stat_variance(window: &[f64]) -> f64 {
    let n = window.len();
    if n < 2 {
        return 0.0;
    }
    let m = stat_mean(window);
    window.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n - 1) as f64
}

#[allow(dead_code)]
pub fn stat_stddev(window: &[f64]) -> f64 {
    stat_variance(window).sqrt()
}

#[allow(dead_code)]
pub fn stat_min(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::INFINITY, f64::min)
}

#[allow(dead_code)]
pub fn stat_max(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[allow(dead_code)]
pub fn stat_sum(window: &[f64]) -> f64 {
    window.iter().sum()
}

/// Raw median absolute deviation.
#[allow(dead_code)]
pub fn stat_mad0(window: &[f64]) -> f64 {
    let med = stat_median(window);
    let devs: Vec<f64> = window.iter().map(|&x| (x - med).abs()).collect();
    stat_median(&devs)
}

/// `S_n`: median over samples of each sample's median absolute difference.
#[allow(dead_code)]
pub fn stat_sn(window: &[f64]) -> f64 {
    let inner: Vec<f64> = window
        .iter()
        .map(|&xj| {
            let diffs: Vec<f64> = window.iter().map(|&xk| (xj - xk).abs()).collect();
            stat_median(&diffs)
        })
        .collect();
    stat_median(&inner)
}

/// Linearly interpolated quantile of unsorted data.
#[allow(dead_code)]
pub fn stat_quantile(window: &[f64], q: f64) -> f64 {
    let mut v = window.to_vec();
    v.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let n = v.len();
    let pos = q * (n - 1) as f64;
    let lhs = pos.floor() as usize;
    if lhs >= n - 1 {
        return v[n - 1];
    }
    let delta = pos - lhs as f64;
    (1.0 - delta) * v[lhs] + delta * v[lhs + 1]
}

/// Quantile range `Q(1-q) - Q(q)`.
#[allow(dead_code)]
pub fn stat_qrange(window: &[f64], q: f64) -> f64 {
    stat_quantile(window, 1.0 - q) - stat_quantile(window, q)
}

/// Deterministic random vector with elements in `[-1, 1]`.
#[allow(dead_code)]
pub fn random_vector(n: usize, seed: u64) -> Vec<f64> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

/// The boundary policies, for exhaustive sweeps.
#[allow(dead_code)]
pub const BOUNDARIES: [Boundary; 3] = [Boundary::PadZero, Boundary::PadEdgeValue, Boundary::Truncate];

/// Window shapes exercised by the randomized sweeps: symmetric, one-sided,
/// lopsided, and longer than typical inputs.
#[allow(dead_code)]
pub const SHAPES: [(usize, usize); 6] = [(3, 3), (0, 5), (5, 0), (10, 5), (5, 10), (1, 1)];
