// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function Φ(x)
///
/// Evaluated through the complementary error function,
/// `Φ(x) = ½·erfc(−x/√2)`, so the lower tail is computed directly instead of
/// as `1 − (something close to 1)`. Saturates to exactly 0 or 1 for very
/// large |x| without producing NaN.
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    0.5 * erf::erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x)
pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

/// `points` evenly spaced samples from `lower` to `upper` inclusive
pub fn linspace(lower: f64, upper: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lower],
        n => {
            let step = (upper - lower) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { upper } else { lower + step * i as f64 })
                .collect()
        }
    }
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
