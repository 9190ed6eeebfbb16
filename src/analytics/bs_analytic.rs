// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! These are the raw kernels: they assume `s, k, sigma, t > 0` and perform
//! no validation. [`crate::analytics::pricer`] is the checked entry point.

use crate::math_utils::{norm_cdf, norm_pdf};

/// Standardised moneyness terms of the Black-Scholes formula
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
#[inline]
pub fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
/// - `t`: Time to expiration
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Black-Scholes Delta (∂V/∂S) for European call
///
/// # Formula
/// ```text
/// Δ = ∂C/∂S = Φ(d₁)
/// ```
///
/// The put delta is `Φ(d₁) - 1`, so the two always differ by exactly one.
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_cdf(d1)
}

/// Black-Scholes Gamma (∂²V/∂S²), identical for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn bs_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Black-Scholes Vega (∂V/∂σ), identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
///
/// Units: price change per unit (not per percentage point) of volatility.
pub fn bs_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Black-Scholes Theta (∂V/∂t) for European call, per year
///
/// # Formula
/// ```text
/// Θ = -S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)
/// ```
pub fn bs_call_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    (-s * norm_pdf(d1) * sigma) / (2.0 * t.sqrt()) - r * k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes Theta for European put, per year
///
/// # Formula
/// ```text
/// Θ = -S*φ(d₁)*σ/(2√T) + r*K*e^(-rT)*Φ(-d₂)
/// ```
pub fn bs_put_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    (-s * norm_pdf(d1) * sigma) / (2.0 * t.sqrt()) + r * k * (-r * t).exp() * norm_cdf(-d2)
}

/// Black-Scholes Rho (∂V/∂r) for European call
///
/// # Formula
/// ```text
/// ρ = K * T * e^(-rT) * Φ(d₂)
/// ```
pub fn bs_call_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    k * t * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes Rho for European put
///
/// # Formula
/// ```text
/// ρ = -K * T * e^(-rT) * Φ(-d₂)
/// ```
pub fn bs_put_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    -k * t * (-r * t).exp() * norm_cdf(-d2)
}

/// Cash-or-nothing call paying 1 if S_T > K: `e^(-rT) * Φ(d₂)`
pub fn bs_binary_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    (-r * t).exp() * norm_cdf(d2)
}

/// Cash-or-nothing put paying 1 if S_T < K: `e^(-rT) * Φ(-d₂)`
pub fn bs_binary_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    (-r * t).exp() * norm_cdf(-d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: f64 = 100.0;
    const K: f64 = 100.0;
    const R: f64 = 0.05;
    const SIGMA: f64 = 0.2;
    const T: f64 = 1.0;

    #[test]
    fn test_textbook_call_and_put() {
        assert!((bs_call_price(S, K, R, SIGMA, T) - 10.450_583_572_185_565).abs() < 1e-9);
        assert!((bs_put_price(S, K, R, SIGMA, T) - 5.573_526_022_256_971).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_and_vega() {
        assert!((bs_gamma(S, K, R, SIGMA, T) - 0.018_762_017_345_847).abs() < 1e-9);
        assert!((bs_vega(S, K, R, SIGMA, T) - 37.524_034_691_693_79).abs() < 1e-8);
    }

    #[test]
    fn test_theta_put_call_relation() {
        // Θ_call - Θ_put = -r K e^(-rT)
        let diff = bs_call_theta(S, K, R, SIGMA, T) - bs_put_theta(S, K, R, SIGMA, T);
        assert!((diff + R * K * (-R * T).exp()).abs() < 1e-10);
        assert!((bs_call_theta(S, K, R, SIGMA, T) + 6.414_027_546_438_197).abs() < 1e-8);
    }

    #[test]
    fn test_rho_put_call_relation() {
        // ρ_call - ρ_put = K T e^(-rT)
        let diff = bs_call_rho(S, K, R, SIGMA, T) - bs_put_rho(S, K, R, SIGMA, T);
        assert!((diff - K * T * (-R * T).exp()).abs() < 1e-10);
    }

    #[test]
    fn test_binaries_sum_to_discount_factor() {
        let sum = bs_binary_call_price(S, K, R, SIGMA, T) + bs_binary_put_price(S, K, R, SIGMA, T);
        assert!((sum - (-R * T).exp()).abs() < 1e-12);
    }
}
