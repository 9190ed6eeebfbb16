// src/analytics/pricer.rs
//! Checked Black-Scholes pricing
//!
//! Every entry point validates its inputs and fails fast with
//! [`OptionError::InvalidParameter`] naming the offending field. Two cases
//! get explicit treatment:
//!
//! - **At expiry** (`time_to_expiry == 0`): the closed form is bypassed and
//!   prices are intrinsic payoffs. Delta becomes a step at the strike with
//!   the convention `call_delta = 0.5`, `put_delta = -0.5` exactly at
//!   `S == K`, which keeps `call_delta - put_delta == 1` everywhere.
//! - **Zero volatility before expiry**: rejected, since `d₁` would divide
//!   by zero.
//!
//! Tiny but non-zero `σ√T` pushes `|d₁|` far into the tails; the normal CDF
//! saturates to 0 or 1 there, so prices converge to discounted intrinsic
//! values instead of overflowing.

use super::bs_analytic;
use crate::contracts::{OptionKind, OptionLeg};
use crate::error::{validation::*, OptionError, OptionResult};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Day count used to turn calendar days into years (ACT/365)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// |d₁| beyond which Φ is 0 or 1 to double precision
const SATURATION_THRESHOLD: f64 = 38.0;

/// Shared pricing context for one scenario evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    pub spot: f64,           // Current underlying price
    pub rate: f64,           // Continuously compounded risk-free rate
    pub volatility: f64,     // Annualised volatility of log-returns
    pub time_to_expiry: f64, // Years remaining; 0 means at expiry
}

impl MarketParameters {
    pub fn new(spot: f64, rate: f64, volatility: f64, time_to_expiry: f64) -> OptionResult<Self> {
        let params = MarketParameters {
            spot,
            rate,
            volatility,
            time_to_expiry,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build parameters from calendar dates using ACT/365
    pub fn from_dates(
        spot: f64,
        rate: f64,
        volatility: f64,
        valuation: NaiveDate,
        expiry: NaiveDate,
    ) -> OptionResult<Self> {
        let days = (expiry - valuation).num_days() as f64;
        if days < 0.0 {
            return Err(OptionError::InvalidParameter {
                parameter: "expiry".to_string(),
                value: days,
                constraint: format!("must not precede the valuation date {}", valuation),
            });
        }
        Self::new(spot, rate, volatility, days / DAYS_PER_YEAR)
    }

    /// Validate the pricing context
    pub fn validate(&self) -> OptionResult<()> {
        validate_positive("spot", self.spot)?;
        validate_finite("rate", self.rate)?;
        validate_non_negative("time_to_expiry", self.time_to_expiry)?;

        if self.time_to_expiry > 0.0 {
            validate_positive("volatility", self.volatility)?;
        } else {
            // Volatility plays no role at expiry, but garbage is still rejected
            validate_non_negative("volatility", self.volatility)?;
        }

        if !(0.0..1.0).contains(&self.rate) {
            tracing::warn!(rate = self.rate, "risk-free rate outside the conventional [0, 1) range");
        }

        Ok(())
    }

    pub fn with_spot(self, spot: f64) -> Self {
        MarketParameters { spot, ..self }
    }

    pub fn with_rate(self, rate: f64) -> Self {
        MarketParameters { rate, ..self }
    }

    pub fn with_volatility(self, volatility: f64) -> Self {
        MarketParameters { volatility, ..self }
    }

    pub fn with_time_to_expiry(self, time_to_expiry: f64) -> Self {
        MarketParameters {
            time_to_expiry,
            ..self
        }
    }

    pub fn with_days_to_expiry(self, days: f64) -> Self {
        self.with_time_to_expiry(days / DAYS_PER_YEAR)
    }

    pub fn is_at_expiry(&self) -> bool {
        self.time_to_expiry == 0.0
    }

    /// `e^(-rT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }

    /// Present value of a cash amount paid at expiry, `K·e^(-rT)`
    pub fn present_value(&self, amount: f64) -> f64 {
        amount * self.discount_factor()
    }
}

impl Default for MarketParameters {
    fn default() -> Self {
        MarketParameters {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
            time_to_expiry: 1.0,
        }
    }
}

/// Call and put prices with their deltas from one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64, // In [0, 1]
    pub put_delta: f64,  // In [-1, 0]
}

impl PriceQuote {
    /// Intrinsic quote at expiry with the 0.5 delta convention at the strike
    fn at_expiry(spot: f64, strike: f64) -> Self {
        let call_delta = if spot > strike {
            1.0
        } else if spot < strike {
            0.0
        } else {
            0.5
        };
        PriceQuote {
            call_price: (spot - strike).max(0.0),
            put_price: (strike - spot).max(0.0),
            call_delta,
            put_delta: call_delta - 1.0,
        }
    }

    /// Price of the vanilla `kind`; binary kinds are not part of a quote
    pub fn price_of(&self, kind: OptionKind) -> Option<f64> {
        match kind {
            OptionKind::Call => Some(self.call_price),
            OptionKind::Put => Some(self.put_price),
            OptionKind::BinaryCall | OptionKind::BinaryPut => None,
        }
    }
}

/// Theoretical European call/put prices and deltas
///
/// # Errors
///
/// - `InvalidParameter` for non-positive spot or strike, negative time,
///   non-positive volatility before expiry, non-finite rate
/// - `NumericalInstability` if the closed form still yields a non-finite
///   value (only reachable through overflowing inputs such as `e^(-rT)`)
pub fn price_option(params: &MarketParameters, strike: f64) -> OptionResult<PriceQuote> {
    params.validate()?;
    validate_positive("strike", strike)?;

    let MarketParameters {
        spot: s,
        rate: r,
        volatility: sigma,
        time_to_expiry: t,
    } = *params;

    if params.is_at_expiry() {
        tracing::debug!(spot = s, strike, "at expiry, using intrinsic values");
        return Ok(PriceQuote::at_expiry(s, strike));
    }

    let (d1, _) = bs_analytic::d1_d2(s, strike, r, sigma, t);
    if d1.abs() > SATURATION_THRESHOLD {
        tracing::trace!(d1, "normal CDF saturated");
    }

    // Cancellation in the far tails can leave a price a few ulps below zero
    let call_delta = bs_analytic::bs_call_delta(s, strike, r, sigma, t);
    let quote = PriceQuote {
        call_price: floor_at_zero(bs_analytic::bs_call_price(s, strike, r, sigma, t)),
        put_price: floor_at_zero(bs_analytic::bs_put_price(s, strike, r, sigma, t)),
        call_delta,
        put_delta: call_delta - 1.0,
    };

    ensure_finite("price_option", &quote)?;
    Ok(quote)
}

/// Clamp negatives to 0 but let NaN through to [`ensure_finite`]
fn floor_at_zero(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

fn ensure_finite(method: &str, quote: &PriceQuote) -> OptionResult<()> {
    let fields = [
        ("call_price", quote.call_price),
        ("put_price", quote.put_price),
        ("call_delta", quote.call_delta),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(OptionError::NumericalInstability {
                method: method.to_string(),
                reason: format!("{} evaluated to {}", name, value),
            });
        }
    }
    Ok(())
}

/// Model value of one unit of any contract kind
///
/// Digitals are cash-or-nothing options paying 1. At expiry every kind is
/// worth its payoff, with the same strict-inequality convention.
pub fn unit_price(params: &MarketParameters, kind: OptionKind, strike: f64) -> OptionResult<f64> {
    params.validate()?;
    validate_positive("strike", strike)?;

    if params.is_at_expiry() {
        return Ok(kind.payoff_at(strike, params.spot));
    }

    let MarketParameters {
        spot: s,
        rate: r,
        volatility: sigma,
        time_to_expiry: t,
    } = *params;

    let value = match kind {
        OptionKind::Call => floor_at_zero(bs_analytic::bs_call_price(s, strike, r, sigma, t)),
        OptionKind::Put => floor_at_zero(bs_analytic::bs_put_price(s, strike, r, sigma, t)),
        OptionKind::BinaryCall => bs_analytic::bs_binary_call_price(s, strike, r, sigma, t),
        OptionKind::BinaryPut => bs_analytic::bs_binary_put_price(s, strike, r, sigma, t),
    };

    if !value.is_finite() {
        return Err(OptionError::NumericalInstability {
            method: "unit_price".to_string(),
            reason: format!("{:?} value evaluated to {}", kind, value),
        });
    }
    Ok(value)
}

/// Signed model value of a position (quantity × unit price)
pub fn price_leg(params: &MarketParameters, leg: &OptionLeg) -> OptionResult<f64> {
    Ok(leg.quantity() * unit_price(params, leg.kind(), leg.strike())?)
}

/// The pricing input varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepVariable {
    Spot,
    Strike,
    Volatility,
    Time,
    Rate,
}

impl SweepVariable {
    /// Parameters and strike with this variable replaced by `value`
    fn apply(&self, params: &MarketParameters, strike: f64, value: f64) -> (MarketParameters, f64) {
        match self {
            SweepVariable::Spot => (params.with_spot(value), strike),
            SweepVariable::Strike => (*params, value),
            SweepVariable::Volatility => (params.with_volatility(value), strike),
            SweepVariable::Time => (params.with_time_to_expiry(value), strike),
            SweepVariable::Rate => (params.with_rate(value), strike),
        }
    }
}

/// Price along one varying input with the others held fixed
///
/// Returns quotes aligned with `values`. The fixed value of the swept field
/// in `params`/`strike` is ignored. Fails on the first invalid value.
pub fn sweep(
    params: &MarketParameters,
    strike: f64,
    variable: SweepVariable,
    values: &[f64],
) -> OptionResult<Vec<PriceQuote>> {
    tracing::debug!(?variable, points = values.len(), "pricing sweep");
    values
        .iter()
        .map(|&v| {
            let (p, k) = variable.apply(params, strike, v);
            price_option(&p, k)
        })
        .collect()
}

/// Parallel [`sweep`]; output order and values are identical
pub fn par_sweep(
    params: &MarketParameters,
    strike: f64,
    variable: SweepVariable,
    values: &[f64],
) -> OptionResult<Vec<PriceQuote>> {
    tracing::debug!(?variable, points = values.len(), "parallel pricing sweep");
    values
        .par_iter()
        .map(|&v| {
            let (p, k) = variable.apply(params, strike, v);
            price_option(&p, k)
        })
        .collect()
}

/// Quotes as expiry approaches, sampled at `days` calendar days left
pub fn time_decay(params: &MarketParameters, strike: f64, days: &[f64]) -> OptionResult<Vec<PriceQuote>> {
    let years: Vec<f64> = days.iter().map(|d| d / DAYS_PER_YEAR).collect();
    sweep(params, strike, SweepVariable::Time, &years)
}
