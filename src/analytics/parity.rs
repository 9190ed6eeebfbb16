// src/analytics/parity.rs
//! Put-call parity check
//!
//! For European options on a non-dividend-paying underlying:
//! ```text
//! C - P = S - K·e^(-rT)
//! ```
//!
//! Prices from one Black-Scholes evaluation satisfy this by construction.
//! Against externally supplied prices a non-zero difference points at an
//! arbitrage rather than a bug, and [`ParityCheck::arbitrage`] says which
//! side is rich.

use super::pricer::{MarketParameters, PriceQuote};
use crate::error::{validation::*, OptionResult};
use serde::{Deserialize, Serialize};

/// Default absolute tolerance in price units
pub const DEFAULT_PARITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParityCheck {
    pub left_side: f64,  // C - P
    pub right_side: f64, // S - K·e^(-rT)
    pub difference: f64, // left_side - right_side
}

/// Direction of a parity violation and the trade that locks it in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArbitrageSignal {
    /// C - P above S - K·e^(-rT): sell the call, buy the put, short the
    /// underlying and lend K·e^(-rT)
    CallRich,
    /// C - P below S - K·e^(-rT): buy the call, sell the put, buy the
    /// underlying and borrow K·e^(-rT)
    CallCheap,
}

impl ParityCheck {
    pub fn holds(&self, tolerance: f64) -> bool {
        self.difference.abs() <= tolerance
    }

    pub fn arbitrage(&self, tolerance: f64) -> Option<ArbitrageSignal> {
        if self.holds(tolerance) {
            None
        } else if self.difference > 0.0 {
            Some(ArbitrageSignal::CallRich)
        } else {
            Some(ArbitrageSignal::CallCheap)
        }
    }
}

/// `K·e^(-rT)`, the value today of the strike paid at expiry
pub fn present_value(strike: f64, rate: f64, time: f64) -> f64 {
    strike * (-rate * time).exp()
}

/// Evaluate both sides of put-call parity for the given prices
pub fn check_parity(
    call_price: f64,
    put_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
) -> OptionResult<ParityCheck> {
    validate_non_negative("call_price", call_price)?;
    validate_non_negative("put_price", put_price)?;
    validate_positive("spot", spot)?;
    validate_positive("strike", strike)?;
    validate_finite("rate", rate)?;
    validate_non_negative("time", time)?;

    let left_side = call_price - put_price;
    let right_side = spot - present_value(strike, rate, time);
    Ok(ParityCheck {
        left_side,
        right_side,
        difference: left_side - right_side,
    })
}

/// Parity check of a quote produced for `params` and `strike`
pub fn check_quote_parity(
    quote: &PriceQuote,
    params: &MarketParameters,
    strike: f64,
) -> OptionResult<ParityCheck> {
    check_parity(
        quote.call_price,
        quote.put_price,
        params.spot,
        strike,
        params.rate,
        params.time_to_expiry,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::pricer::price_option;
    use crate::error::OptionError;

    #[test]
    fn test_black_scholes_quote_satisfies_parity() {
        let params = MarketParameters::default();
        let quote = price_option(&params, 100.0).unwrap();
        let check = check_quote_parity(&quote, &params, 100.0).unwrap();
        assert!(check.holds(DEFAULT_PARITY_TOLERANCE), "difference = {}", check.difference);
        assert_eq!(check.arbitrage(DEFAULT_PARITY_TOLERANCE), None);
        assert!((check.right_side - (100.0 - 100.0 * (-0.05f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_market_prices_signal_arbitrage() {
        // Right side: 100 - 100·e^(-0.05) ≈ 4.877
        let rich = check_parity(12.0, 5.0, 100.0, 100.0, 0.05, 1.0).unwrap();
        assert!(rich.difference > 2.0);
        assert_eq!(rich.arbitrage(0.01), Some(ArbitrageSignal::CallRich));

        let cheap = check_parity(9.0, 6.0, 100.0, 100.0, 0.05, 1.0).unwrap();
        assert_eq!(cheap.arbitrage(0.01), Some(ArbitrageSignal::CallCheap));
    }

    #[test]
    fn test_at_expiry_parity_is_payoff_identity() {
        let check = check_parity(15.0, 0.0, 115.0, 100.0, 0.05, 0.0).unwrap();
        assert_eq!(check.difference, 0.0);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let err = check_parity(10.0, 5.0, 100.0, -1.0, 0.05, 1.0).unwrap_err();
        assert!(matches!(err, OptionError::InvalidParameter { ref parameter, .. } if parameter == "strike"));
        assert!(check_parity(10.0, 5.0, 100.0, 100.0, 0.05, -1.0).is_err());
    }
}
