//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Terminal payoffs of single European contracts with strike K, evaluated at
//! a terminal underlying price S:
//!
//! - **Call**: max(S - K, 0) - right to buy at strike K
//! - **Put**: max(K - S, 0) - right to sell at strike K
//! - **Binary call**: 1 if S > K, else 0
//! - **Binary put**: 1 if S < K, else 0
//!
//! # Boundary Convention
//!
//! Binary payoffs use strict inequalities: at S == K both pay 0. The step is
//! a genuine discontinuity and this is the single convention used everywhere
//! in the crate (payoffs, intrinsic values at expiry, strategy bounds).
//!
//! # Implementation Notes
//!
//! Scalar and elementwise forms share [`OptionKind::payoff_at`], so a price
//! grid gives exactly the values of evaluating each price on its own.

use serde::{Deserialize, Serialize};

/// Supported single-contract payoff types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// European call option: max(S_T - K, 0)
    Call,

    /// European put option: max(K - S_T, 0)
    Put,

    /// Cash-or-nothing call paying 1 when S_T > K
    BinaryCall,

    /// Cash-or-nothing put paying 1 when S_T < K
    BinaryPut,
}

/// Which side of a strike a one-sided limit is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

impl OptionKind {
    /// Payoff of one unit of the contract at terminal price `price`
    #[inline]
    pub fn payoff_at(&self, strike: f64, price: f64) -> f64 {
        match self {
            OptionKind::Call => (price - strike).max(0.0),
            OptionKind::Put => (strike - price).max(0.0),
            OptionKind::BinaryCall => {
                if price > strike {
                    1.0
                } else {
                    0.0
                }
            }
            OptionKind::BinaryPut => {
                if price < strike {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// One-sided limit of the payoff at `price`
    ///
    /// Vanilla payoffs are continuous, so the limit is the payoff itself.
    /// Binary payoffs jump at their strike; approaching from above a binary
    /// call pays 1 and a binary put 0, and the other way round from below.
    pub fn payoff_limit(&self, strike: f64, price: f64, side: Side) -> f64 {
        if price != strike {
            return self.payoff_at(strike, price);
        }
        match (self, side) {
            (OptionKind::BinaryCall, Side::Above) => 1.0,
            (OptionKind::BinaryPut, Side::Below) => 1.0,
            _ => self.payoff_at(strike, price),
        }
    }

    pub fn is_call_like(&self) -> bool {
        matches!(self, OptionKind::Call | OptionKind::BinaryCall)
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, OptionKind::BinaryCall | OptionKind::BinaryPut)
    }
}

/// Payoff of `kind` at a single terminal price
pub fn payoff_at(kind: OptionKind, strike: f64, price: f64) -> f64 {
    kind.payoff_at(strike, price)
}

/// Elementwise payoff of `kind` over a sequence of terminal prices
pub fn payoff(kind: OptionKind, strike: f64, prices: &[f64]) -> Vec<f64> {
    prices.iter().map(|&s| kind.payoff_at(strike, s)).collect()
}

/// Profit of one long contract bought for `premium`: payoff minus premium
pub fn profit(kind: OptionKind, strike: f64, premium: f64, prices: &[f64]) -> Vec<f64> {
    prices
        .iter()
        .map(|&s| kind.payoff_at(strike, s) - premium)
        .collect()
}
