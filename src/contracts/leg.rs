// src/contracts/leg.rs
use super::payoffs::{OptionKind, Side};
use crate::error::{validation::*, OptionError, OptionResult};
use serde::{Deserialize, Serialize};

/// One option position: a contract kind, its strike and a signed quantity
///
/// Positive quantity is a long (bought) position, negative a short (sold)
/// one; the magnitude scales the payoff. The sign is the only thing that
/// distinguishes long from short anywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLeg")]
pub struct OptionLeg {
    kind: OptionKind,
    strike: f64,
    quantity: f64,
}

#[derive(Deserialize)]
struct RawLeg {
    kind: OptionKind,
    strike: f64,
    quantity: f64,
}

impl TryFrom<RawLeg> for OptionLeg {
    type Error = OptionError;

    fn try_from(raw: RawLeg) -> OptionResult<Self> {
        OptionLeg::new(raw.kind, raw.strike, raw.quantity)
    }
}

impl OptionLeg {
    /// Create a leg, rejecting non-positive strikes and zero quantities
    pub fn new(kind: OptionKind, strike: f64, quantity: f64) -> OptionResult<Self> {
        validate_positive("strike", strike)?;
        validate_non_zero("quantity", quantity)?;
        Ok(OptionLeg {
            kind,
            strike,
            quantity,
        })
    }

    /// One bought contract
    pub fn long(kind: OptionKind, strike: f64) -> OptionResult<Self> {
        Self::new(kind, strike, 1.0)
    }

    /// One sold contract
    pub fn short(kind: OptionKind, strike: f64) -> OptionResult<Self> {
        Self::new(kind, strike, -1.0)
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0.0
    }

    /// Signed payoff of the position at terminal price `price`
    #[inline]
    pub fn payoff_at(&self, price: f64) -> f64 {
        self.quantity * self.kind.payoff_at(self.strike, price)
    }

    /// Signed one-sided payoff limit, see [`OptionKind::payoff_limit`]
    pub fn payoff_limit(&self, price: f64, side: Side) -> f64 {
        self.quantity * self.kind.payoff_limit(self.strike, price, side)
    }
}

/// Position of the current spot relative to the strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

/// Classify `spot` against `strike` for a call-like or put-like contract
pub fn moneyness(kind: OptionKind, spot: f64, strike: f64) -> Moneyness {
    if spot == strike {
        return Moneyness::AtTheMoney;
    }
    let call_in = spot > strike;
    if call_in == kind.is_call_like() {
        Moneyness::InTheMoney
    } else {
        Moneyness::OutOfTheMoney
    }
}

/// Value of exercising immediately at `spot`
pub fn intrinsic_value(kind: OptionKind, spot: f64, strike: f64) -> f64 {
    kind.payoff_at(strike, spot)
}

/// Split of a premium into intrinsic and time value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBreakdown {
    pub intrinsic: f64,
    pub time_value: f64,
    pub premium: f64,
}

/// Decompose `premium` into intrinsic value and the (non-negative) remainder
pub fn value_breakdown(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    premium: f64,
) -> OptionResult<ValueBreakdown> {
    validate_positive("spot", spot)?;
    validate_positive("strike", strike)?;
    validate_non_negative("premium", premium)?;

    let intrinsic = intrinsic_value(kind, spot, strike);
    Ok(ValueBreakdown {
        intrinsic,
        time_value: (premium - intrinsic).max(0.0),
        premium,
    })
}
