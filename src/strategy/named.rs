// src/strategy/named.rs
//! The six classic strategies as tagged leg lists
//!
//! Each variant only knows how to build its legs and its closed-form
//! metrics; payoff evaluation always goes through [`Strategy`].
//!
//! Premium convention: `net_premium` is the net amount paid to enter the
//! position (negative for a net credit). Break-evens are reported only where
//! profit actually changes sign, so a free or credit-earning debit spread
//! has none.

use super::composer::{Bound, Strategy, StrategyMetrics};
use crate::contracts::{OptionKind, OptionLeg};
use crate::error::{validation::*, OptionError, OptionResult};
use serde::{Deserialize, Serialize};

/// Relative tolerance when checking butterfly wing spacing
const SPACING_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NamedStrategy {
    /// Long call at `lower`, short call at `upper`
    BullCallSpread { lower: f64, upper: f64 },

    /// Long put at `upper`, short put at `lower`
    BearPutSpread { lower: f64, upper: f64 },

    /// Long call and long put at the same strike
    Straddle { strike: f64 },

    /// Long put at `put_strike`, long call at `call_strike`
    Strangle { put_strike: f64, call_strike: f64 },

    /// Long calls at `lower` and `upper`, two short calls at `middle`
    Butterfly { lower: f64, middle: f64, upper: f64 },

    /// Short put at `put_strike`, long call at `call_strike`
    RiskReversal { put_strike: f64, call_strike: f64 },
}

impl NamedStrategy {
    pub fn bull_call_spread(lower: f64, upper: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::BullCallSpread { lower, upper })
    }

    pub fn bear_put_spread(lower: f64, upper: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::BearPutSpread { lower, upper })
    }

    pub fn straddle(strike: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::Straddle { strike })
    }

    pub fn strangle(put_strike: f64, call_strike: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::Strangle {
            put_strike,
            call_strike,
        })
    }

    pub fn butterfly(lower: f64, middle: f64, upper: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::Butterfly {
            lower,
            middle,
            upper,
        })
    }

    pub fn risk_reversal(put_strike: f64, call_strike: f64) -> OptionResult<Self> {
        Self::checked(NamedStrategy::RiskReversal {
            put_strike,
            call_strike,
        })
    }

    fn checked(self) -> OptionResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Strike positivity and ordering
    pub fn validate(&self) -> OptionResult<()> {
        match *self {
            NamedStrategy::BullCallSpread { lower, upper }
            | NamedStrategy::BearPutSpread { lower, upper } => {
                validate_positive("lower", lower)?;
                validate_positive("upper", upper)?;
                validate_ordered("lower", lower, "upper", upper)
            }
            NamedStrategy::Straddle { strike } => validate_positive("strike", strike),
            NamedStrategy::Strangle {
                put_strike,
                call_strike,
            }
            | NamedStrategy::RiskReversal {
                put_strike,
                call_strike,
            } => {
                validate_positive("put_strike", put_strike)?;
                validate_positive("call_strike", call_strike)?;
                validate_ordered("put_strike", put_strike, "call_strike", call_strike)
            }
            NamedStrategy::Butterfly {
                lower,
                middle,
                upper,
            } => {
                validate_positive("lower", lower)?;
                validate_positive("middle", middle)?;
                validate_positive("upper", upper)?;
                validate_ordered("lower", lower, "middle", middle)?;
                validate_ordered("middle", middle, "upper", upper)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedStrategy::BullCallSpread { .. } => "Bull Spread",
            NamedStrategy::BearPutSpread { .. } => "Bear Spread",
            NamedStrategy::Straddle { .. } => "Straddle",
            NamedStrategy::Strangle { .. } => "Strangle",
            NamedStrategy::Butterfly { .. } => "Butterfly Spread",
            NamedStrategy::RiskReversal { .. } => "Risk Reversal",
        }
    }

    /// The `(kind, strike, quantity)` legs of the strategy
    pub fn legs(&self) -> OptionResult<Vec<OptionLeg>> {
        self.validate()?;
        use OptionKind::{Call, Put};
        let legs = match *self {
            NamedStrategy::BullCallSpread { lower, upper } => {
                vec![OptionLeg::long(Call, lower)?, OptionLeg::short(Call, upper)?]
            }
            NamedStrategy::BearPutSpread { lower, upper } => {
                vec![OptionLeg::long(Put, upper)?, OptionLeg::short(Put, lower)?]
            }
            NamedStrategy::Straddle { strike } => {
                vec![OptionLeg::long(Call, strike)?, OptionLeg::long(Put, strike)?]
            }
            NamedStrategy::Strangle {
                put_strike,
                call_strike,
            } => vec![OptionLeg::long(Put, put_strike)?, OptionLeg::long(Call, call_strike)?],
            NamedStrategy::Butterfly {
                lower,
                middle,
                upper,
            } => vec![
                OptionLeg::long(Call, lower)?,
                OptionLeg::new(Call, middle, -2.0)?,
                OptionLeg::long(Call, upper)?,
            ],
            NamedStrategy::RiskReversal {
                put_strike,
                call_strike,
            } => vec![OptionLeg::short(Put, put_strike)?, OptionLeg::long(Call, call_strike)?],
        };
        Ok(legs)
    }

    pub fn strategy(&self) -> OptionResult<Strategy> {
        Strategy::new(self.legs()?)
    }

    /// Closed-form max profit, max loss and break-evens
    ///
    /// Without a premium every premium-dependent value is `None`; only
    /// unlimited upside, which no premium can change, is reported.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for a butterfly whose wings are not equally
    /// spaced; use [`Strategy::metrics`] and a grid scan instead.
    pub fn metrics(&self, net_premium: Option<f64>) -> OptionResult<StrategyMetrics> {
        self.validate()?;
        if let Some(p) = net_premium {
            validate_finite("net_premium", p)?;
        }

        if let NamedStrategy::Butterfly {
            lower,
            middle,
            upper,
        } = *self
        {
            let (left, right) = (middle - lower, upper - middle);
            if (left - right).abs() > SPACING_TOLERANCE * upper {
                return Err(OptionError::UnsupportedOperation {
                    operation: "closed-form butterfly metrics".to_string(),
                    context: format!("wings {} and {} are not equally spaced", left, right),
                });
            }
        }

        let Some(p) = net_premium else {
            return Ok(StrategyMetrics {
                max_profit: self.has_unlimited_upside().then_some(Bound::Unlimited),
                max_loss: None,
                break_evens: None,
            });
        };

        let (max_profit, max_loss, break_evens) = match *self {
            NamedStrategy::BullCallSpread { lower, upper } => {
                let width = upper - lower;
                let be = if p > 0.0 && p < width { vec![lower + p] } else { vec![] };
                (Bound::Limited(width - p), Bound::Limited(p), be)
            }
            NamedStrategy::BearPutSpread { lower, upper } => {
                let width = upper - lower;
                let be = if p > 0.0 && p < width { vec![upper - p] } else { vec![] };
                (Bound::Limited(width - p), Bound::Limited(p), be)
            }
            NamedStrategy::Straddle { strike } => {
                let be = if p > 0.0 { vec![strike - p, strike + p] } else { vec![] };
                (Bound::Unlimited, Bound::Limited(p), be)
            }
            NamedStrategy::Strangle {
                put_strike,
                call_strike,
            } => {
                let be = if p > 0.0 {
                    vec![put_strike - p, call_strike + p]
                } else {
                    vec![]
                };
                (Bound::Unlimited, Bound::Limited(p), be)
            }
            NamedStrategy::Butterfly {
                lower,
                middle,
                upper,
            } => {
                let width = middle - lower;
                let be = if p > 0.0 && p < width {
                    vec![lower + p, upper - p]
                } else {
                    vec![]
                };
                (Bound::Limited(width - p), Bound::Limited(p), be)
            }
            NamedStrategy::RiskReversal {
                put_strike,
                call_strike,
            } => {
                // Debit: profit turns positive above the call strike.
                // Credit: profit turns negative below the put strike.
                let be = if p > 0.0 {
                    vec![call_strike + p]
                } else if p < 0.0 {
                    vec![put_strike + p]
                } else {
                    vec![]
                };
                (Bound::Unlimited, Bound::Limited(put_strike + p), be)
            }
        };

        Ok(StrategyMetrics {
            max_profit: Some(max_profit),
            max_loss: Some(max_loss),
            break_evens: Some(break_evens.into_iter().filter(|&b| b > 0.0).collect()),
        })
    }

    fn has_unlimited_upside(&self) -> bool {
        matches!(
            self,
            NamedStrategy::Straddle { .. } | NamedStrategy::Strangle { .. } | NamedStrategy::RiskReversal { .. }
        )
    }
}

/// Break-even prices of a named strategy; `None` without a premium
pub fn break_even(strategy: &NamedStrategy, net_premium: Option<f64>) -> OptionResult<Option<Vec<f64>>> {
    Ok(strategy.metrics(net_premium)?.break_evens)
}

/// Maximum profit of a named strategy; `None` when it depends on a missing premium
pub fn max_profit(strategy: &NamedStrategy, net_premium: Option<f64>) -> OptionResult<Option<Bound>> {
    Ok(strategy.metrics(net_premium)?.max_profit)
}

/// Maximum loss of a named strategy; `None` without a premium
pub fn max_loss(strategy: &NamedStrategy, net_premium: Option<f64>) -> OptionResult<Option<Bound>> {
    Ok(strategy.metrics(net_premium)?.max_loss)
}
