// src/strategy/composer.rs
//! Net payoff of weighted option legs
//!
//! # Composition
//!
//! ```text
//! payoff(S) = Σ quantity_i * payoff_i(S, K_i)
//! ```
//!
//! Short legs are simply negative quantities; no leg is ever special-cased.
//!
//! # Exact Bounds
//!
//! A strategy payoff is piecewise linear in S (binary legs add jumps at
//! their strikes). Over terminal prices `[0, ∞)` its extrema are therefore
//! attained at S = 0, at a strike (approached from either side), or at
//! infinity, where the slope equals the net call quantity.

use crate::analytics::pricer::{price_leg, MarketParameters};
use crate::contracts::{OptionKind, OptionLeg, Side};
use crate::error::{validation::*, OptionError, OptionResult};
use serde::{Deserialize, Serialize};

/// Extremum of a strategy's payoff or profit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    Limited(f64),
    Unlimited,
}

impl Bound {
    pub fn value(&self) -> Option<f64> {
        match self {
            Bound::Limited(v) => Some(*v),
            Bound::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Bound::Unlimited)
    }

    fn shift(self, delta: f64) -> Bound {
        match self {
            Bound::Limited(v) => Bound::Limited(v + delta),
            Bound::Unlimited => Bound::Unlimited,
        }
    }
}

/// Strategy-level scalars; `None` marks a value that needs a premium that
/// was not supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    pub max_profit: Option<Bound>,
    pub max_loss: Option<Bound>, // Positive magnitude of the worst outcome
    pub break_evens: Option<Vec<f64>>,
}

/// Strategy evaluated over a price grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffProfile {
    pub prices: Vec<f64>,
    pub values: Vec<f64>, // Payoff, or profit when a premium was given
    pub max_value: f64,
    pub min_value: f64,
    pub break_evens: Option<Vec<f64>>,
}

/// An ordered, non-empty collection of legs evaluated together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionLeg>", into = "Vec<OptionLeg>")]
pub struct Strategy {
    legs: Vec<OptionLeg>,
}

impl TryFrom<Vec<OptionLeg>> for Strategy {
    type Error = OptionError;

    fn try_from(legs: Vec<OptionLeg>) -> OptionResult<Self> {
        Strategy::new(legs)
    }
}

impl From<Strategy> for Vec<OptionLeg> {
    fn from(strategy: Strategy) -> Self {
        strategy.legs
    }
}

impl Strategy {
    pub fn new(legs: Vec<OptionLeg>) -> OptionResult<Self> {
        if legs.is_empty() {
            return Err(OptionError::InvalidParameter {
                parameter: "legs".to_string(),
                value: 0.0,
                constraint: "strategy needs at least one leg".to_string(),
            });
        }
        Ok(Strategy { legs })
    }

    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Net payoff at a single terminal price
    pub fn payoff_at(&self, price: f64) -> f64 {
        self.legs.iter().map(|leg| leg.payoff_at(price)).sum()
    }

    /// Net payoff over a sequence of terminal prices
    pub fn payoff(&self, prices: &[f64]) -> Vec<f64> {
        prices.iter().map(|&s| self.payoff_at(s)).collect()
    }

    /// Net payoff minus the net premium paid (negative premium = credit)
    pub fn profit(&self, prices: &[f64], net_premium: f64) -> Vec<f64> {
        prices.iter().map(|&s| self.payoff_at(s) - net_premium).collect()
    }

    /// Net call quantity: the payoff slope as the price goes to infinity
    pub fn upside_slope(&self) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.kind() == OptionKind::Call)
            .map(|leg| leg.quantity())
            .sum()
    }

    /// Payoff values at every candidate extremum on `[0, ∞)`
    fn candidate_values(&self) -> Vec<f64> {
        let mut values = vec![self.payoff_at(0.0)];
        for leg in &self.legs {
            let k = leg.strike();
            for side in [Side::Below, Side::Above] {
                values.push(self.legs.iter().map(|l| l.payoff_limit(k, side)).sum());
            }
        }
        values
    }

    /// Supremum of the payoff over all terminal prices
    pub fn max_payoff(&self) -> Bound {
        if self.upside_slope() > 0.0 {
            return Bound::Unlimited;
        }
        Bound::Limited(self.candidate_values().into_iter().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Infimum of the payoff over all terminal prices
    pub fn min_payoff(&self) -> Bound {
        if self.upside_slope() < 0.0 {
            return Bound::Unlimited;
        }
        Bound::Limited(self.candidate_values().into_iter().fold(f64::INFINITY, f64::min))
    }

    /// Generic metrics from the exact payoff bounds
    ///
    /// Break-evens are left to [`Strategy::profile`] (grid scan) or to the
    /// closed forms of [`crate::strategy::named::NamedStrategy`].
    pub fn metrics(&self, net_premium: Option<f64>) -> OptionResult<StrategyMetrics> {
        let max_payoff = self.max_payoff();
        let min_payoff = self.min_payoff();

        let Some(p) = net_premium else {
            return Ok(StrategyMetrics {
                max_profit: max_payoff.is_unlimited().then_some(Bound::Unlimited),
                max_loss: min_payoff.is_unlimited().then_some(Bound::Unlimited),
                break_evens: None,
            });
        };
        validate_finite("net_premium", p)?;

        let max_loss = match min_payoff {
            Bound::Limited(v) => Bound::Limited(p - v),
            Bound::Unlimited => Bound::Unlimited,
        };
        Ok(StrategyMetrics {
            max_profit: Some(max_payoff.shift(-p)),
            max_loss: Some(max_loss),
            break_evens: None,
        })
    }

    /// Evaluate payoff (or profit, given a premium) over a price grid
    pub fn profile(&self, prices: &[f64], net_premium: Option<f64>) -> OptionResult<PayoffProfile> {
        validate_strictly_increasing("prices", prices)?;
        if let Some(p) = net_premium {
            validate_finite("net_premium", p)?;
        }

        let values = self.profit(prices, net_premium.unwrap_or(0.0));
        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
        let break_evens = match net_premium {
            Some(_) => Some(break_even_crossings(prices, &values)?),
            None => None,
        };

        Ok(PayoffProfile {
            prices: prices.to_vec(),
            values,
            max_value,
            min_value,
            break_evens,
        })
    }

    /// Model value of the whole position (signed sum of leg prices)
    pub fn theoretical_value(&self, params: &MarketParameters) -> OptionResult<f64> {
        self.legs.iter().map(|leg| price_leg(params, leg)).sum()
    }
}

/// Net payoff of `legs` over `prices`
pub fn strategy_payoff(legs: &[OptionLeg], prices: &[f64]) -> OptionResult<Vec<f64>> {
    Ok(Strategy::new(legs.to_vec())?.payoff(prices))
}

/// Prices where a sampled curve changes sign
///
/// `prices` must be strictly increasing and aligned with `values`. A sign
/// change between adjacent samples is located by linear interpolation. A
/// run of exact zeros between opposite signs reports its first price.
/// Touching zero without crossing is not a break-even.
pub fn break_even_crossings(prices: &[f64], values: &[f64]) -> OptionResult<Vec<f64>> {
    validate_strictly_increasing("prices", prices)?;
    validate_same_len("values", prices.len(), values.len())?;

    let mut crossings = Vec::new();
    // Last non-zero sample and the first zero seen after it
    let mut last: Option<usize> = None;
    let mut first_zero: Option<usize> = None;

    for (i, &v) in values.iter().enumerate() {
        if v == 0.0 {
            if last.is_some() && first_zero.is_none() {
                first_zero = Some(i);
            }
            continue;
        }
        if let Some(j) = last {
            if values[j].signum() != v.signum() {
                let root = match first_zero {
                    Some(z) => prices[z],
                    None => {
                        let (x0, x1, y0, y1) = (prices[j], prices[i], values[j], v);
                        x0 - y0 * (x1 - x0) / (y1 - y0)
                    }
                };
                crossings.push(root);
            }
        }
        last = Some(i);
        first_zero = None;
    }

    Ok(crossings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(kind: OptionKind, strike: f64, quantity: f64) -> OptionLeg {
        OptionLeg::new(kind, strike, quantity).unwrap()
    }

    #[test]
    fn test_empty_strategy_rejected() {
        let err = Strategy::new(vec![]).unwrap_err();
        assert!(matches!(err, OptionError::InvalidParameter { ref parameter, .. } if parameter == "legs"));
        assert!(strategy_payoff(&[], &[100.0]).is_err());
    }

    #[test]
    fn test_quantity_scales_payoff() {
        let legs = [leg(OptionKind::Call, 100.0, 1.0), leg(OptionKind::Call, 100.0, -3.0)];
        let curve = strategy_payoff(&legs, &[90.0, 110.0]).unwrap();
        assert_eq!(curve, vec![0.0, -20.0]);
    }

    #[test]
    fn test_bounds_for_covered_range() {
        // Short put spread: bounded both ways
        let s = Strategy::new(vec![leg(OptionKind::Put, 100.0, -1.0), leg(OptionKind::Put, 90.0, 1.0)]).unwrap();
        assert_eq!(s.max_payoff(), Bound::Limited(0.0));
        assert_eq!(s.min_payoff(), Bound::Limited(-10.0));

        let naked_call = Strategy::new(vec![leg(OptionKind::Call, 100.0, -1.0)]).unwrap();
        assert_eq!(naked_call.min_payoff(), Bound::Unlimited);
        assert_eq!(naked_call.max_payoff(), Bound::Limited(0.0));
    }

    #[test]
    fn test_binary_bounds_use_one_sided_limits() {
        // Long binary call minus short binary put at the same strike: jumps from -1 to +1
        let s = Strategy::new(vec![leg(OptionKind::BinaryCall, 100.0, 1.0), leg(OptionKind::BinaryPut, 100.0, -1.0)])
            .unwrap();
        assert_eq!(s.max_payoff(), Bound::Limited(1.0));
        assert_eq!(s.min_payoff(), Bound::Limited(-1.0));
        assert_eq!(s.payoff_at(100.0), 0.0);
    }

    #[test]
    fn test_metrics_without_premium_omit_premium_values() {
        let s = Strategy::new(vec![leg(OptionKind::Call, 90.0, 1.0), leg(OptionKind::Call, 110.0, -1.0)]).unwrap();
        let m = s.metrics(None).unwrap();
        assert_eq!(m.max_profit, None);
        assert_eq!(m.max_loss, None);
        assert_eq!(m.break_evens, None);

        let straddle = Strategy::new(vec![leg(OptionKind::Call, 100.0, 1.0), leg(OptionKind::Put, 100.0, 1.0)]).unwrap();
        assert_eq!(straddle.metrics(None).unwrap().max_profit, Some(Bound::Unlimited));
    }

    #[test]
    fn test_metrics_with_premium() {
        let s = Strategy::new(vec![leg(OptionKind::Call, 90.0, 1.0), leg(OptionKind::Call, 110.0, -1.0)]).unwrap();
        let m = s.metrics(Some(8.0)).unwrap();
        assert_eq!(m.max_profit, Some(Bound::Limited(12.0)));
        assert_eq!(m.max_loss, Some(Bound::Limited(8.0)));
    }

    #[test]
    fn test_break_even_interpolation() {
        let prices = [90.0, 100.0, 110.0];
        let values = [-5.0, -5.0, 5.0];
        assert_eq!(break_even_crossings(&prices, &values).unwrap(), vec![105.0]);
    }

    #[test]
    fn test_break_even_zero_runs() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        // Crossing through a zero run reports the first zero
        assert_eq!(break_even_crossings(&prices, &[-1.0, 0.0, 0.0, 1.0, 2.0]).unwrap(), vec![2.0]);
        // Touching zero is not a crossing
        assert!(break_even_crossings(&prices, &[1.0, 0.0, 1.0, 2.0, 3.0]).unwrap().is_empty());
        // Leading zeros are not a crossing either
        assert!(break_even_crossings(&prices, &[0.0, 0.0, 1.0, 2.0, 3.0]).unwrap().is_empty());
    }

    #[test]
    fn test_break_even_rejects_bad_grids() {
        assert!(break_even_crossings(&[2.0, 1.0], &[1.0, -1.0]).is_err());
        assert!(break_even_crossings(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_profile_with_and_without_premium() {
        let s = Strategy::new(vec![leg(OptionKind::Call, 100.0, 1.0)]).unwrap();
        let prices: Vec<f64> = (0..=20).map(|i| 90.0 + i as f64).collect();

        let payoff_only = s.profile(&prices, None).unwrap();
        assert_eq!(payoff_only.break_evens, None);
        assert_eq!(payoff_only.min_value, 0.0);
        assert_eq!(payoff_only.max_value, 10.0);

        let with_premium = s.profile(&prices, Some(4.5)).unwrap();
        let be = with_premium.break_evens.unwrap();
        assert_eq!(be.len(), 1);
        assert!((be[0] - 104.5).abs() < 1e-12);
    }

    #[test]
    fn test_theoretical_value_of_spread() {
        let params = MarketParameters::default();
        let s = Strategy::new(vec![leg(OptionKind::Call, 90.0, 1.0), leg(OptionKind::Call, 110.0, -1.0)]).unwrap();
        let value = s.theoretical_value(&params).unwrap();
        assert!(value > 0.0 && value < 20.0 * params.discount_factor());
    }

    #[test]
    fn test_strategy_serde_rejects_empty() {
        assert!(serde_json::from_str::<Strategy>("[]").is_err());
        let s: Strategy = serde_json::from_str(r#"[{"kind":"Call","strike":100.0,"quantity":1.0}]"#).unwrap();
        assert_eq!(s.legs().len(), 1);
    }
}
