// src/analytics/greeks.rs
use super::bs_analytic;
use super::pricer::MarketParameters;
use crate::contracts::OptionKind;
use crate::error::{validation::*, OptionError, OptionResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Selects which sensitivities [`option_greeks`] fills in
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksConfig: u32 {
        const NONE  = 0;
        const DELTA = 1 << 0;
        const GAMMA = 1 << 1;
        const VEGA  = 1 << 2;
        const THETA = 1 << 3;
        const RHO   = 1 << 4;
    }
}

/// Sensitivities of one vanilla contract; unrequested entries are `None`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
    pub theta: Option<f64>, // Per year
    pub rho: Option<f64>,
}

/// Black-Scholes Greeks for a European call or put
///
/// At expiry delta follows the same step convention as
/// [`crate::analytics::pricer::price_option`] (0.5 / -0.5 at the strike) and
/// the other sensitivities are 0. Binary kinds are rejected.
pub fn option_greeks(
    params: &MarketParameters,
    strike: f64,
    kind: OptionKind,
    config: GreeksConfig,
) -> OptionResult<Greeks> {
    params.validate()?;
    validate_positive("strike", strike)?;

    let is_call = match kind {
        OptionKind::Call => true,
        OptionKind::Put => false,
        OptionKind::BinaryCall | OptionKind::BinaryPut => {
            return Err(OptionError::UnsupportedOperation {
                operation: "option_greeks".to_string(),
                context: format!("{:?} has no closed-form Greeks in this engine", kind),
            })
        }
    };

    let MarketParameters {
        spot: s,
        rate: r,
        volatility: sigma,
        time_to_expiry: t,
    } = *params;
    let mut greeks = Greeks::default();

    if params.is_at_expiry() {
        let call_delta = if s > strike {
            1.0
        } else if s < strike {
            0.0
        } else {
            0.5
        };
        let pick = |flag: GreeksConfig, value: f64| config.contains(flag).then_some(value);
        greeks.delta = pick(GreeksConfig::DELTA, if is_call { call_delta } else { call_delta - 1.0 });
        greeks.gamma = pick(GreeksConfig::GAMMA, 0.0);
        greeks.vega = pick(GreeksConfig::VEGA, 0.0);
        greeks.theta = pick(GreeksConfig::THETA, 0.0);
        greeks.rho = pick(GreeksConfig::RHO, 0.0);
        return Ok(greeks);
    }

    if config.contains(GreeksConfig::DELTA) {
        let call_delta = bs_analytic::bs_call_delta(s, strike, r, sigma, t);
        greeks.delta = Some(if is_call { call_delta } else { call_delta - 1.0 });
    }
    if config.contains(GreeksConfig::GAMMA) {
        greeks.gamma = Some(bs_analytic::bs_gamma(s, strike, r, sigma, t));
    }
    if config.contains(GreeksConfig::VEGA) {
        greeks.vega = Some(bs_analytic::bs_vega(s, strike, r, sigma, t));
    }
    if config.contains(GreeksConfig::THETA) {
        greeks.theta = Some(if is_call {
            bs_analytic::bs_call_theta(s, strike, r, sigma, t)
        } else {
            bs_analytic::bs_put_theta(s, strike, r, sigma, t)
        });
    }
    if config.contains(GreeksConfig::RHO) {
        greeks.rho = Some(if is_call {
            bs_analytic::bs_call_rho(s, strike, r, sigma, t)
        } else {
            bs_analytic::bs_put_rho(s, strike, r, sigma, t)
        });
    }

    Ok(greeks)
}
