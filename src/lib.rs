//! # option-payoffs: Payoff, Strategy and Black-Scholes Engine
//!
//! A small, stateless numerical library for exploring how European option
//! contracts and combinations of them behave: terminal payoffs, profit after
//! premium, theoretical prices before expiry and their response to spot,
//! strike, volatility, rate and time.
//!
//! ## Key Features
//!
//! - **Payoffs**: calls, puts and cash-or-nothing binaries, scalar or over a grid
//! - **Strategies**: any weighted leg list, plus bull/bear spreads, straddle,
//!   strangle, butterfly and risk reversal with closed-form metrics
//! - **Pricing**: checked Black-Scholes quotes, sweeps over one input, Greeks
//! - **Parity**: put-call parity check with arbitrage direction
//!
//! ## Quick Start
//!
//! ```rust
//! use option_payoffs::analytics::{check_quote_parity, price_option, MarketParameters};
//! use option_payoffs::strategy::NamedStrategy;
//!
//! let params = MarketParameters::new(100.0, 0.05, 0.2, 1.0).expect("valid parameters");
//! let quote = price_option(&params, 100.0).expect("valid strike");
//! assert!((quote.call_price - 10.45).abs() < 0.01);
//!
//! let parity = check_quote_parity(&quote, &params, 100.0).expect("valid inputs");
//! assert!(parity.holds(1e-6));
//!
//! let bull = NamedStrategy::bull_call_spread(90.0, 110.0).expect("ordered strikes");
//! let payoff = bull.strategy().expect("legs").payoff(&[80.0, 100.0, 120.0]);
//! assert_eq!(payoff, vec![0.0, 10.0, 20.0]);
//! ```
//!
//! Every function takes its inputs explicitly; nothing reads global state,
//! so all of them can be called concurrently.

pub mod analytics;
pub mod config;
pub mod contracts;
pub mod error;
pub mod math_utils;
pub mod output;
pub mod strategy;

// Re-export commonly used types for convenience
pub use analytics::{check_parity, price_option, MarketParameters, ParityCheck, PriceQuote};
pub use config::{EngineConfig, GridConfig};
pub use contracts::{payoff, OptionKind, OptionLeg};
pub use error::{OptionError, OptionResult};
pub use strategy::{strategy_payoff, NamedStrategy, Strategy};
