pub mod bs_analytic;
pub mod greeks;
pub mod parity;
pub mod pricer;

pub use greeks::{option_greeks, Greeks, GreeksConfig};
pub use parity::{check_parity, check_quote_parity, present_value, ArbitrageSignal, ParityCheck};
pub use pricer::{
    par_sweep, price_leg, price_option, sweep, time_decay, unit_price, MarketParameters, PriceQuote,
    SweepVariable,
};
