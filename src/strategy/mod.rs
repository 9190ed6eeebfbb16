pub mod composer;
pub mod named;

pub use composer::{break_even_crossings, strategy_payoff, Bound, PayoffProfile, Strategy, StrategyMetrics};
pub use named::{break_even, max_loss, max_profit, NamedStrategy};
