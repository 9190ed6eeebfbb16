pub mod leg;
pub mod payoffs;

pub use leg::{intrinsic_value, moneyness, value_breakdown, Moneyness, OptionLeg, ValueBreakdown};
pub use payoffs::{payoff, payoff_at, profit, OptionKind, Side};
