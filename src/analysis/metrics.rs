//! Closed-form risk metrics for a single-leg position held to expiry.

use crate::core::{Bound, OptionType, PositionSide, ProfitLoss};

/// Underlying price at which a long position recovers its premium
pub fn break_even(strike: f64, premium: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => strike + premium,
        OptionType::Put => strike - premium,
    }
}

/// Maximum profit and loss. Short calls lose, and long calls gain, without limit.
pub fn max_profit_loss(strike: f64, premium: f64, option_type: OptionType, side: PositionSide) -> ProfitLoss {
    // A put's best case is the underlying going to zero
    let put_extreme = Bound::Bounded(strike - premium);

    match (side, option_type) {
        (PositionSide::Long, OptionType::Call) => ProfitLoss {
            max_profit: Bound::Unbounded,
            max_loss: Bound::Bounded(premium),
        },
        (PositionSide::Long, OptionType::Put) => ProfitLoss {
            max_profit: put_extreme,
            max_loss: Bound::Bounded(premium),
        },
        (PositionSide::Short, OptionType::Call) => ProfitLoss {
            max_profit: Bound::Bounded(premium),
            max_loss: Bound::Unbounded,
        },
        (PositionSide::Short, OptionType::Put) => ProfitLoss {
            max_profit: Bound::Bounded(premium),
            max_loss: put_extreme,
        },
    }
}
