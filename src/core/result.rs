//! Engine outputs
//!
//! Valuation results, payoff rows and profit/loss bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::greeks::Greeks;

/// Result of valuing one option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Theoretical value, floored at 0
    pub price: f64,
    /// Exercise value at the current spot
    pub intrinsic_value: f64,
    /// price - intrinsic, floored at 0
    pub time_value: f64,
    pub greeks: Greeks,
}

impl PricingResult {
    /// Result for an option with no residual optionality
    pub fn intrinsic_only(intrinsic_value: f64) -> Self {
        Self {
            price: intrinsic_value,
            intrinsic_value,
            time_value: 0.0,
            greeks: Greeks::zero(),
        }
    }
}

/// One row of a payoff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffPoint {
    pub underlying_price: f64,
    /// Profit or loss at expiry, net of premium
    pub payoff: f64,
    pub intrinsic_value: f64,
}

/// A profit or loss limit that may be unbounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Bound {
    Bounded(f64),
    Unbounded,
}

impl Bound {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    /// Numeric value, `None` when unbounded
    pub fn value(&self) -> Option<f64> {
        match self {
            Bound::Bounded(v) => Some(*v),
            Bound::Unbounded => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Bounded(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Bound::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// Maximum profit and maximum loss of a single-leg position held to expiry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub max_profit: Bound,
    pub max_loss: Bound,
}
