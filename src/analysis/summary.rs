//! Statistics read off a payoff curve: extremes, break-evens and the
//! reward/risk ratio shown next to the payoff chart.

use serde::{Deserialize, Serialize};

use crate::core::PayoffPoint;

/// Summary of a payoff curve over the sampled price range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    /// Best payoff on the curve
    pub max_payoff: f64,
    /// Worst payoff on the curve
    pub min_payoff: f64,
    /// Underlying prices where the payoff crosses zero, ascending
    pub break_evens: Vec<f64>,
    /// max_payoff / |min_payoff| when there is both a gain and a loss
    pub reward_risk: Option<f64>,
}

impl PayoffSummary {
    /// Scan a curve sampled on an increasing price axis.
    ///
    /// Break-evens are exact zeros plus linearly interpolated sign changes
    /// between neighbouring samples. Returns `None` for an empty curve.
    pub fn from_curve(curve: &[PayoffPoint]) -> Option<Self> {
        let first = curve.first()?;

        let (max_payoff, min_payoff) = curve.iter().fold((first.payoff, first.payoff), |(hi, lo), p| {
            (hi.max(p.payoff), lo.min(p.payoff))
        });

        let mut break_evens: Vec<f64> = Vec::new();
        if first.payoff == 0.0 {
            break_evens.push(first.underlying_price);
        }
        for w in curve.windows(2) {
            let (a, b) = (&w[0], &w[1]);
            if b.payoff == 0.0 {
                break_evens.push(b.underlying_price);
            } else if a.payoff != 0.0 && (a.payoff < 0.0) != (b.payoff < 0.0) {
                let frac = a.payoff / (a.payoff - b.payoff);
                break_evens.push(a.underlying_price + frac * (b.underlying_price - a.underlying_price));
            }
        }

        let reward_risk = if max_payoff > 0.0 && min_payoff < 0.0 {
            Some(max_payoff / min_payoff.abs())
        } else {
            None
        };

        Some(Self {
            max_payoff,
            min_payoff,
            break_evens,
            reward_risk,
        })
    }
}
