//! Multi-leg option strategies
//!
//! A strategy is a list of legs held to the same expiry. Payoffs and Greeks
//! are the signed sums of the legs.

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, OptionSpec, OptionType, PayoffPoint, PositionSide};
use crate::models::black_scholes;

/// Lower strike of the bull call spread, relative to the reference strike
const SPREAD_LOWER: f64 = 0.9;
/// Upper strike of the bull call spread, relative to the reference strike
const SPREAD_UPPER: f64 = 1.1;
/// Premium of the upper (sold) call relative to the lower call's premium
const SPREAD_UPPER_PREMIUM: f64 = 0.3;

/// One option position inside a strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub option_type: OptionType,
    pub side: PositionSide,
    pub strike: f64,
    /// Premium per contract, always non-negative
    pub premium: f64,
    /// Number of contracts
    pub quantity: f64,
}

impl OptionLeg {
    pub fn new(option_type: OptionType, side: PositionSide, strike: f64, premium: f64) -> Self {
        Self {
            option_type,
            side,
            strike,
            premium,
            quantity: 1.0,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Signed contract count: positive long, negative short
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign() * self.quantity
    }

    pub fn intrinsic_at(&self, price: f64) -> f64 {
        self.option_type.intrinsic(price, self.strike)
    }

    /// Profit or loss at expiry, premium included
    pub fn payoff_at(&self, price: f64) -> f64 {
        self.signed_quantity() * (self.intrinsic_at(price) - self.premium)
    }
}

/// A named set of legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub legs: Vec<OptionLeg>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, legs: Vec<OptionLeg>) -> Self {
        Self {
            name: name.into(),
            legs,
        }
    }

    /// A single call or put
    pub fn single(option_type: OptionType, side: PositionSide, strike: f64, premium: f64) -> Self {
        Self::new(
            format!("{} {}", side.label(), option_type.label()),
            vec![OptionLeg::new(option_type, side, strike, premium)],
        )
    }

    /// Buy the 90% call, sell the 110% call.
    ///
    /// `premium` is paid for the lower call; the upper call is sold for 30% of it.
    pub fn bull_call_spread(strike: f64, premium: f64) -> Self {
        Self::new(
            "Bull Call Spread",
            vec![
                OptionLeg::new(OptionType::Call, PositionSide::Long, strike * SPREAD_LOWER, premium),
                OptionLeg::new(
                    OptionType::Call,
                    PositionSide::Short,
                    strike * SPREAD_UPPER,
                    premium * SPREAD_UPPER_PREMIUM,
                ),
            ],
        )
    }

    /// Buy a call and a put at the same strike, `premium` paid for each
    pub fn long_straddle(strike: f64, premium: f64) -> Self {
        Self::new(
            "Long Straddle",
            vec![
                OptionLeg::new(OptionType::Call, PositionSide::Long, strike, premium),
                OptionLeg::new(OptionType::Put, PositionSide::Long, strike, premium),
            ],
        )
    }

    /// The opposite position: every leg flipped
    pub fn inverted(&self) -> Self {
        let legs = self
            .legs
            .iter()
            .map(|leg| OptionLeg {
                side: leg.side.opposite(),
                ..*leg
            })
            .collect();
        Self::new(format!("Inverted {}", self.name), legs)
    }

    /// Premium paid (positive) or received (negative) to open
    pub fn net_premium(&self) -> f64 {
        self.legs.iter().map(|leg| leg.signed_quantity() * leg.premium).sum()
    }

    pub fn payoff_at(&self, price: f64) -> f64 {
        self.legs.iter().map(|leg| leg.payoff_at(price)).sum()
    }

    /// Signed intrinsic value of all legs
    pub fn intrinsic_at(&self, price: f64) -> f64 {
        self.legs
            .iter()
            .map(|leg| leg.signed_quantity() * leg.intrinsic_at(price))
            .sum()
    }

    pub fn payoff_curve(&self, prices: &[f64]) -> Vec<PayoffPoint> {
        prices
            .iter()
            .map(|&underlying_price| PayoffPoint {
                underlying_price,
                payoff: self.payoff_at(underlying_price),
                intrinsic_value: self.intrinsic_at(underlying_price),
            })
            .collect()
    }

    /// Net Greeks of the position under one set of market inputs
    pub fn greeks(&self, spot: f64, time: f64, vol: f64, rate: f64, div: f64) -> Greeks {
        self.legs.iter().fold(Greeks::zero(), |total, leg| {
            let spec = OptionSpec::new(leg.option_type, spot, leg.strike, time, vol, rate)
                .with_dividend_yield(div);
            total.add(&black_scholes::greeks(&spec).scale(leg.signed_quantity()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_matches_payoff() {
        use crate::analysis::payoff;

        let prices = [80.0, 95.0, 100.0, 110.0, 125.0];
        let strategy = Strategy::single(OptionType::Put, PositionSide::Short, 100.0, 3.0);
        let curve = strategy.payoff_curve(&prices);
        let expected = payoff(&prices, 100.0, 3.0, OptionType::Put, PositionSide::Short);

        for (a, b) in curve.iter().zip(expected.iter()) {
            assert_eq!(a.payoff, b.payoff);
        }
        assert_eq!(strategy.name, "SHORT PUT");
    }

    #[test]
    fn test_bull_call_spread() {
        let spread = Strategy::bull_call_spread(100.0, 10.0);
        // Net debit: 10 paid, 3 received
        assert!((spread.net_premium() - 7.0).abs() < 1e-12);

        // Below both strikes: lose the debit
        assert!((spread.payoff_at(80.0) + 7.0).abs() < 1e-12);
        // Above both strikes: strike width minus debit
        assert!((spread.payoff_at(130.0) - 13.0).abs() < 1e-9);
        // Between strikes
        assert!((spread.payoff_at(100.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_straddle() {
        let straddle = Strategy::long_straddle(100.0, 4.0);
        assert_eq!(straddle.payoff_at(100.0), -8.0);
        assert_eq!(straddle.payoff_at(120.0), 12.0);
        assert_eq!(straddle.payoff_at(80.0), 12.0);
        assert_eq!(straddle.intrinsic_at(90.0), 10.0);
    }

    #[test]
    fn test_inverted() {
        let straddle = Strategy::long_straddle(100.0, 4.0);
        let short = straddle.inverted();
        for price in [70.0, 96.0, 100.0, 108.0, 140.0] {
            assert_eq!(short.payoff_at(price), -straddle.payoff_at(price));
        }
        assert_eq!(short.net_premium(), -8.0);
    }

    #[test]
    fn test_straddle_greeks() {
        let straddle = Strategy::long_straddle(100.0, 4.0);
        let g = straddle.greeks(100.0, 30.0 / 365.0, 0.2, 0.0, 0.0);

        // ATM straddle is close to delta neutral, long gamma and vega
        assert!(g.delta.abs() < 0.1, "straddle delta {}", g.delta);
        assert!(g.gamma > 0.0);
        assert!(g.vega > 0.0);
        assert!(g.theta < 0.0);

        let short = straddle.inverted().greeks(100.0, 30.0 / 365.0, 0.2, 0.0, 0.0);
        assert!((short.gamma + g.gamma).abs() < 1e-12);
    }

    #[test]
    fn test_quantity() {
        let leg = OptionLeg::new(OptionType::Call, PositionSide::Long, 100.0, 2.0).with_quantity(3.0);
        assert_eq!(leg.payoff_at(110.0), 24.0);
        assert_eq!(leg.signed_quantity(), 3.0);
    }
}
