//! Payoff at expiry for a single option position, and the price axis
//! payoff and sensitivity curves are drawn on.

use crate::config::PayoffConfig;
use crate::core::{OptionType, PayoffPoint, PositionSide};

/// Payoff at expiry for each underlying price
///
/// # Arguments
/// * `prices` - Underlying prices at expiry
/// * `strike` - Option strike
/// * `premium` - Premium paid (long) or received (short)
/// * `option_type` - Call or put
/// * `side` - Long or short
///
/// # Returns
/// One point per input price, in input order
pub fn payoff(
    prices: &[f64],
    strike: f64,
    premium: f64,
    option_type: OptionType,
    side: PositionSide,
) -> Vec<PayoffPoint> {
    prices
        .iter()
        .map(|&underlying_price| {
            let intrinsic_value = option_type.intrinsic(underlying_price, strike);
            let payoff = match side {
                PositionSide::Long => intrinsic_value - premium,
                PositionSide::Short => premium - intrinsic_value,
            };
            PayoffPoint {
                underlying_price,
                payoff,
                intrinsic_value,
            }
        })
        .collect()
}

/// `steps + 1` evenly spaced prices from `strike·(1 − range)` to
/// `strike·(1 + range)`, both ends included.
///
/// With `steps == 0` only the lower end is returned.
pub fn price_range(strike: f64, range: f64, steps: usize) -> Vec<f64> {
    let min = strike * (1.0 - range);
    let max = strike * (1.0 + range);

    if steps == 0 {
        return vec![min];
    }

    let step = (max - min) / steps as f64;
    (0..=steps)
        .map(|i| if i == steps { max } else { min + step * i as f64 })
        .collect()
}

/// ±30% of strike in 50 steps
pub fn default_price_range(strike: f64) -> Vec<f64> {
    price_range_with_config(strike, &PayoffConfig::default())
}

pub fn price_range_with_config(strike: f64, config: &PayoffConfig) -> Vec<f64> {
    price_range(strike, config.range, config.steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_call_payoff() {
        let points = payoff(&[80.0, 100.0, 105.0, 120.0], 100.0, 5.0, OptionType::Call, PositionSide::Long);

        let payoffs: Vec<f64> = points.iter().map(|p| p.payoff).collect();
        assert_eq!(payoffs, vec![-5.0, -5.0, 0.0, 15.0]);
        assert_eq!(points[3].intrinsic_value, 20.0);
        assert_eq!(points[0].underlying_price, 80.0);
    }

    #[test]
    fn test_short_put_payoff() {
        let points = payoff(&[80.0, 100.0, 120.0], 100.0, 4.0, OptionType::Put, PositionSide::Short);

        let payoffs: Vec<f64> = points.iter().map(|p| p.payoff).collect();
        assert_eq!(payoffs, vec![-16.0, 4.0, 4.0]);
        assert_eq!(points[0].intrinsic_value, 20.0);
    }

    #[test]
    fn test_long_and_short_mirror() {
        let prices = default_price_range(50.0);
        let long = payoff(&prices, 50.0, 2.5, OptionType::Put, PositionSide::Long);
        let short = payoff(&prices, 50.0, 2.5, OptionType::Put, PositionSide::Short);

        for (l, s) in long.iter().zip(short.iter()) {
            assert_eq!(l.payoff, -s.payoff);
            assert_eq!(l.intrinsic_value, s.intrinsic_value);
        }
    }

    #[test]
    fn test_price_range() {
        let prices = price_range(100.0, 0.3, 50);

        assert_eq!(prices.len(), 51);
        assert!((prices[0] - 70.0).abs() < 1e-9);
        assert!((prices[50] - 130.0).abs() < 1e-9);
        assert!((prices[25] - 100.0).abs() < 1e-9);
        assert!(prices.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_price_range_edges() {
        assert_eq!(price_range(100.0, 0.3, 0).len(), 1);
        assert!(payoff(&[], 100.0, 1.0, OptionType::Call, PositionSide::Long).is_empty());

        let wide = price_range_with_config(100.0, &PayoffConfig { range: 0.4, steps: 60 });
        assert_eq!(wide.len(), 61);
        assert!((wide[60] - 140.0).abs() < 1e-9);
    }
}
