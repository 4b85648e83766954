//! Greek sensitivity sweeps
//!
//! Re-prices a base spec across underlying prices, for both calls and puts,
//! to draw delta/gamma/theta/vega/rho against spot.

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, OptionSpec, OptionType};
use crate::models::black_scholes;

/// Which Greek to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreekKind {
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl GreekKind {
    pub const ALL: [GreekKind; 5] = [
        GreekKind::Delta,
        GreekKind::Gamma,
        GreekKind::Theta,
        GreekKind::Vega,
        GreekKind::Rho,
    ];

    pub fn of(&self, greeks: &Greeks) -> f64 {
        match self {
            GreekKind::Delta => greeks.delta,
            GreekKind::Gamma => greeks.gamma,
            GreekKind::Theta => greeks.theta,
            GreekKind::Vega => greeks.vega,
            GreekKind::Rho => greeks.rho,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GreekKind::Delta => "Delta",
            GreekKind::Gamma => "Gamma",
            GreekKind::Theta => "Theta",
            GreekKind::Vega => "Vega",
            GreekKind::Rho => "Rho",
        }
    }
}

/// Call and put Greeks at one underlying price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekProfilePoint {
    pub underlying_price: f64,
    pub call: Greeks,
    pub put: Greeks,
}

/// One Greek for call and put at one underlying price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub underlying_price: f64,
    pub call: f64,
    pub put: f64,
}

/// Full Greeks of a call and a put at each price. The option type of `base`
/// is ignored; everything else is held fixed while spot moves.
pub fn greek_profile(base: &OptionSpec, prices: &[f64]) -> Vec<GreekProfilePoint> {
    prices
        .iter()
        .map(|&underlying_price| {
            let spec = base.with_spot(underlying_price);
            GreekProfilePoint {
                underlying_price,
                call: black_scholes::greeks(&spec.with_option_type(OptionType::Call)),
                put: black_scholes::greeks(&spec.with_option_type(OptionType::Put)),
            }
        })
        .collect()
}

pub fn greek_sensitivity(base: &OptionSpec, prices: &[f64], greek: GreekKind) -> Vec<SensitivityPoint> {
    greek_profile(base, prices)
        .into_iter()
        .map(|p| SensitivityPoint {
            underlying_price: p.underlying_price,
            call: greek.of(&p.call),
            put: greek.of(&p.put),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::price_range;

    fn base() -> OptionSpec {
        OptionSpec::from_market_inputs(OptionType::Call, 100.0, 100.0, 30.0, 30.0, 10.5)
    }

    #[test]
    fn test_delta_sweep() {
        let prices = price_range(100.0, 0.3, 40);
        let sweep = greek_sensitivity(&base(), &prices, GreekKind::Delta);

        assert_eq!(sweep.len(), 41);
        for w in sweep.windows(2) {
            // Delta rises with spot for both kinds
            assert!(w[1].call >= w[0].call);
            assert!(w[1].put >= w[0].put);
        }
        for p in &sweep {
            assert!((0.0..=1.0).contains(&p.call));
            assert!((-1.0..=0.0).contains(&p.put));
        }
    }

    #[test]
    fn test_shared_greeks() {
        let prices = price_range(100.0, 0.3, 10);
        for p in greek_profile(&base(), &prices) {
            assert_eq!(p.call.gamma, p.put.gamma);
            assert_eq!(p.call.vega, p.put.vega);
        }
    }

    #[test]
    fn test_gamma_peaks_near_strike() {
        let prices = price_range(100.0, 0.3, 60);
        let sweep = greek_sensitivity(&base(), &prices, GreekKind::Gamma);
        let peak = sweep
            .iter()
            .max_by(|a, b| a.call.partial_cmp(&b.call).unwrap())
            .unwrap();
        assert!((peak.underlying_price - 100.0).abs() <= 3.0);
    }

    #[test]
    fn test_greek_kind() {
        let g = Greeks::new(0.1, 0.2, 0.3, 0.4, 0.5);
        let values: Vec<f64> = GreekKind::ALL.iter().map(|k| k.of(&g)).collect();
        assert_eq!(values, vec![0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(GreekKind::Theta.label(), "Theta");
    }
}
