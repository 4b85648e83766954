//! Synthetic volatility smile and surface
//!
//! A deterministic display model, not a calibration: implied volatility is the
//! base volatility plus a quadratic-plus-linear skew in moneyness, scaled by
//! √(reference / maturity) across maturities.

use ndarray::Array2;

use crate::config::SkewModel;
use crate::core::{TermStructurePoint, VolSurface, VolatilityPoint};

use super::black_scholes::{d1_d2, norm_cdf};

/// ATM vol change per unit of (reference / days - 1)
const TERM_SLOPE: f64 = 0.02;
/// Wing levels quoted on the term structure, relative to ATM
const LOW_STRIKE_FACTOR: f64 = 0.95;
const HIGH_STRIKE_FACTOR: f64 = 1.05;

/// Smile with the default skew model.
///
/// `delta` is the call delta `Φ(d1)` at the point's implied vol, without
/// dividends, whatever the downstream use.
pub fn volatility_smile(spot: f64, strikes: &[f64], time: f64, rate: f64, base_vol: f64) -> Vec<VolatilityPoint> {
    volatility_smile_with_model(spot, strikes, time, rate, base_vol, &SkewModel::default())
}

pub fn volatility_smile_with_model(
    spot: f64,
    strikes: &[f64],
    time: f64,
    rate: f64,
    base_vol: f64,
    model: &SkewModel,
) -> Vec<VolatilityPoint> {
    strikes
        .iter()
        .map(|&strike| {
            let implied_vol = base_vol + model.skew(strike / spot);
            let (d1, _) = d1_d2(spot, strike, rate, 0.0, implied_vol, time);
            VolatilityPoint {
                strike,
                implied_vol,
                delta: norm_cdf(d1),
            }
        })
        .collect()
}

/// Strike × maturity grid; maturities in calendar days.
///
/// Shorter maturities are scaled up by √(reference_days / days).
pub fn volatility_surface(
    spot: f64,
    strikes: &[f64],
    maturities_days: &[f64],
    base_vol: f64,
    model: &SkewModel,
) -> VolSurface {
    let mut vols = Array2::zeros((strikes.len(), maturities_days.len()));

    for (ti, &days) in maturities_days.iter().enumerate() {
        let time_effect = (model.reference_days / days).sqrt();
        for (si, &strike) in strikes.iter().enumerate() {
            vols[[si, ti]] = (base_vol + model.skew(strike / spot)) * time_effect;
        }
    }

    VolSurface {
        spot,
        strikes: strikes.to_vec(),
        maturities: maturities_days.to_vec(),
        vols,
    }
}

/// ATM term structure with 90% / 110% strike wings
pub fn term_structure(base_vol: f64, maturities_days: &[f64], model: &SkewModel) -> Vec<TermStructurePoint> {
    maturities_days
        .iter()
        .map(|&days| {
            let atm_vol = base_vol + (model.reference_days / days - 1.0) * TERM_SLOPE;
            TermStructurePoint {
                days,
                atm_vol,
                low_strike_vol: atm_vol * LOW_STRIKE_FACTOR,
                high_strike_vol: atm_vol * HIGH_STRIKE_FACTOR,
            }
        })
        .collect()
}
