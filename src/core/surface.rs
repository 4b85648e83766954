//! Volatility Surface
//!
//! Smile rows, surface cells and a strike × maturity grid with bilinear
//! interpolation. Maturities on the grid are calendar days.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One point of a volatility smile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub strike: f64,
    pub implied_vol: f64,
    /// Call-style delta at `implied_vol`
    pub delta: f64,
}

/// One cell of a volatility surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub strike: f64,
    /// Maturity in calendar days
    pub days: f64,
    /// K/S
    pub moneyness: f64,
    pub implied_vol: f64,
}

/// ATM volatility and wing levels for one maturity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermStructurePoint {
    pub days: f64,
    pub atm_vol: f64,
    /// Vol at the 90% strike
    pub low_strike_vol: f64,
    /// Vol at the 110% strike
    pub high_strike_vol: f64,
}

/// Volatility grid: `vols[[strike_index, maturity_index]]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolSurface {
    /// Reference spot price
    pub spot: f64,
    /// Strikes, ascending
    pub strikes: Vec<f64>,
    /// Maturities in days, ascending
    pub maturities: Vec<f64>,
    pub vols: Array2<f64>,
}

impl VolSurface {
    /// Build a surface from axes and a matching grid.
    ///
    /// Returns `None` if the grid shape does not match the axes.
    pub fn from_grid(spot: f64, strikes: Vec<f64>, maturities: Vec<f64>, vols: Array2<f64>) -> Option<Self> {
        if vols.dim() != (strikes.len(), maturities.len()) {
            return None;
        }
        Some(Self {
            spot,
            strikes,
            maturities,
            vols,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty() || self.maturities.is_empty()
    }

    /// Flatten into cells, maturity-major (all strikes of the first maturity first)
    pub fn points(&self) -> Vec<SurfacePoint> {
        let mut points = Vec::with_capacity(self.strikes.len() * self.maturities.len());
        for (ti, &days) in self.maturities.iter().enumerate() {
            for (si, &strike) in self.strikes.iter().enumerate() {
                points.push(SurfacePoint {
                    strike,
                    days,
                    moneyness: strike / self.spot,
                    implied_vol: self.vols[[si, ti]],
                });
            }
        }
        points
    }

    /// Interpolate volatility at (strike, days), clamping outside the grid
    pub fn interpolate(&self, strike: f64, days: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let (si_lo, si_hi, s_frac) = find_bracket(&self.strikes, strike)?;
        let (ti_lo, ti_hi, t_frac) = find_bracket(&self.maturities, days)?;

        let v00 = self.vols[[si_lo, ti_lo]];
        let v10 = self.vols[[si_hi, ti_lo]];
        let v01 = self.vols[[si_lo, ti_hi]];
        let v11 = self.vols[[si_hi, ti_hi]];

        let v0 = v00 * (1.0 - s_frac) + v10 * s_frac;
        let v1 = v01 * (1.0 - s_frac) + v11 * s_frac;

        Some(v0 * (1.0 - t_frac) + v1 * t_frac)
    }

    /// Smile across all grid strikes at a maturity
    pub fn smile_at(&self, days: f64) -> Option<Vec<(f64, f64)>> {
        if self.is_empty() {
            return None;
        }
        self.strikes
            .iter()
            .map(|&k| self.interpolate(k, days).map(|v| (k, v)))
            .collect()
    }

    /// ATM volatility for every grid maturity
    pub fn atm_term_structure(&self) -> Vec<(f64, f64)> {
        self.maturities
            .iter()
            .filter_map(|&d| self.interpolate(self.spot, d).map(|v| (d, v)))
            .collect()
    }
}

/// Bracketing indices and interpolation fraction on an ascending axis
fn find_bracket(axis: &[f64], value: f64) -> Option<(usize, usize, f64)> {
    if axis.is_empty() || value.is_nan() {
        return None;
    }

    let last = axis.len() - 1;
    if value <= axis[0] {
        return Some((0, 0, 0.0));
    }
    if value >= axis[last] {
        return Some((last, last, 0.0));
    }

    axis.windows(2).enumerate().find_map(|(i, w)| {
        if value >= w[0] && value <= w[1] {
            Some((i, i + 1, (value - w[0]) / (w[1] - w[0])))
        } else {
            None
        }
    })
}
