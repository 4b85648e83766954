//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing with continuous dividend yield
//! - Closed-form Greeks (theta per day, vega and rho per 1%)
//! - Implied volatility solver (Newton-Raphson, clamped, best effort)
//!
//! Every function here is total over IEEE-754 inputs: degenerate inputs such
//! as a zero spot or strike propagate NaN/∞ instead of failing. Use
//! [`price_checked`] when inputs come from an untrusted source.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::core::{EngineResult, Greeks, OptionSpec, OptionType, PricingResult, DAYS_PER_YEAR};

// Abramowitz & Stegun 7.1.26 coefficients for erf, |error| < 1.5e-7
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Standard normal CDF (rational approximation)
pub fn norm_cdf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / SQRT_2;

    let t = 1.0 / (1.0 + P * z);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let erf = 1.0 - poly * (-z * z).exp();

    0.5 * (1.0 + sign * erf)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 and d2
pub fn d1_d2(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate - div + 0.5 * vol * vol) * time) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Value a European option and its Greeks.
///
/// At or past expiry, or with zero volatility, the option is worth its
/// intrinsic value and carries no sensitivities.
pub fn price(spec: &OptionSpec) -> PricingResult {
    let OptionSpec {
        option_type,
        spot,
        strike,
        time_to_maturity: time,
        volatility: vol,
        risk_free_rate: rate,
        dividend_yield: div,
    } = *spec;

    let intrinsic = option_type.intrinsic(spot, strike);
    if time <= 0.0 || vol <= 0.0 {
        return PricingResult::intrinsic_only(intrinsic);
    }

    let (d1, d2) = d1_d2(spot, strike, rate, div, vol, time);
    let sqrt_t = time.sqrt();
    let df = (-rate * time).exp();
    let div_factor = (-div * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let (value, delta, carry, rho) = match option_type {
        OptionType::Call => {
            let nd1 = norm_cdf(d1);
            let nd2 = norm_cdf(d2);
            (
                spot * div_factor * nd1 - strike * df * nd2,
                div_factor * nd1,
                -rate * strike * df * nd2 + div * spot * div_factor * nd1,
                strike * time * df * nd2 / 100.0,
            )
        }
        OptionType::Put => {
            let n_neg_d1 = norm_cdf(-d1);
            let n_neg_d2 = norm_cdf(-d2);
            (
                strike * df * n_neg_d2 - spot * div_factor * n_neg_d1,
                -div_factor * n_neg_d1,
                rate * strike * df * n_neg_d2 - div * spot * div_factor * n_neg_d1,
                -strike * time * df * n_neg_d2 / 100.0,
            )
        }
    };

    // Same for call and put
    let gamma = div_factor * pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * div_factor * pdf_d1 * sqrt_t / 100.0;

    let theta_annual = -spot * div_factor * pdf_d1 * vol / (2.0 * sqrt_t) + carry;
    let theta = theta_annual / DAYS_PER_YEAR;

    PricingResult {
        price: value.max(0.0),
        intrinsic_value: intrinsic,
        time_value: (value - intrinsic).max(0.0),
        greeks: Greeks::new(delta, gamma, theta, vega, rho),
    }
}

/// Greeks only
pub fn greeks(spec: &OptionSpec) -> Greeks {
    price(spec).greeks
}

/// Validate inputs, then price.
pub fn price_checked(spec: &OptionSpec) -> EngineResult<PricingResult> {
    spec.validate()?;
    Ok(price(spec))
}

/// Outcome of an implied volatility search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvSolution {
    /// Last volatility estimate
    pub volatility: f64,
    /// Pricing evaluations performed inside the loop
    pub iterations: usize,
    /// Whether the price error dropped below tolerance
    pub converged: bool,
    /// Model price minus market price at `volatility`
    pub residual: f64,
}

impl IvSolution {
    /// No volatility exists for NaN inputs
    fn undefined(iterations: usize, residual: f64) -> Self {
        Self {
            volatility: f64::NAN,
            iterations,
            converged: false,
            residual,
        }
    }
}

/// Implied volatility with the default solver settings and zero dividend yield.
///
/// Best effort: if the iteration does not converge the last estimate is
/// returned as is. Re-price and check the residual when that matters.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    option_type: OptionType,
) -> f64 {
    let spec = OptionSpec::new(option_type, spot, strike, time, SolverConfig::default().initial_guess, rate);
    implied_volatility_with_config(market_price, &spec, &SolverConfig::default()).volatility
}

/// Newton-Raphson search for the volatility reproducing `market_price`.
///
/// The volatility field of `spec` is ignored; the search starts at
/// `config.initial_guess` and every update is clamped to
/// `[config.min_vol, config.max_vol]`. A zero vega stops the search.
pub fn implied_volatility_with_config(
    market_price: f64,
    spec: &OptionSpec,
    config: &SolverConfig,
) -> IvSolution {
    let mut vol = config.initial_guess;

    for iteration in 1..=config.max_iterations {
        let result = price(&spec.with_volatility(vol));
        let diff = result.price - market_price;

        // NaN never reaches the clamp, which would turn it into min_vol
        if diff.is_nan() {
            return IvSolution::undefined(iteration, diff);
        }

        if diff.abs() < config.tolerance {
            return IvSolution {
                volatility: vol,
                iterations: iteration,
                converged: true,
                residual: diff,
            };
        }

        // Back to per-unit vol for the Newton step
        let vega = result.greeks.vega * 100.0;
        if vega == 0.0 {
            tracing::debug!(
                "IV search stopped on zero vega at vol {:.4} (price error {:.6})",
                vol,
                diff
            );
            return IvSolution {
                volatility: vol,
                iterations: iteration,
                converged: false,
                residual: diff,
            };
        }

        let next = vol - diff / vega;
        if next.is_nan() {
            return IvSolution::undefined(iteration, diff);
        }
        vol = next.max(config.min_vol).min(config.max_vol);
    }

    let residual = price(&spec.with_volatility(vol)).price - market_price;
    tracing::debug!(
        "IV search did not converge after {} iterations: vol {:.4}, price error {:.6}",
        config.max_iterations,
        vol,
        residual
    );

    IvSolution {
        volatility: vol,
        iterations: config.max_iterations,
        converged: false,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Normal};

    fn atm_call() -> OptionSpec {
        OptionSpec::new(OptionType::Call, 100.0, 100.0, 30.0 / 365.0, 0.30, 0.105)
    }

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-8);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_error_bound() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = -8.0;
        while x <= 8.0 {
            let err = (norm_cdf(x) - normal.cdf(x)).abs();
            assert!(err < 1.5e-7, "cdf error {} at x = {}", err, x);
            x += 0.01;
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert!((norm_pdf(0.0) - 0.398_942_280_4).abs() < 1e-9);
        assert!((norm_pdf(1.5) - norm_pdf(-1.5)).abs() < 1e-15);
    }

    #[test]
    fn test_bs_price() {
        // ATM call, 20% vol, 1 year, 5% rate: textbook value 10.4506
        let spec = OptionSpec::new(OptionType::Call, 100.0, 100.0, 1.0, 0.20, 0.05);
        let call = price(&spec);
        assert!((call.price - 10.4506).abs() < 1e-3);

        let put = price(&spec.with_option_type(OptionType::Put));
        assert!((put.price - 5.5735).abs() < 1e-3);
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let call_spec = OptionSpec::new(OptionType::Call, 500.0, 505.0, 0.25, 0.20, 0.05)
            .with_dividend_yield(0.01);
        let call = price(&call_spec).price;
        let put = price(&call_spec.with_option_type(OptionType::Put)).price;

        let rhs = 500.0 * (-0.01_f64 * 0.25).exp() - 505.0 * (-0.05_f64 * 0.25).exp();
        assert!((call - put - rhs).abs() < 1e-6);
    }

    #[test]
    fn test_atm_scenario() {
        let result = price(&atm_call());
        let g = result.greeks;

        assert!(result.price > 0.0);
        assert!(g.delta > 0.5 && g.delta < 0.65, "delta {}", g.delta);
        assert!(g.gamma > 0.0);
        assert!(g.theta < 0.0);
        assert!(g.vega > 0.0);
        assert!(g.rho > 0.0);

        // ATM: all value is time value
        assert_eq!(result.intrinsic_value, 0.0);
        assert!((result.price - result.time_value).abs() < 1e-12);
    }

    #[test]
    fn test_put_greeks() {
        let put = price(&atm_call().with_option_type(OptionType::Put));
        let call = price(&atm_call());

        assert!(put.greeks.delta < 0.0 && put.greeks.delta > -0.5);
        assert!(put.greeks.rho < 0.0);
        assert_eq!(put.greeks.gamma, call.greeks.gamma);
        assert_eq!(put.greeks.vega, call.greeks.vega);

        // Without dividends, call delta - put delta = 1 (up to CDF error)
        assert!((call.greeks.delta - put.greeks.delta - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_greek_units() {
        // Vega per 1 vol point ~ finite difference over 0.01 of vol
        let spec = atm_call();
        let up = price(&spec.with_volatility(0.305)).price;
        let down = price(&spec.with_volatility(0.295)).price;
        let fd_vega = up - down;
        assert!((fd_vega - greeks(&spec).vega).abs() < 1e-4);

        // Theta per day ~ one day of decay
        let mut later = spec;
        later.time_to_maturity -= 1.0 / 365.0;
        let decay = price(&later).price - price(&spec).price;
        assert!((decay - greeks(&spec).theta).abs() < 5e-3);
    }

    #[test]
    fn test_intrinsic_branch() {
        let expired = OptionSpec::new(OptionType::Call, 110.0, 100.0, 0.0, 0.30, 0.05);
        let r = price(&expired);
        assert_eq!(r.price, 10.0);
        assert_eq!(r.intrinsic_value, 10.0);
        assert_eq!(r.time_value, 0.0);
        assert!(r.greeks.is_zero());

        let zero_vol = OptionSpec::new(OptionType::Put, 90.0, 100.0, 0.5, 0.0, 0.05);
        let r = price(&zero_vol);
        assert_eq!(r.price, 10.0);
        assert!(r.greeks.is_zero());

        let mut negative_time = expired.with_spot(90.0);
        negative_time.time_to_maturity = -0.1;
        assert_eq!(price(&negative_time).price, 0.0);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let r = price(&atm_call().with_spot(0.0));
        assert!(!r.greeks.gamma.is_finite());
        assert!(r.price >= 0.0);
    }

    #[test]
    fn test_price_checked() {
        assert!(price_checked(&atm_call()).is_ok());
        assert!(price_checked(&atm_call().with_spot(-1.0)).is_err());
        assert!(price_checked(&atm_call().with_volatility(-0.2)).is_err());
    }

    #[test]
    fn test_implied_vol() {
        let spec = OptionSpec::new(OptionType::Call, 100.0, 100.0, 0.5, 0.25, 0.05);
        let market_price = price(&spec).price;

        let iv = implied_volatility(market_price, 100.0, 100.0, 0.5, 0.05, OptionType::Call);
        assert!((iv - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_iv_otm_put() {
        let spec = OptionSpec::new(OptionType::Put, 100.0, 90.0, 0.25, 0.30, 0.05);
        let market_price = price(&spec).price;

        let solution = implied_volatility_with_config(market_price, &spec, &SolverConfig::default());
        assert!(solution.converged);
        assert!(solution.residual.abs() < 1e-4);
        assert!((solution.volatility - 0.30).abs() < 1e-3);
    }

    #[test]
    fn test_iv_precise_config() {
        let spec = OptionSpec::new(OptionType::Call, 100.0, 110.0, 0.5, 0.42, 0.03)
            .with_dividend_yield(0.02);
        let market_price = price(&spec).price;

        let config = SolverConfig {
            tolerance: 1e-10,
            ..Default::default()
        };
        let solution = implied_volatility_with_config(market_price, &spec, &config);
        assert!(solution.converged);
        assert!((solution.volatility - 0.42).abs() < 1e-6);
    }

    #[test]
    fn test_iv_zero_vega_stops() {
        // Far OTM, one day left: vega underflows to exactly zero
        let spec = OptionSpec::new(OptionType::Call, 100.0, 300.0, 1.0 / 365.0, 0.3, 0.05);
        let solution = implied_volatility_with_config(1.0, &spec, &SolverConfig::default());

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
        assert_eq!(solution.volatility, 0.3);
    }

    #[test]
    fn test_iv_unreachable_price_clamps() {
        // A call can never be worth more than the spot
        let spec = OptionSpec::new(OptionType::Call, 100.0, 100.0, 1.0, 0.3, 0.05);
        let solution = implied_volatility_with_config(150.0, &spec, &SolverConfig::default());

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 100);
        assert_eq!(solution.volatility, 5.0);
        assert!(solution.residual < 0.0);

        let iv = implied_volatility(150.0, 100.0, 100.0, 1.0, 0.05, OptionType::Call);
        assert_eq!(iv, 5.0);
    }

    #[test]
    fn test_iv_nan_input_propagates() {
        let iv = implied_volatility(f64::NAN, 100.0, 100.0, 0.5, 0.05, OptionType::Call);
        assert!(iv.is_nan());

        let spec = OptionSpec::new(OptionType::Put, f64::NAN, 100.0, 0.5, 0.3, 0.05);
        let solution = implied_volatility_with_config(5.0, &spec, &SolverConfig::default());
        assert!(solution.volatility.is_nan());
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn test_deep_itm_put_below_intrinsic() {
        // European put worth less than exercise value: time value floors at zero
        let spec = OptionSpec::new(OptionType::Put, 50.0, 100.0, 1.0, 0.2, 0.10);
        let result = price(&spec);

        assert_eq!(result.intrinsic_value, 50.0);
        assert!((result.price - 40.4895).abs() < 1e-3);
        assert!(result.price < result.intrinsic_value);
        assert_eq!(result.time_value, 0.0);
    }
}
