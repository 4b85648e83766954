//! Engine configuration
//!
//! Every tunable constant of the engine, grouped per component. Defaults
//! reproduce the dashboard's behaviour exactly; presets adjust a few knobs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, OptionSpec, OptionType};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Implied volatility solver
    pub solver: SolverConfig,
    /// Payoff chart axis
    pub payoff: PayoffConfig,
    /// Synthetic smile / surface model
    pub smile: SkewModel,
    /// Base volatility fed to the smile model (decimal)
    pub base_vol: f64,
    /// Default calculator inputs
    pub market: MarketDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            payoff: PayoffConfig::default(),
            smile: SkewModel::default(),
            base_vol: 0.30,
            market: MarketDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Wider payoff axis: ±40% of strike in 60 steps
    pub fn wide_range() -> Self {
        Self {
            payoff: PayoffConfig {
                range: 0.4,
                steps: 60,
            },
            ..Default::default()
        }
    }

    /// Tighter solver tolerance with a longer iteration budget
    pub fn precise() -> Self {
        Self {
            solver: SolverConfig {
                tolerance: 1e-8,
                max_iterations: 200,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        tracing::info!("Saved engine config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.solver.validate()?;
        self.payoff.validate()?;
        self.smile.validate()?;
        if !self.base_vol.is_finite() || self.base_vol < 0.0 {
            return Err(EngineError::config(format!(
                "base_vol must be a non-negative decimal, got {}",
                self.base_vol
            )));
        }
        self.market.validate()
    }
}

/// Newton-Raphson implied volatility solver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting volatility
    /// Default: 0.3
    pub initial_guess: f64,

    /// Absolute price error accepted as converged
    /// Default: 1e-4
    pub tolerance: f64,

    /// Default: 100
    pub max_iterations: usize,

    /// Lower clamp applied after every update
    /// Default: 0.01
    pub min_vol: f64,

    /// Upper clamp applied after every update
    /// Default: 5.0
    pub max_vol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.3,
            tolerance: 1e-4,
            max_iterations: 100,
            min_vol: 0.01,
            max_vol: 5.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.min_vol > 0.0 && self.min_vol < self.max_vol && self.max_vol.is_finite()) {
            return Err(EngineError::config(format!(
                "solver vol bounds must satisfy 0 < min_vol < max_vol, got [{}, {}]",
                self.min_vol, self.max_vol
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(EngineError::config("solver tolerance must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(EngineError::config("solver needs at least one iteration"));
        }
        if !self.initial_guess.is_finite() || self.initial_guess <= 0.0 {
            return Err(EngineError::config(format!(
                "solver initial guess must be positive, got {}",
                self.initial_guess
            )));
        }
        Ok(())
    }
}

/// Payoff chart axis around the strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Half-width of the axis as a fraction of strike
    /// Default: 0.3
    pub range: f64,

    /// Number of intervals (points = steps + 1)
    /// Default: 50
    pub steps: usize,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            range: 0.3,
            steps: 50,
        }
    }
}

impl PayoffConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(EngineError::config(format!(
                "payoff range must be positive, got {}",
                self.range
            )));
        }
        if self.steps == 0 {
            return Err(EngineError::config("payoff axis needs at least one step"));
        }
        Ok(())
    }
}

/// Deterministic skew model used by the smile and surface generators.
///
/// `iv = base + (m - 1)² · curvature + (1 - m) · slope`, with `m = K/S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkewModel {
    /// Quadratic smile coefficient
    /// Default: 0.1
    pub curvature: f64,

    /// Linear skew coefficient (positive = downside skew)
    /// Default: 0.05
    pub slope: f64,

    /// Maturity (days) at which the smile is quoted unscaled
    /// Default: 30
    pub reference_days: f64,
}

impl Default for SkewModel {
    fn default() -> Self {
        Self {
            curvature: 0.1,
            slope: 0.05,
            reference_days: 30.0,
        }
    }
}

impl SkewModel {
    /// Skew add-on at moneyness `m`
    pub fn skew(&self, moneyness: f64) -> f64 {
        (moneyness - 1.0).powi(2) * self.curvature + (1.0 - moneyness) * self.slope
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.curvature.is_finite() || !self.slope.is_finite() {
            return Err(EngineError::config("skew coefficients must be finite"));
        }
        if !self.reference_days.is_finite() || self.reference_days <= 0.0 {
            return Err(EngineError::config(format!(
                "reference_days must be positive, got {}",
                self.reference_days
            )));
        }
        Ok(())
    }
}

/// Calculator defaults, in the units a user types them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDefaults {
    pub spot: f64,
    pub strike: f64,
    /// Calendar days to maturity
    pub days: f64,
    /// Percent, e.g. 30 for 30%
    pub volatility_pct: f64,
    /// Percent, e.g. 10.5 for 10.5%
    pub rate_pct: f64,
    /// Percent
    pub dividend_pct: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            days: 30.0,
            volatility_pct: 30.0,
            rate_pct: 10.5,
            dividend_pct: 0.0,
        }
    }
}

impl MarketDefaults {
    /// Decimal-scaled spec for the engine
    pub fn to_spec(&self, option_type: OptionType) -> OptionSpec {
        OptionSpec::from_market_inputs(
            option_type,
            self.spot,
            self.strike,
            self.days,
            self.volatility_pct,
            self.rate_pct,
        )
        .with_dividend_yield(self.dividend_pct / 100.0)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.to_spec(OptionType::Call)
            .validate()
            .map_err(|e| EngineError::config(format!("market defaults: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.payoff.steps, 50);
        assert!(EngineConfig::wide_range().validate().is_ok());
        assert!(EngineConfig::precise().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "payoff": { "steps": 20 }, "base_vol": 0.25 }"#).unwrap();
        assert_eq!(config.payoff.steps, 20);
        assert_eq!(config.payoff.range, 0.3);
        assert_eq!(config.base_vol, 0.25);
        assert_eq!(config.solver, SolverConfig::default());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "solver": { "min_vol": 6.0 } }"#),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str("not json"),
            Err(EngineError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("options-analytics-config-{}.json", std::process::id()));
        let config = EngineConfig::wide_range();
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(EngineError::Io(_))));
    }

    #[test]
    fn test_market_defaults_to_spec() {
        let spec = MarketDefaults::default().to_spec(OptionType::Put);
        assert_eq!(spec.option_type, OptionType::Put);
        assert!((spec.volatility - 0.30).abs() < 1e-12);
        assert!((spec.risk_free_rate - 0.105).abs() < 1e-12);
        assert!((spec.time_to_maturity - 30.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_skew() {
        let model = SkewModel::default();
        assert_eq!(model.skew(1.0), 0.0);
        // 90% strike: 0.01 * 0.1 + 0.1 * 0.05
        assert!((model.skew(0.9) - 0.006).abs() < 1e-12);
        // 110% strike: 0.001 - 0.005
        assert!((model.skew(1.1) + 0.004).abs() < 1e-12);
    }
}
