//! Option contract definitions
//!
//! Option kind, position side and the full set of Black-Scholes inputs for a
//! single European option. All rates and volatilities are decimals (0.30, not 30).

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Calendar days per year used for every days <-> years conversion
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.phi() * (spot - strike)).max(0.0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }
}

/// Side of a position: bought (long) or written (short)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            PositionSide::Long => PositionSide::Short,
            PositionSide::Short => PositionSide::Long,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
        }
    }
}

/// Black-Scholes inputs for one European option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Call or put
    pub option_type: OptionType,
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to maturity in years
    pub time_to_maturity: f64,
    /// Annualized volatility (decimal)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (decimal)
    pub risk_free_rate: f64,
    /// Continuous dividend yield (decimal)
    #[serde(default)]
    pub dividend_yield: f64,
}

impl OptionSpec {
    /// Create a spec with zero dividend yield
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            time_to_maturity,
            volatility,
            risk_free_rate,
            dividend_yield: 0.0,
        }
    }

    /// Build a spec from user-facing inputs: maturity in calendar days,
    /// volatility and rate in percent (30 for 30%).
    pub fn from_market_inputs(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        days: f64,
        volatility_pct: f64,
        rate_pct: f64,
    ) -> Self {
        Self::new(
            option_type,
            spot,
            strike,
            days_to_years(days),
            volatility_pct / 100.0,
            rate_pct / 100.0,
        )
    }

    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Moneyness: K/S
    pub fn moneyness(&self) -> f64 {
        self.strike / self.spot
    }

    /// Is this option in the money?
    pub fn is_itm(&self) -> bool {
        match self.option_type {
            OptionType::Call => self.spot > self.strike,
            OptionType::Put => self.spot < self.strike,
        }
    }

    /// Is this option at the money (relative distance within tolerance)?
    pub fn is_atm(&self, tolerance: f64) -> bool {
        (self.strike - self.spot).abs() / self.spot < tolerance
    }

    /// Is this option out of the money?
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm(0.01)
    }

    /// Maturity in calendar days
    pub fn days_to_maturity(&self) -> f64 {
        self.time_to_maturity * DAYS_PER_YEAR
    }

    /// Reject inputs the closed-form formulas cannot handle meaningfully.
    ///
    /// The pricing core does not call this; it is the optional guard used by
    /// [`crate::models::price_checked`].
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("time_to_maturity", self.time_to_maturity),
            ("volatility", self.volatility),
            ("risk_free_rate", self.risk_free_rate),
            ("dividend_yield", self.dividend_yield),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::invalid_input(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.spot <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "spot must be positive, got {}",
                self.spot
            )));
        }
        if self.strike <= 0.0 {
            return Err(EngineError::invalid_input(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if self.volatility < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        if self.time_to_maturity < 0.0 {
            return Err(EngineError::invalid_input(format!(
                "time to maturity must be non-negative, got {}",
                self.time_to_maturity
            )));
        }
        Ok(())
    }
}

/// Convert calendar days to years
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}
