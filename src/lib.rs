//! # Options Analytics - Pricing and Risk Engine
//!
//! A pure, synchronous library for European option valuation and the
//! position analytics built on it.
//!
//! ## Overview
//!
//! - **Black-Scholes-Merton**: price, Greeks and implied volatility with a
//!   continuous dividend yield
//! - **Payoff analysis**: expiry payoff curves, multi-leg strategies,
//!   break-evens and max profit/loss
//! - **Volatility smile**: a deterministic skew model for smile, surface and
//!   term-structure displays
//!
//! ## Conventions
//!
//! All rates and volatilities are decimals at the engine boundary (0.30, not
//! 30). Theta is per calendar day; vega and rho are per one percentage point.
//! Use [`crate::core::OptionSpec::from_market_inputs`] to convert percent inputs.
//!
//! ## Usage
//!
//! ```rust
//! use options_analytics::prelude::*;
//!
//! let spec = OptionSpec::new(OptionType::Call, 100.0, 100.0, 30.0 / 365.0, 0.30, 0.105);
//! let result = bs_price(&spec);
//! assert!(result.price > 0.0);
//!
//! let iv = implied_volatility(result.price, 100.0, 100.0, 30.0 / 365.0, 0.105, OptionType::Call);
//! assert!((iv - 0.30).abs() < 1e-3);
//!
//! let pl = max_profit_loss(100.0, result.price, OptionType::Call, PositionSide::Long);
//! assert!(pl.max_profit.is_unbounded());
//! ```
//!
//! ## What This Engine Does NOT Do
//!
//! - Fetch or store market data
//! - Validate inputs on the hot path (see [`models::price_checked`])
//! - Guarantee implied-volatility convergence (the solver is best effort)
//! - Price American exercise

pub mod analysis;
pub mod config;
pub mod core;
pub mod format;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_to_years, Bound, EngineError, EngineResult, Greeks, OptionSpec, OptionType,
        PayoffPoint, PositionSide, PricingResult, ProfitLoss, SurfacePoint, TermStructurePoint,
        VolSurface, VolatilityPoint,
    };

    // Configuration
    pub use crate::config::{EngineConfig, MarketDefaults, PayoffConfig, SkewModel, SolverConfig};

    // Models
    pub use crate::models::{
        greeks as bs_greeks,
        implied_volatility,
        implied_volatility_with_config,
        norm_cdf,
        norm_pdf,
        // Black-Scholes
        price as bs_price,
        price_checked,
        // Smile
        term_structure,
        volatility_smile,
        volatility_smile_with_model,
        volatility_surface,
        IvSolution,
    };

    // Analysis
    pub use crate::analysis::{
        break_even, default_price_range, greek_profile, greek_sensitivity, max_profit_loss,
        payoff, price_range, GreekKind, OptionLeg, PayoffSummary, SensitivityPoint, Strategy,
    };

    // Formatting
    pub use crate::format::{format_bound, format_currency, format_number, format_percent};
}

// Re-export main types at crate root
pub use crate::core::{EngineError, EngineResult, OptionSpec, OptionType, PositionSide};
pub use crate::models::{implied_volatility, price};
