//! Pricing Models
//!
//! Implements:
//! - Black-Scholes-Merton (pricing, Greeks, implied volatility)
//! - Synthetic skew model (smile, surface, term structure)

pub mod black_scholes;
pub mod smile;

pub use black_scholes::*;
pub use smile::*;
