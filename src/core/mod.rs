//! Core data types for the options engine
//!
//! Defines fundamental types:
//! - OptionType / PositionSide: closed variants for kind and side
//! - OptionSpec: Black-Scholes inputs
//! - Greeks, PricingResult, PayoffPoint, Bound: engine outputs
//! - VolatilityPoint, VolSurface: smile and surface data

pub mod error;
pub mod greeks;
pub mod option;
pub mod result;
pub mod surface;

pub use error::*;
pub use greeks::*;
pub use option::*;
pub use result::*;
pub use surface::*;
