//! Position Analysis
//!
//! Everything built on top of the pricing models for a position view:
//! - **Payoff**: profit/loss at expiry across an underlying price axis
//! - **Strategies**: multi-leg payoffs and net Greeks
//! - **Summary**: extremes and break-evens read off a payoff curve
//! - **Metrics**: closed-form break-even and max profit/loss
//! - **Sensitivity**: Greeks swept across spot

mod metrics;
mod payoff;
mod sensitivity;
mod strategy;
mod summary;

pub use metrics::*;
pub use payoff::*;
pub use sensitivity::*;
pub use strategy::*;
pub use summary::*;
