//! Common utilities for the routelab toolkit

pub mod error;

pub use error::{suggest_correction, Error, Result};
