//! lanegate-core: Shared types, amounts, errors, and configuration
//!
//! This crate provides the foundational types used across the Lanegate workspace.

pub mod amount;
pub mod config;
pub mod errors;
pub mod theme;
pub mod types;

pub use amount::{format_base_units, to_base_units, validate_amount, AmountError};
pub use config::*;
pub use errors::*;
pub use theme::{Palette, ThemeConfig, ThemeKey};
pub use types::*;
