//! Lanegate-api: HTTP API layer for Lanegate
//!
//! Exposes chain status, token balances, lane rate limits and transfer
//! assessment to the widget frontend.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
