//! Infrastructure implementations for Lumi.
//!
//! SQLite persistence (history and account stores), the generative gateway
//! HTTP client, checkout URL construction, and the global config loader.

pub mod checkout;
pub mod config;
pub mod gateway;
pub mod sqlite;
