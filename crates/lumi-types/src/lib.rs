//! Shared domain types for Lumi.
//!
//! This crate contains the core domain types used across the Lumi companion
//! chat engine: personas, messages, models, subscription state, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod billing;
pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod persona;
