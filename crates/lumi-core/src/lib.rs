//! Business logic for the Lumi companion chat engine.
//!
//! Contains the conversation session manager (session key derivation,
//! append-only conversation state, persistence trait), the greeting
//! selector, the trial gate state machine, and the external responder
//! boundary traits. Infrastructure implementations live in `lumi-infra`;
//! this crate never depends on them.

pub mod account;
pub mod greeting;
pub mod responder;
pub mod session;
pub mod trial;
