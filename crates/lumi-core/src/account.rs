//! AccountStore trait definition.
//!
//! Persistence for the single local account record: profile fields for
//! checkout URL construction and the subscription flag set by the billing
//! webhook. Implementations live in `lumi-infra`.

use lumi_types::billing::Account;
use lumi_types::error::StoreError;

/// Persistence for the local account record.
pub trait AccountStore: Send + Sync {
    /// Load the account record, or the default trial account if none exists.
    fn get(&self) -> impl std::future::Future<Output = Result<Account, StoreError>> + Send;

    /// Store the profile fields used for checkout.
    fn set_profile(
        &self,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Flip the subscription flag (upgrade-completed signal).
    fn set_subscribed(
        &self,
        subscribed: bool,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
