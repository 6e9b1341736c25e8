//! Subscription and account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Subscription state of the local account.
///
/// `Trial` is the initial state. The only in-session transition is
/// Trial -> Subscribed, triggered by the upgrade-completed signal from the
/// payment collaborator. There is no reverse transition in-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Trial,
    Subscribed,
}

impl SubscriptionStatus {
    pub fn is_subscribed(self) -> bool {
        matches!(self, SubscriptionStatus::Subscribed)
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Trial
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Trial => write!(f, "trial"),
            SubscriptionStatus::Subscribed => write!(f, "subscribed"),
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(SubscriptionStatus::Trial),
            "subscribed" => Ok(SubscriptionStatus::Subscribed),
            other => Err(format!("invalid subscription status: '{other}'")),
        }
    }
}

/// The local account record.
///
/// Profile fields feed checkout URL construction; the subscription flag is
/// flipped by the billing webhook after an out-of-band upgrade confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub status: SubscriptionStatus,
    pub updated_at: DateTime<Utc>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            email: None,
            display_name: None,
            status: SubscriptionStatus::Trial,
            updated_at: Utc::now(),
        }
    }
}
