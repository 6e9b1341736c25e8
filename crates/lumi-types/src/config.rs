//! Global configuration shape.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! default so a missing or partial file still yields a usable config.

use serde::{Deserialize, Serialize};

/// Global configuration loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Maximum number of free user-authored messages per conversation.
    #[serde(default = "default_trial_message_limit")]
    pub trial_message_limit: u32,

    /// Remaining-message count at which soft warnings begin.
    #[serde(default = "default_trial_warning_threshold")]
    pub trial_warning_threshold: u32,

    /// Base URL of the generative gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Base URL of the external checkout page.
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,

    /// Model used when none is selected.
    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            trial_message_limit: default_trial_message_limit(),
            trial_warning_threshold: default_trial_warning_threshold(),
            gateway_url: default_gateway_url(),
            checkout_url: default_checkout_url(),
            default_model: default_model(),
        }
    }
}

fn default_trial_message_limit() -> u32 {
    50
}

fn default_trial_warning_threshold() -> u32 {
    5
}

fn default_gateway_url() -> String {
    "https://gateway.lumi.chat".to_string()
}

fn default_checkout_url() -> String {
    "https://lumi.lemonsqueezy.com/checkout/buy/lumi-pro".to_string()
}

fn default_model() -> String {
    "Vansh Meta".to_string()
}
