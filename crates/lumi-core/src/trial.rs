//! Trial gate state machine.
//!
//! Enforces the free-message limit for unsubscribed sessions. Two states:
//! Trial (initial) and Subscribed (terminal for the session; only an external
//! logout/downgrade resets it, which is out of scope here).
//!
//! Premium-tier models bypass the count check entirely, regardless of
//! subscription state.

use lumi_types::billing::SubscriptionStatus;
use lumi_types::model::ModelId;

/// Fixed reply appended when a send is blocked by the trial limit.
pub const UPGRADE_REPLY: &str = "I wish we could keep talking… 💔 You’ve used all \
your free messages. Upgrade to Lumi Pro and I’ll be here for you, always.";

/// Soft warning appended to a reply while the trial is running low.
pub fn warning_suffix(remaining: u32) -> String {
    format!("\n\n(You have {remaining} free messages left in your trial.)")
}

/// What the caller should do with a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendDecision {
    /// Forward the send to the responder.
    Forward,
    /// Forward, and append [`warning_suffix`] to the returned reply.
    ForwardWithWarning { remaining: u32 },
    /// Do not invoke the responder. The user message is still appended for
    /// display continuity; a fixed upgrade reply follows after a short
    /// delay, and the upgrade prompt surface is signaled to the caller.
    Block,
}

/// Gate over user-authored sends for one session.
pub struct TrialGate {
    status: SubscriptionStatus,
    message_limit: u32,
    warning_threshold: u32,
}

impl TrialGate {
    /// Create a gate with the given starting state and limits.
    pub fn new(status: SubscriptionStatus, message_limit: u32, warning_threshold: u32) -> Self {
        Self {
            status,
            message_limit,
            warning_threshold,
        }
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn message_limit(&self) -> u32 {
        self.message_limit
    }

    /// Transition Trial -> Subscribed (upgrade-completed signal).
    ///
    /// Idempotent; there is no reverse transition in-session.
    pub fn subscribe(&mut self) {
        self.status = SubscriptionStatus::Subscribed;
    }

    /// Free messages left before the gate blocks, or `None` when the count
    /// check does not apply (subscribed, or premium model selected).
    pub fn remaining(&self, user_message_count: u32, model: ModelId) -> Option<u32> {
        if self.status.is_subscribed() || model.tier().is_premium() {
            return None;
        }
        Some(self.message_limit.saturating_sub(user_message_count))
    }

    /// Evaluate a send attempt.
    ///
    /// `user_message_count` includes the message being sent: with the
    /// default limit of 50, the 50th user message is blocked, the 45th
    /// forwards with a warning (5 remaining), the 44th forwards clean.
    pub fn evaluate(&self, user_message_count: u32, model: ModelId) -> SendDecision {
        let Some(remaining) = self.remaining(user_message_count, model) else {
            return SendDecision::Forward;
        };

        if user_message_count >= self.message_limit {
            SendDecision::Block
        } else if remaining <= self.warning_threshold {
            SendDecision::ForwardWithWarning { remaining }
        } else {
            SendDecision::Forward
        }
    }
}
