//! External responder boundary traits.
//!
//! The generative backend is an external collaborator: it receives the full
//! transcript plus the new user input and returns a reply string. The
//! contract is infallible -- implementations map every failure to
//! [`FALLBACK_REPLY`] after a single attempt, so the session manager never
//! carries retry logic.

use lumi_types::chat::ExpressiveSuggestions;
use lumi_types::model::ModelId;
use lumi_types::persona::Persona;

/// Fixed in-character reply substituted when reply generation fails.
pub const FALLBACK_REPLY: &str = "Oh, my heart... I'm feeling a little overwhelmed \
right now. Can we talk about something else?";

/// Reply generation boundary.
///
/// Implementations live in `lumi-infra` (e.g., `GatewayClient`). One attempt
/// per user turn; on error the returned string is [`FALLBACK_REPLY`].
pub trait CompanionResponder: Send + Sync {
    fn respond(
        &self,
        persona: &Persona,
        transcript: &str,
        user_input: &str,
        model: ModelId,
        attachment_url: Option<&str>,
    ) -> impl std::future::Future<Output = String> + Send;
}

/// Expressive-suggestion boundary.
///
/// Derives emoji (and optionally an image) suggestions from the companion's
/// reply text. On error returns empty suggestions.
pub trait ExpressiveSuggester: Send + Sync {
    fn suggest(
        &self,
        emotional_state: &str,
    ) -> impl std::future::Future<Output = ExpressiveSuggestions> + Send;
}
