//! Wire types for the generative gateway.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/persona/respond`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest<'a> {
    /// The selected persona mode (display name for custom personas).
    pub mode: &'a str,
    /// Full transcript so far, one `<role>: <content>` line per message.
    pub story_memory: &'a str,
    /// The new user message.
    pub user_input: &'a str,
    /// The selected model name.
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<&'a str>,
}

/// Response body for `POST /v1/persona/respond`.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondResponse {
    pub response: String,
}

/// Request body for `POST /v1/expressive/suggest`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest<'a> {
    /// The companion reply whose emotional state drives the suggestions.
    pub emotional_state: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_request_wire_shape() {
        let request = RespondRequest {
            mode: "Girlfriend",
            story_memory: "companion: hey\nuser: hi",
            user_input: "hi",
            model: "Vansh Meta",
            attachment_url: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"storyMemory\""));
        assert!(json.contains("\"userInput\""));
        assert!(!json.contains("attachmentUrl"));
    }

    #[test]
    fn test_respond_request_includes_attachment() {
        let request = RespondRequest {
            mode: "Girlfriend",
            story_memory: "",
            user_input: "look",
            model: "Vansh Meta",
            attachment_url: Some("https://files.example/cat.png"),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"attachmentUrl\":\"https://files.example/cat.png\""));
    }

    #[test]
    fn test_respond_response_parses() {
        let parsed: RespondResponse =
            serde_json::from_str(r#"{"response":"hey you 💖"}"#).unwrap();
        assert_eq!(parsed.response, "hey you 💖");
    }

    #[test]
    fn test_suggest_request_wire_shape() {
        let request = SuggestRequest {
            emotional_state: "joyful",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"emotionalState":"joyful"}"#);
    }
}
