//! Persona tags for the companion.
//!
//! Personas are an explicit enumerated mapping rather than stringly-typed
//! lookups. Labels the engine does not recognize parse into [`Persona::Other`]
//! so a session can still start (it falls back to the default greeting set).

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The companion persona selected for a conversation.
///
/// `Custom` carries the user-supplied display name that is substituted into
/// greeting templates. `Other` is the typed fallback for labels outside the
/// built-in set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Persona {
    Girlfriend,
    Boyfriend,
    Mentor,
    Teacher,
    Coach,
    Therapist,
    Custom(String),
    Other(String),
}

impl Persona {
    /// All built-in persona labels, in selection-screen order.
    pub const BUILTIN: [&'static str; 6] = [
        "Girlfriend",
        "Boyfriend",
        "Mentor",
        "Teacher",
        "Coach",
        "Therapist",
    ];

    /// Create a custom persona with the given display name.
    pub fn custom(name: impl Into<String>) -> Self {
        Persona::Custom(name.into())
    }

    /// The label used to namespace persisted history.
    ///
    /// Custom personas include their display name so two different custom
    /// companions never share history.
    pub fn storage_label(&self) -> String {
        match self {
            Persona::Custom(name) => format!("Custom_{name}"),
            other => other.to_string(),
        }
    }

    /// The name shown in the chat header and handed to the responder.
    ///
    /// For custom personas this is the user-supplied display name.
    pub fn display_name(&self) -> &str {
        match self {
            Persona::Girlfriend => "Girlfriend",
            Persona::Boyfriend => "Boyfriend",
            Persona::Mentor => "Mentor",
            Persona::Teacher => "Teacher",
            Persona::Coach => "Coach",
            Persona::Therapist => "Therapist",
            Persona::Custom(name) => name,
            Persona::Other(label) => label,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Custom(_) => write!(f, "Custom"),
            other => write!(f, "{}", other.display_name()),
        }
    }
}

impl FromStr for Persona {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "girlfriend" => Persona::Girlfriend,
            "boyfriend" => Persona::Boyfriend,
            "mentor" => Persona::Mentor,
            "teacher" => Persona::Teacher,
            "coach" => Persona::Coach,
            "therapist" => Persona::Therapist,
            _ => Persona::Other(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_labels_parse() {
        for label in Persona::BUILTIN {
            let persona: Persona = label.parse().unwrap();
            assert_eq!(persona.to_string(), label);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let persona: Persona = "GIRLFRIEND".parse().unwrap();
        assert_eq!(persona, Persona::Girlfriend);
    }

    #[test]
    fn test_unknown_label_parses_to_other() {
        let persona: Persona = "Space Pirate".parse().unwrap();
        assert_eq!(persona, Persona::Other("Space Pirate".to_string()));
        assert_eq!(persona.display_name(), "Space Pirate");
    }

    #[test]
    fn test_storage_label_namespaces_custom() {
        assert_eq!(Persona::Girlfriend.storage_label(), "Girlfriend");
        assert_eq!(Persona::custom("Nova").storage_label(), "Custom_Nova");
    }

    #[test]
    fn test_custom_display_name() {
        let persona = Persona::custom("Nova");
        assert_eq!(persona.display_name(), "Nova");
        assert_eq!(persona.to_string(), "Custom");
    }
}
