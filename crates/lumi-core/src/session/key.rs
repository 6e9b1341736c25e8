//! Session key derivation.
//!
//! Persisted history is namespaced by a string key of the form
//! `lumiMessages_<PersonaLabel>` (custom personas append their display name:
//! `lumiMessages_Custom_<name>`). Two personas never share a key, so they
//! never share history.

use lumi_types::persona::Persona;

use std::fmt;

/// Storage key prefix shared by every conversation entry.
const KEY_PREFIX: &str = "lumiMessages_";

/// The storage key namespacing one persona's persisted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derive the session key for a persona.
    pub fn for_persona(persona: &Persona) -> Self {
        Self(format!("{KEY_PREFIX}{}", persona.storage_label()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
