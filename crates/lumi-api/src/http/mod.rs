//! REST API layer.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

use lumi_types::persona::Persona;

/// Resolve a persona from a path segment and an optional custom name.
pub(crate) fn persona_from_path(label: &str, custom_name: Option<&str>) -> Persona {
    crate::cli::resolve_persona(label, custom_name)
}
