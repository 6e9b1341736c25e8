//! Stored-conversation inspection and reset commands.

use console::style;

use lumi_core::session::key::SessionKey;
use lumi_core::session::store::HistoryStore;
use lumi_types::chat::MessageRole;

use crate::state::AppState;

use super::resolve_persona;

/// Print the stored conversation for a persona.
pub async fn show_history(
    state: &AppState,
    persona_label: &str,
    custom_name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let persona = resolve_persona(persona_label, custom_name);
    let key = SessionKey::for_persona(&persona);
    let messages = state.history_store().load(&key).await?.unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!(
            "\n  {} No stored conversation for {}.\n",
            style("-").dim(),
            style(persona.display_name()).cyan()
        );
        return Ok(());
    }

    println!();
    for message in &messages {
        let label = match message.role {
            MessageRole::User => style("You").green().bold(),
            MessageRole::Companion => style(persona.display_name()).cyan().bold(),
        };
        println!("  {label} {}", message.content);
        if let Some(attachment) = &message.attachment {
            println!(
                "    {}",
                style(format!("[{} {}]", attachment.media_type, attachment.url)).dim()
            );
        }
    }
    println!();

    Ok(())
}

/// Clear the stored conversation for a persona.
pub async fn reset_history(
    state: &AppState,
    persona_label: &str,
    custom_name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let persona = resolve_persona(persona_label, custom_name);
    let key = SessionKey::for_persona(&persona);
    state.history_store().clear(&key).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "cleared": key.as_str() })
        );
    } else {
        println!(
            "\n  {} Cleared conversation for {}.\n",
            style("*").cyan().bold(),
            style(persona.display_name()).cyan()
        );
    }

    Ok(())
}
