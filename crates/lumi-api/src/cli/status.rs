//! Account and conversation status command.

use console::style;

use lumi_core::account::AccountStore;
use lumi_core::session::key::SessionKey;
use lumi_core::session::store::HistoryStore;
use lumi_types::chat::MessageRole;
use lumi_types::persona::Persona;

use crate::state::AppState;

/// Show subscription state and per-persona message counts.
pub async fn status(state: &AppState, json: bool) -> anyhow::Result<()> {
    let account = state.account_store().get().await?;
    let store = state.history_store();

    let mut persona_counts = Vec::new();
    for label in Persona::BUILTIN {
        let persona: Persona = label.parse().expect("persona parsing is infallible");
        let key = SessionKey::for_persona(&persona);
        let messages = store.load(&key).await?.unwrap_or_default();
        if messages.is_empty() {
            continue;
        }
        let user_count = messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .count();
        persona_counts.push((label, messages.len(), user_count));
    }

    if json {
        let personas: Vec<serde_json::Value> = persona_counts
            .iter()
            .map(|(label, total, user)| {
                serde_json::json!({ "persona": label, "messages": total, "user_messages": user })
            })
            .collect();
        let out = serde_json::json!({
            "status": account.status.to_string(),
            "email": account.email,
            "display_name": account.display_name,
            "trial_message_limit": state.config.trial_message_limit,
            "personas": personas,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    match account.status {
        lumi_types::billing::SubscriptionStatus::Subscribed => {
            println!("  {} {}", style("★").magenta().bold(), style("Lumi Pro").bold());
        }
        lumi_types::billing::SubscriptionStatus::Trial => {
            println!(
                "  {} Trial ({} free messages per conversation)",
                style("·").dim(),
                state.config.trial_message_limit
            );
        }
    }
    if let Some(email) = &account.email {
        println!("  {} {email}", style("Email:").dim());
    }
    println!();

    if persona_counts.is_empty() {
        println!("  {}\n", style("No conversations yet. Try: lumi chat").dim());
        return Ok(());
    }

    println!("  {}", style("Conversations").bold());
    for (label, total, user) in &persona_counts {
        println!(
            "  {} {} messages ({} from you)",
            style(format!("{label:<11}")).cyan(),
            total,
            user
        );
    }
    println!();

    Ok(())
}
