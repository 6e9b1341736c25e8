//! Interactive chat loop.
//!
//! Coordinates the conversation lifecycle for the terminal: persona and
//! model selection, greeting display, the input loop with slash commands,
//! trial footer warnings, and the upgrade prompt on gate-blocked sends.

use console::style;
use dialoguer::{Input, Select};

use lumi_core::greeting::GreetingSource;
use lumi_core::session::SessionService;
use lumi_infra::checkout::checkout_url;
use lumi_infra::gateway::GatewayClient;
use lumi_infra::sqlite::SqliteHistoryStore;
use lumi_types::model::ModelId;
use lumi_types::persona::Persona;

use crate::state::AppState;

use super::resolve_persona;

type CliSession = SessionService<SqliteHistoryStore, GatewayClient, GatewayClient>;

/// Run the interactive chat loop.
pub async fn run_chat(
    state: &AppState,
    persona: Option<String>,
    name: Option<String>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let persona = match (persona, name) {
        (Some(label), name) => resolve_persona(&label, name.as_deref()),
        (None, Some(name)) => Persona::custom(name),
        (None, None) => pick_persona()?,
    };

    let model: ModelId = match model {
        Some(raw) => raw
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{e}. Try one of: Meta, Prime, Spectre, Phantom"))?,
        None => state.config.default_model.parse().unwrap_or_default(),
    };

    let gate = state.trial_gate().await?;
    let mut session = CliSession::start(
        state.history_store(),
        state.gateway(),
        state.gateway(),
        gate,
        persona,
        model,
        GreetingSource::Random,
    )
    .await;

    print_banner(&session);

    // The greeting (or the last stored exchange) is already in the
    // conversation; show the tail so returning users see where they left off.
    for message in session.messages().iter().rev().take(4).rev() {
        print_message(&session, &message.role.to_string(), &message.content);
    }
    println!();

    loop {
        let line = match Input::<String>::new()
            .with_prompt(format!("  {}", style("You >").green().bold()))
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(command) = text.strip_prefix('/') {
            match command {
                "help" => {
                    print_help();
                    continue;
                }
                "history" => {
                    println!();
                    for message in session.messages() {
                        print_message(&session, &message.role.to_string(), &message.content);
                    }
                    println!();
                    continue;
                }
                "reset" => {
                    session.reset(GreetingSource::Random).await;
                    println!("\n  {} Conversation cleared.\n", style("*").cyan().bold());
                    print_message(&session, "companion", &session.messages()[0].content.clone());
                    continue;
                }
                "exit" | "quit" => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                other => {
                    println!(
                        "\n  {} Unknown command: /{}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(other).dim()
                    );
                    continue;
                }
            }
        }

        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("{} is thinking...", session.persona().display_name()));
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));

        let outcome = session.send(text, None).await;
        spinner.finish_and_clear();

        print_message(&session, "companion", &outcome.reply);

        if !outcome.suggestions.emoji_suggestions.is_empty() {
            println!(
                "  {}",
                style(outcome.suggestions.emoji_suggestions.join("  ")).dim()
            );
        }
        println!();

        if outcome.upgrade_required {
            print_upgrade_prompt(state).await;
        } else if let Some(remaining) = outcome.remaining_messages {
            if remaining <= state.config.trial_warning_threshold {
                println!(
                    "  {}\n",
                    style(format!("{remaining} free messages left in your trial.")).dim()
                );
            }
        }
    }

    Ok(())
}

/// Interactive persona picker shown when no persona argument is given.
fn pick_persona() -> anyhow::Result<Persona> {
    let mut labels: Vec<&str> = Persona::BUILTIN.to_vec();
    labels.push("Custom");

    let index = Select::new()
        .with_prompt("Choose your companion")
        .items(&labels)
        .default(0)
        .interact()?;

    if labels[index] == "Custom" {
        let name = Input::<String>::new()
            .with_prompt("Name your companion")
            .interact_text()?;
        Ok(Persona::custom(name.trim()))
    } else {
        Ok(resolve_persona(labels[index], None))
    }
}

fn print_banner(session: &CliSession) {
    println!();
    println!(
        "  {} {}",
        style(session.persona().display_name()).cyan().bold(),
        style(format!("({})", session.model())).dim()
    );
    match session.remaining_messages() {
        Some(remaining) => println!(
            "  {}",
            style(format!("Trial: {remaining} free messages left")).dim()
        ),
        None => println!("  {}", style("Lumi Pro").magenta()),
    }
    println!();
}

fn print_message(session: &CliSession, role: &str, content: &str) {
    let label = if role == "user" {
        style("You").green().bold()
    } else {
        style(session.persona().display_name()).cyan().bold()
    };
    println!("  {label} {content}");
}

fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("  /help     Show this help");
    println!("  /history  Show the full conversation");
    println!("  /reset    Clear this persona's conversation");
    println!("  /exit     Leave the chat");
    println!();
}

async fn print_upgrade_prompt(state: &AppState) {
    use lumi_core::account::AccountStore;

    let account = state.account_store().get().await.unwrap_or_default();
    println!(
        "  {} {}",
        style("★").magenta().bold(),
        style("Your trial has ended. Upgrade to Lumi Pro to keep chatting.").bold()
    );
    match checkout_url(
        &state.config.checkout_url,
        account.email.as_deref(),
        account.display_name.as_deref(),
    ) {
        Ok(url) => println!("  {}\n", style(url.as_str()).cyan().underlined()),
        Err(err) => {
            tracing::warn!(error = %err, "could not build checkout URL");
            println!();
        }
    }
}
