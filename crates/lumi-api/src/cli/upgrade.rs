//! Upgrade command: store the profile and print the checkout URL.
//!
//! Payment confirmation arrives out-of-band (the billing webhook flips the
//! subscription flag); this command only starts the flow.

use console::style;

use lumi_core::account::AccountStore;
use lumi_infra::checkout::checkout_url;

use crate::state::AppState;

pub async fn upgrade(
    state: &AppState,
    email: Option<&str>,
    display_name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if email.is_some() || display_name.is_some() {
        state.account_store().set_profile(email, display_name).await?;
    }

    let account = state.account_store().get().await?;
    let url = checkout_url(
        &state.config.checkout_url,
        account.email.as_deref(),
        account.display_name.as_deref(),
    )?;

    if json {
        println!("{}", serde_json::json!({ "checkout_url": url.as_str() }));
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("★").magenta().bold(),
        style("Unlock Lumi Pro").bold()
    );
    println!("  Open this link to complete your upgrade:");
    println!("  {}\n", style(url.as_str()).cyan().underlined());

    Ok(())
}
