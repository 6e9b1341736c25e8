//! Persona listing command.

use console::style;

use lumi_core::greeting;
use lumi_types::persona::Persona;

/// List the built-in personas.
pub fn list_personas(json: bool) -> anyhow::Result<()> {
    if json {
        let labels: Vec<&str> = Persona::BUILTIN.to_vec();
        println!("{}", serde_json::to_string_pretty(&labels)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Choose how you want me to be.").dim());
    println!();
    for label in Persona::BUILTIN {
        let persona: Persona = label.parse().expect("persona parsing is infallible");
        let opener = greeting::first_greeting(&persona);
        println!("  {} {}", style(label).cyan().bold(), style(opener).dim());
    }
    println!(
        "  {} {}",
        style("Custom").cyan().bold(),
        style("Anyone you can imagine. Start with: lumi chat --name <name>").dim()
    );
    println!();

    Ok(())
}
