//! CLI command definitions and dispatch for the `lumi` binary.
//!
//! Uses clap derive macros for argument parsing. Persona arguments accept
//! built-in labels; `--name` selects the custom persona variant with that
//! display name.

pub mod chat;
pub mod history;
pub mod persona;
pub mod status;
pub mod upgrade;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use lumi_types::persona::Persona;

/// Talk to your Lumi companion.
#[derive(Parser)]
#[command(name = "lumi", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Persona to chat with (picker shown when omitted).
        #[arg(long)]
        persona: Option<String>,

        /// Display name for the custom persona variant.
        #[arg(long)]
        name: Option<String>,

        /// Model to use (defaults to the configured model).
        #[arg(long)]
        model: Option<String>,
    },

    /// List the built-in personas.
    Personas,

    /// Print the stored conversation for a persona.
    History {
        /// Persona label.
        persona: String,

        /// Display name for the custom persona variant.
        #[arg(long)]
        name: Option<String>,
    },

    /// Clear the stored conversation for a persona.
    Reset {
        /// Persona label.
        persona: String,

        /// Display name for the custom persona variant.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show account and conversation status.
    Status,

    /// Store your profile and print the checkout URL for Lumi Pro.
    Upgrade {
        /// Email to prefill on the checkout page.
        #[arg(long)]
        email: Option<String>,

        /// Display name to prefill on the checkout page.
        #[arg(long = "display-name")]
        display_name: Option<String>,
    },

    /// Start the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Resolve a persona from a label and an optional custom display name.
///
/// `--name` wins: it always selects the custom variant. Otherwise the label
/// parses to a built-in persona, or to the typed fallback for unknown
/// labels.
pub fn resolve_persona(label: &str, custom_name: Option<&str>) -> Persona {
    match custom_name {
        Some(name) => Persona::custom(name),
        None if label.eq_ignore_ascii_case("custom") => Persona::custom(""),
        None => label.parse().expect("persona parsing is infallible"),
    }
}
