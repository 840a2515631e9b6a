//! tfscope - A live TUI viewer for Terraform and OpenTofu plan output
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tfscope_app::config;
use tracing::{info, warn};

/// tfscope - A live TUI viewer for Terraform and OpenTofu plan output
#[derive(Parser, Debug)]
#[command(name = "tfscope", version)]
#[command(
    about = "A live TUI viewer for Terraform and OpenTofu plan output",
    long_about = "Pipe plan output in (`terraform plan 2>&1 | tfscope`) or let tfscope run \
                  the command on a pseudo-terminal (`tfscope terraform apply`) to answer \
                  its prompts from the viewer."
)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Command to run on a PTY; reads stdin when omitted
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // The TUI owns the terminal, so logs go to a file
    if let Err(e) = tfscope_core::logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let settings = match &args.config {
        Some(path) => config::load_explicit(path)?,
        None => config::load_settings(),
    };

    if args.command.is_empty() && std::io::stdin().is_terminal() {
        warn!("No command given and stdin is a terminal");
        eprintln!("tfscope: nothing to read. Pipe plan output in or pass a command:");
        eprintln!("    terraform plan 2>&1 | tfscope");
        eprintln!("    tfscope terraform apply");
        std::process::exit(2);
    }

    tfscope_tui::run(&settings, &args.command).await?;
    info!("tfscope exiting");
    Ok(())
}
