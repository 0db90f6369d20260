//! create-project CLI

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use create_project::{init_project, Config, Error, FixSuggestion, InitResult, TerminalPrompter};

#[derive(Parser)]
#[command(name = "create-project")]
#[command(about = "Create a new project from a template")]
#[command(version)]
struct Cli {
    /// Name of the definition to use
    definition: String,

    /// Destination of the new project
    destination: PathBuf,
}

fn main() {
    // Logs go to stderr; stdout belongs to the prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match init_project(
        &config,
        &cli.definition,
        &cli.destination,
        TerminalPrompter::stdio(),
    ) {
        Ok(result) => print_summary(&result),
        Err(Error::DefinitionNotFound { name, searched }) => {
            println!("{} Definition '{}' not found.", "✗".yellow(), name);
            for dir in searched {
                println!("  {} {}", "searched".dimmed(), dir.display());
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(suggestion) = e.fix_suggestion() {
                eprintln!("  {} {}", "Fix:".yellow(), suggestion);
            }
            std::process::exit(1);
        }
    }
}

fn print_summary(result: &InitResult) {
    println!(
        "{} Created {} from template '{}'",
        "✓".green(),
        result.project_dir.display().to_string().bold(),
        result.template_path.cyan()
    );
    println!("  Files: {}", result.files_created.len());

    for leftover in &result.unresolved {
        println!(
            "  {} {} left in {}",
            "!".yellow(),
            leftover.token,
            leftover.file.display()
        );
    }
}
