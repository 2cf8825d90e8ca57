use clap::{Parser, Subcommand};
use harness::{default_registry, render_report, report_result};
use std::path::PathBuf;
use testkit::{discover_root, CheckContext, EnvSnapshot};
use tracing::info;

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Sanity checks for the CEOAgent project scaffolding")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the project sanity checks
    Check {
        /// Project root (discovered from the current directory if omitted)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the registered sanity checks
    Checks,
    /// Print the discovered project root
    Root,
    /// Summarize the process environment
    Env {
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { root, json } => {
            run_checks(root, json).await?;
        }
        Commands::Checks => {
            list_checks(&default_registry());
        }
        Commands::Root => {
            print_root()?;
        }
        Commands::Env { json } => {
            print_env(json)?;
        }
    }

    Ok(())
}

async fn run_checks(root: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let root = match root {
        Some(root) => root,
        None => discover_root(&std::env::current_dir()?).map_err(|e| e.to_string())?,
    };
    info!(root = %root.display(), "running sanity checks");

    let registry = default_registry();
    let report = registry.run_all(&CheckContext::new(root)).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    report_result(&report).map_err(|e| e.to_string())?;
    Ok(())
}

fn list_checks(registry: &testkit::CheckRegistry) {
    println!("Registered checks:");

    if registry.is_empty() {
        println!("  No checks registered.");
    } else {
        for name in registry.list_checks() {
            if let Some(check) = registry.get_check(name) {
                println!("  - {}: {}", check.name(), check.description());
            }
        }
    }
}

fn print_root() -> Result<(), Box<dyn std::error::Error>> {
    let root = discover_root(&std::env::current_dir()?).map_err(|e| e.to_string())?;
    println!("{}", root.display());
    Ok(())
}

fn print_env(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = EnvSnapshot::capture();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{} environment variables", snapshot.len());
        for name in snapshot.names() {
            println!("  {}", name);
        }
    }

    Ok(())
}
