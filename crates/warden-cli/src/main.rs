//! Warden - inspect and audit governance sidecar files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use warden_scope::ScopeSet;
use warden_store::{IntentStore, TraceLedger};

#[derive(Parser)]
#[command(name = "warden", version, about = "Inspect and audit agent governance sidecar files")]
struct Cli {
    /// Workspace directory containing .orchestration/
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared intents
    Intents,

    /// Print trace ledger records
    Trace {
        /// Only records for this intent id
        #[arg(long)]
        intent: Option<String>,

        /// Emit raw JSONL instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Check that every ledger record resolves to an intent and stayed in scope
    Audit,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Intents => run_intents(&cli),
        Commands::Trace { intent, json } => run_trace(&cli, intent.as_deref(), *json),
        Commands::Audit => run_audit(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_intents(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = IntentStore::new(&cli.workspace);
    let registry = store.load()?;

    if registry.active_intents.is_empty() {
        println!("{}", "No intents declared.".dimmed());
        return Ok(());
    }

    for intent in &registry.active_intents {
        println!(
            "{}  {}  {}",
            intent.id.cyan().bold(),
            format!("[{}]", intent.status).yellow(),
            intent.name
        );
        for glob in &intent.owned_scope {
            println!("    {}", glob.dimmed());
        }
    }
    Ok(())
}

fn run_trace(
    cli: &Cli,
    intent: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = TraceLedger::new(&cli.workspace);
    let records = match intent {
        Some(id) => ledger.entries_for_intent(id)?,
        None => ledger.read_all()?,
    };

    for record in &records {
        if json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            let files = record
                .files
                .iter()
                .map(|f| f.relative_path.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "{}  {}  {}  {}  {}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                record.intent_id.cyan(),
                record.tool.bold(),
                record.mutation_class.to_string().yellow(),
                if files.is_empty() { "(no files)".to_string() } else { files }
            );
        }
    }

    if records.is_empty() && !json {
        println!("{}", "No trace records.".dimmed());
    }
    Ok(())
}

fn run_audit(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = IntentStore::new(&cli.workspace);
    let ledger = TraceLedger::new(&cli.workspace);

    let registry = store.load()?;
    let records = ledger.read_all()?;

    let mut violations = 0usize;
    for record in &records {
        let Some(intent) = registry
            .active_intents
            .iter()
            .find(|i| i.id == record.intent_id)
        else {
            violations += 1;
            println!(
                "{} record {} names unknown intent '{}'",
                "ORPHAN".red().bold(),
                record.id,
                record.intent_id
            );
            continue;
        };

        let scope = ScopeSet::compile(&intent.owned_scope)?;
        for file in &record.files {
            if !scope.contains(&file.relative_path) {
                violations += 1;
                println!(
                    "{} record {} touched '{}' outside scope of {}",
                    "UNSCOPED".red().bold(),
                    record.id,
                    file.relative_path,
                    intent.id
                );
            }
        }
    }

    if violations == 0 {
        println!(
            "{} {} records, all resolvable and in scope",
            "OK".green().bold(),
            records.len()
        );
        Ok(())
    } else {
        Err(format!("{violations} audit violation(s)").into())
    }
}
