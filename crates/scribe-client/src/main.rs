//! scribe: command-line client for a scribe server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scribe_client::{ClientConfig, HttpNotesApi, NotesController, Notifier};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(author, version, about = "Command-line client for scribe notes")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL (overrides SCRIBE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, most recently modified first
    List {
        /// Only show notes whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a note
    Add { title: String, content: String },

    /// Replace the title and content of a note
    Edit {
        id: String,
        title: String,
        content: String,
    },

    /// Delete a note
    Rm { id: String },

    /// Print a single note
    Show { id: String },
}

/// Prints alerts to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = ClientConfig::from_env().with_url(cli.url);
    let api = HttpNotesApi::new(config.server_url)?;
    let mut ctl = NotesController::new(api, StderrNotifier);

    let ok = match cli.command {
        Commands::List { search } => {
            if !ctl.load().await {
                return Ok(false);
            }
            ctl.set_search(search.unwrap_or_default());
            let rows = ctl.rows();
            if rows.is_empty() {
                match ctl.search().trim() {
                    "" => println!("No notes."),
                    query => println!("No notes matching {:?}.", query),
                }
            }
            for row in rows {
                println!("{}  {}", row.id, row.title);
                println!("    {}", row.meta);
            }
            true
        }
        Commands::Add { title, content } => {
            let ok = ctl.submit(&title, &content).await;
            if let Some(note) = ctl.notes().first().filter(|_| ok) {
                println!("Created {}", note.id);
            } else if title.trim().is_empty() || content.trim().is_empty() {
                eprintln!("Error: title and content must not be blank");
            }
            ok
        }
        Commands::Edit { id, title, content } => {
            if !ctl.load().await {
                return Ok(false);
            }
            if ctl.select(&id).is_none() {
                anyhow::bail!("Note not found: {}", id);
            }
            let ok = ctl.submit(&title, &content).await;
            if ok {
                println!("Updated {}", id);
            } else if title.trim().is_empty() || content.trim().is_empty() {
                eprintln!("Error: title and content must not be blank");
            }
            ok
        }
        Commands::Rm { id } => {
            let ok = ctl.delete(&id).await;
            if ok {
                println!("Deleted {}", id);
            }
            ok
        }
        Commands::Show { id } => {
            if !ctl.load().await {
                return Ok(false);
            }
            let Some(note) = ctl.notes().iter().find(|n| n.id == id) else {
                anyhow::bail!("Note not found: {}", id);
            };
            println!("{}", note.title);
            println!("id:      {}", note.id);
            println!("created: {}", note.created_at.to_rfc3339());
            if let Some(updated) = note.updated_at {
                println!("updated: {}", updated.to_rfc3339());
            }
            println!();
            println!("{}", note.content);
            true
        }
    };

    Ok(ok)
}
