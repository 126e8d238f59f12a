//! bible-crentech command line
//!
//! Every subcommand prints its `CommandResponse` as pretty JSON on stdout.
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use bible_crentech::commands;
use bible_crentech::models::settings::{AppTheme, BibleVersion, SettingsUpdate};
use bible_crentech::{AppState, CommandResponse};

#[derive(Parser, Debug)]
#[command(name = "bible-crentech", version, about = "Bible reader, search and donations")]
struct Cli {
    /// Config file (default: ~/.bible-crentech/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference store (default: ~/.bible-crentech/preferences.json)
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a reference such as "jo3", "ap 11.4" or "1 Samuel 2:5-9"
    Parse { query: Vec<String> },
    /// Book suggestions for a partial name
    Suggest { query: String },
    /// List all books
    Books,
    /// Print a whole chapter
    Read { book: String, chapter: u32 },
    /// Search by reference or theme
    Search {
        query: Vec<String>,
        /// Translation code (NVI, ACF, ARC, NBV, BAM, TNM, NTLH)
        #[arg(long)]
        translation: Option<String>,
    },
    /// Show the verse history
    History {
        /// Clear it instead
        #[arg(long)]
        clear: bool,
    },
    /// Generate a PIX donation code
    Pix {
        /// Amount such as 10 or 10,50
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        txid: Option<String>,
    },
    /// Check an existing PIX code
    VerifyPix { payload: String },
    /// Show the settings
    Settings,
    /// Change settings
    Set {
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        history_limit: Option<usize>,
    },
    /// Split a whole-Bible JSON file into per-book files
    Split {
        source: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Service health
    Health,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print<T: Serialize>(response: &CommandResponse<T>) -> anyhow::Result<bool> {
    let json = serde_json::to_string_pretty(response).context("serialize response")?;
    println!("{}", json);
    Ok(response.success)
}

fn parse_version(code: &str) -> anyhow::Result<BibleVersion> {
    BibleVersion::from_code(code).with_context(|| format!("unknown translation: {}", code))
}

fn parse_theme(name: &str) -> anyhow::Result<AppTheme> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
        .with_context(|| format!("unknown theme: {}", name))
}

async fn initialize(cli: &Cli) -> anyhow::Result<AppState> {
    let state = AppState::new();
    match (&cli.config, &cli.preferences) {
        (None, None) => state.initialize().await,
        _ => {
            let config = match &cli.config {
                Some(path) => path.clone(),
                None => bible_crentech::utils::paths::config_path()?,
            };
            let preferences = match &cli.preferences {
                Some(path) => path.clone(),
                None => bible_crentech::utils::paths::preferences_path()?,
            };
            state.initialize_with(config, preferences).await
        }
    }
    .context("initialize application state")?;
    Ok(state)
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match &cli.cmd {
        Cmd::Parse { query } => return print(&commands::parse_reference(&query.join(" ")).await),
        Cmd::Suggest { query } => return print(&commands::suggest_books(query).await),
        Cmd::Books => return print(&commands::list_books().await),
        Cmd::VerifyPix { payload } => return print(&commands::verify_pix(payload).await),
        _ => {}
    }

    let state = initialize(&cli).await?;
    match cli.cmd {
        Cmd::Read { book, chapter } => print(&commands::read_chapter(&state, &book, chapter).await),
        Cmd::Search { query, translation } => {
            let version = translation.as_deref().map(parse_version).transpose()?;
            print(&commands::search(&state, &query.join(" "), version).await)
        }
        Cmd::History { clear: true } => print(&commands::clear_history(&state).await),
        Cmd::History { clear: false } => print(&commands::get_history(&state).await),
        Cmd::Pix { amount, txid } => {
            print(&commands::generate_pix(&state, amount.as_deref(), txid.as_deref()).await)
        }
        Cmd::Settings => print(&commands::get_settings(&state).await),
        Cmd::Set {
            theme,
            translation,
            data_dir,
            history_limit,
        } => {
            let update = SettingsUpdate {
                theme: theme.as_deref().map(parse_theme).transpose()?,
                translation: translation.as_deref().map(parse_version).transpose()?,
                data_dir,
                history_limit,
                pix: None,
            };
            print(&commands::update_settings(&state, update).await)
        }
        Cmd::Split { source, out } => print(&commands::split_bible(&state, &source, out).await),
        Cmd::Health => print(&commands::get_health(&state).await),
        Cmd::Parse { .. } | Cmd::Suggest { .. } | Cmd::Books | Cmd::VerifyPix { .. } => Ok(true),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
