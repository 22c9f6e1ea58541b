use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bizagent::address::{parse_addresses, to_csv_string, write_parsed, UploadedTable, PREVIEW_ROWS};
use bizagent::ai::{has_content, DraftOutcome, OpenAIProvider, ResponseDrafter, EMPTY_INPUT_WARNING};
use bizagent::config::Config;
use bizagent::logging::{self, LogLevel};
use bizagent::web_ui::WebUI;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Draft humanized responses or parse addresses into columns for Google Sheets.
#[derive(Parser)]
#[command(name = "bizagent", version, about)]
struct Cli {
    /// Configuration file (defaults to ./bizagent.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draft a reply to a review or email (reads stdin when TEXT is omitted)
    Draft { text: Option<String> },

    /// Split a one-column CSV of addresses into street and city/state/ZIP
    Parse {
        input: PathBuf,

        /// Write the parsed CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the first rows of the input and the result to stderr
        #[arg(long)]
        preview: bool,
    },

    /// Serve the web UI
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write the effective configuration (without the API key) to a file
    InitConfig {
        #[arg(default_value = "bizagent.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.log_level.unwrap_or(config.log_level))?;

    match cli.command {
        Command::Draft { text } => run_draft(&config, text).await,
        Command::Parse { input, output, preview } => run_parse(input, output, preview),
        Command::Serve { port } => run_serve(&config, port).await,
        Command::InitConfig { path } => {
            Config { openai_api_key: None, ..config }.save(&path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_drafter(config: &Config) -> ResponseDrafter {
    let provider = OpenAIProvider::from_config(config);
    let model = provider.model().to_string();
    let drafter = ResponseDrafter::new(Arc::new(provider)).with_temperature(config.temperature);
    info!("Drafting with model {} at temperature {}", model, drafter.temperature());
    drafter
}

async fn run_draft(config: &Config, text: Option<String>) -> Result<ExitCode, BoxError> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if !has_content(&text) {
        eprintln!("{}", EMPTY_INPUT_WARNING.yellow());
        return Ok(ExitCode::FAILURE);
    }

    eprintln!("{}", "Crafting your response...".dimmed());
    let outcome = build_drafter(config).draft_outcome(&text).await;
    match &outcome {
        DraftOutcome::Reply(_) => {
            eprintln!("{}", "✅ Response Generated".green());
            println!("{}", outcome.display_text());
            Ok(ExitCode::SUCCESS)
        }
        DraftOutcome::Failed(_) => {
            eprintln!("{}", outcome.display_text().red());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_parse(input: PathBuf, output: Option<PathBuf>, preview: bool) -> Result<ExitCode, BoxError> {
    let table = UploadedTable::from_path(&input)?;
    if preview {
        eprintln!("{}", "Preview of Uploaded Data:".bold());
        eprint!("{}", table.preview(PREVIEW_ROWS)?);
    }

    let parsed = parse_addresses(table.addresses());
    info!("Parsed {} addresses from {:?}", parsed.len(), input);

    if preview {
        eprintln!("{}", "Parsed:".bold());
        eprint!("{}", to_csv_string(&parsed[..parsed.len().min(PREVIEW_ROWS)])?);
    }

    match output {
        Some(path) => {
            write_parsed(BufWriter::new(File::create(&path)?), &parsed)?;
            eprintln!("{} {}", "✅ Parsing Complete!".green(), path.display());
        }
        None => write_parsed(io::stdout().lock(), &parsed)?,
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_serve(config: &Config, port: Option<u16>) -> Result<ExitCode, BoxError> {
    let drafter = Arc::new(build_drafter(config));
    let web_ui = WebUI::new(drafter, port.unwrap_or(config.web_ui_port));

    web_ui
        .run(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down.");
            }
        })
        .await?;
    Ok(ExitCode::SUCCESS)
}
