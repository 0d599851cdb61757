use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use textlens::config::Settings;
use textlens::document::read_document;
use textlens::nlp::Pipeline;
use textlens::{analyze, server};

#[derive(Parser)]
#[command(name = "textlens", about = "Sentiment, entity and key-phrase analysis over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the NLP pipeline and serve POST /analyze
    Serve {
        /// Optional TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, env = "TEXTLENS_HOST")]
        host: Option<String>,
        #[arg(short, long, env = "TEXTLENS_PORT")]
        port: Option<u16>,
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Analyze text or a document once and print the JSON result
    Analyze {
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

fn load_settings(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    workers: Option<usize>,
) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => Settings::load_from_file(&path)?,
        None => Settings::default(),
    };
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
    if workers.is_some() {
        settings.server.workers = workers;
    }
    Ok(settings)
}

fn serve(settings: Settings) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str())).init();
    info!("Loaded configuration: {:?}", settings);

    let pipeline = Pipeline::load()?;
    actix_web::rt::System::new().block_on(server::run_http_server(settings, pipeline))?;
    Ok(())
}

fn analyze_once(text: Option<String>, file: Option<PathBuf>, pretty: bool) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_document(&path)?,
        (None, None) => return Err(anyhow!("either --text or --file is required")),
    };

    let pipeline = Pipeline::load()?;
    let response = analyze(&pipeline, &text)?;
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config, host, port, workers } => {
            serve(load_settings(config, host, port, workers)?)?
        }
        Commands::Analyze { text, file, pretty } => analyze_once(text, file, pretty)?,
    }
    Ok(())
}
