mod cli;

use clap::Parser;
use notes_client::{NoteClient, NoteStore, config};
use tracing_subscriber::EnvFilter;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let cfg = config::load_config().expect("failed to locate or load config");
    tracing::info!("Using notes service at {}", cfg.base_url);

    let client = NoteClient::new(&cfg).expect("failed to create HTTP client");

    // Mount-time load
    let store = NoteStore::mount(client).await;

    let result = cli::run(&store, args.command.unwrap_or(cli::Command::List)).await;

    println!("{}", cli::render(&store.snapshot()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
