use clap::Parser;
use hub_core::db;
use hub_core::error::CoreError;
use hub_core::repository::SqliteRepository;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod parser;
mod query_parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::load().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Todo(command) => {
            commands::todo::todo_command(&repository, command, &config).await
        }
        cli::Commands::Project(command) => {
            commands::project::project_command(&repository, command, &config).await
        }
        cli::Commands::Note(command) => commands::note::note_command(&repository, command).await,
        cli::Commands::Snippet(command) => {
            commands::snippet::snippet_command(&repository, command).await
        }
        cli::Commands::Key(command) => commands::keychain::key_command(&repository, command).await,
        cli::Commands::Link(command) => {
            commands::relation::link_command(&repository, command).await
        }
        cli::Commands::Map => commands::relation::map(&repository).await,
        cli::Commands::Export(command) => commands::export::export(&repository, command).await,
        cli::Commands::Config => {
            let rendered = serde_json::to_string_pretty(&config)
                .unwrap_or_else(|_| "{}".to_string());
            println!("{rendered}");
            Ok(())
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {} not found.", "Error:".style(error_style), s);
            }
            CoreError::AlreadyExists(s) => {
                eprintln!("{} {} already exists.", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(items) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, label) in items {
                    eprintln!("  {} ({})", id.yellow(), label);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
