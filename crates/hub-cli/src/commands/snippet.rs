use crate::cli::{
    AddSnippetCommand, DeleteSnippetCommand, FavoriteSnippetCommand, ListSnippetsCommand,
    SnippetCommand, SnippetSubcommand,
};
use crate::util::resolve_snippet_id;
use crate::views::table::display_snippets;
use anyhow::{bail, Result};
use dialoguer::Confirm;
use hub_core::models::NewSnippetData;
use hub_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn snippet_command(repo: &impl Repository, command: SnippetCommand) -> Result<()> {
    match command.command {
        SnippetSubcommand::Add(cmd) => add_snippet(repo, cmd).await,
        SnippetSubcommand::List(cmd) => list_snippets(repo, cmd).await,
        SnippetSubcommand::Favorite(cmd) => favorite_snippet(repo, cmd).await,
        SnippetSubcommand::Delete(cmd) => delete_snippet(repo, cmd).await,
    }
}

async fn add_snippet(repo: &impl Repository, command: AddSnippetCommand) -> Result<()> {
    let code = match (&command.code, &command.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => bail!("either --code or --file is required"),
    };

    let snippet = repo
        .add_snippet(NewSnippetData {
            title: command.title,
            language: command.language,
            code,
            description: command.description,
            project_name: command.project,
        })
        .await?;

    println!(
        "{} Created snippet: {}",
        "✓".green().bold(),
        snippet.title.bright_white().bold()
    );
    println!("  {} ID: {}", "→".blue(), snippet.id.to_string().yellow());
    Ok(())
}

async fn list_snippets(repo: &impl Repository, command: ListSnippetsCommand) -> Result<()> {
    let snippets = repo
        .find_snippets(command.language.as_deref(), command.favorites)
        .await?;
    display_snippets(&snippets);
    Ok(())
}

async fn favorite_snippet(repo: &impl Repository, command: FavoriteSnippetCommand) -> Result<()> {
    let id = resolve_snippet_id(repo, &command.id).await?;
    let snippet = repo.set_snippet_favorite(id, !command.remove).await?;
    if command.remove {
        println!("{} Unfavorited: {}", "✓".green().bold(), snippet.title);
    } else {
        println!("{} Favorited: {}", "★".yellow().bold(), snippet.title);
    }
    Ok(())
}

async fn delete_snippet(repo: &impl Repository, command: DeleteSnippetCommand) -> Result<()> {
    let id = resolve_snippet_id(repo, &command.id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt("Are you sure you want to delete this snippet?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_snippet(id).await?;
    println!("{} Snippet deleted.", "✓".green().bold());
    Ok(())
}
