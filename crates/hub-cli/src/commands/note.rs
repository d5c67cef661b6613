use crate::cli::{AddNoteCommand, DeleteNoteCommand, NoteCommand, NoteIdCommand, NoteSubcommand};
use crate::util::resolve_note_id;
use crate::views::table::display_notes;
use anyhow::Result;
use dialoguer::Confirm;
use hub_core::models::NewNoteData;
use hub_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn note_command(repo: &impl Repository, command: NoteCommand) -> Result<()> {
    match command.command {
        NoteSubcommand::Add(cmd) => add_note(repo, cmd).await,
        NoteSubcommand::List => {
            let notes = repo.find_notes().await?;
            display_notes(&notes);
            Ok(())
        }
        NoteSubcommand::Pin(cmd) => set_pinned(repo, cmd, true).await,
        NoteSubcommand::Unpin(cmd) => set_pinned(repo, cmd, false).await,
        NoteSubcommand::Delete(cmd) => delete_note(repo, cmd).await,
    }
}

async fn add_note(repo: &impl Repository, command: AddNoteCommand) -> Result<()> {
    let note = repo
        .add_note(NewNoteData {
            title: command.title,
            content: command.content,
            is_pinned: command.pin,
            project_names: command.projects,
        })
        .await?;

    println!(
        "{} Created note: {}",
        "✓".green().bold(),
        note.title.bright_white().bold()
    );
    println!("  {} ID: {}", "→".blue(), note.id.to_string().yellow());
    Ok(())
}

async fn set_pinned(repo: &impl Repository, command: NoteIdCommand, pinned: bool) -> Result<()> {
    let id = resolve_note_id(repo, &command.id).await?;
    let note = repo.set_note_pinned(id, pinned).await?;
    if pinned {
        println!("{} Pinned: {}", "✓".green().bold(), note.title);
    } else {
        println!("{} Unpinned: {}", "✓".green().bold(), note.title);
    }
    Ok(())
}

async fn delete_note(repo: &impl Repository, command: DeleteNoteCommand) -> Result<()> {
    let id = resolve_note_id(repo, &command.id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt("Are you sure you want to delete this note?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_note(id).await?;
    println!("{} Note deleted.", "✓".green().bold());
    Ok(())
}
