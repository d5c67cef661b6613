use crate::cli::{
    AddKeyGroupCommand, DeleteKeyGroupCommand, KeyCommand, KeySubcommand, ShowKeyGroupCommand,
};
use crate::views::table::{display_keychain_entries, display_keychain_groups};
use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use hub_core::error::CoreError;
use hub_core::models::{KeyEnvironment, NewKeychainGroupData};
use hub_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn key_command(repo: &impl Repository, command: KeyCommand) -> Result<()> {
    match command.command {
        KeySubcommand::Add(cmd) => add_group(repo, cmd).await,
        KeySubcommand::List => list_groups(repo).await,
        KeySubcommand::Show(cmd) => show_group(repo, cmd).await,
        KeySubcommand::Delete(cmd) => delete_group(repo, cmd).await,
    }
}

async fn add_group(repo: &impl Repository, command: AddKeyGroupCommand) -> Result<()> {
    let environment = command
        .env
        .as_deref()
        .map(|e| e.parse::<KeyEnvironment>())
        .transpose()
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))?;

    let mut entries = Vec::with_capacity(command.entries.len());
    for raw in &command.entries {
        let (label, value) = raw.split_once('=').ok_or_else(|| {
            anyhow!(CoreError::InvalidInput(format!(
                "entry '{}' is not in LABEL=VALUE form",
                raw
            )))
        })?;
        entries.push((label.to_string(), value.to_string()));
    }

    let group = repo
        .add_keychain_group(NewKeychainGroupData {
            name: command.name,
            service: command.service,
            environment,
            notes: command.notes,
            entries,
            project_names: command.projects,
        })
        .await?;

    println!(
        "{} Created key group: {} ({} entries)",
        "✓".green().bold(),
        group.name.bright_white().bold(),
        command.entries.len()
    );
    Ok(())
}

async fn list_groups(repo: &impl Repository) -> Result<()> {
    let groups = repo.find_keychain_groups().await?;
    let mut with_counts = Vec::with_capacity(groups.len());
    for group in groups {
        let count = repo.find_keychain_entries(group.id).await?.len();
        with_counts.push((group, count));
    }
    display_keychain_groups(&with_counts);
    Ok(())
}

async fn show_group(repo: &impl Repository, command: ShowKeyGroupCommand) -> Result<()> {
    let group = repo
        .find_keychain_group_by_name(&command.name)
        .await?
        .ok_or_else(|| {
            anyhow!(CoreError::NotFound(format!(
                "Keychain group '{}'",
                command.name
            )))
        })?;

    println!("{} ({})", group.name.bright_white().bold(), group.environment);
    if let Some(service) = &group.service {
        println!("Service: {}", service);
    }
    if let Some(notes) = &group.notes {
        println!("Notes: {}", notes);
    }

    let entries = repo.find_keychain_entries(group.id).await?;
    display_keychain_entries(&entries, command.reveal);

    if !command.reveal && !entries.is_empty() {
        println!("{}", "Values masked; pass --reveal to print them.".dimmed());
    }
    Ok(())
}

async fn delete_group(repo: &impl Repository, command: DeleteKeyGroupCommand) -> Result<()> {
    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Delete key group '{}' and all its entries?",
                command.name
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_keychain_group(&command.name).await?;
    println!("{} Deleted key group: {}", "✓".green().bold(), command.name);
    Ok(())
}
