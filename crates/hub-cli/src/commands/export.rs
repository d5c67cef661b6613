use crate::cli::ExportCommand;
use anyhow::Result;
use hub_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn export(repo: &impl Repository, command: ExportCommand) -> Result<()> {
    let snapshot = repo.export_all().await?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match command.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!(
                "{} Exported {} projects, {} todos to {}",
                "✓".green().bold(),
                snapshot.projects.len(),
                snapshot.todos.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
