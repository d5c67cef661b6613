use crate::cli::{
    AddProjectCommand, DeleteProjectCommand, EditProjectCommand, ListProjectsCommand,
    ProjectCommand, ProjectNameCommand, ProjectSubcommand,
};
use crate::config::{Config, ProjectView};
use crate::views::table::{display_projects, display_projects_compact, display_tags, ViewProject};
use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use hub_core::error::CoreError;
use hub_core::models::{NewProjectData, ProjectStatus, UpdateProjectData};
use hub_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

pub async fn project_command(
    repo: &impl Repository,
    command: ProjectCommand,
    config: &Config,
) -> Result<()> {
    match command.command {
        ProjectSubcommand::Add(cmd) => add_project(repo, cmd).await,
        ProjectSubcommand::List(cmd) => list_projects(repo, cmd, config).await,
        ProjectSubcommand::Edit(cmd) => edit_project(repo, cmd).await,
        ProjectSubcommand::Archive(cmd) => archive_project(repo, cmd).await,
        ProjectSubcommand::Delete(cmd) => delete_project(repo, cmd).await,
        ProjectSubcommand::Tags => {
            let tags = repo.find_tags().await?;
            display_tags(&tags);
            Ok(())
        }
    }
}

async fn add_project(repo: &impl Repository, command: AddProjectCommand) -> Result<()> {
    let status = parse_status(command.status.as_deref())?;

    let project = repo
        .add_project(NewProjectData {
            name: command.name,
            description: command.description,
            status,
            color: command.color,
            icon: command.icon,
            github_url: command.github,
            notes_url: command.notes_url,
            local_path: command.path,
            tags: command.tags,
        })
        .await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Created project: {}",
        "✓".style(success_style),
        project.name.bright_white().bold()
    );
    Ok(())
}

async fn list_projects(
    repo: &impl Repository,
    command: ListProjectsCommand,
    config: &Config,
) -> Result<()> {
    let status = parse_status(command.status.as_deref())?;

    let projects = repo.find_projects().await?;
    let mut views = Vec::new();
    for project in projects {
        match &status {
            Some(wanted) if project.status != *wanted => continue,
            // Archived projects are hidden unless asked for.
            None if project.status == ProjectStatus::Archived && !command.archived => continue,
            _ => {}
        }
        let tags = repo
            .find_project_tags(project.id)
            .await?
            .into_iter()
            .map(|t| t.name)
            .collect();
        views.push(ViewProject {
            id: project.id,
            name: project.name,
            status: project.status,
            color: project.color,
            icon: project.icon,
            tags,
            created_at: project.created_at,
        });
    }

    match config.ui.project_view {
        ProjectView::Grid => display_projects(&views),
        ProjectView::List => display_projects_compact(&views),
    }
    Ok(())
}

async fn edit_project(repo: &impl Repository, command: EditProjectCommand) -> Result<()> {
    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let project = repo
        .update_project(
            &command.name,
            UpdateProjectData {
                name: command.rename,
                description,
                status: parse_status(command.status.as_deref())?,
                color: command.color,
                icon: command.icon.map(Some),
                github_url: command.github.map(Some),
                notes_url: command.notes_url.map(Some),
                local_path: command.path.map(Some),
                add_tags: if command.add_tag.is_empty() {
                    None
                } else {
                    Some(command.add_tag)
                },
                remove_tags: if command.remove_tag.is_empty() {
                    None
                } else {
                    Some(command.remove_tag)
                },
            },
        )
        .await?;

    println!("{} Updated project: {}", "✓".green().bold(), project.name);
    Ok(())
}

async fn archive_project(repo: &impl Repository, command: ProjectNameCommand) -> Result<()> {
    let project = repo
        .update_project(
            &command.name,
            UpdateProjectData {
                status: Some(ProjectStatus::Archived),
                ..Default::default()
            },
        )
        .await?;
    println!("{} Archived project: {}", "✓".green().bold(), project.name);
    Ok(())
}

async fn delete_project(repo: &impl Repository, command: DeleteProjectCommand) -> Result<()> {
    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete project '{}'? Linked todos, notes, and keys keep existing.",
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

    repo.delete_project(&command.name).await?;
    println!("{} Deleted project: {}", "✓".green().bold(), command.name);
    Ok(())
}

fn parse_status(input: Option<&str>) -> Result<Option<ProjectStatus>> {
    input
        .map(|s| s.parse::<ProjectStatus>())
        .transpose()
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))
}
