use crate::cli::{AddLinkCommand, DeleteLinkCommand, LinkCommand, LinkSubcommand};
use crate::util::resolve_relation_id;
use crate::views::table::{display_relations, ViewRelation};
use anyhow::{anyhow, Result};
use hub_core::error::CoreError;
use hub_core::models::{NewRelationData, RelationType};
use hub_core::repository::Repository;
use owo_colors::OwoColorize;
use std::collections::HashMap;
use uuid::Uuid;

pub async fn link_command(repo: &impl Repository, command: LinkCommand) -> Result<()> {
    match command.command {
        LinkSubcommand::Add(cmd) => add_link(repo, cmd).await,
        LinkSubcommand::List => list_links(repo).await,
        LinkSubcommand::Delete(cmd) => delete_link(repo, cmd).await,
    }
}

async fn add_link(repo: &impl Repository, command: AddLinkCommand) -> Result<()> {
    let relation_type = command
        .kind
        .as_deref()
        .map(|k| k.parse::<RelationType>())
        .transpose()
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))?;

    let relation = repo
        .add_relation(NewRelationData {
            source: command.source.clone(),
            target: command.target.clone(),
            relation_type,
            label: command.label,
        })
        .await?;

    println!(
        "{} {} ──{}──▶ {}",
        "✓".green().bold(),
        command.source.bright_white(),
        relation.relation_type.to_string().magenta(),
        command.target.bright_white()
    );
    Ok(())
}

async fn list_links(repo: &impl Repository) -> Result<()> {
    let names = project_names(repo).await?;
    let relations = repo.find_relations().await?;

    let views: Vec<ViewRelation> = relations
        .into_iter()
        .map(|r| ViewRelation {
            id: r.id,
            source: name_of(&names, r.source_id),
            target: name_of(&names, r.target_id),
            kind: r.relation_type.to_string(),
            label: r.label,
        })
        .collect();

    display_relations(&views);
    Ok(())
}

async fn delete_link(repo: &impl Repository, command: DeleteLinkCommand) -> Result<()> {
    let id = resolve_relation_id(repo, &command.id).await?;
    repo.delete_relation(id).await?;
    println!("{} Relation deleted.", "✓".green().bold());
    Ok(())
}

/// Adjacency view of the project graph: each project followed by its
/// outgoing edges, isolated projects listed at the end.
pub async fn map(repo: &impl Repository) -> Result<()> {
    let projects = repo.find_projects().await?;
    let relations = repo.find_relations().await?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let names = project_names(repo).await?;
    let mut outgoing: HashMap<Uuid, Vec<&hub_core::models::ProjectRelation>> = HashMap::new();
    for relation in &relations {
        outgoing.entry(relation.source_id).or_default().push(relation);
    }

    let mut isolated = Vec::new();
    for project in &projects {
        let has_incoming = relations.iter().any(|r| r.target_id == project.id);
        match outgoing.get(&project.id) {
            Some(edges) => {
                println!("{}", project.name.bright_white().bold());
                for edge in edges {
                    let label = edge
                        .label
                        .as_deref()
                        .map(|l| format!(" ({})", l))
                        .unwrap_or_default();
                    println!(
                        "  ──{}──▶ {}{}",
                        edge.relation_type.to_string().magenta(),
                        name_of(&names, edge.target_id),
                        label.dimmed()
                    );
                }
            }
            None if has_incoming => {
                println!("{}", project.name.bright_white().bold());
            }
            None => isolated.push(project.name.as_str()),
        }
    }

    if !isolated.is_empty() {
        println!("{} {}", "Unconnected:".dimmed(), isolated.join(", "));
    }
    Ok(())
}

async fn project_names(repo: &impl Repository) -> Result<HashMap<Uuid, String>> {
    Ok(repo
        .find_projects()
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}

fn name_of(names: &HashMap<Uuid, String>, id: Uuid) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| id.to_string()[..7].to_string())
}
