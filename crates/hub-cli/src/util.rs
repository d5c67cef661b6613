use anyhow::{anyhow, Result};
use hub_core::error::CoreError;
use hub_core::repository::Repository;
use uuid::Uuid;

/// Resolves a short ID prefix against candidate `(id, label)` rows,
/// failing on no match or more than one.
fn pick_unique(matches: Vec<(Uuid, String)>, prefix: &str, kind: &str) -> Result<Uuid> {
    if matches.len() == 1 {
        return Ok(matches[0].0);
    }
    if matches.is_empty() {
        return Err(anyhow!(CoreError::NotFound(format!(
            "{} with ID prefix '{}'",
            kind, prefix
        ))));
    }
    let info = matches
        .into_iter()
        .map(|(id, label)| (id.to_string(), label))
        .collect();
    Err(anyhow!(CoreError::AmbiguousId(info)))
}

fn check_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    Ok(())
}

pub async fn resolve_todo_id(repo: &impl Repository, prefix: &str) -> Result<Uuid> {
    check_prefix(prefix)?;
    let matches = repo
        .find_todos_by_short_id_prefix(prefix)
        .await?
        .into_iter()
        .map(|t| (t.id, t.title))
        .collect();
    pick_unique(matches, prefix, "Todo")
}

pub async fn resolve_note_id(repo: &impl Repository, prefix: &str) -> Result<Uuid> {
    check_prefix(prefix)?;
    let matches = repo
        .find_notes_by_short_id_prefix(prefix)
        .await?
        .into_iter()
        .map(|n| (n.id, n.title))
        .collect();
    pick_unique(matches, prefix, "Note")
}

pub async fn resolve_snippet_id(repo: &impl Repository, prefix: &str) -> Result<Uuid> {
    check_prefix(prefix)?;
    let matches = repo
        .find_snippets_by_short_id_prefix(prefix)
        .await?
        .into_iter()
        .map(|s| (s.id, s.title))
        .collect();
    pick_unique(matches, prefix, "Snippet")
}

pub async fn resolve_relation_id(repo: &impl Repository, prefix: &str) -> Result<Uuid> {
    check_prefix(prefix)?;
    let matches = repo
        .find_relations_by_short_id_prefix(prefix)
        .await?
        .into_iter()
        .map(|r| (r.id, r.relation_type.to_string()))
        .collect();
    pick_unique(matches, prefix, "Relation")
}
