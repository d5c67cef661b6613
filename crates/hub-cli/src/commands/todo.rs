use crate::cli::{
    AddTodoCommand, DeleteTodoCommand, EditTodoCommand, ListTodosCommand, TodoCommand,
    TodoIdCommand, TodoSubcommand,
};
use crate::config::Config;
use crate::parser::parse_due_date;
use crate::query_parser;
use crate::util::resolve_todo_id;
use crate::views::table::{display_todos, ViewTodo};
use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use hub_core::dates::{self, Urgency};
use hub_core::error::CoreError;
use hub_core::models::{CompletionResult, NewTodoData, TodoPriority, UpdateTodoData};
use hub_core::query::{Filter, Operator, Query};
use hub_core::recurrence::Recurrence;
use hub_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

pub async fn todo_command(
    repo: &impl Repository,
    command: TodoCommand,
    config: &Config,
) -> Result<()> {
    match command.command {
        TodoSubcommand::Add(cmd) => add_todo(repo, cmd).await,
        TodoSubcommand::List(cmd) => list_todos(repo, cmd, config).await,
        TodoSubcommand::Done(cmd) => done_todo(repo, cmd).await,
        TodoSubcommand::Reopen(cmd) => reopen_todo(repo, cmd).await,
        TodoSubcommand::Edit(cmd) => edit_todo(repo, cmd).await,
        TodoSubcommand::Delete(cmd) => delete_todo(repo, cmd).await,
    }
}

async fn add_todo(repo: &impl Repository, command: AddTodoCommand) -> Result<()> {
    let priority = parse_priority(command.priority.as_deref())?;
    let recurrence = parse_recurrence(command.every.as_deref())?;

    // An explicit --due is the date-picker path; it suppresses extraction
    // so the title is stored verbatim.
    let (title, due_at, parsed_from_title) = if let Some(due_str) = &command.due {
        (
            command.title.trim().to_string(),
            Some(parse_due_date(due_str)?),
            false,
        )
    } else if command.no_parse {
        (command.title.trim().to_string(), None, false)
    } else {
        let extraction = dates::extract(&command.title);
        let parsed = extraction.date.is_some();
        (extraction.clean_title, extraction.date, parsed)
    };

    if title.is_empty() {
        return Err(anyhow!(CoreError::InvalidInput(
            "todo title cannot be empty (the whole title parsed as a date phrase)".to_string()
        )));
    }

    let added = repo
        .add_todo(NewTodoData {
            title,
            description: command.description,
            due_at,
            priority,
            recurrence: recurrence.map(|r| r.to_string()),
            project_names: command.projects,
        })
        .await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created todo: {}",
        "✓".style(success_style),
        added.title.bright_white().bold()
    );
    println!(
        "  {} ID: {}",
        "→".style(info_style),
        added.id.to_string().yellow()
    );
    if let Some(due) = added.due_at {
        let label = dates::format_smart_with_time(due);
        if parsed_from_title {
            println!(
                "  {} Due: {} (parsed from title)",
                "→".style(info_style),
                label.cyan()
            );
        } else {
            println!("  {} Due: {}", "→".style(info_style), label.cyan());
        }
    }
    if let Some(rule) = &added.recurrence {
        println!("  {} Repeats: {}", "→".style(info_style), rule.cyan());
    }

    Ok(())
}

async fn list_todos(
    repo: &impl Repository,
    command: ListTodosCommand,
    config: &Config,
) -> Result<()> {
    let query_str = if command.query.is_empty() && !config.default_filters.is_empty() {
        config.default_filters.join(" and ")
    } else {
        command.query
    };

    let mut query = query_parser::parse_query(&query_str)?;
    if !command.all {
        query = match query {
            Query::All => Query::Filter(Filter::Completed(false)),
            other => Query::Binary {
                op: Operator::And,
                left: Box::new(other),
                right: Box::new(Query::Filter(Filter::Completed(false))),
            },
        };
    }

    let todos = repo.find_todos_with_details(&query).await?;

    let mut view_todos: Vec<ViewTodo> = todos
        .into_iter()
        .map(|t| {
            let projects = t
                .project_names
                .map_or_else(Vec::new, |s| s.split(',').map(String::from).collect());
            ViewTodo {
                id: t.id,
                title: t.title,
                priority: t.priority,
                due_at: t.due_at,
                is_completed: t.is_completed,
                recurring: t.recurrence.is_some(),
                projects,
            }
        })
        .collect();

    // Most pressing first: urgency tier, then due date, then priority.
    view_todos.sort_by(|a, b| {
        dates::classify(a.due_at)
            .cmp(&dates::classify(b.due_at))
            .then_with(|| a.due_at.cmp(&b.due_at))
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let overdue = view_todos
        .iter()
        .filter(|t| !t.is_completed && dates::classify(t.due_at) == Urgency::Overdue)
        .count();

    display_todos(&view_todos);
    if overdue > 0 {
        println!("{}", format!("{} overdue", overdue).red().bold());
    }

    Ok(())
}

async fn done_todo(repo: &impl Repository, command: TodoIdCommand) -> Result<()> {
    let id = resolve_todo_id(repo, &command.id).await?;
    match repo.complete_todo(id).await? {
        CompletionResult::Single(todo) => {
            println!("{} Completed: {}", "✓".green().bold(), todo.title);
        }
        CompletionResult::Recurring { completed, next } => {
            println!("{} Completed: {}", "✓".green().bold(), completed.title);
            if let Some(due) = next.due_at {
                println!(
                    "  {} Next occurrence: {}",
                    "↻".blue(),
                    dates::format_smart_with_time(due).cyan()
                );
            }
        }
    }
    Ok(())
}

async fn reopen_todo(repo: &impl Repository, command: TodoIdCommand) -> Result<()> {
    let id = resolve_todo_id(repo, &command.id).await?;
    let todo = repo.reopen_todo(id).await?;
    println!("{} Reopened: {}", "✓".green().bold(), todo.title);
    Ok(())
}

async fn edit_todo(repo: &impl Repository, command: EditTodoCommand) -> Result<()> {
    let id = resolve_todo_id(repo, &command.id).await?;

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };
    let due_at = if command.due_clear {
        Some(None)
    } else if let Some(due_str) = &command.due {
        Some(Some(parse_due_date(due_str)?))
    } else {
        None
    };
    let recurrence = if command.every_clear {
        Some(None)
    } else {
        parse_recurrence(command.every.as_deref())?.map(|r| Some(r.to_string()))
    };

    let updated = repo
        .update_todo(
            id,
            UpdateTodoData {
                title: command.title,
                description,
                due_at,
                priority: parse_priority(command.priority.as_deref())?,
                recurrence,
                project_names: command.projects,
            },
        )
        .await?;

    println!("{} Updated todo: {}", "✓".green().bold(), updated.title);
    Ok(())
}

async fn delete_todo(repo: &impl Repository, command: DeleteTodoCommand) -> Result<()> {
    let id = resolve_todo_id(repo, &command.id).await?;
    let todo = repo
        .find_todo_by_id(id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("Todo '{}'", command.id))))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete todo '{}'?",
                todo.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_todo(id).await?;
    println!("{} Deleted: {}", "✓".green().bold(), todo.title);
    Ok(())
}

fn parse_priority(input: Option<&str>) -> Result<Option<TodoPriority>> {
    input
        .map(|p| p.parse::<TodoPriority>())
        .transpose()
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))
}

fn parse_recurrence(input: Option<&str>) -> Result<Option<Recurrence>> {
    input
        .map(|r| r.parse::<Recurrence>())
        .transpose()
        .map_err(|e| anyhow!(CoreError::InvalidInput(e.to_string())))
}
