use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use hub_core::dates::{self, Urgency};
use hub_core::models::{
    KeyEnvironment, KeychainEntry, KeychainGroup, Note, ProjectStatus, Snippet, Tag, TodoPriority,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ViewTodo {
    pub id: Uuid,
    pub title: String,
    pub priority: TodoPriority,
    pub due_at: Option<NaiveDateTime>,
    pub is_completed: bool,
    pub recurring: bool,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ViewProject {
    pub id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
    pub color: String,
    pub icon: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ViewRelation {
    pub id: Uuid,
    pub source: String,
    pub target: String,
    pub kind: String,
    pub label: Option<String>,
}

pub fn display_todos(todos: &[ViewTodo]) {
    if todos.is_empty() {
        println!("No todos found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Priority", "Due", "Projects"]);

    for todo in todos {
        let mut row = Row::new();
        row.add_cell(Cell::new(&todo.id.to_string()[..7]));

        let mut display_title = String::new();
        if todo.recurring {
            display_title.push('↻');
            display_title.push(' ');
        }
        display_title.push_str(&todo.title);

        let mut title_cell = Cell::new(display_title);
        if todo.is_completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        }
        row.add_cell(title_cell);

        let priority_cell = match todo.priority {
            TodoPriority::Urgent => Cell::new("urgent")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            TodoPriority::High => Cell::new("high").fg(Color::Yellow),
            TodoPriority::Medium => Cell::new("medium").fg(Color::Blue),
            TodoPriority::Low => Cell::new("low").fg(Color::DarkGrey),
        };
        row.add_cell(priority_cell);

        row.add_cell(due_cell(todo.due_at, todo.is_completed));

        row.add_cell(Cell::new(if todo.projects.is_empty() {
            "None".to_string()
        } else {
            todo.projects.join(", ")
        }));
        table.add_row(row);
    }

    println!("{table}");
}

/// Smart label colored by urgency tier; completed todos stay uncolored.
fn due_cell(due_at: Option<NaiveDateTime>, is_completed: bool) -> Cell {
    let Some(due_at) = due_at else {
        return Cell::new("None").fg(Color::DarkGrey);
    };
    let label = dates::format_smart_with_time(due_at);
    if is_completed {
        return Cell::new(label);
    }
    match dates::classify(Some(due_at)) {
        Urgency::Overdue => Cell::new(label).fg(Color::Red).add_attribute(Attribute::Bold),
        Urgency::Today => Cell::new(label).fg(Color::Yellow),
        Urgency::Soon => Cell::new(label).fg(Color::Cyan),
        Urgency::Later | Urgency::None => Cell::new(label),
    }
}

pub fn display_projects(projects: &[ViewProject]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Status", "Tags", "Created"]);

    for project in projects {
        let mut row = Row::new();

        let display_name = match &project.icon {
            Some(icon) => format!("{} {}", icon, project.name),
            None => project.name.clone(),
        };
        let mut name_cell = Cell::new(display_name);
        if let Some((r, g, b)) = parse_hex_color(&project.color) {
            name_cell = name_cell.fg(Color::Rgb { r, g, b });
        }
        row.add_cell(name_cell);

        let status_cell = match project.status {
            ProjectStatus::Active => Cell::new("active").fg(Color::Green),
            ProjectStatus::Idea => Cell::new("idea").fg(Color::Blue),
            ProjectStatus::Paused => Cell::new("paused").fg(Color::Yellow),
            ProjectStatus::Completed => Cell::new("completed").fg(Color::DarkGrey),
            ProjectStatus::Archived => Cell::new("archived")
                .fg(Color::DarkGrey)
                .add_attribute(Attribute::CrossedOut),
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(if project.tags.is_empty() {
            "None".to_string()
        } else {
            project.tags.join(", ")
        }));
        row.add_cell(Cell::new(project.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

/// Compact one-line listing, the CLI analogue of the dashboard's list view.
pub fn display_projects_compact(projects: &[ViewProject]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for project in projects {
        println!("{}  [{}]", project.name, project.status);
    }
}

pub fn display_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Updated"]);

    for note in notes {
        let mut row = Row::new();
        row.add_cell(Cell::new(&note.id.to_string()[..7]));
        let title = if note.is_pinned {
            format!("📌 {}", note.title)
        } else {
            note.title.clone()
        };
        row.add_cell(Cell::new(title));
        row.add_cell(Cell::new(note.updated_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_snippets(snippets: &[Snippet]) {
    if snippets.is_empty() {
        println!("No snippets found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Language", "Updated"]);

    for snippet in snippets {
        let mut row = Row::new();
        row.add_cell(Cell::new(&snippet.id.to_string()[..7]));
        let title = if snippet.is_favorite {
            format!("★ {}", snippet.title)
        } else {
            snippet.title.clone()
        };
        row.add_cell(Cell::new(title));
        row.add_cell(Cell::new(&snippet.language).fg(Color::Cyan));
        row.add_cell(Cell::new(snippet.updated_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_keychain_groups(groups: &[(KeychainGroup, usize)]) {
    if groups.is_empty() {
        println!("No key groups found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Service", "Environment", "Entries"]);

    for (group, entry_count) in groups {
        let mut row = Row::new();
        let name = if group.is_favorite {
            format!("★ {}", group.name)
        } else {
            group.name.clone()
        };
        row.add_cell(Cell::new(name));
        row.add_cell(Cell::new(group.service.as_deref().unwrap_or("None")));
        row.add_cell(environment_cell(&group.environment));
        row.add_cell(Cell::new(entry_count.to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

fn environment_cell(environment: &KeyEnvironment) -> Cell {
    match environment {
        KeyEnvironment::Production => Cell::new("production").fg(Color::Red),
        KeyEnvironment::Staging => Cell::new("staging").fg(Color::Yellow),
        KeyEnvironment::Development => Cell::new("development").fg(Color::Green),
    }
}

pub fn display_keychain_entries(entries: &[KeychainEntry], reveal: bool) {
    if entries.is_empty() {
        println!("No entries.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Label", "Value"]);

    for entry in entries {
        let mut row = Row::new();
        row.add_cell(Cell::new(&entry.label));
        let value = if reveal {
            entry.value.clone()
        } else {
            mask_value(&entry.value)
        };
        row.add_cell(Cell::new(value));
        table.add_row(row);
    }

    println!("{table}");
}

/// Masks a secret, keeping the last four characters of longer values as a
/// recognition aid.
fn mask_value(value: &str) -> String {
    if value.chars().count() <= 8 {
        "••••••••".to_string()
    } else {
        let boundary = value
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("••••{}", &value[boundary..])
    }
}

pub fn display_relations(relations: &[ViewRelation]) {
    if relations.is_empty() {
        println!("No relations found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Source", "Type", "Target", "Label"]);

    for relation in relations {
        let mut row = Row::new();
        row.add_cell(Cell::new(&relation.id.to_string()[..7]));
        row.add_cell(Cell::new(&relation.source));
        row.add_cell(Cell::new(&relation.kind).fg(Color::Magenta));
        row.add_cell(Cell::new(&relation.target));
        row.add_cell(Cell::new(relation.label.as_deref().unwrap_or("")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Tech stack"]);

    for tag in tags {
        let mut row = Row::new();
        let mut name_cell = Cell::new(&tag.name);
        if let Some((r, g, b)) = parse_hex_color(&tag.color) {
            name_cell = name_cell.fg(Color::Rgb { r, g, b });
        }
        row.add_cell(name_cell);
        row.add_cell(Cell::new(if tag.is_tech_stack { "yes" } else { "no" }));
        table.add_row(row);
    }

    println!("{table}");
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
