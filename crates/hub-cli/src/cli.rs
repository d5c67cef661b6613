use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A personal project hub: side-projects, todos, notes, snippets, and API keys
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage todos
    Todo(TodoCommand),
    /// Manage projects
    Project(ProjectCommand),
    /// Manage notes
    Note(NoteCommand),
    /// Manage code snippets
    Snippet(SnippetCommand),
    /// Manage grouped API keys
    Key(KeyCommand),
    /// Manage relations between projects
    Link(LinkCommand),
    /// Show the project relationship map
    Map,
    /// Export everything as JSON
    Export(ExportCommand),
    /// Show the effective configuration
    Config,
}

// ========== Todos ==========

#[derive(Parser, Debug, Clone)]
pub struct TodoCommand {
    #[command(subcommand)]
    pub command: TodoSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TodoSubcommand {
    /// Add a new todo; date phrases in the title become the due date
    Add(AddTodoCommand),
    /// List todos
    List(ListTodosCommand),
    /// Mark a todo as completed
    Done(TodoIdCommand),
    /// Reopen a completed todo
    Reopen(TodoIdCommand),
    /// Edit a todo
    Edit(EditTodoCommand),
    /// Delete a todo
    Delete(DeleteTodoCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddTodoCommand {
    /// The todo title, e.g. "finish report next tuesday"
    pub title: String,
    /// The description of the todo
    #[clap(long)]
    pub description: Option<String>,
    /// Explicit due date (natural language); disables title parsing
    #[clap(short, long)]
    pub due: Option<String>,
    /// The priority (low, medium, high, urgent)
    #[clap(short, long)]
    pub priority: Option<String>,
    /// Projects to link the todo to
    #[clap(long = "project", num_args = 1..)]
    pub projects: Vec<String>,
    /// Recurrence rule (daily, weekly, monthly, yearly, weekdays, weekends)
    #[clap(long)]
    pub every: Option<String>,
    /// Keep the title verbatim; never extract a date from it
    #[clap(long)]
    pub no_parse: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListTodosCommand {
    /// A filter query string (e.g. "status:open and (project:Hub or due:soon)")
    #[clap(default_value = "")]
    pub query: String,
    /// Include completed todos
    #[clap(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TodoIdCommand {
    /// The ID (or unique prefix) of the todo
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EditTodoCommand {
    /// The ID of the todo to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    /// New due date (natural language)
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    /// New priority (low, medium, high, urgent)
    #[arg(long)]
    pub priority: Option<String>,

    /// New recurrence rule
    #[arg(long)]
    pub every: Option<String>,
    #[arg(long, conflicts_with = "every")]
    pub every_clear: bool,

    /// Replace the linked projects
    #[arg(long = "project", num_args = 1..)]
    pub projects: Option<Vec<String>>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteTodoCommand {
    /// The ID of the todo to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Projects ==========

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectSubcommand {
    /// Add a new project
    Add(AddProjectCommand),
    /// List projects
    List(ListProjectsCommand),
    /// Edit a project
    Edit(EditProjectCommand),
    /// Archive a project
    Archive(ProjectNameCommand),
    /// Delete a project
    Delete(DeleteProjectCommand),
    /// List all tags
    Tags,
}

#[derive(Parser, Debug, Clone)]
pub struct AddProjectCommand {
    /// The name of the project
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,
    /// Status (idea, active, paused, completed, archived)
    #[arg(long)]
    pub status: Option<String>,
    /// Hex color, e.g. "#22c55e"
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub notes_url: Option<String>,
    /// Local checkout path
    #[arg(long)]
    pub path: Option<String>,
    /// Tags to attach
    #[arg(long = "tag", num_args = 1..)]
    pub tags: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListProjectsCommand {
    /// Only show projects with this status
    #[arg(long)]
    pub status: Option<String>,
    /// Include archived projects
    #[arg(long)]
    pub archived: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditProjectCommand {
    /// The name of the project to edit
    pub name: String,

    #[arg(long)]
    pub rename: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub notes_url: Option<String>,
    #[arg(long)]
    pub path: Option<String>,
    /// Add tags to the project
    #[arg(long, num_args = 1..)]
    pub add_tag: Vec<String>,
    /// Remove tags from the project
    #[arg(long, num_args = 1..)]
    pub remove_tag: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectNameCommand {
    /// The name of the project
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteProjectCommand {
    /// The name of the project to delete
    pub name: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Notes ==========

#[derive(Parser, Debug, Clone)]
pub struct NoteCommand {
    #[command(subcommand)]
    pub command: NoteSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NoteSubcommand {
    /// Add a new note
    Add(AddNoteCommand),
    /// List notes
    List,
    /// Pin a note to the top
    Pin(NoteIdCommand),
    /// Unpin a note
    Unpin(NoteIdCommand),
    /// Delete a note
    Delete(DeleteNoteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddNoteCommand {
    /// The note title
    pub title: String,
    /// The note body
    #[arg(long, default_value = "")]
    pub content: String,
    /// Pin the note on creation
    #[arg(long)]
    pub pin: bool,
    /// Projects to link the note to
    #[arg(long = "project", num_args = 1..)]
    pub projects: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct NoteIdCommand {
    /// The ID (or unique prefix) of the note
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteNoteCommand {
    /// The ID of the note to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Snippets ==========

#[derive(Parser, Debug, Clone)]
pub struct SnippetCommand {
    #[command(subcommand)]
    pub command: SnippetSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SnippetSubcommand {
    /// Add a new snippet
    Add(AddSnippetCommand),
    /// List snippets
    List(ListSnippetsCommand),
    /// Mark a snippet as a favorite
    Favorite(FavoriteSnippetCommand),
    /// Delete a snippet
    Delete(DeleteSnippetCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddSnippetCommand {
    /// The snippet title
    pub title: String,
    /// The snippet language (rust, typescript, ...)
    #[arg(short, long)]
    pub language: String,
    /// The code itself
    #[arg(long, required_unless_present = "file", conflicts_with = "file")]
    pub code: Option<String>,
    /// Read the code from a file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub description: Option<String>,
    /// Project the snippet belongs to
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListSnippetsCommand {
    /// Only show snippets in this language
    #[arg(short, long)]
    pub language: Option<String>,
    /// Only show favorites
    #[arg(long)]
    pub favorites: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoriteSnippetCommand {
    /// The ID (or unique prefix) of the snippet
    pub id: String,
    /// Remove the favorite mark instead
    #[arg(long)]
    pub remove: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteSnippetCommand {
    /// The ID of the snippet to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Keychain ==========

#[derive(Parser, Debug, Clone)]
pub struct KeyCommand {
    #[command(subcommand)]
    pub command: KeySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum KeySubcommand {
    /// Add a new key group
    Add(AddKeyGroupCommand),
    /// List key groups
    List,
    /// Show one key group and its entries
    Show(ShowKeyGroupCommand),
    /// Delete a key group
    Delete(DeleteKeyGroupCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddKeyGroupCommand {
    /// The group name, e.g. "Stripe"
    pub name: String,
    /// The service the keys belong to
    #[arg(long)]
    pub service: Option<String>,
    /// Environment (development, staging, production)
    #[arg(long)]
    pub env: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Entries as LABEL=VALUE pairs
    #[arg(long = "entry", num_args = 1..)]
    pub entries: Vec<String>,
    /// Projects to link the group to
    #[arg(long = "project", num_args = 1..)]
    pub projects: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowKeyGroupCommand {
    /// The group name
    pub name: String,
    /// Print secret values instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteKeyGroupCommand {
    /// The group name
    pub name: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

// ========== Relations ==========

#[derive(Parser, Debug, Clone)]
pub struct LinkCommand {
    #[command(subcommand)]
    pub command: LinkSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LinkSubcommand {
    /// Relate two projects
    Add(AddLinkCommand),
    /// List relations
    List,
    /// Delete a relation
    Delete(DeleteLinkCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddLinkCommand {
    /// The source project name
    pub source: String,
    /// The target project name
    pub target: String,
    /// Relation type (depends_on, related_to, extends, uses)
    #[arg(long = "type")]
    pub kind: Option<String>,
    /// Optional edge label
    #[arg(long)]
    pub label: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteLinkCommand {
    /// The ID (or unique prefix) of the relation
    pub id: String,
}

// ========== Export ==========

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
