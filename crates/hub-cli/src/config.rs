use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// CLI configuration, merged from `hub.toml` and `HUB_`-prefixed
/// environment variables (e.g. `HUB_DATABASE_PATH`).
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Filters implicitly applied to `hub todo list` when no query is given.
    #[serde(default)]
    pub default_filters: Vec<String>,
    #[serde(default)]
    pub ui: UiPreferences,
}

/// Explicit, serializable UI state. Everything the web dashboard kept in a
/// client store lives here, with its initial values spelled out by the
/// `Default` impls and `hub.toml` as the persistence boundary.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub project_view: ProjectView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectView {
    #[default]
    Grid,
    List,
}

fn default_database_path() -> String {
    "hub.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            default_filters: vec![],
            ui: UiPreferences::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("hub.toml"))
            .merge(Env::prefixed("HUB_"))
            .extract()
    }
}
