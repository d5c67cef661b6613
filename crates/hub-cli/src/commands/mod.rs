pub mod export;
pub mod keychain;
pub mod note;
pub mod project;
pub mod relation;
pub mod snippet;
pub mod todo;
