//! Interactive surface: prompts, tables, and the menu loops.

mod menu;
pub mod prompt;
mod table;

pub use menu::{App, BranchAction, LocalAction, MainAction, RepoAction, SettingsAction};
pub use prompt::{ConsolePrompter, Prompter, ScriptedPrompter};
pub use table::Table;
