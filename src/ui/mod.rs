pub mod cli;
pub mod tui;

pub use cli::{Cli, Command};
pub use tui::run_tui;
