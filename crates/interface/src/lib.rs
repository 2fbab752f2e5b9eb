//! nin Interface - interaction layer
//!
//! Responsibilities:
//! - CLI command parsing and dispatch
//! - Item presentation (pretty, minimal, json)
//! - Date argument handling
//!
//! Layout:
//! - cli: command-line interface
//! - presenter: list renderers
//! - dates: date arguments and day labels

pub mod cli;
pub mod dates;
pub mod presenter;


pub use cli::{run as run_cli, run_from, CliConfig, CliError, OutputFormat};
pub use presenter::{presenter_for, JsonPresenter, MinimalPresenter, PrettyPresenter};
