//! Settings file and command line. Needs manual verification:
//! `bin/settings_demo.rs` loads both.

mod cli;
pub use clap::{CommandFactory, Parser, Subcommand};
pub use cli::*;

mod settings;
pub use settings::*;
