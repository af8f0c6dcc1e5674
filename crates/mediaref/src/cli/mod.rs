//! Command-line interface module.

mod commands;
mod resolve;

pub use commands::{Cli, Commands};
pub use resolve::{build_resolver, print_assets, print_samples};
