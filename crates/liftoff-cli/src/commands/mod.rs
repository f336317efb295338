//! One module per subcommand. Each exposes an `execute` function.

pub mod completions;
pub mod config;
pub mod new;
pub mod templates;
