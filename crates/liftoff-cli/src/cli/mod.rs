//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "liftoff",
    bin_name = "liftoff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Xcode project scaffolding",
    long_about = "Liftoff creates an Xcode project from a directory tree \
                  described in ~/.liftoffrc or ./.liftoffrc: directories, \
                  templated source files, groups, and an application target.",
    after_help = "EXAMPLES:\n\
        \x20 liftoff new Weather --company \"Acme Inc\" --prefix WX\n\
        \x20 liftoff new Weather --dry-run\n\
        \x20 liftoff templates --format list\n\
        \x20 liftoff completions bash > /usr/share/bash-completion/completions/liftoff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Xcode project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 liftoff new Weather\n\
            \x20 liftoff new Weather --author \"Sam Doe\" --company Acme --yes\n\
            \x20 liftoff new Weather --output ~/Projects --template-dir ./templates"
    )]
    New(NewArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 liftoff templates\n\
            \x20 liftoff templates --format json\n\
            \x20 liftoff templates --template-dir ./templates"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 liftoff completions bash > ~/.local/share/bash-completion/completions/liftoff\n\
            \x20 liftoff completions zsh  > ~/.zfunc/_liftoff\n\
            \x20 liftoff completions fish > ~/.config/fish/completions/liftoff.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the merged settings.
    #[command(
        about = "Settings inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 liftoff config show\n\
            \x20 liftoff config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `liftoff new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. Also names the target and the `.xcodeproj` bundle.
    #[arg(value_name = "NAME", help = "Project name (prompted for when omitted)")]
    pub name: Option<String>,

    #[arg(long = "company", value_name = "NAME", help = "Company name")]
    pub company: Option<String>,

    #[arg(long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    /// Class prefix. Defaults to the initials of the project name.
    #[arg(
        short = 'p',
        long = "prefix",
        value_name = "PREFIX",
        help = "Class prefix (default: initials of NAME)"
    )]
    pub prefix: Option<String>,

    #[arg(
        long = "company-identifier",
        value_name = "ID",
        help = "Reverse-DNS company identifier (default: com.<company>)"
    )]
    pub company_identifier: Option<String>,

    /// Directory the project is generated into.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Template directories searched before the built-in templates.
    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        help = "Extra template directory (repeatable, searched first)"
    )]
    pub template_dirs: Vec<PathBuf>,

    /// Skip prompts and the confirmation.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip prompts and create immediately"
    )]
    pub yes: bool,

    /// Generate over an existing project.
    #[arg(long = "force", help = "Generate even if NAME.xcodeproj already exists")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `liftoff templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        help = "Extra template directory (repeatable, searched first)"
    )]
    pub template_dirs: Vec<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `liftoff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `liftoff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the merged settings.
    Show,
    /// Print every settings location and whether it exists.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "liftoff",
            "new",
            "Weather",
            "--company",
            "Acme Inc",
            "-p",
            "WX",
            "-t",
            "one",
            "--template-dir",
            "two",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name.as_deref(), Some("Weather"));
        assert_eq!(args.company.as_deref(), Some("Acme Inc"));
        assert_eq!(args.prefix.as_deref(), Some("WX"));
        assert_eq!(args.template_dirs, [PathBuf::from("one"), PathBuf::from("two")]);
        assert!(!args.dry_run);
    }

    #[test]
    fn name_is_optional() {
        let cli = Cli::parse_from(["liftoff", "new", "--yes"]);
        assert!(matches!(cli.command, Commands::New(NewArgs { name: None, yes: true, .. })));
    }

    #[test]
    fn templates_alias_and_format() {
        let cli = Cli::parse_from(["liftoff", "ls", "--format", "csv"]);
        let Commands::Templates(args) = cli.command else {
            panic!("expected Templates command");
        };
        assert_eq!(args.format, ListFormat::Csv);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["liftoff", "config", "show", "-vv", "--config", "x.yml"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.config, Some(PathBuf::from("x.yml")));
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));
    }

    /// Parse with `--no-color` bound to a private variable instead of
    /// `NO_COLOR`, so tests running in parallel do not see each other.
    fn no_color_from_env(var: &str, value: &str) -> bool {
        // SAFETY: the variable name is unique to this call site.
        unsafe { std::env::set_var(var, value) };
        let matches = Cli::command()
            .mut_arg("no_color", |arg| arg.env(var.to_string()))
            .get_matches_from(["liftoff", "templates"]);
        Cli::from_arg_matches(&matches).unwrap().global.no_color
    }

    #[test]
    fn no_color_accepts_any_non_empty_value() {
        assert!(no_color_from_env("LIFTOFF_CLI_TEST_NO_COLOR_ONE", "1"));
        assert!(no_color_from_env("LIFTOFF_CLI_TEST_NO_COLOR_YES", "yes"));
        assert!(!no_color_from_env("LIFTOFF_CLI_TEST_NO_COLOR_EMPTY", ""));
        assert!(!no_color_from_env("LIFTOFF_CLI_TEST_NO_COLOR_FALSE", "false"));
    }

    #[test]
    fn no_color_flag_takes_no_value() {
        let cli = Cli::parse_from(["liftoff", "--no-color", "templates"]);
        assert!(cli.global.no_color);
        assert!(Cli::try_parse_from(["liftoff", "--no-color=1", "templates"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["liftoff", "--quiet", "--verbose", "templates"]);
        assert!(result.is_err());
    }
}
