//! Flags accepted by every `liftoff` subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// How much of the tree walk to log on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Log more of the tree walk (-v, -vv, -vvv)",
        long_help = "Log more of the tree walk on stderr:
    (none)  - warnings and errors only
    -v      - settings layers, target creation, project save
    -vv     - every directory, group and linked file
    -vvv    - every rendered name and build setting"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain, uncoloured output. `NO_COLOR` with any value other than an
    /// empty string, `0`, `false`, `no`, `n` or `off` switches it on.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Settings file merged over `~/.liftoffrc` and `./.liftoffrc`.
    /// It must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Extra .liftoffrc-style settings file (YAML)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colours, headers and next steps.
    Human,
    /// Same text without ANSI codes.
    Plain,
    /// One JSON document; nothing else on stdout.
    Json,
}
