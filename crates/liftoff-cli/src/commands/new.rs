//! Implementation of the `liftoff new` command.
//!
//! Responsibility: merge flags, settings and prompt answers into a
//! `ProjectConfiguration`, wire up the adapters, and report the result.
//! No business logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use liftoff_adapters::{ErbRenderer, LiftoffSettings, LocalFilesystem, TemplateLibrary, XcodeProject};
use liftoff_core::{
    application::ProjectBuilder,
    domain::{PlannedEntry, ProjectConfiguration, ProjectPlan},
    error::LiftoffError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `liftoff new` command.
///
/// 1. Merge flags over settings, prompting for gaps when interactive
/// 2. Build and validate the project configuration
/// 3. Refuse an existing project unless `--force`
/// 4. Confirm with the user unless `--yes` or `--quiet`
/// 5. Print the plan and stop on `--dry-run`
/// 6. Generate the project
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let interactive =
        !args.yes && !global.quiet && !output.is_json() && std::io::stdin().is_terminal();

    // 1. Answers
    let mut answers = Answers::merge(&args, &config.settings);
    if interactive {
        prompt::fill_missing(&mut answers)?;
    }

    // 2. Configuration
    let configuration = answers.into_configuration(&config.settings)?;
    debug!(
        name = configuration.name(),
        prefix = configuration.prefix(),
        company_identifier = configuration.company_identifier(),
        "Configuration resolved"
    );

    let output_root = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let builder = project_builder(&args.template_dirs, &output_root)?;

    // 3. Existing project
    if args.force {
        if builder.descriptor_path(&configuration).exists() {
            output.warning("Generating over an existing project (--force)")?;
        }
    } else {
        builder.ensure_fresh(&configuration)?;
    }

    // 4. Confirmation
    if interactive {
        show_configuration(&configuration, &output_root, &output)?;
        if !prompt::confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Dry run: describe but do not write.
    if args.dry_run {
        let plan = builder.plan(&configuration)?;
        return show_plan(&configuration, &plan, &builder, &output);
    }

    // 6. Generate
    let mut project = XcodeProject::new(
        configuration.name(),
        &output_root,
        Box::new(LocalFilesystem::new()),
    );

    output.header(&format!("Creating '{}'...", configuration.name()))?;
    info!(path = %output_root.display(), "Generation started");

    let summary = builder.create_project(&configuration, &mut project)?;

    if output.is_json() {
        return output.json(&summary);
    }

    output.success(&format!(
        "Project '{}' created: {} directories, {} files, {} compiled sources",
        summary.project_name,
        summary.directories_created,
        summary.files_generated,
        summary.compiled_sources
    ))?;
    output.detail(&format!("  {}", summary.descriptor_path.display()))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  open {}", project.bundle_path().display()))?;
    }

    Ok(())
}

// ── Answers ───────────────────────────────────────────────────────────────────

/// Project facts gathered from flags, settings and prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Answers {
    name: Option<String>,
    company: Option<String>,
    author: Option<String>,
    prefix: Option<String>,
    company_identifier: Option<String>,
}

impl Answers {
    /// Flags win over settings; blank values count as missing.
    fn merge(args: &NewArgs, settings: &LiftoffSettings) -> Self {
        Self {
            name: pick(&args.name, &settings.project_name),
            company: pick(&args.company, &settings.company),
            author: pick(&args.author, &settings.author),
            prefix: pick(&args.prefix, &settings.prefix),
            company_identifier: pick(&args.company_identifier, &settings.company_identifier),
        }
    }

    fn into_configuration(self, settings: &LiftoffSettings) -> CliResult<ProjectConfiguration> {
        let mut builder = ProjectConfiguration::builder(self.name.unwrap_or_default())
            .bindings(settings.bindings.clone())
            .tree(settings.directories.clone());

        if let Some(company) = self.company {
            builder = builder.company(company);
        }
        if let Some(author) = self.author {
            builder = builder.author(author);
        }
        if let Some(prefix) = self.prefix {
            builder = builder.prefix(prefix);
        }
        if let Some(identifier) = self.company_identifier {
            builder = builder.company_identifier(identifier);
        }

        builder
            .build()
            .map_err(|e| CliError::Core(LiftoffError::from(e)))
    }
}

fn pick(flag: &Option<String>, setting: &Option<String>) -> Option<String> {
    flag.as_deref()
        .or(setting.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

// ── Adapters ──────────────────────────────────────────────────────────────────

fn project_builder(template_dirs: &[PathBuf], output_root: &Path) -> CliResult<ProjectBuilder> {
    let library = TemplateLibrary::new(
        Box::new(ErbRenderer::new()?),
        Box::new(LocalFilesystem::new()),
    )
    .with_search_dirs(template_dirs.iter().cloned())
    .with_default_search_paths();

    debug!(search_dirs = ?library.search_dirs(), "Template library ready");

    Ok(ProjectBuilder::new(
        Box::new(ErbRenderer::new()?),
        Box::new(LocalFilesystem::new()),
        Box::new(library),
    )
    .with_output_root(output_root))
}

// ── Prompts ───────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
mod prompt {
    use std::io;

    use dialoguer::{Confirm, Input};
    use liftoff_core::domain::initials;

    use super::Answers;
    use crate::error::{CliResult, IntoCli};

    fn ask(label: &str, default: Option<String>, allow_empty: bool) -> CliResult<String> {
        let mut input = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default);
        }
        input
            .interact_text()
            .map_err(io::Error::from)
            .with_cli_context(|| format!("reading '{label}'"))
    }

    /// Ask for whatever is still missing.
    pub(super) fn fill_missing(answers: &mut Answers) -> CliResult<()> {
        if answers.name.is_none() {
            answers.name = Some(ask("Project name", None, false)?);
        }
        if answers.company.is_none() {
            answers.company = Some(ask("Company name", None, true)?);
        }
        if answers.author.is_none() {
            answers.author = Some(ask("Author name", None, true)?);
        }
        if answers.prefix.is_none() {
            let suggested = answers.name.as_deref().map(initials);
            answers.prefix = Some(ask("Class prefix", suggested, true)?);
        }
        Ok(())
    }

    pub(super) fn confirm() -> CliResult<bool> {
        Confirm::new()
            .with_prompt("Create project?")
            .default(true)
            .interact()
            .map_err(io::Error::from)
            .with_cli_context(|| "reading confirmation")
    }
}

#[cfg(not(feature = "interactive"))]
mod prompt {
    use super::Answers;
    use crate::error::CliResult;

    /// Built without prompts: settings defaults apply.
    pub(super) fn fill_missing(_answers: &mut Answers) -> CliResult<()> {
        Ok(())
    }

    pub(super) fn confirm() -> CliResult<bool> {
        Ok(true)
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    configuration: &ProjectConfiguration,
    output_root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:            {}", configuration.name()))?;
    out.print(&format!("  Class prefix:       {}", configuration.prefix()))?;
    out.print(&format!("  Company:            {}", configuration.company()))?;
    out.print(&format!("  Company identifier: {}", configuration.company_identifier()))?;
    out.print(&format!("  Author:             {}", configuration.author()))?;
    out.print(&format!("  Location:           {}", output_root.display()))?;
    out.print("")?;
    Ok(())
}

fn show_plan(
    configuration: &ProjectConfiguration,
    plan: &ProjectPlan,
    builder: &ProjectBuilder,
    out: &OutputManager,
) -> CliResult<()> {
    if out.is_json() {
        return out.json(plan);
    }

    out.info(&format!(
        "Dry run: would create '{}' in {}",
        configuration.name(),
        builder.output_root().display()
    ))?;
    for line in plan_lines(plan) {
        out.print(&line)?;
    }
    out.detail(&format!(
        "  {}",
        builder.descriptor_path(configuration).display()
    ))?;
    Ok(())
}

fn plan_lines(plan: &ProjectPlan) -> Vec<String> {
    plan.entries()
        .iter()
        .map(|entry| match entry {
            PlannedEntry::Directory { path } => format!("  {path}/"),
            PlannedEntry::File {
                path,
                compiled,
                build_settings,
                ..
            } => {
                let mut line = format!("  {path}");
                if *compiled {
                    line.push_str("  [source]");
                }
                for setting in build_settings {
                    line.push_str(&format!("  [{setting}]"));
                }
                line
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
