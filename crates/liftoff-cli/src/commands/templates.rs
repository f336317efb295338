//! Implementation of the `liftoff templates` command.

use liftoff_adapters::{ErbRenderer, LocalFilesystem, TemplateEntry, TemplateLibrary};

use crate::{
    cli::{ListFormat, TemplatesArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TemplatesArgs, output: OutputManager) -> CliResult<()> {
    let library = TemplateLibrary::new(
        Box::new(ErbRenderer::new()?),
        Box::new(LocalFilesystem::new()),
    )
    .with_search_dirs(args.template_dirs)
    .with_default_search_paths();

    let templates = library.available();

    // --output-format json wins over --format.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            let width = templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
            for template in &templates {
                output.print(&format!(
                    "  {:<width$}  {}",
                    template.id,
                    template.origin,
                    width = width
                ))?;
            }
            output.print("")?;
            output.detail("Searched, in order:")?;
            for dir in library.search_dirs() {
                output.detail(&format!("  {}", dir.display()))?;
            }
        }

        // Machine-readable formats bypass quiet mode.
        ListFormat::Json => output.json(&templates)?,

        ListFormat::List => {
            for template in &templates {
                println!("{}", template.id);
            }
        }

        ListFormat::Csv => {
            for line in csv_lines(&templates) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn csv_lines(templates: &[TemplateEntry]) -> Vec<String> {
    let mut lines = vec!["id,origin".to_string()];
    lines.extend(templates.iter().map(|t| {
        format!(
            "{},{}",
            csv_field(&t.id),
            csv_field(&t.origin.to_string())
        )
    }));
    lines
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
