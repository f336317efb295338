//! Placeholder renderer using ERB-style delimiters on top of MiniJinja.
//!
//! | Syntax                     | Meaning    |
//! |----------------------------|------------|
//! | `<%= expr %>`              | expression |
//! | `<% if x %>...<% endif %>` | statement  |
//! | `<%# note %>`              | comment    |

use minijinja::{Environment, UndefinedBehavior, syntax::SyntaxConfig};
use tracing::{instrument, trace};

use liftoff_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::{LiftoffError, LiftoffResult},
};

const OPEN_TAG: &str = "<%";

/// Renders names and file bodies. Undefined bindings are errors.
pub struct ErbRenderer {
    env: Environment<'static>,
}

impl ErbRenderer {
    pub fn new() -> LiftoffResult<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("<%", "%>")
            .variable_delimiters("<%=", "%>")
            .comment_delimiters("<%#", "%>")
            .build()
            .map_err(|e| LiftoffError::Internal {
                message: format!("invalid template syntax configuration: {e}"),
            })?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        Ok(Self { env })
    }
}

impl TemplateRenderer for ErbRenderer {
    #[instrument(skip_all, fields(len = raw.len()))]
    fn render(&self, raw: &str, context: &RenderContext) -> LiftoffResult<String> {
        if !raw.contains(OPEN_TAG) {
            return Ok(raw.to_string());
        }

        let rendered = self
            .env
            .render_str(raw, context)
            .map_err(|e| ApplicationError::rendering(raw, e.to_string()))?;
        trace!(%rendered, "rendered");
        Ok(rendered)
    }
}
