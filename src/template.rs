use miette::Diagnostic;
use serde::Deserialize;
use tera::{Context, Tera};
use thiserror::Error;

/// Name under which the component name is exposed to templates.
pub const COMPONENT_NAME_VAR: &str = "componentName";

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("Template for '{file_name}' could not be parsed")]
    #[diagnostic(
        code(scaffed::template::parse),
        help("Check the tera syntax of the template")
    )]
    Parse {
        file_name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to render template for component '{component}'")]
    #[diagnostic(
        code(scaffed::template::render),
        help("Templates can only reference `componentName`")
    )]
    Render {
        component: String,
        #[source]
        source: tera::Error,
    },
}

/// Tera source that turns a component name into file content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Template(String);
impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// Parses the template without rendering it, so syntax errors surface
    /// before anything is written.
    pub fn check(&self, file_name: &str) -> Result<(), TemplateError> {
        let mut tera = Tera::default();

        tera.add_raw_template(file_name, &self.0)
            .map_err(|source| TemplateError::Parse {
                file_name: file_name.to_string(),
                source,
            })
    }

    /// Renders the template with `componentName` bound to `component_name`.
    pub fn render(&self, component_name: &str) -> Result<String, TemplateError> {
        let mut context = Context::new();
        context.insert(COMPONENT_NAME_VAR, component_name);

        Tera::one_off(&self.0, &context, false).map_err(|source| TemplateError::Render {
            component: component_name.to_string(),
            source,
        })
    }
}
