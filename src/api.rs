use crate::{
    config::{self, Config},
    errors::{FileOperation, IoError},
    generate::{self, GenerationSummary},
    notify::{ConsoleReporter, Reporter},
};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScaffedError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] generate::GenerateError),
}

/// Generates the given components in the current working directory, printing
/// progress to the terminal.
///
/// # Errors
///
/// Returns a [`ScaffedError`] if:
///
/// - The working directory cannot be resolved.
/// - The configuration is missing, empty or invalid. Nothing is created in that case.
/// - Creating a directory, rendering a template or writing a file fails. Every
///   component directory created by this call is removed first.
pub fn generate_components(
    component_names: &[String],
    config_variant: Option<&str>,
) -> Result<GenerationSummary, ScaffedError> {
    let root = std::env::current_dir()
        .map_err(|error| IoError::new(FileOperation::CurrentDir, PathBuf::from("."), error))?;

    generate_components_in(&root, component_names, config_variant, &mut ConsoleReporter)
}

/// Same as [`generate_components`], rooted at `root` and reporting to `reporter`.
pub fn generate_components_in(
    root: &Path,
    component_names: &[String],
    config_variant: Option<&str>,
    reporter: &mut dyn Reporter,
) -> Result<GenerationSummary, ScaffedError> {
    let config = Config::load(root, config_variant)?;

    log::debug!(
        "generating {} components in {}",
        component_names.len(),
        config.components_dir.display()
    );

    let summary = generate::generate(&config, root, component_names, reporter)?;

    Ok(summary)
}
