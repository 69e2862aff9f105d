use crate::{
    config::Config,
    errors::{FileOperation, IoError},
    materialize::{materialize_tree, MaterializeError},
    notify::{Notification, Reporter},
    transactions::{Active, Transaction},
};
use miette::Diagnostic;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("Invalid component name '{name}'")]
    #[diagnostic(
        code(scaffed::generate::invalid_component_name),
        help("Component names must be a single directory name, without separators, `..` or a root")
    )]
    InvalidComponentName { name: String },

    #[error("Failed to generate component '{component}', rolled back {} directories", .rolled_back.len())]
    #[diagnostic(
        code(scaffed::generate::materialization),
        help("No directory created by this run was kept; fix the cause and run again")
    )]
    Materialization {
        component: String,
        #[source]
        source: MaterializeError,
        rolled_back: Vec<PathBuf>,
        #[related]
        rollback_failures: Vec<IoError>,
    },
}

/// What happened to each requested component.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
}

enum Outcome {
    Generated,
    Skipped,
}

/// Generates every component in `component_names` under `root/components_dir`.
///
/// Components whose directory already exists are skipped. The first failure
/// stops the batch: every component directory created so far (by any component
/// in the batch) is removed and the error is returned.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidComponentName`] before touching the
/// filesystem if any name would not land directly inside `components_dir`.
///
/// Returns [`GenerateError::Materialization`] if creating a directory, rendering
/// a template or writing a file fails.
pub fn generate(
    config: &Config,
    root: &Path,
    component_names: &[String],
    reporter: &mut dyn Reporter,
) -> Result<GenerationSummary, GenerateError> {
    for component_name in component_names {
        validate_component_name(component_name)?;
    }

    let components_dir = root.join(&config.components_dir);
    let mut trx = Transaction::<Active>::new();
    let mut summary = GenerationSummary::default();

    for component_name in component_names {
        match generate_component(config, &components_dir, component_name, &mut trx, reporter) {
            Ok(Outcome::Generated) => summary.generated.push(component_name.clone()),
            Ok(Outcome::Skipped) => summary.skipped.push(component_name.clone()),
            Err(source) => {
                reporter.notify(Notification::BatchFailed {
                    component: component_name.clone(),
                });

                let report = trx.rollback();

                return Err(GenerateError::Materialization {
                    component: component_name.clone(),
                    source,
                    rolled_back: report.removed,
                    rollback_failures: report.failures,
                });
            }
        }
    }

    trx.commit();

    Ok(summary)
}

/// A component name must be exactly one normal path segment.
fn validate_component_name(name: &str) -> Result<(), GenerateError> {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(GenerateError::InvalidComponentName {
            name: name.to_string(),
        }),
    }
}

fn generate_component(
    config: &Config,
    components_dir: &Path,
    component_name: &str,
    trx: &mut Transaction<Active>,
    reporter: &mut dyn Reporter,
) -> Result<Outcome, MaterializeError> {
    let output_dir = components_dir.join(component_name);

    // shared by every component, never rolled back
    if !components_dir.exists() {
        fs::create_dir_all(components_dir).map_err(|error| {
            IoError::new(FileOperation::Mkdir, components_dir.to_path_buf(), error)
        })?;
    }

    if output_dir.exists() {
        reporter.notify(Notification::ComponentSkipped {
            component: component_name.to_string(),
            output_dir,
        });
        return Ok(Outcome::Skipped);
    }

    trx.create_dir(&output_dir)?;

    log::debug!("generating {} in {}", component_name, output_dir.display());

    materialize_tree(
        &config.files,
        component_name,
        &config.components_dir.join(component_name),
        &output_dir,
        reporter,
    )?;

    Ok(Outcome::Generated)
}
