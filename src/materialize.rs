use crate::{
    errors::{FileOperation, IoError},
    notify::{Notification, Reporter},
    template::TemplateError,
    tree::{FileNode, TemplateNode},
};
use miette::Diagnostic;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),
}

/// Renders a single file node into `output_dir`.
///
/// An existing file is left alone: nothing is rendered, written or reported.
/// Otherwise the template is rendered with `component_name`, written, and a
/// [`Notification::FileAdded`] is emitted carrying `logical_dir` joined with the
/// resolved file name.
///
/// # Errors
///
/// Returns a [`MaterializeError`] if the template fails to render or the file
/// cannot be written.
pub fn materialize_file(
    file: &FileNode,
    component_name: &str,
    logical_dir: &Path,
    output_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<(), MaterializeError> {
    let file_name = file.resolve_file_name(component_name);
    let output_path = output_dir.join(&file_name);

    if output_path.exists() {
        log::debug!("file exists, skipping: {}", output_path.display());
        return Ok(());
    }

    let contents = file.template.render(component_name)?;

    fs::write(&output_path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, output_path.clone(), error))?;

    reporter.notify(Notification::FileAdded {
        path: logical_dir.join(file_name),
    });

    Ok(())
}

/// Walks `nodes` in order, creating subdirectories under `output_dir` and
/// materializing every file.
///
/// Subdirectories that already exist are reused, so several nodes may share one
/// and reruns over a partially generated tree are harmless.
pub fn materialize_tree(
    nodes: &[TemplateNode],
    component_name: &str,
    logical_dir: &Path,
    output_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<(), MaterializeError> {
    for node in nodes {
        match node {
            TemplateNode::Directory(dir) => {
                let child_output_dir = output_dir.join(&dir.sub_dir_name);

                if !child_output_dir.exists() {
                    fs::create_dir(&child_output_dir).map_err(|error| {
                        IoError::new(FileOperation::Mkdir, child_output_dir.clone(), error)
                    })?;
                }

                materialize_tree(
                    &dir.files,
                    component_name,
                    &logical_dir.join(&dir.sub_dir_name),
                    &child_output_dir,
                    reporter,
                )?;
            }
            TemplateNode::File(file) => {
                materialize_file(file, component_name, logical_dir, output_dir, reporter)?;
            }
        }
    }

    Ok(())
}
