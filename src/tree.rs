//! The template tree every component is generated from.

use crate::template::Template;
use serde::Deserialize;

/// Token in a file name that is replaced with the component name.
pub const PLACEHOLDER: &str = "[componentName]";

/// A node of the template tree: either a file to render or a subdirectory
/// holding more nodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TemplateNode {
    File(FileNode),
    Directory(DirectoryNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNode {
    #[serde(alias = "fileName")]
    pub file_name: String,
    pub template: Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryNode {
    /// Used literally, never substituted.
    #[serde(alias = "subDirName")]
    pub sub_dir_name: String,
    #[serde(alias = "children", default)]
    pub files: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn file(file_name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::File(FileNode {
            file_name: file_name.into(),
            template: Template::new(template),
        })
    }

    pub fn directory(sub_dir_name: impl Into<String>, files: Vec<TemplateNode>) -> Self {
        Self::Directory(DirectoryNode {
            sub_dir_name: sub_dir_name.into(),
            files,
        })
    }
}

impl FileNode {
    /// Substitutes the first [`PLACEHOLDER`] in the file name.
    pub fn resolve_file_name(&self, component_name: &str) -> String {
        self.file_name.replacen(PLACEHOLDER, component_name, 1)
    }
}
