//! Loading of the `.scaffed/<name>.toml` configuration.

use crate::{
    errors::{FileOperation, IoError},
    template::TemplateError,
    tree::TemplateNode,
};
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Directory, relative to the working directory, holding configuration files.
pub const CONFIG_DIR: &str = ".scaffed";
/// Configuration used when no variant is selected.
pub const DEFAULT_CONFIG_NAME: &str = "config";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to load config file {}", .path.display())]
    #[diagnostic(
        code(scaffed::config::not_found),
        help("Create .scaffed/config.toml in the directory you run scaffed from")
    )]
    NotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error("Empty config file detected: {}", .path.display())]
    #[diagnostic(
        code(scaffed::config::empty),
        help("Set `components_dir` and the `files` template tree")
    )]
    Empty { path: PathBuf },

    #[error("Unable to parse toml file at '{}': {source}", .path.display())]
    #[diagnostic(code(scaffed::config::parse_toml), help("Review toml file"))]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Template tree contains an entry with an empty {field}")]
    #[diagnostic(code(scaffed::config::empty_name))]
    EmptyName { field: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),
}

/// Where components are generated and what each one contains.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(alias = "componentsDir")]
    pub components_dir: PathBuf,
    pub files: Vec<TemplateNode>,
}
impl Config {
    pub fn new(components_dir: impl Into<PathBuf>, files: Vec<TemplateNode>) -> Self {
        Self {
            components_dir: components_dir.into(),
            files,
        }
    }

    /// Loads `<root>/.scaffed/<variant>.toml`, or `config.toml` without a variant.
    pub fn load(root: &Path, variant: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_file(config_path(root, variant))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        log::debug!("loading configuration from {}", path.display());

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::parse(&content, path)
    }

    /// Parses and validates configuration text. `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::Empty {
                path: path.to_path_buf(),
            });
        }

        let config: Config = toml::from_str(content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_nodes(&self.files)
    }
}

pub fn config_path(root: &Path, variant: Option<&str>) -> PathBuf {
    root.join(CONFIG_DIR)
        .join(format!("{}.toml", variant.unwrap_or(DEFAULT_CONFIG_NAME)))
}

fn validate_nodes(nodes: &[TemplateNode]) -> Result<(), ConfigError> {
    for node in nodes {
        match node {
            TemplateNode::File(file) => {
                if file.file_name.trim().is_empty() {
                    return Err(ConfigError::EmptyName { field: "file_name" });
                }
                file.template.check(&file.file_name)?;
            }
            TemplateNode::Directory(dir) => {
                if dir.sub_dir_name.trim().is_empty() {
                    return Err(ConfigError::EmptyName {
                        field: "sub_dir_name",
                    });
                }
                validate_nodes(&dir.files)?;
            }
        }
    }

    Ok(())
}
