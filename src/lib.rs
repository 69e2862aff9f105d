//! scaffed generates one directory per component from a template tree
//! described in `.scaffed/config.toml`.

pub mod api;
pub mod config;
pub mod errors;
pub mod generate;
pub mod materialize;
pub mod notify;
pub mod template;
pub mod transactions;
pub mod tree;
