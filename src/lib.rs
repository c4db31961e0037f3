//! Builds collapsible file trees from workflow manifests and holds the
//! filter/sort state of a workflow catalog.

pub mod app;
pub mod config;
pub mod core;

#[cfg(test)]
mod utils;
