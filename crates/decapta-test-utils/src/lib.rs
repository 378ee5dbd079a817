//! Shared test utilities for the decapta workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: sample CSV tables, ARB bundles and configuration documents
//! - [`workspace`]: [`TestWorkspace`], a temporary site directory

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;
