//! Core layer for decapta
//!
//! Turns structured data sources into per-entity documents a Decap CMS
//! editor can work on, turns them back, and keeps the CMS configuration
//! in step with the sources:
//!
//! - **Record codecs**: CSV tables and ARB translation bundles to and from
//!   per-entity YAML documents
//! - **Schema builder**: collection descriptors with inferred widgets
//! - **Merge engine**: add-only synchronization of `config.yml` that keeps
//!   hand edits and comments
//!
//! # Architecture
//!
//! ```text
//!                decapta-cli
//!                     |
//!                decapta-core
//!                     |
//!        +------------+-------------+
//!        |                          |
//!   decapta-fs               decapta-content
//! ```
//!
//! # Example
//!
//! ```ignore
//! use decapta_core::{ConfigOptions, pipeline};
//! use decapta_fs::{NormalizedPath, SourceFormat};
//!
//! let options = ConfigOptions::new(NormalizedPath::new("data"));
//! let run = pipeline::generate_config(SourceFormat::Csv, &options)?;
//! println!("{}", run.outcome.diff());
//! ```

pub mod codec;
pub mod error;
pub mod naming;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod sync;

pub use codec::sidecar::ColumnOrder;
pub use codec::tabular::{EncodedTable, Table};
pub use error::{Error, Result};
pub use naming::Naming;
pub use options::{ConfigOptions, PostProcessOptions, PreProcessOptions};
pub use pipeline::{ConfigRun, describe_sources, generate_config, post_process, pre_process};
pub use report::{BatchReport, SourceFailure};
pub use schema::{Collection, CollectionFile, CollectionKey, Editor, Field, Widget};
pub use sync::{ConfigSync, MergeSummary, SyncOutcome, synchronize};
