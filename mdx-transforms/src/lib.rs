//! # mdx-transforms - document-tree transforms for MDX documentation sites
//!
//! A small library of tree transforms used when building documentation
//! sites from shared MDX content: scoped-path prefix rewriting, social-meta
//! URL rewriting, structured code-section expansion, YAML-to-table
//! conversion and YouTube embed replacement, plus the typed tree they
//! operate on, a leveled file logger and a timing decorator.
//!
//! The host pipeline parses each document into an mdast-shaped tree (see
//! [`ast::Node`], which round-trips mdast-compatible JSON), then runs a
//! configured [`transform::Pipeline`] over it before rendering. All edits
//! are made in place; transforms only communicate through the shared tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mdx_transforms::{
//!   ast::Node,
//!   context::FileContext,
//!   logging::MemorySink,
//!   transform::{Mapping, Pipeline, ScopedPath, ScopedPathOptions},
//! };
//!
//! # fn main() -> Result<(), mdx_transforms::error::TransformError> {
//! let pipeline = Pipeline::new().with(ScopedPath::with_sink(
//!   ScopedPathOptions {
//!     mappings: vec![Mapping::new("@openzitidocs", "/docs/openziti")],
//!     ..ScopedPathOptions::default()
//!   },
//!   Arc::new(MemorySink::new()),
//! ));
//!
//! let mut tree = Node::Root {
//!   children: vec![Node::Image {
//!     url:   "@openzitidocs/img/quickstart.png".into(),
//!     title: None,
//!     alt:   None,
//!   }],
//! };
//!
//! pipeline.run(&mut tree, &FileContext::new("docs/quickstart.mdx"))?;
//!
//! assert!(matches!(
//!   &tree.children().expect("root has children")[0],
//!   Node::Image { url, .. } if url == "/docs/openziti/img/quickstart.png"
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Several transforms trace their rewrites. Each takes a [`logging::LogSink`]
//! at construction; the default sink appends to `remark-plugins.log` in the
//! process working directory, and lines are echoed through the [`log`]
//! facade when a backend is installed. `LogLevel::Silent` (the default)
//! suppresses everything.

pub mod ast;
pub mod context;
pub mod error;
pub mod logging;
pub mod transform;
pub mod util;
pub mod visit;

pub use crate::{
  ast::{Align, Attribute, AttributeValue, Node},
  context::FileContext,
  error::{TransformError, TransformResult},
  logging::{FileSink, LogLevel, LogSink, Logger, MemorySink},
  transform::{
    CodeSections,
    LogOptions,
    Mapping,
    MetaUrlOptions,
    Pipeline,
    ReplaceMetaUrl,
    ScopedPath,
    ScopedPathOptions,
    Timed,
    Transform,
    YamlTable,
    YouTubeEmbed,
  },
  visit::{Edit, try_edit_children, try_visit_mut},
};
