//! Document-tree transforms and the pipeline that runs them.
//!
//! Each transform mutates the tree in place according to one fixed rule.
//! Transforms never talk to each other except through the shared tree;
//! ordering matters only in that later transforms see earlier edits. The
//! host pipeline parses documents, builds a [`Pipeline`], and runs it once
//! per document before rendering.

pub mod code_sections;
pub mod meta_url;
pub mod scoped_path;
pub mod timed;
pub mod yaml_table;
pub mod youtube;

use serde::{Deserialize, Serialize};

pub use self::{
  code_sections::CodeSections,
  meta_url::{MetaUrlOptions, ReplaceMetaUrl},
  scoped_path::{Mapping, ScopedPath, ScopedPathOptions},
  timed::Timed,
  yaml_table::YamlTable,
  youtube::YouTubeEmbed,
};
use crate::{
  ast::Node,
  context::FileContext,
  error::TransformResult,
  logging::{LogLevel, resolve_log_level},
};

/// A tree transform.
///
/// `apply` mutates the tree in place and completes or fails; there is no
/// partial-success return value. The only designed failure is a log-sink
/// write error, which aborts the current document's build in the host.
pub trait Transform {
  /// Stable name of this transform, used in timing and log output.
  fn name(&self) -> &str;

  /// Apply this transform to the tree.
  ///
  /// # Errors
  ///
  /// Returns an error if a log write fails.
  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()>;
}

impl<T: Transform + ?Sized> Transform for Box<T> {
  fn name(&self) -> &str {
    (**self).name()
  }

  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    (**self).apply(tree, file)
  }
}

/// Logging surface shared by transforms whose only option is verbosity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogOptions {
  /// Explicit log level.
  pub log_level: Option<LogLevel>,

  /// Legacy toggle; maps to `Debug` when no explicit level is set.
  pub debug: bool,
}

impl LogOptions {
  /// Effective level after resolving the legacy `debug` toggle.
  #[must_use]
  pub fn resolve(self) -> LogLevel {
    resolve_log_level(self.log_level, self.debug)
  }
}

/// Ordered list of transforms applied to one document's tree.
#[derive(Default)]
pub struct Pipeline {
  transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
  /// Create an empty pipeline.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a transform, builder style.
  #[must_use]
  pub fn with(mut self, transform: impl Transform + 'static) -> Self {
    self.push(transform);
    self
  }

  /// Append a transform.
  pub fn push(&mut self, transform: impl Transform + 'static) {
    self.transforms.push(Box::new(transform));
  }

  /// Number of configured transforms.
  #[must_use]
  pub fn len(&self) -> usize {
    self.transforms.len()
  }

  /// Whether the pipeline has no transforms.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.transforms.is_empty()
  }

  /// Run every transform in order, stopping at the first error.
  ///
  /// # Errors
  ///
  /// Returns the first transform error; the tree keeps any edits made up to
  /// that point.
  pub fn run(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    for transform in &self.transforms {
      transform.apply(tree, file)?;
    }
    Ok(())
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let names: Vec<&str> =
      self.transforms.iter().map(|t| t.name()).collect();
    f.debug_struct("Pipeline").field("transforms", &names).finish()
  }
}
