//! Narrow URL rewrite for `<meta>` elements.
//!
//! Social-meta tags embedded in MDX carry absolute content URLs that differ
//! between deployments; this transform swaps a configured substring in the
//! `content` attribute of `<meta>` JSX elements. Only the first occurrence
//! is replaced.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Transform;
use crate::{
  ast::{Attribute, AttributeValue, Node},
  context::FileContext,
  error::TransformResult,
  logging::{FileSink, LogLevel, LogSink, Logger, resolve_log_level},
  visit::try_visit_mut,
};

/// Configuration for [`ReplaceMetaUrl`]: a single `{from, to}` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaUrlOptions {
  /// Substring to search for in `content` attribute values.
  pub from: String,

  /// Replacement for the first occurrence.
  pub to: String,

  /// Explicit log level.
  pub log_level: Option<LogLevel>,

  /// Legacy toggle; maps to `Debug` when no explicit level is set.
  pub debug: bool,
}

/// Rewrites the `content` attribute of `<meta>` elements. See the module
/// docs.
pub struct ReplaceMetaUrl {
  from:   String,
  to:     String,
  logger: Logger,
}

impl ReplaceMetaUrl {
  /// Create the transform, logging to the default log file.
  #[must_use]
  pub fn new(options: MetaUrlOptions) -> Self {
    Self::with_sink(options, Arc::new(FileSink::default()))
  }

  /// Create the transform with an injected log sink.
  #[must_use]
  pub fn with_sink(options: MetaUrlOptions, sink: Arc<dyn LogSink>) -> Self {
    let level = resolve_log_level(options.log_level, options.debug);
    Self {
      from:   options.from,
      to:     options.to,
      logger: Logger::new(level, "remarkReplaceMetaUrl", sink),
    }
  }
}

impl Transform for ReplaceMetaUrl {
  fn name(&self) -> &str {
    "remarkReplaceMetaUrl"
  }

  fn apply(&self, tree: &mut Node, _file: &FileContext) -> TransformResult<()> {
    // Absent configuration is a no-op, not an error.
    if self.from.is_empty() {
      return Ok(());
    }

    try_visit_mut(tree, &mut |node| {
      let Node::MdxJsxFlowElement {
        name: Some(name),
        attributes,
        ..
      } = node
      else {
        return Ok(());
      };
      if name != "meta" {
        return Ok(());
      }

      for attribute in attributes {
        if let Attribute::MdxJsxAttribute {
          name: attr_name,
          value: Some(AttributeValue::Literal(value)),
        } = attribute
        {
          if attr_name == "content" && value.contains(&self.from) {
            let new_value = value.replacen(&self.from, &self.to, 1);
            self
              .logger
              .info(&format!("rewriting: \"{value}\" -> \"{new_value}\""))?;
            *value = new_value;
          }
        }
      }
      Ok(())
    })
  }
}
