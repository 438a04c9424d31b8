//! YAML-to-table conversion.
//!
//! Fenced blocks tagged `yaml-table` hold tabular data as a YAML sequence of
//! mappings. Column headers come from the first mapping's keys in document
//! order; every element becomes one row, with missing keys rendered as empty
//! cells. A block that fails to parse is logged and left as-is so a bad
//! table degrades to visible raw YAML instead of breaking the build.

use std::sync::Arc;

use serde_yaml::Value;

use super::{LogOptions, Transform};
use crate::{
  ast::{Align, Node},
  context::FileContext,
  error::TransformResult,
  logging::{FileSink, LogSink, Logger},
  visit::{Edit, try_edit_children},
};

const YAML_TABLE_LANG: &str = "yaml-table";

/// Render one YAML value as cell text. Scalars render the way the host
/// pipeline stringifies them (`null` is empty); structured values fall back
/// to their YAML serialization.
fn cell_text(value: &Value) -> String {
  match value {
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.clone(),
    other => serde_yaml::to_string(other)
      .map(|s| s.trim_end().to_string())
      .unwrap_or_default(),
  }
}

fn cell(text: String) -> Node {
  Node::TableCell {
    children: vec![Node::text(text)],
  }
}

/// Build a table node from parsed YAML, or `None` when the data is not a
/// non-empty sequence whose first element is a mapping.
fn table_from_yaml(data: &Value) -> Option<Node> {
  let rows = data.as_sequence()?;
  let first = rows.first()?.as_mapping()?;
  let headers: Vec<&Value> = first.keys().collect();

  let mut children = Vec::with_capacity(rows.len() + 1);
  children.push(Node::TableRow {
    children: headers.iter().map(|key| cell(cell_text(key))).collect(),
  });

  for row in rows {
    children.push(Node::TableRow {
      children: headers
        .iter()
        .map(|key| {
          let value = row.as_mapping().and_then(|mapping| mapping.get(key));
          cell(value.map(cell_text).unwrap_or_default())
        })
        .collect(),
    });
  }

  Some(Node::Table {
    align: vec![None::<Align>; headers.len()],
    children,
  })
}

/// Converts `yaml-table` code blocks into table nodes. See the module docs.
pub struct YamlTable {
  logger: Logger,
}

impl YamlTable {
  /// Create the transform, logging to the default log file.
  #[must_use]
  pub fn new(options: LogOptions) -> Self {
    Self::with_sink(options, Arc::new(FileSink::default()))
  }

  /// Create the transform with an injected log sink.
  #[must_use]
  pub fn with_sink(options: LogOptions, sink: Arc<dyn LogSink>) -> Self {
    Self {
      logger: Logger::new(options.resolve(), "remarkYamlTable", sink),
    }
  }
}

impl Transform for YamlTable {
  fn name(&self) -> &str {
    "remarkYamlTable"
  }

  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    try_edit_children(tree, &mut |node| {
      let Node::Code {
        lang: Some(lang),
        value,
        ..
      } = node
      else {
        return Ok(Edit::Keep);
      };
      if lang != YAML_TABLE_LANG {
        return Ok(Edit::Keep);
      }

      match serde_yaml::from_str::<Value>(value) {
        Ok(data) => Ok(
          table_from_yaml(&data).map_or(Edit::Keep, Edit::Replace),
        ),
        Err(err) => {
          // Contained failure: the block renders as raw YAML.
          log::error!("YAML parsing error: {err}");
          self.logger.info(&format!(
            "YAML parsing error in {}: {err}",
            file.display_path()
          ))?;
          Ok(Edit::Keep)
        },
      }
    })
  }
}
