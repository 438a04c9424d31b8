//! Prefix rewriting for scoped paths.
//!
//! Documentation sources shared between sites refer to images, links and
//! imports through scope-style prefixes (`@openzitidocs/img/foo.png`); each
//! site maps those prefixes onto its own mount point at build time. This
//! transform applies an ordered mapping set to image and link URLs, to every
//! string-valued attribute of every JSX element, and to the source text of
//! embedded import/export statements.
//!
//! Every mapping entry is applied in turn against the *current* value of the
//! field, not the original, so a later entry can re-match a value an earlier
//! entry just produced. That cascading behavior is load-bearing for existing
//! site configurations and is preserved here.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Transform;
use crate::{
  ast::{Attribute, AttributeValue, Node},
  context::FileContext,
  error::TransformResult,
  logging::{FileSink, LogLevel, LogSink, Logger, resolve_log_level},
  util::never_matching_regex,
  visit::try_visit_mut,
};

/// A single `{from, to}` prefix-rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
  /// Literal prefix to match at the start of a candidate string.
  pub from: String,
  /// Replacement for the matched prefix.
  pub to: String,
}

impl Mapping {
  /// Convenience constructor.
  #[must_use]
  pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self {
      from: from.into(),
      to:   to.into(),
    }
  }
}

/// Configuration for [`ScopedPath`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScopedPathOptions {
  /// Ordered mapping set; absent mappings make the transform a no-op.
  pub mappings: Vec<Mapping>,

  /// Explicit log level.
  pub log_level: Option<LogLevel>,

  /// Legacy toggle; maps to `Debug` when no explicit level is set.
  pub debug: bool,
}

/// One precompiled import-specifier rule: matches `from` immediately after a
/// quote character and immediately before a `/`, anywhere in the statement.
struct EsmRule {
  pattern: Regex,
  from:    String,
  to:      String,
}

/// Rewrites scoped path prefixes across the tree. See the module docs.
pub struct ScopedPath {
  mappings:  Vec<Mapping>,
  esm_rules: Vec<EsmRule>,
  logger:    Logger,
}

impl ScopedPath {
  /// Create the transform, logging to the default log file.
  #[must_use]
  pub fn new(options: ScopedPathOptions) -> Self {
    Self::with_sink(options, Arc::new(FileSink::default()))
  }

  /// Create the transform with an injected log sink.
  #[must_use]
  pub fn with_sink(
    options: ScopedPathOptions,
    sink: Arc<dyn LogSink>,
  ) -> Self {
    let level = resolve_log_level(options.log_level, options.debug);
    let logger = Logger::new(level, "remarkScopedPath", sink);

    let esm_rules = options
      .mappings
      .iter()
      .map(|mapping| {
        let pattern = format!(r#"(['"]){}/"#, regex::escape(&mapping.from));
        EsmRule {
          pattern: Regex::new(&pattern)
            .unwrap_or_else(|_| never_matching_regex()),
          from:    mapping.from.clone(),
          to:      mapping.to.clone(),
        }
      })
      .collect();

    Self {
      mappings: options.mappings,
      esm_rules,
      logger,
    }
  }

  /// Apply every mapping in order against the current value. Prefix-anchored.
  fn rewrite_prefixed(
    &self,
    value: &mut String,
    context: &str,
  ) -> TransformResult<()> {
    for mapping in &self.mappings {
      if value.starts_with(&mapping.from) {
        let new_value =
          format!("{}{}", mapping.to, &value[mapping.from.len()..]);
        self.logger.info(&format!("{context} {value} -> {new_value}"))?;
        *value = new_value;
      }
    }
    Ok(())
  }

  /// Quote-anchored substring rewrite over raw import/export source text.
  fn rewrite_esm(&self, value: &mut String) -> TransformResult<()> {
    for rule in &self.esm_rules {
      let new_value = rule
        .pattern
        .replace_all(value, |caps: &regex::Captures<'_>| {
          format!("{}{}/", &caps[1], rule.to)
        })
        .into_owned();
      if new_value != *value {
        self.logger.info(&format!(
          "esm rewrite ({} -> {}):\n--- before ---\n{value}\n--- after \
           ---\n{new_value}",
          rule.from, rule.to
        ))?;
        *value = new_value;
      }
    }
    Ok(())
  }
}

impl Transform for ScopedPath {
  fn name(&self) -> &str {
    "remarkScopedPath"
  }

  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    self
      .logger
      .debug(&format!("processing file: {}", file.display_path()))?;

    try_visit_mut(tree, &mut |node| {
      match node {
        Node::Image { url, .. } => self.rewrite_prefixed(url, "img")?,
        Node::Link { url, .. } => self.rewrite_prefixed(url, "link")?,
        Node::MdxJsxFlowElement {
          name, attributes, ..
        } => {
          let tag = name.as_deref().unwrap_or_default();
          for attribute in attributes {
            if let Attribute::MdxJsxAttribute {
              name: attr_name,
              value: Some(AttributeValue::Literal(value)),
            } = attribute
            {
              self.rewrite_prefixed(
                value,
                &format!("jsx <{tag}> {attr_name}:"),
              )?;
            }
          }
        },
        Node::MdxjsEsm { value } => self.rewrite_esm(value)?,
        _ => {},
      }
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::logging::MemorySink;

  fn transform(mappings: Vec<Mapping>) -> ScopedPath {
    ScopedPath::with_sink(
      ScopedPathOptions {
        mappings,
        ..ScopedPathOptions::default()
      },
      Arc::new(MemorySink::new()),
    )
  }

  #[test]
  fn test_image_prefix_rewrite() {
    let t = transform(vec![Mapping::new("@openzitidocs", "/docs/openziti")]);
    let mut tree = Node::Root {
      children: vec![Node::Image {
        url:   "@openzitidocs/img/foo.png".into(),
        title: None,
        alt:   None,
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    assert_eq!(children[0], Node::Image {
      url:   "/docs/openziti/img/foo.png".into(),
      title: None,
      alt:   None,
    });
  }

  #[test]
  fn test_non_matching_url_unchanged() {
    let t = transform(vec![Mapping::new("@openzitidocs", "/docs/openziti")]);
    let mut tree = Node::Root {
      children: vec![Node::Link {
        url:      "https://example.com/@openzitidocs".into(),
        title:    None,
        children: vec![],
      }],
    };
    let before = tree.clone();
    t.apply(&mut tree, &FileContext::default()).expect("apply");
    assert_eq!(tree, before);
  }

  #[test]
  fn test_mappings_cascade_over_current_value() {
    // The second entry re-matches the value the first entry produced.
    let t = transform(vec![
      Mapping::new("@docs", "/site"),
      Mapping::new("/site/a", "/site/b"),
    ]);
    let mut tree = Node::Root {
      children: vec![Node::Link {
        url:      "@docs/a/page".into(),
        title:    None,
        children: vec![],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::Link { url, .. } = &children[0] else {
      return;
    };
    assert_eq!(url, "/site/b/page");
  }

  #[test]
  fn test_jsx_attributes_rewritten_on_any_element() {
    let t = transform(vec![Mapping::new("@static", "/static")]);
    let mut tree = Node::Root {
      children: vec![Node::MdxJsxFlowElement {
        name:       Some("Thumbnail".into()),
        attributes: vec![
          Attribute::literal("src", "@static/img/a.png"),
          Attribute::MdxJsxAttribute {
            name:  "width".into(),
            value: Some(AttributeValue::Expression(serde_json::json!({
              "type": "mdxJsxAttributeValueExpression",
              "value": "400"
            }))),
          },
        ],
        children:   vec![],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::MdxJsxFlowElement { attributes, .. } = &children[0] else {
      return;
    };
    assert_eq!(
      attributes[0],
      Attribute::literal("src", "/static/img/a.png")
    );
    // Expression values are never touched
    assert!(matches!(&attributes[1], Attribute::MdxJsxAttribute {
      value: Some(AttributeValue::Expression(_)),
      ..
    }));
  }

  #[test]
  fn test_esm_rewrite_is_quote_anchored_substring() {
    let t = transform(vec![Mapping::new("@openzitidocs", "/docs/openziti")]);
    let mut tree = Node::Root {
      children: vec![Node::MdxjsEsm {
        value: concat!(
          "import x from \"@openzitidocs/a\"; ",
          "import y from \"other/@openzitidocs/b\";"
        )
        .into(),
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::MdxjsEsm { value } = &children[0] else {
      return;
    };
    // Only the quote-adjacent occurrence is rewritten; the mid-string one
    // is not preceded by a quote character.
    assert_eq!(
      value,
      "import x from \"/docs/openziti/a\"; import y from \
       \"other/@openzitidocs/b\";"
    );
  }

  #[test]
  fn test_esm_rewrite_all_quote_adjacent_occurrences() {
    let t = transform(vec![Mapping::new("@openzitidocs", "/docs/openziti")]);
    let mut tree = Node::Root {
      children: vec![Node::MdxjsEsm {
        value: concat!(
          "import x from '@openzitidocs/a';\n",
          "export { y } from \"@openzitidocs/b\";"
        )
        .into(),
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::MdxjsEsm { value } = &children[0] else {
      return;
    };
    assert_eq!(
      value,
      "import x from '/docs/openziti/a';\nexport { y } from \
       \"/docs/openziti/b\";"
    );
  }

  #[test]
  fn test_rewrites_are_logged_with_node_kind() {
    let sink = Arc::new(MemorySink::new());
    let t = ScopedPath::with_sink(
      ScopedPathOptions {
        mappings: vec![Mapping::new("@docs", "/docs")],
        log_level: Some(LogLevel::Info),
        debug: false,
      },
      Arc::clone(&sink) as Arc<dyn LogSink>,
    );
    let mut tree = Node::Root {
      children: vec![Node::Image {
        url:   "@docs/a.png".into(),
        title: None,
        alt:   None,
      }],
    };
    t.apply(&mut tree, &FileContext::new("x.mdx")).expect("apply");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("img @docs/a.png -> /docs/a.png"));
  }
}
