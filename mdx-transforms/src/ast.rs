//! Typed document tree for MDX/markdown content.
//!
//! The host pipeline parses source documents into an mdast-shaped tree and
//! hands it to the configured transforms; this module is the Rust-native
//! rendition of that tree. Nodes serialize to and from mdast-compatible JSON
//! (the `type` field is the discriminant), so a tree produced by an external
//! parser can cross the process boundary as plain JSON.
//!
//! Transforms mutate the tree in place: URL fields are reassigned, nodes are
//! replaced or removed at their index in the parent's `children`. Nothing
//! here copies the tree.

use serde::{Deserialize, Serialize};

/// A single node in the document tree.
///
/// Container variants carry ordered `children`; leaf variants carry their
/// type-specific payload. Unknown fields in incoming JSON (positions, data
/// attached by other plugins) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
  Root {
    #[serde(default)]
    children: Vec<Node>,
  },
  Paragraph {
    #[serde(default)]
    children: Vec<Node>,
  },
  Heading {
    depth: u8,
    #[serde(default)]
    children: Vec<Node>,
  },
  Blockquote {
    #[serde(default)]
    children: Vec<Node>,
  },
  List {
    #[serde(default)]
    ordered: bool,
    #[serde(default)]
    children: Vec<Node>,
  },
  ListItem {
    #[serde(default)]
    children: Vec<Node>,
  },
  Strong {
    #[serde(default)]
    children: Vec<Node>,
  },
  Emphasis {
    #[serde(default)]
    children: Vec<Node>,
  },
  Text {
    value: String,
  },
  InlineCode {
    value: String,
  },
  Code {
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    meta: Option<String>,
    value: String,
  },
  Link {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    children: Vec<Node>,
  },
  Image {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    alt: Option<String>,
  },
  Table {
    #[serde(default)]
    align: Vec<Option<Align>>,
    #[serde(default)]
    children: Vec<Node>,
  },
  TableRow {
    #[serde(default)]
    children: Vec<Node>,
  },
  TableCell {
    #[serde(default)]
    children: Vec<Node>,
  },
  /// An embedded tag-like construct (inline component or HTML element) with
  /// a name and attributes. A `None` name is a fragment.
  MdxJsxFlowElement {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attributes: Vec<Attribute>,
    #[serde(default)]
    children: Vec<Node>,
  },
  /// Raw import/export source text embedded in the document.
  MdxjsEsm {
    value: String,
  },
}

/// Column alignment for [`Node::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
  Left,
  Right,
  Center,
}

/// An attribute on a [`Node::MdxJsxFlowElement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Attribute {
  /// A named attribute. `value` is `None` for boolean-style attributes.
  MdxJsxAttribute {
    name: String,
    #[serde(default)]
    value: Option<AttributeValue>,
  },
  /// A spread attribute (`{...expr}`); opaque to all transforms.
  MdxJsxExpressionAttribute { value: String },
}

impl Attribute {
  /// Construct a plain string-valued attribute.
  #[must_use]
  pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self::MdxJsxAttribute {
      name:  name.into(),
      value: Some(AttributeValue::Literal(value.into())),
    }
  }
}

/// The value of a named JSX attribute.
///
/// Only [`AttributeValue::Literal`] values are ever rewritten; expression
/// values are carried through untouched (and round-trip as opaque JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
  Literal(String),
  Expression(serde_json::Value),
}

impl Node {
  /// Construct a text node.
  #[must_use]
  pub fn text(value: impl Into<String>) -> Self {
    Self::Text {
      value: value.into(),
    }
  }

  /// Construct a fenced code node with no meta string.
  #[must_use]
  pub fn code(lang: Option<String>, value: impl Into<String>) -> Self {
    Self::Code {
      lang,
      meta: None,
      value: value.into(),
    }
  }

  /// The mdast `type` string for this node.
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::Root { .. } => "root",
      Self::Paragraph { .. } => "paragraph",
      Self::Heading { .. } => "heading",
      Self::Blockquote { .. } => "blockquote",
      Self::List { .. } => "list",
      Self::ListItem { .. } => "listItem",
      Self::Strong { .. } => "strong",
      Self::Emphasis { .. } => "emphasis",
      Self::Text { .. } => "text",
      Self::InlineCode { .. } => "inlineCode",
      Self::Code { .. } => "code",
      Self::Link { .. } => "link",
      Self::Image { .. } => "image",
      Self::Table { .. } => "table",
      Self::TableRow { .. } => "tableRow",
      Self::TableCell { .. } => "tableCell",
      Self::MdxJsxFlowElement { .. } => "mdxJsxFlowElement",
      Self::MdxjsEsm { .. } => "mdxjsEsm",
    }
  }

  /// Child nodes, if this node is a container.
  #[must_use]
  pub const fn children(&self) -> Option<&Vec<Self>> {
    match self {
      Self::Root { children }
      | Self::Paragraph { children }
      | Self::Heading { children, .. }
      | Self::Blockquote { children }
      | Self::List { children, .. }
      | Self::ListItem { children }
      | Self::Strong { children }
      | Self::Emphasis { children }
      | Self::Link { children, .. }
      | Self::Table { children, .. }
      | Self::TableRow { children }
      | Self::TableCell { children }
      | Self::MdxJsxFlowElement { children, .. } => Some(children),
      Self::Text { .. }
      | Self::InlineCode { .. }
      | Self::Code { .. }
      | Self::Image { .. }
      | Self::MdxjsEsm { .. } => None,
    }
  }

  /// Mutable child nodes, if this node is a container.
  pub const fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
    match self {
      Self::Root { children }
      | Self::Paragraph { children }
      | Self::Heading { children, .. }
      | Self::Blockquote { children }
      | Self::List { children, .. }
      | Self::ListItem { children }
      | Self::Strong { children }
      | Self::Emphasis { children }
      | Self::Link { children, .. }
      | Self::Table { children, .. }
      | Self::TableRow { children }
      | Self::TableCell { children }
      | Self::MdxJsxFlowElement { children, .. } => Some(children),
      Self::Text { .. }
      | Self::InlineCode { .. }
      | Self::Code { .. }
      | Self::Image { .. }
      | Self::MdxjsEsm { .. } => None,
    }
  }

  /// Deserialize a tree from mdast-compatible JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if the JSON is malformed or contains a node type this
  /// crate does not model.
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  /// Serialize this tree to mdast-compatible JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}
