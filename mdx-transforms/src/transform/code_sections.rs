//! Structured expansion of annotated code blocks.
//!
//! Authors write a single fenced block annotated with `@desc:`, `@command:`,
//! `@code:` and `@results:` line markers; this transform decomposes it into
//! a labeled stack of description text, a shell command block, the code
//! itself (optionally titled) and its output. Detection is permissive: any
//! block containing one of the markers is processed, whatever its language
//! tag.

use std::sync::Arc;

use super::{LogOptions, Transform};
use crate::{
  ast::{Attribute, Node},
  context::FileContext,
  error::TransformResult,
  logging::{FileSink, LogSink, Logger},
  visit::{Edit, try_edit_children},
};

const DESC_MARKER: &str = "@desc:";
const COMMAND_MARKER: &str = "@command:";
const CODE_MARKER: &str = "@code:";
const RESULTS_MARKER: &str = "@results:";

/// Which buffer lines are currently being collected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Active {
  /// Lines before any marker are silently dropped.
  None,
  Description,
  Command,
  Code,
  Results,
}

/// Ephemeral parse result for one annotated block.
#[derive(Debug, Default, PartialEq, Eq)]
struct Sections {
  description: String,
  command:     String,
  code:        String,
  results:     String,
  code_title:  Option<String>,
}

fn has_markers(value: &str) -> bool {
  [DESC_MARKER, COMMAND_MARKER, CODE_MARKER, RESULTS_MARKER]
    .iter()
    .any(|marker| value.contains(marker))
}

fn append_line(buffer: &mut String, line: &str) {
  if !buffer.is_empty() {
    buffer.push('\n');
  }
  buffer.push_str(line);
}

/// Line-oriented state machine over the raw block text.
fn parse_sections(value: &str) -> Sections {
  let mut sections = Sections::default();
  let mut active = Active::None;

  for line in value.lines() {
    if let Some(rest) = line.strip_prefix(DESC_MARKER) {
      active = Active::Description;
      sections.description = rest.trim_start().to_string();
    } else if let Some(rest) = line.strip_prefix(COMMAND_MARKER) {
      active = Active::Command;
      sections.command = rest.trim_start().to_string();
    } else if let Some(rest) = line.strip_prefix(CODE_MARKER) {
      // The remainder is a title for the code buffer, not content.
      active = Active::Code;
      let title = rest.trim();
      sections.code_title =
        (!title.is_empty()).then(|| title.to_string());
    } else if let Some(rest) = line.strip_prefix(RESULTS_MARKER) {
      active = Active::Results;
      sections.results = rest.trim_start().to_string();
    } else {
      match active {
        Active::None => {},
        Active::Description => append_line(&mut sections.description, line),
        Active::Command => append_line(&mut sections.command, line),
        Active::Code => append_line(&mut sections.code, line),
        Active::Results => append_line(&mut sections.results, line),
      }
    }
  }

  sections
}

/// The rendered code language: the original tag with any `example-` prefix
/// stripped.
fn derived_lang(lang: Option<&str>) -> Option<String> {
  lang.map(|l| l.strip_prefix("example-").unwrap_or(l).to_string())
}

fn label_paragraph(text: &str) -> Node {
  Node::Paragraph {
    children: vec![Node::Strong {
      children: vec![Node::text(text)],
    }],
  }
}

/// Build the replacement container. Subsections appear in fixed order and
/// only when their buffer is non-empty; markers with no content still yield
/// the (then childless) container.
fn build_container(sections: &Sections, lang: Option<String>) -> Node {
  let mut children = Vec::new();

  let description = sections.description.trim();
  if !description.is_empty() {
    children.push(label_paragraph("Description:"));
    children.push(Node::Paragraph {
      children: vec![Node::text(description)],
    });
  }

  let command = sections.command.trim();
  if !command.is_empty() {
    children.push(label_paragraph("Command:"));
    children.push(Node::code(Some("shell".into()), command));
  }

  let code = sections.code.trim();
  if !code.is_empty() {
    if let Some(title) = &sections.code_title {
      children.push(label_paragraph(title));
    }
    children.push(Node::code(lang, code));
  }

  let results = sections.results.trim();
  if !results.is_empty() {
    children.push(label_paragraph("Results:"));
    children.push(Node::code(Some("text".into()), results));
  }

  Node::MdxJsxFlowElement {
    name: Some("div".into()),
    attributes: vec![Attribute::literal("className", "code-section")],
    children,
  }
}

/// Expands annotated code blocks into labeled subsections. See the module
/// docs.
pub struct CodeSections {
  logger: Logger,
}

impl CodeSections {
  /// Create the transform, logging to the default log file.
  #[must_use]
  pub fn new(options: LogOptions) -> Self {
    Self::with_sink(options, Arc::new(FileSink::default()))
  }

  /// Create the transform with an injected log sink.
  #[must_use]
  pub fn with_sink(options: LogOptions, sink: Arc<dyn LogSink>) -> Self {
    Self {
      logger: Logger::new(options.resolve(), "remarkCodeSections", sink),
    }
  }
}

impl Transform for CodeSections {
  fn name(&self) -> &str {
    "remarkCodeSections"
  }

  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    try_edit_children(tree, &mut |node| {
      let Node::Code { lang, value, .. } = node else {
        return Ok(Edit::Keep);
      };
      if !has_markers(value) {
        return Ok(Edit::Keep);
      }

      self.logger.debug(&format!(
        "expanding code sections in {}",
        file.display_path()
      ))?;
      let sections = parse_sections(value);
      Ok(Edit::Replace(build_container(
        &sections,
        derived_lang(lang.as_deref()),
      )))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::logging::MemorySink;

  fn transform() -> CodeSections {
    CodeSections::with_sink(LogOptions::default(), Arc::new(MemorySink::new()))
  }

  const FULL_BLOCK: &str = "@desc: enroll the identity\n\
                            @command: ziti edge enroll id.jwt\n\
                            @code: enroll.sh\n\
                            #!/bin/sh\n\
                            ziti edge enroll \"$1\"\n\
                            @results: enrollment complete";

  #[test]
  fn test_parse_full_block() {
    let sections = parse_sections(FULL_BLOCK);
    assert_eq!(sections.description, "enroll the identity");
    assert_eq!(sections.command, "ziti edge enroll id.jwt");
    assert_eq!(sections.code_title.as_deref(), Some("enroll.sh"));
    assert_eq!(sections.code, "#!/bin/sh\nziti edge enroll \"$1\"");
    assert_eq!(sections.results, "enrollment complete");
  }

  #[test]
  fn test_lines_before_first_marker_dropped() {
    let sections = parse_sections("preamble\n@desc: real start");
    assert_eq!(sections.description, "real start");
    assert!(sections.command.is_empty());
  }

  #[test]
  fn test_code_marker_remainder_is_title_not_content() {
    let sections = parse_sections("@code: my title");
    assert_eq!(sections.code_title.as_deref(), Some("my title"));
    assert!(sections.code.is_empty());
  }

  #[test]
  fn test_derived_lang_strips_example_prefix() {
    assert_eq!(derived_lang(Some("example-go")), Some("go".to_string()));
    assert_eq!(derived_lang(Some("go")), Some("go".to_string()));
    assert_eq!(derived_lang(None), None);
  }

  #[test]
  fn test_full_block_expands_in_fixed_order() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::code(Some("example-sh".into()), FULL_BLOCK)],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::MdxJsxFlowElement {
      name,
      children: parts,
      ..
    } = &children[0]
    else {
      return;
    };
    assert_eq!(name.as_deref(), Some("div"));

    // description label+text, command label+code, title+code, results
    // label+code
    assert_eq!(parts.len(), 8);
    assert_eq!(parts[0], label_paragraph("Description:"));
    assert_eq!(parts[1], Node::Paragraph {
      children: vec![Node::text("enroll the identity")],
    });
    assert_eq!(parts[2], label_paragraph("Command:"));
    assert_eq!(
      parts[3],
      Node::code(Some("shell".into()), "ziti edge enroll id.jwt")
    );
    assert_eq!(parts[4], label_paragraph("enroll.sh"));
    assert_eq!(
      parts[5],
      Node::code(Some("sh".into()), "#!/bin/sh\nziti edge enroll \"$1\"")
    );
    assert_eq!(parts[6], label_paragraph("Results:"));
    assert_eq!(
      parts[7],
      Node::code(Some("text".into()), "enrollment complete")
    );
  }

  #[test]
  fn test_empty_sections_still_replace_with_empty_container() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::code(None, "@desc:\n@command:")],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Node::MdxJsxFlowElement {
      children: parts, ..
    } = &children[0]
    else {
      return;
    };
    assert!(parts.is_empty());
  }

  #[test]
  fn test_unannotated_block_untouched() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::code(Some("rust".into()), "fn main() {}")],
    };
    let before = tree.clone();
    t.apply(&mut tree, &FileContext::default()).expect("apply");
    assert_eq!(tree, before);
  }
}
