//! YouTube link detection and embed replacement.
//!
//! Bare YouTube URLs in link or text nodes (including the legacy
//! `%[<url>]` bracket notation some imported content still carries) are
//! replaced with a `LiteYouTubeEmbed` component reference. A second pass
//! removes the stray `%[` / `]` text fragments left behind when the bracket
//! wrapper was split across sibling nodes by the parser.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{LogOptions, Transform};
use crate::{
  ast::{Attribute, Node},
  context::FileContext,
  error::{TransformError, TransformResult},
  logging::{FileSink, LogSink, Logger},
  util::never_matching_regex,
  visit::{Edit, try_edit_children},
};

static WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^%\[(.+)\]$").unwrap_or_else(|_| never_matching_regex())
});

static URL_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
  [
    r"youtube\.com/watch\?v=([A-Za-z0-9_-]+)",
    r"youtu\.be/([A-Za-z0-9_-]+)",
    r"youtube-nocookie\.com/watch\?v=([A-Za-z0-9_-]+)",
  ]
  .map(|pattern| {
    Regex::new(pattern).unwrap_or_else(|_| never_matching_regex())
  })
});

/// Extract a video ID from a candidate URL, unwrapping the legacy bracket
/// notation first. URL shapes are tried in order; first match wins.
fn extract_video_id(raw: &str) -> Option<String> {
  let mut url = raw.trim();
  if let Some(caps) = WRAPPER_RE.captures(url) {
    url = caps.get(1)?.as_str();
  }

  URL_RES
    .iter()
    .find_map(|re| re.captures(url))
    .and_then(|caps| caps.get(1))
    .map(|id| id.as_str().to_string())
}

fn embed_element(id: &str) -> Node {
  Node::MdxJsxFlowElement {
    name: Some("LiteYouTubeEmbed".into()),
    attributes: vec![
      Attribute::literal("id", id),
      Attribute::literal("title", "YouTube video"),
    ],
    children: vec![],
  }
}

/// Replaces YouTube URLs with embed components. See the module docs.
pub struct YouTubeEmbed {
  logger: Logger,
}

impl YouTubeEmbed {
  /// Create the transform, logging to the default log file.
  #[must_use]
  pub fn new(options: LogOptions) -> Self {
    Self::with_sink(options, Arc::new(FileSink::default()))
  }

  /// Create the transform with an injected log sink.
  #[must_use]
  pub fn with_sink(options: LogOptions, sink: Arc<dyn LogSink>) -> Self {
    Self {
      logger: Logger::new(options.resolve(), "remarkYouTube", sink),
    }
  }
}

impl Transform for YouTubeEmbed {
  fn name(&self) -> &str {
    "remarkYouTube"
  }

  fn apply(&self, tree: &mut Node, _file: &FileContext) -> TransformResult<()> {
    // Pass 1: replace matching link/text nodes with embed elements.
    try_edit_children::<TransformError, _>(tree, &mut |node| {
      let candidate = match node {
        Node::Link { url, .. } => url.as_str(),
        Node::Text { value } => value.as_str(),
        _ => return Ok(Edit::Keep),
      };
      match extract_video_id(candidate) {
        Some(id) => {
          self.logger.debug(&format!("embedding video {id}"))?;
          Ok(Edit::Replace(embed_element(&id)))
        },
        None => Ok(Edit::Keep),
      }
    })?;

    // Pass 2: drop bracket-wrapper artifacts split across sibling nodes.
    try_edit_children(tree, &mut |node| {
      if let Node::Text { value } = node {
        let trimmed = value.trim();
        if trimmed == "%[" || trimmed == "]" {
          return Ok(Edit::Remove);
        }
      }
      Ok(Edit::Keep)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::logging::{LogLevel, MemorySink};

  fn transform() -> YouTubeEmbed {
    YouTubeEmbed::with_sink(LogOptions::default(), Arc::new(MemorySink::new()))
  }

  fn link(url: &str) -> Node {
    Node::Link {
      url:      url.into(),
      title:    None,
      children: vec![Node::text(url)],
    }
  }

  #[test]
  fn test_extract_video_id_shapes() {
    for url in [
      "https://youtube.com/watch?v=abc123",
      "https://youtu.be/abc123",
      "https://www.youtube-nocookie.com/watch?v=abc123",
      "%[https://youtu.be/abc123]",
      "  https://youtu.be/abc123  ",
    ] {
      assert_eq!(
        extract_video_id(url).as_deref(),
        Some("abc123"),
        "failed for {url}"
      );
    }
  }

  #[test]
  fn test_extract_video_id_rejects_unrelated_urls() {
    assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
    assert_eq!(extract_video_id("plain text"), None);
    assert_eq!(extract_video_id(""), None);
  }

  #[test]
  fn test_link_replaced_with_embed() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![link("https://youtube.com/watch?v=abc123")],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Some(inner) = children[0].children() else {
      return;
    };
    assert_eq!(inner[0], embed_element("abc123"));
  }

  #[test]
  fn test_text_node_with_wrapped_url_replaced() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![Node::text("%[https://youtu.be/abc123]")],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Some(inner) = children[0].children() else {
      return;
    };
    assert_eq!(inner[0], embed_element("abc123"));
  }

  #[test]
  fn test_unrelated_link_passes_through() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![link("https://example.com/page")],
      }],
    };
    let before = tree.clone();
    t.apply(&mut tree, &FileContext::default()).expect("apply");
    assert_eq!(tree, before);
  }

  #[test]
  fn test_bracket_artifacts_removed() {
    // A wrapper split across siblings: text "%[", link, text "]"
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![
          Node::text("%["),
          link("https://youtu.be/abc123"),
          Node::text(" ] "),
        ],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let Node::Root { children } = &tree else {
      return;
    };
    let Some(inner) = children[0].children() else {
      return;
    };
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0], embed_element("abc123"));
  }

  #[test]
  fn test_embed_rewrites_are_logged_at_debug() {
    let sink = Arc::new(MemorySink::new());
    let t = YouTubeEmbed::with_sink(
      LogOptions {
        log_level: Some(LogLevel::Debug),
        debug:     false,
      },
      Arc::clone(&sink) as Arc<dyn LogSink>,
    );
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![link("https://youtu.be/abc123")],
      }],
    };
    t.apply(&mut tree, &FileContext::default()).expect("apply");

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("embedding video abc123"));
  }

  #[test]
  fn test_ordinary_text_kept_by_cleanup() {
    let t = transform();
    let mut tree = Node::Root {
      children: vec![Node::Paragraph {
        children: vec![Node::text("just ] brackets %[ inline")],
      }],
    };
    let before = tree.clone();
    t.apply(&mut tree, &FileContext::default()).expect("apply");
    assert_eq!(tree, before);
  }
}
