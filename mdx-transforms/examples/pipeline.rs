use std::sync::Arc;

use log::LevelFilter;
use mdx_transforms::{
  CodeSections,
  FileContext,
  LogLevel,
  LogOptions,
  LogSink,
  Mapping,
  MemorySink,
  MetaUrlOptions,
  Node,
  Pipeline,
  ReplaceMetaUrl,
  ScopedPath,
  ScopedPathOptions,
  YamlTable,
  YouTubeEmbed,
};

const DOCUMENT: &str = r#"{
  "type": "root",
  "children": [
    {
      "type": "mdxjsEsm",
      "value": "import Setup from \"@openzitidocs/components/Setup\";"
    },
    {
      "type": "paragraph",
      "children": [
        { "type": "image", "url": "@openzitidocs/img/overview.png", "alt": "overview" }
      ]
    },
    {
      "type": "code",
      "lang": "example-sh",
      "value": "@desc: enroll an identity\n@command: ziti edge enroll device.jwt\n@results: enrollment complete"
    },
    {
      "type": "code",
      "lang": "yaml-table",
      "value": "- {service: https, port: 443}\n- {service: dns, port: 53}"
    },
    {
      "type": "paragraph",
      "children": [
        {
          "type": "link",
          "url": "https://youtu.be/dQw4w9WgXcQ",
          "children": [{ "type": "text", "value": "watch the intro" }]
        }
      ]
    }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::Builder::new()
    .filter_level(LevelFilter::Info)
    .write_style(env_logger::WriteStyle::Always)
    .init();

  println!("MDX transform pipeline demo");
  println!("===========================\n");

  // One shared in-memory sink so the demo can dump the transform log at the
  // end; real builds use FileSink::default() instead.
  let memory = Arc::new(MemorySink::new());
  let sink: Arc<dyn LogSink> = Arc::clone(&memory) as Arc<dyn LogSink>;
  let verbose = LogOptions {
    log_level: Some(LogLevel::Info),
    debug:     false,
  };

  let pipeline = Pipeline::new()
    .with(ScopedPath::with_sink(
      ScopedPathOptions {
        mappings: vec![
          Mapping::new("@openzitidocs", "/docs/openziti"),
          Mapping::new("@static", "/static"),
        ],
        log_level: Some(LogLevel::Info),
        debug: false,
      },
      Arc::clone(&sink),
    ))
    .with(ReplaceMetaUrl::with_sink(
      MetaUrlOptions {
        from: "https://old.example.com".into(),
        to: "https://docs.example.com".into(),
        log_level: Some(LogLevel::Info),
        debug: false,
      },
      Arc::clone(&sink),
    ))
    .with(CodeSections::with_sink(verbose, Arc::clone(&sink)))
    .with(YamlTable::with_sink(verbose, Arc::clone(&sink)))
    .with(YouTubeEmbed::with_sink(verbose, Arc::clone(&sink)));

  println!("Pipeline: {pipeline:?}\n");

  let mut tree = Node::from_json(DOCUMENT)?;
  pipeline.run(&mut tree, &FileContext::new("docs/overview.mdx"))?;

  println!("Transformed tree:");
  println!("{}", tree.to_json()?);

  println!("\nTransform log:");
  for line in memory.lines() {
    println!("  {line}");
  }

  Ok(())
}
