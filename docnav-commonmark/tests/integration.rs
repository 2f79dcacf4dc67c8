#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use docnav_commonmark::{
  Block,
  ClassifyOptions,
  CodeFence,
  DocumentOptions,
  DocumentProcessor,
  ProcessorPreset,
  RenderError,
  Token,
  classify,
  process_markdown_string,
};

fn processor() -> DocumentProcessor {
  DocumentProcessor::new(DocumentOptions {
    highlight_code: false,
    ..DocumentOptions::default()
  })
}

#[test]
fn test_end_to_end_example() {
  let source = "# Intro\n\nText\n\n## Details\n\n```js\ncode\n```\n\n## Details\n";
  let result = processor().render(source).expect("render");

  let slugs: Vec<&str> = result.headers.iter().map(|h| h.id.as_str()).collect();
  assert_eq!(slugs, ["intro", "details", "details-2"]);

  let roots = result.toc.entries();
  assert_eq!(roots.len(), 1);
  assert_eq!(roots[0].slug, "intro");
  let children: Vec<&str> =
    roots[0].children.iter().map(|c| c.slug.as_str()).collect();
  assert_eq!(children, ["details", "details-2"]);

  let fences: Vec<&CodeFence> = result
    .document
    .blocks()
    .iter()
    .filter_map(|block| {
      match block {
        Block::CodeFence(code) => Some(code),
        _ => None,
      }
    })
    .collect();
  assert_eq!(fences.len(), 1);
  assert_eq!(fences[0].language.as_deref(), Some("js"));
  assert_eq!(fences[0].content, "code\n");

  assert_eq!(result.title.as_deref(), Some("Intro"));
  assert!(result.html.contains("<h2 id=\"details-2\">Details</h2>"));
}

#[test]
fn test_graceful_degradation() {
  let source = "# Title\n\nSome intro text.\n\n## Usage\n\n```python\nprint(1)\n";
  let result = processor().render(source).expect("render");

  assert!(result.html.contains("<h1 id=\"title\">Title</h1>"));
  assert!(result.html.contains("<p>Some intro text.</p>"));
  assert!(result.html.contains("<h2 id=\"usage\">Usage</h2>"));
  assert!(result.html.contains("```python\nprint(1)"));
  assert!(!result.html.contains("<pre class=\"code-block\">"));
  assert_eq!(result.toc.slugs(), ["title", "usage"]);
}

#[test]
fn test_fence_classification_from_markdown() {
  let source = "```Mermaid\ngraph TD\n  A-->B\n```\n\n```\nplain\n```\n\n```rust\nfn \
                main() {}\n```\n";
  let document = processor().document(source).expect("document");

  let kinds: Vec<String> = document
    .blocks()
    .iter()
    .map(|block| {
      match block {
        Block::DiagramFence(diagram) => {
          format!("diagram:{}:{:?}", diagram.keyword, diagram.content)
        },
        Block::CodeFence(code) => format!("code:{:?}", code.language),
        other => panic!("unexpected block {other:?}"),
      }
    })
    .collect();

  assert_eq!(kinds, [
    "diagram:mermaid:\"graph TD\\n  A-->B\\n\"",
    "code:None",
    "code:Some(\"rust\")",
  ]);
}

#[test]
fn test_diagram_source_reaches_output_unmodified() {
  let diagram = "sequenceDiagram\n  Alice->>Bob: Hi <there> & bye\n";
  let source = format!("```mermaid\n{diagram}```\n");
  let result = processor().render(&source).expect("render");

  use tendril::TendrilSink;
  let dom = kuchikikiki::parse_html().one(result.html.as_str());
  let node = dom
    .select_first("pre.diagram[data-render-target=mermaid]")
    .expect("diagram element");
  assert_eq!(node.as_node().text_contents(), diagram);
}

#[test]
fn test_nested_fences_stay_in_lists() {
  let source = "- step one\n\n  ```mermaid\n  graph TD\n  ```\n\n- step two\n";
  let document = processor().document(source).expect("document");
  assert_eq!(document.len(), 1);
  assert!(matches!(&document.blocks()[0], Block::Prose(_)));
}

#[test]
fn test_custom_diagram_keywords() {
  let processor = DocumentProcessor::new(DocumentOptions {
    highlight_code: false,
    diagram_keywords: vec!["plantuml".to_owned()],
    ..DocumentOptions::default()
  });
  let html = processor
    .render("```plantuml\n@startuml\n```\n\n```mermaid\ngraph\n```\n")
    .expect("render")
    .html;
  assert!(html.contains("<pre class=\"diagram plantuml\""));
  assert!(html.contains("<code class=\"language-mermaid\""));
}

#[test]
fn test_contract_violation_propagates() {
  let tokens = vec![Token::Fence {
    info:    "rust\nextra".to_owned(),
    content: String::new(),
    raw:     String::new(),
    closed:  true,
  }];
  let err = classify(tokens, &ClassifyOptions::default()).expect_err("violation");
  assert!(matches!(err, RenderError::TokenContract { index: 0, .. }));
  assert!(err.to_string().contains("token 0"));
}

#[test]
fn test_recovery_never_returns_blank_page() {
  let result = process_markdown_string("", ProcessorPreset::Basic);
  assert!(result.html.is_empty());

  let result = process_markdown_string(
    "## Setup\n\n* broken *emphasis\n\n```\nunterminated",
    ProcessorPreset::Basic,
  );
  assert!(result.html.contains("<h2 id=\"setup\">"));
  assert!(result.html.contains("unterminated"));
}
