#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::collections::HashSet;

use docnav_commonmark::{
  DocumentOptions,
  DocumentProcessor,
  SlugRegistry,
  verify_anchors,
};

fn render(source: &str) -> docnav_commonmark::RenderResult {
  DocumentProcessor::new(DocumentOptions {
    highlight_code: false,
    anchor_links: true,
    ..DocumentOptions::default()
  })
  .render(source)
  .expect("render")
}

const MIXED: &str = r"# Getting Started

## 安装指南

### Linux

### Linux

## Configuration {#config}

## Config

## 配置

## 配置

### 🚀

### ???

#### Deeply nested `code` heading

## Heading 5

## heading-5

- list item

  ## nested heading stays in the list
";

#[test]
fn test_round_trip_anchors() {
  let result = render(MIXED);
  assert!(!result.toc.is_empty());
  assert_eq!(verify_anchors(&result.html, &result.toc), []);
}

#[test]
fn test_slugs_are_unique_and_stable() {
  let first = render(MIXED);
  let second = render(MIXED);

  let slugs = first.toc.slugs();
  assert_eq!(slugs, second.toc.slugs());

  let unique: HashSet<&str> = slugs.iter().copied().collect();
  assert_eq!(unique.len(), slugs.len(), "duplicates in {slugs:?}");
}

#[test]
fn test_mixed_script_slugs() {
  let result = render(MIXED);
  assert_eq!(result.toc.slugs(), [
    "getting-started",
    "安装指南",
    "linux",
    "linux-2",
    "config",
    "config-2",
    "配置",
    "配置-2",
    "heading-8",
    "heading-9",
    "deeply-nested-code-heading",
    "heading-5",
    "heading-5-2",
  ]);
}

#[test]
fn test_cjk_anchor_link_is_percent_encoded() {
  let result = render("## 安装\n");
  assert!(result.html.contains("<h2 id=\"安装\">"));
  assert!(result.html.contains("href=\"#%E5%AE%89%E8%A3%85\""));
  assert!(result.toc.to_html().contains("data-slug=\"安装\""));
}

#[test]
fn test_fallback_uses_heading_ordinal() {
  let result = render("# One\n\n## ***\n\n## ???\n");
  assert_eq!(result.toc.slugs(), ["one", "heading-1", "heading-2"]);
}

#[test]
fn test_registry_matches_processor() {
  let texts = ["Intro", "Details", "Details", "🎉"];
  let mut registry = SlugRegistry::new();
  let expected: Vec<String> = texts.iter().map(|t| registry.assign(t)).collect();

  let source: String = texts.iter().map(|t| format!("## {t}\n\n")).collect();
  let result = render(&source);
  assert_eq!(result.toc.slugs(), expected);
}

#[test]
fn test_raw_html_is_escaped() {
  let result =
    render("# Intro\n\n<div id=\"intro\">x</div>\n\nHi <script>alert(1)</script>\n");

  assert!(verify_anchors(&result.html, &result.toc).is_empty());
  assert!(!result.html.contains("<div id"));
  assert!(!result.html.contains("<script"));
  assert!(result.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
  assert_eq!(result.html.matches("id=\"intro\"").count(), 1);
}
