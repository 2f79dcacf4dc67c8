//! HTML rendering of classified documents.
//!
//! Rendering is a pure function of the document: every heading gets its
//! registry slug as `id`, code fences are highlighted when possible and
//! diagram fences are handed to the client untouched.
use std::{collections::HashMap, fmt::Write};

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{debug, warn};
use markup5ever::local_name;
use serde::Serialize;

use crate::{
  syntax::SyntaxManager,
  toc::Toc,
  types::{Block, CodeFence, DiagramFence, Document, Heading, Prose},
  utils::fragment_for,
};

/// Renders a [`Document`] to an HTML fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer<'a> {
  syntax:       Option<&'a SyntaxManager>,
  theme:        Option<&'a str>,
  anchor_links: bool,
}

impl<'a> HtmlRenderer<'a> {
  /// A renderer without highlighting or heading self-links.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      syntax:       None,
      theme:        None,
      anchor_links: false,
    }
  }

  /// Highlight code fences with `manager`, optionally forcing a theme.
  #[must_use]
  pub const fn with_syntax(
    mut self,
    manager: &'a SyntaxManager,
    theme: Option<&'a str>,
  ) -> Self {
    self.syntax = Some(manager);
    self.theme = theme;
    self
  }

  /// Append a `#` self-link to every heading.
  #[must_use]
  pub const fn with_anchor_links(mut self, enabled: bool) -> Self {
    self.anchor_links = enabled;
    self
  }

  /// Render every block of the document, in order.
  #[must_use]
  pub fn render(&self, document: &Document) -> String {
    let mut html = String::with_capacity(document.len() * 128);
    for block in document.blocks() {
      self.render_block(block, &mut html);
    }
    html
  }

  /// Render a single block, appending to `out`.
  pub fn render_block(&self, block: &Block, out: &mut String) {
    match block {
      Block::Prose(prose) => render_prose(prose, out),
      Block::Heading(heading) => self.render_heading(heading, out),
      Block::CodeFence(code) => self.render_code(code, out),
      Block::DiagramFence(diagram) => render_diagram(diagram, out),
    }
  }

  fn render_heading(&self, heading: &Heading, out: &mut String) {
    let level = heading.level;
    let slug = heading.slug();
    let body = heading
      .markup
      .clone()
      .unwrap_or_else(|| encode_text(&heading.text).into_owned());

    let _ = write!(
      out,
      "<h{level} id=\"{}\">{body}",
      encode_double_quoted_attribute(slug)
    );
    if self.anchor_links {
      let _ = write!(
        out,
        "<a class=\"heading-anchor\" href=\"#{}\" aria-hidden=\"true\">#</a>",
        encode_double_quoted_attribute(&fragment_for(slug))
      );
    }
    let _ = writeln!(out, "</h{level}>");
  }

  fn render_code(&self, code: &CodeFence, out: &mut String) {
    // Only the first word of the info string names the language.
    let language = code
      .language
      .as_deref()
      .and_then(|info| info.split_whitespace().next());

    let Some(language) = language else {
      let _ = writeln!(
        out,
        "<pre class=\"code-block\"><code>{}</code></pre>",
        encode_text(&code.content)
      );
      return;
    };

    let body = self
      .highlight(&code.content, language)
      .unwrap_or_else(|| encode_text(&code.content).into_owned());
    let lang = encode_double_quoted_attribute(language);
    let _ = writeln!(
      out,
      "<pre class=\"code-block\"><code class=\"language-{lang}\" \
       data-lang=\"{lang}\">{body}</code></pre>"
    );
  }

  fn highlight(&self, content: &str, language: &str) -> Option<String> {
    let manager = self.syntax?;
    if !manager.supports(language) {
      debug!("No highlighting for language '{language}', rendering plain");
      return None;
    }
    manager
      .highlight_code(content, language, self.theme)
      .map_err(|e| warn!("Failed to highlight '{language}' block: {e}"))
      .ok()
  }
}

fn render_prose(prose: &Prose, out: &mut String) {
  match &prose.markup {
    Some(markup) => out.push_str(markup),
    None => {
      let _ = writeln!(out, "<p>{}</p>", encode_text(&prose.text));
    },
  }
}

fn render_diagram(diagram: &DiagramFence, out: &mut String) {
  let keyword = encode_double_quoted_attribute(&diagram.keyword);
  let _ = writeln!(
    out,
    "<pre class=\"diagram {keyword}\" data-render-target=\"{keyword}\">{}</pre>",
    encode_text(&diagram.content)
  );
}

/// A TOC entry whose fragment does not resolve to exactly one element.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnchorIssue {
  pub slug:    String,
  /// How many elements carry this id: 0 (missing) or more than 1.
  pub matches: usize,
}

/// Check that every TOC slug resolves to exactly one element of `html`.
#[must_use]
pub fn verify_anchors(html: &str, toc: &Toc) -> Vec<AnchorIssue> {
  use tendril::TendrilSink;

  let document = kuchikikiki::parse_html().one(html);
  let mut ids: HashMap<String, usize> = HashMap::new();

  if let Ok(elements) = document.select("[id]") {
    for element in elements {
      if let Some(id) = element.attributes.borrow().get(local_name!("id")) {
        *ids.entry(id.to_owned()).or_default() += 1;
      }
    }
  }

  toc
    .slugs()
    .into_iter()
    .filter_map(|slug| {
      let matches = ids.get(slug).copied().unwrap_or(0);
      (matches != 1).then(|| {
        AnchorIssue {
          slug: slug.to_owned(),
          matches,
        }
      })
    })
    .collect()
}
