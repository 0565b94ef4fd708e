//! Fixed HTML page skeleton
//!
//! Every page is the same five literal parts with the variable pieces
//! interpolated between them:
//!
//! ```text
//! PART1 title PART2 [up links] [child links] PART3 title PART4 description PART5
//! ```
//!
//! Nothing here parses or validates the interpolated text. With
//! [`Markup::Verbatim`] (the default) names and descriptions are written
//! exactly as they appear in the source documents, so markup in the source
//! reaches the page unchanged. [`Markup::Escaped`] escapes them first.

use std::borrow::Cow;

/// Whether text from the source documents is escaped before interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    /// Interpolate as-is
    #[default]
    Verbatim,

    /// Escape `&`, `<`, `>` and `"` first
    Escaped,
}

impl Markup {
    /// Prepare a piece of source text for interpolation.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Markup::Verbatim => Cow::Borrowed(text),
            Markup::Escaped => escape_html(text),
        }
    }
}

/// Escape the characters that would otherwise start markup or end an
/// attribute value.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

/// A hyperlink to another generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target file name, relative to the output directory
    pub href: String,

    /// Link text
    pub label: String,
}

impl Link {
    /// Create a link.
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Everything that varies between pages.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Display name, used in the page title and the secondary navigation
    pub title: String,

    /// "Up to" links, outermost ancestor first
    pub up_links: Vec<Link>,

    /// Links to direct children, in document order
    pub child_links: Vec<Link>,

    /// Pre-assembled description markup
    pub description: String,
}

const PART1: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta http-equiv="content-type" content="text/html; charset=UTF-8">
    <title>Lonely Planet</title>
    <link href="static/all.css" media="screen" rel="stylesheet" type="text/css">
  </head>

  <body>
    <div id="container">
      <div id="header">
        <div id="logo"></div>
        <h1>Lonely Planet: "#;

const PART2: &str = r#"</h1>
      </div>

      <div id="wrapper">
        <div id="sidebar">
          <div class="block">
            <h3>Navigation</h3>
            <div class="content">
              <div class="inner">
"#;

const PART3: &str = r##"              </div>
            </div>
          </div>
        </div>

        <div id="main">
          <div class="block">
            <div class="secondary-navigation">
              <ul>
                <li class="first"><a href="#">"##;

const PART4: &str = r#"</a></li>
              </ul>
              <div class="clear"></div>
            </div>
            <div class="content">
              <div class="inner">
"#;

const PART5: &str = r#"
              </div>
            </div>
          </div>
        </div>
      </div>
    </div>
  </body>
</html>
"#;

/// The five-part page skeleton.
#[derive(Debug, Clone, Copy)]
pub struct HtmlTemplate {
    parts: [&'static str; 5],
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self {
            parts: [PART1, PART2, PART3, PART4, PART5],
        }
    }
}

impl HtmlTemplate {
    /// The built-in skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a complete page.
    pub fn render(&self, page: &PageContent) -> String {
        let [part1, part2, part3, part4, part5] = self.parts;
        let mut html = String::with_capacity(
            self.parts.iter().map(|p| p.len()).sum::<usize>() + page.description.len() + 256,
        );

        html.push_str(part1);
        html.push_str(&page.title);
        html.push_str(part2);

        for link in &page.up_links {
            html.push_str("<p>Up to <a href=\"");
            html.push_str(&link.href);
            html.push_str("\">");
            html.push_str(&link.label);
            html.push_str("</a></p>\n");
        }
        for link in &page.child_links {
            html.push_str("<p><a href=\"");
            html.push_str(&link.href);
            html.push_str("\">");
            html.push_str(&link.label);
            html.push_str("</a></p>\n");
        }

        html.push_str(part3);
        html.push_str(&page.title);
        html.push_str(part4);
        html.push_str(&page.description);
        html.push_str(part5);
        html
    }
}
