//! Help documents and usage synopses.
mod render;

pub(crate) use render::terminal_width;

use crate::constant::{MAIN_INDENT, PADDING_WIDTH};
use render::{chunk, ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth};

/// A structured help document.
///
/// Help documents are assembled alongside the parse tree (for help output), and carry the description of every validation failure.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::HelpDoc;
///
/// let doc = HelpDoc::paragraph("First.").concat(HelpDoc::paragraph("Second."));
/// assert_eq!(doc.to_plaintext(None), "First.\n\nSecond.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HelpDoc {
    /// Nothing.
    #[default]
    Empty,
    /// A section title.
    Header(String),
    /// A block of running text.
    Paragraph(String),
    /// Terms and their descriptions, laid out in aligned columns.
    DescriptionList(Vec<(String, HelpDoc)>),
    /// Blocks in order.
    Sequence(Vec<HelpDoc>),
}

impl HelpDoc {
    /// A single paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        HelpDoc::Paragraph(text.into())
    }

    /// A section header.
    pub fn header(text: impl Into<String>) -> Self {
        HelpDoc::Header(text.into())
    }

    /// This document followed by `other`.
    /// [`HelpDoc::Empty`] is the identity of concatenation.
    pub fn concat(self, other: HelpDoc) -> Self {
        match (self, other) {
            (HelpDoc::Empty, other) => other,
            (this, HelpDoc::Empty) => this,
            (HelpDoc::Sequence(mut left), HelpDoc::Sequence(right)) => {
                left.extend(right);
                HelpDoc::Sequence(left)
            }
            (HelpDoc::Sequence(mut left), other) => {
                left.push(other);
                HelpDoc::Sequence(left)
            }
            (this, HelpDoc::Sequence(right)) => {
                let mut blocks = vec![this];
                blocks.extend(right);
                HelpDoc::Sequence(blocks)
            }
            (this, other) => HelpDoc::Sequence(vec![this, other]),
        }
    }

    /// Whether this document renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            HelpDoc::Empty => true,
            HelpDoc::Header(_) | HelpDoc::Paragraph(_) => false,
            HelpDoc::DescriptionList(items) => items.is_empty(),
            HelpDoc::Sequence(items) => items.iter().all(HelpDoc::is_empty),
        }
    }

    /// The text of every paragraph, in document order.
    pub fn paragraphs(&self) -> Vec<&str> {
        let mut out = Vec::default();
        self.collect_paragraphs(&mut out);
        out
    }

    fn collect_paragraphs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            HelpDoc::Empty | HelpDoc::Header(_) => {}
            HelpDoc::Paragraph(text) => out.push(text),
            HelpDoc::DescriptionList(items) => {
                for (_, description) in items {
                    description.collect_paragraphs(out);
                }
            }
            HelpDoc::Sequence(items) => {
                for item in items {
                    item.collect_paragraphs(out);
                }
            }
        }
    }

    /// Render to plain text.
    /// With a `width`, paragraphs and descriptions wrap to fit it; without one, nothing wraps.
    pub fn to_plaintext(&self, width: Option<usize>) -> String {
        let mut blocks = Vec::default();
        self.flatten(&mut blocks);
        let mut lines: Vec<String> = Vec::default();
        let mut after_header = true;

        for block in blocks {
            let rendered = block.render_block(width);

            if rendered.is_empty() {
                continue;
            }

            // Blocks are separated by a blank line, except directly under their header.
            if !after_header {
                lines.push(String::default());
            }

            after_header = matches!(block, HelpDoc::Header(_));
            lines.extend(rendered);
        }

        lines.join("\n")
    }

    fn flatten<'a>(&'a self, blocks: &mut Vec<&'a HelpDoc>) {
        match self {
            HelpDoc::Empty => {}
            HelpDoc::Sequence(items) => {
                for item in items {
                    item.flatten(blocks);
                }
            }
            _ => blocks.push(self),
        }
    }

    // Descriptions are rendered inline, as a single run of text.
    fn inline(&self) -> String {
        self.paragraphs().join(" ")
    }

    fn render_block(&self, width: Option<usize>) -> Vec<String> {
        match self {
            HelpDoc::Empty | HelpDoc::Sequence(_) => Vec::default(),
            HelpDoc::Header(text) => vec![text.clone()],
            HelpDoc::Paragraph(text) => chunk(text, width),
            HelpDoc::DescriptionList(items) => {
                let left = items
                    .iter()
                    .map(|(term, _)| term.chars().count())
                    .max()
                    .unwrap_or(0);
                let descriptions: Vec<String> =
                    items.iter().map(|(_, description)| description.inline()).collect();
                let middle = descriptions
                    .iter()
                    .map(|d| d.chars().count())
                    .max()
                    .unwrap_or(0);
                let renderer = match width {
                    Some(total) => ColumnRenderer::guided(
                        MAIN_INDENT,
                        PaddingWidth::new(PADDING_WIDTH),
                        LeftWidth::new(left),
                        MiddleWidth::new(middle),
                        TotalWidth(total),
                    ),
                    None => ColumnRenderer::unbounded(
                        PaddingWidth::new(PADDING_WIDTH),
                        LeftWidth::new(left),
                    ),
                };

                items
                    .iter()
                    .zip(descriptions.iter())
                    .flat_map(|((term, _), description)| {
                        renderer.render(MAIN_INDENT, term, description)
                    })
                    .collect()
            }
        }
    }
}

/// The usage synopsis of a command: one line per way of invoking it.
///
/// ### Example
/// ```
/// # use clove_builder as clove;
/// use clove::{Args, CliConfig, Command, Options};
///
/// let command = Command::new("greet", Options::boolean("loud"), Args::text("name"));
/// assert_eq!(
///     command.usage(&CliConfig::default()).to_string(),
///     "greet [--loud] <name>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Usage {
    lines: Vec<String>,
}

impl Usage {
    pub(crate) fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The synopsis lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn concat(mut self, other: Usage) -> Self {
        self.lines.extend(other.lines);
        self
    }

    /// Every line of `prefix` followed by every line of `self`.
    pub(crate) fn prefixed(&self, prefix: &Usage) -> Self {
        if prefix.lines.is_empty() {
            return self.clone();
        }

        let mut lines = Vec::default();

        for head in &prefix.lines {
            for tail in &self.lines {
                lines.push(format!("{head} {tail}"));
            }
        }

        Self { lines }
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

// Join usage fragments, skipping the empty ones.
pub(crate) fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
