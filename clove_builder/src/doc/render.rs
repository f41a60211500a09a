use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Self {
        // padding must be at least 1
        PaddingWidth(std::cmp::max(1, width))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Self {
        LeftWidth(width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Self {
        // middle must be at least 2 (so we can hyphenate)
        MiddleWidth(std::cmp::max(2, width))
    }

    pub(crate) fn value(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out `left  middle` rows, wrapping the middle column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    // None: never wrap.
    middle: Option<MiddleWidth>,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer which picks the middle width from the space the total width leaves over.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        let middle = if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            guided_middle
        } else if non_middle < total_width.0 {
            let calculated_middle =
                std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the total {}.  Selecting middle: {calculated_middle}.", total_width.0);
            }

            calculated_middle
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the total {}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
            }

            MINIMUM_MIDDLE_WIDTH
        };

        Self {
            padding,
            left,
            middle: Some(MiddleWidth::new(middle)),
        }
    }

    /// Produce a renderer whose middle column never wraps.
    pub(crate) fn unbounded(padding: PaddingWidth, left: LeftWidth) -> Self {
        Self {
            padding,
            left,
            middle: None,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = format!("{:width$}", "", width = self.padding.0);
        let left_column_width = self.left.0;
        let middle_parts = chunk(middle, self.middle.map(|m| m.value()));
        let mut out = Vec::default();

        for (i, part) in middle_parts.iter().enumerate() {
            let left = if i == 0 { left } else { "" };
            out.push(format!(
                "{:indent$}{:left_column_width$}{padding}{}",
                "", left, part
            ));
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{}", "", left));
        }

        out
    }
}

/// Split a paragraph into lines of at most `width` characters.
/// Words longer than the width are hyphenated.
pub(crate) fn chunk(paragraph: &str, width: Option<usize>) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();
    let width = match width {
        Some(width) => std::cmp::max(2, width),
        None => {
            let words: Vec<&str> = paragraph.split(' ').filter(|w| !w.is_empty()).collect();
            if !words.is_empty() {
                lines.push(words.join(" "));
            }
            return lines;
        }
    };

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// The width of the attached terminal, if any.
pub(crate) fn terminal_width() -> Option<usize> {
    if let Some((Width(width), _)) = terminal_size() {
        Some(width as usize)
    } else {
        None
    }
}
