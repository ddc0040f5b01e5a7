//! Text-box layout for synthetic PDF pages.
//!
//! Each Result File becomes one A4 page with its text set in Courier at a
//! fixed size inside a box inset by a fixed margin. Courier is monospaced,
//! so the column count is exact and wrapping needs no font metrics.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left.
//!
//! Text that does not fit the box is clipped at the last row that fits, so
//! an over-long Result File still yields a page with its first rows. A
//! textbox insert that refuses overflowing text outright would instead leave
//! the page blank, and blank pages are dropped during consolidation.

/// A4 portrait width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 portrait height in points.
pub const PAGE_HEIGHT: f32 = 842.0;
/// Inset of the text box from every page edge.
pub const MARGIN: f32 = 36.0;
/// Font size of the laid-out text.
pub const FONT_SIZE: f32 = 11.0;

const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Advance width of every Courier glyph, in em.
const COURIER_ADVANCE_EM: f32 = 0.6;
const TAB_STOP: &str = "    ";

/// The rectangle text is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl TextBox {
    /// Page rectangle shrunk by `margin` on every side.
    pub fn inset(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            left: margin,
            bottom: margin,
            right: page_width - margin,
            top: page_height - margin,
        }
    }

    /// The box used for every synthetic page.
    pub fn standard() -> Self {
        Self::inset(PAGE_WIDTH, PAGE_HEIGHT, MARGIN)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Characters per line at `font_size`.
    pub fn columns(&self, font_size: f32) -> usize {
        ((self.width() / (font_size * COURIER_ADVANCE_EM)).floor() as usize).max(1)
    }

    /// Lines that fit vertically at `font_size`.
    pub fn rows(&self, font_size: f32) -> usize {
        (self.height() / (font_size * LINE_HEIGHT_FACTOR)).floor() as usize
    }
}

/// One line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// The laid-out content of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
    pub font_size: f32,
    /// Wrapped lines that did not fit in the box and were dropped.
    pub clipped: usize,
}

impl PageLayout {
    /// The text as it will appear on the page, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lines that carry visible glyphs.
    pub fn visible_lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(|l| !l.text.trim().is_empty())
    }
}

/// Lay `text` out in `text_box` at `font_size`.
pub fn layout_page(text: &str, text_box: &TextBox, font_size: f32) -> PageLayout {
    let wrapped = wrap_text(text, text_box.columns(font_size));
    let rows = text_box.rows(font_size);
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let clipped = wrapped.len().saturating_sub(rows);

    let lines = wrapped
        .into_iter()
        .take(rows)
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            x: text_box.left,
            y: text_box.top - font_size - i as f32 * line_height,
        })
        .collect();

    PageLayout {
        lines,
        font_size,
        clipped,
    }
}

/// Break `text` into lines of at most `columns` characters.
///
/// Line endings are normalised to LF and tabs expanded. Lines that already
/// fit are kept verbatim (minus trailing whitespace). Longer lines wrap at
/// whitespace and keep their leading indentation on the first row; words
/// longer than a line are split.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let normalised = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', TAB_STOP);

    let mut out = Vec::new();
    for line in normalised.split('\n') {
        let line = line.trim_end();
        if line.chars().count() <= columns {
            out.push(line.to_string());
            continue;
        }

        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let mut current_len = indent.chars().count();
        let mut current = if current_len < columns {
            indent
        } else {
            current_len = 0;
            String::new()
        };
        // Whether `current` holds a word, as opposed to just the indent.
        let mut has_word = false;

        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if has_word {
                    out.push(std::mem::take(&mut current));
                    has_word = false;
                } else {
                    current.clear();
                }
                current_len = 0;
                let rest = word.split_off(columns);
                out.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            if has_word && current_len + 1 + word.len() > columns {
                out.push(std::mem::take(&mut current));
                current_len = 0;
                has_word = false;
            } else if !has_word && current_len + word.len() > columns {
                current.clear();
                current_len = 0;
            }
            if has_word {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
            has_word = true;
        }
        if has_word {
            out.push(current);
        }
    }
    out
}
