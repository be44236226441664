//! Label font and text measurement.

use crate::geometry::Size;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Font used for the pop-up label.
///
/// A terminal cannot change glyph size, so the "size" of a font is its
/// letter spacing: extra blank columns inserted between grapheme clusters.
/// The default is bold with no extra spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    /// Render the label in bold.
    pub bold: bool,
    /// Render the label in italics.
    pub italic: bool,
    /// Blank columns between grapheme clusters.
    pub letter_spacing: u16,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            bold: true,
            italic: false,
            letter_spacing: 0,
        }
    }
}

impl Font {
    /// A regular (non-bold) font with no spacing.
    pub fn regular() -> Self {
        Self {
            bold: false,
            ..Self::default()
        }
    }

    /// Resolves an optional font, falling back to the default bold font.
    pub fn or_default(font: Option<Font>) -> Font {
        font.unwrap_or_default()
    }

    /// Measures `text` as it would be laid out: the widest line by the
    /// number of lines.
    ///
    /// ```rust
    /// use popup_progress::font::Font;
    ///
    /// let font = Font { letter_spacing: 1, ..Font::default() };
    /// let size = font.measure("50%");
    /// assert_eq!(size.width, 5.0);
    /// assert_eq!(size.height, 1.0);
    /// ```
    pub fn measure(&self, text: &str) -> Size {
        let mut width = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            width = width.max(self.line_width(line));
            lines += 1;
        }
        Size::new(width as f64, lines.max(1) as f64)
    }

    fn line_width(&self, line: &str) -> usize {
        let clusters = line.graphemes(true).count();
        let gaps = clusters.saturating_sub(1) * usize::from(self.letter_spacing);
        line.width() + gaps
    }

    /// Applies letter spacing to one line of text.
    pub fn layout_line(&self, line: &str) -> String {
        if self.letter_spacing == 0 {
            return line.to_string();
        }
        let gap = " ".repeat(usize::from(self.letter_spacing));
        line.graphemes(true).collect::<Vec<_>>().join(&gap)
    }

    /// A lipgloss style carrying the font's weight and slant.
    pub fn style(&self) -> Style {
        Style::new().bold(self.bold).italic(self.italic)
    }
}
