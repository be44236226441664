//! Rendering of the pop-up bubble.

use super::model::Model;
use crate::geometry::BubbleShape;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

impl Model {
    /// Renders the bubble, one string per row. Empty while fully hidden.
    ///
    /// Rows are not indented; the caller positions them at the frame's x.
    pub fn view_lines(&self) -> Vec<String> {
        if self.opacity <= 0.0 {
            return Vec::new();
        }

        let backdrop = self.backdrop.opaque();
        let body_color = backdrop.lerp(self.color().over(backdrop), self.opacity);
        let label_color = body_color.lerp(self.text_color.over(body_color), self.opacity);

        let outline = BubbleShape::new(self.geometry()).outline();
        let edge = Style::new().foreground(body_color.to_lipgloss());
        let fill = Style::new().background(body_color.to_lipgloss());
        let label = self
            .font
            .style()
            .foreground(label_color.to_lipgloss())
            .background(body_color.to_lipgloss());

        let inner = outline.width - 2;
        let lines: Vec<String> = self
            .text()
            .split('\n')
            .map(|line| self.font.layout_line(line))
            .collect();
        let first_text_row = outline.interior_rows.saturating_sub(lines.len()) / 2;

        let mut rows = Vec::with_capacity(outline.interior_rows + 2 + outline.arrow_rows);
        rows.push(edge.render(&outline.top));

        for row in 0..outline.interior_rows {
            let content = row
                .checked_sub(first_text_row)
                .and_then(|index| lines.get(index))
                .map(|line| centered(line, inner, &fill, &label))
                .unwrap_or_else(|| fill.render(&" ".repeat(inner)));
            rows.push(format!(
                "{}{}{}",
                edge.render("│"),
                content,
                edge.render("│")
            ));
        }

        rows.push(edge.render(&outline.bottom));
        for _ in 0..outline.arrow_rows {
            rows.push(edge.render(&outline.arrow));
        }
        rows
    }

    /// Renders the bubble as a single string with rows joined by newlines.
    pub fn view(&self) -> String {
        self.view_lines().join("\n")
    }
}

fn centered(line: &str, width: usize, fill: &Style, label: &Style) -> String {
    let text_width = line.width();
    if text_width >= width {
        return label.render(line);
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!(
        "{}{}{}",
        fill.render(&" ".repeat(left)),
        label.render(line),
        fill.render(&" ".repeat(right))
    )
}
