//! Rendering of the progress component.

use super::model::Model;
use lipgloss_extras::prelude::*;

impl Model {
    /// Renders the pop-up above the bar.
    ///
    /// The pop-up rows are indented to the frame's x so the arrow lands on
    /// the end of the filled section. While the pop-up is hidden its rows
    /// are left blank, so the bar does not jump when it appears.
    ///
    /// ```rust
    /// use popup_progress::progress::{new, with_width};
    /// use lipgloss_extras::lipgloss::strip_ansi;
    ///
    /// let mut progress = new(&[with_width(20)]);
    /// progress.show_pop_up_view(false);
    /// progress.set_progress(0.5, false);
    ///
    /// let plain = strip_ansi(&progress.view());
    /// assert!(plain.contains("50%"));
    /// assert!(plain.lines().last().unwrap().contains('█'));
    /// ```
    pub fn view(&self) -> String {
        let mut rows = self.pop_up_rows();
        rows.push(self.bar_view(self.bubble.offset()));
        rows.join("\n")
    }

    /// Renders only the bar at `percent`, ignoring the pop-up.
    pub fn view_as(&self, percent: f64) -> String {
        self.bar_view(percent)
    }

    fn pop_up_rows(&self) -> Vec<String> {
        let frame = self.bubble.frame();
        let indent = " ".repeat(frame.x.round().max(0.0) as usize);
        let lines = self.bubble.view_lines();
        if lines.is_empty() {
            let height = frame.height.round().max(0.0) as usize;
            return vec![String::new(); height];
        }
        lines
            .into_iter()
            .map(|line| format!("{indent}{line}"))
            .collect()
    }

    fn bar_view(&self, percent: f64) -> String {
        let tw = std::cmp::max(0, self.width); // total width
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        let fw = std::cmp::max(0, std::cmp::min(tw, ((tw as f64) * percent).round() as i32)); // filled width

        let mut result = String::new();

        let full_styled = Style::new()
            .foreground(self.progress_tint_color().to_lipgloss())
            .render(&self.full.to_string());
        result.push_str(&full_styled.repeat(fw as usize));

        let empty_styled = Style::new()
            .foreground(self.track_tint_color().to_lipgloss())
            .render(&self.empty.to_string());
        let n = std::cmp::max(0, tw - fw);
        result.push_str(&empty_styled.repeat(n as usize));

        result
    }
}
