//! Progress bar with a pop-up label.
//!
//! The bar is drawn on one row. Above it floats a bubble whose arrow points
//! at the end of the filled section and whose label shows the percentage, or
//! text from a [`DataSource`]. The bubble colour can blend across a timeline
//! as progress changes, and the filled section follows that colour.
//!
//! # Basic Usage
//!
//! ```rust
//! use popup_progress::progress::{new, with_width, with_pop_up_view_animated_colors};
//! use popup_progress::color::Rgba;
//!
//! let mut progress = new(&[
//!     with_width(40),
//!     with_pop_up_view_animated_colors(vec![
//!         Rgba::from_rgb8(0xE7, 0x4C, 0x3C),
//!         Rgba::from_rgb8(0xF1, 0xC4, 0x0F),
//!         Rgba::from_rgb8(0x2E, 0xCC, 0x71),
//!     ]),
//! ]);
//!
//! progress.show_pop_up_view(false);
//! progress.set_progress(0.5, false);
//! assert_eq!(progress.pop_up().text(), "50%");
//! ```
//!
//! # Animation
//!
//! ```rust
//! use popup_progress::progress::new;
//!
//! let mut progress = new(&[]);
//!
//! // Returns the tick command driving the pop-up; hand it to bubbletea-rs
//! // and forward messages back through `update()`.
//! let cmd = progress.set_progress(0.75, true);
//! assert!(cmd.is_some());
//! assert_eq!(progress.progress(), 0.75);
//! ```

pub mod model;
pub mod options;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use model::{percent_text, Model};
pub use options::{
    new, with_animation_duration, with_continuously_adjust_pop_up_view_size, with_data_source,
    with_delegate, with_fill_characters, with_font, with_pop_up_view_animated_colors,
    with_pop_up_view_animated_colors_and_positions, with_pop_up_view_color,
    with_pop_up_view_corner_radius, with_text_color, with_track_tint_color, with_width,
    ProgressOption,
};
pub use types::{DataSource, Delegate};
