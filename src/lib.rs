#![warn(missing_docs)]

//! # popup-progress
//!
//! A terminal progress bar with a pop-up label, built for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! ## Overview
//!
//! The bar is drawn on a single row. Above it floats a rounded bubble whose
//! arrow points at the end of the filled section. The bubble shows the
//! percentage, or any text a [`DataSource`] supplies, and its colour can
//! blend across a timeline of colours as progress moves. The filled part
//! of the bar follows the bubble colour.
//!
//! Both components follow the Elm Architecture: animated operations return
//! a `Cmd` that ticks at 60 frames per second, and the resulting messages
//! are forwarded back through `update()`.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Progress`] | Progress bar that owns and positions a pop-up |
//! | [`PopUp`] | The bubble itself: shape, colour, fade and move animations |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use popup_progress::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//!
//! struct App {
//!     progress: Progress,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut progress = progress_new(&[
//!             with_width(40),
//!             with_pop_up_view_animated_colors(vec![
//!                 Rgba::from_rgb8(0xE7, 0x4C, 0x3C),
//!                 Rgba::from_rgb8(0x2E, 0xCC, 0x71),
//!             ]),
//!         ]);
//!         let cmd = progress.show_pop_up_view(true);
//!         (Self { progress }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Forward animation frames to the progress bar
//!         self.progress.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.progress.view()
//!     }
//! }
//! ```

pub mod color;
pub mod error;
pub mod font;
pub mod geometry;
pub mod popup;
pub mod progress;

pub use color::{ColorSource, ColorStop, ColorTimeline, Rgba};
pub use error::{ColorError, Result};
pub use font::Font;
pub use popup::{BubbleEvent, Model as PopUp};
pub use progress::{DataSource, Delegate, Model as Progress, ProgressOption};

/// Convenient re-exports for building a progress bar.
///
/// ```rust
/// use popup_progress::prelude::*;
///
/// let mut progress = progress_new(&[with_width(30)]);
/// progress.set_progress(0.4, false);
/// assert_eq!(progress.pop_up().text(), "40%");
/// ```
pub mod prelude {
    pub use crate::color::{ColorTimeline, Rgba};
    pub use crate::error::ColorError;
    pub use crate::font::Font;
    pub use crate::popup::{new as popup_new, Model as PopUp};
    pub use crate::progress::{
        new as progress_new, percent_text, with_animation_duration,
        with_continuously_adjust_pop_up_view_size, with_data_source, with_delegate,
        with_fill_characters, with_font, with_pop_up_view_animated_colors,
        with_pop_up_view_animated_colors_and_positions, with_pop_up_view_color,
        with_pop_up_view_corner_radius, with_text_color, with_track_tint_color, with_width,
        DataSource, Delegate, Model as Progress, ProgressOption,
    };
}
