//! Construction options for the progress component.

use super::model::Model;
use super::types::{DataSource, Delegate};
use crate::color::Rgba;
use crate::font::Font;
use std::sync::mpsc::channel;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::warn;

/// Configuration options applied by [`new`].
///
/// # Examples
///
/// ```rust
/// use popup_progress::color::Rgba;
/// use popup_progress::progress::{new, with_pop_up_view_color, with_width};
///
/// let progress = new(&[
///     with_width(60),
///     with_pop_up_view_color(Rgba::from_rgb8(0x2E, 0xCC, 0x71)),
/// ]);
/// assert_eq!(progress.width, 60);
/// ```
pub enum ProgressOption {
    /// Sets the width of the bar in cells.
    WithWidth(i32),
    /// Characters for the filled and empty parts of the bar.
    WithFillCharacters(char, char),
    /// Colour of the empty part of the bar.
    WithTrackTintColor(Rgba),
    /// Colour of the pop-up label.
    WithTextColor(Rgba),
    /// Font of the pop-up label; `None` selects the default bold font.
    WithFont(Option<Font>),
    /// A single static pop-up colour.
    WithPopUpViewColor(Rgba),
    /// Pop-up colours blended across the bar, optionally at explicit positions.
    /// Invalid timelines are logged and ignored.
    WithPopUpViewAnimatedColors(Vec<Rgba>, Option<Vec<f64>>),
    /// Corner radius of the pop-up.
    WithPopUpViewCornerRadius(f64),
    /// Resize the pop-up for every label.
    WithContinuouslyAdjustPopUpViewSize(bool),
    /// Duration of animated progress changes.
    WithAnimationDuration(Duration),
    /// Custom label text. Also turns on continuous resizing.
    WithDataSource(Weak<dyn DataSource>),
    /// Receives pop-up lifecycle notifications.
    WithDelegate(Weak<dyn Delegate>),
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithWidth(width) => {
                m.width = *width;
            }
            ProgressOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            ProgressOption::WithTrackTintColor(color) => m.set_track_tint_color(*color),
            ProgressOption::WithTextColor(color) => m.set_text_color(*color),
            ProgressOption::WithFont(font) => m.set_font(*font),
            ProgressOption::WithPopUpViewColor(color) => m.set_pop_up_view_color(*color),
            ProgressOption::WithPopUpViewAnimatedColors(colors, positions) => {
                let result = match positions {
                    Some(positions) => {
                        m.set_pop_up_view_animated_colors_with_positions(colors, positions)
                    }
                    None => m.set_pop_up_view_animated_colors(colors),
                };
                if let Err(err) = result {
                    warn!(error = %err, "ignoring pop-up animated colors");
                }
            }
            ProgressOption::WithPopUpViewCornerRadius(radius) => {
                m.set_pop_up_view_corner_radius(*radius);
            }
            ProgressOption::WithContinuouslyAdjustPopUpViewSize(adjust) => {
                m.set_continuously_adjust_pop_up_view_size(*adjust);
            }
            ProgressOption::WithAnimationDuration(duration) => {
                m.set_animation_duration(*duration);
            }
            ProgressOption::WithDataSource(source) => m.set_data_source_weak(source.clone()),
            ProgressOption::WithDelegate(delegate) => m.set_delegate_weak(delegate.clone()),
        }
    }
}

/// Sets the width of the bar in cells.
pub fn with_width(w: i32) -> ProgressOption {
    ProgressOption::WithWidth(w)
}

/// Customizes the characters used for filled and empty sections.
///
/// ```rust
/// use popup_progress::progress::{new, with_fill_characters};
///
/// let ascii = new(&[with_fill_characters('=', '-')]);
/// assert_eq!(ascii.full, '=');
/// ```
pub fn with_fill_characters(full: char, empty: char) -> ProgressOption {
    ProgressOption::WithFillCharacters(full, empty)
}

/// Sets the colour of the empty part of the bar.
pub fn with_track_tint_color(color: Rgba) -> ProgressOption {
    ProgressOption::WithTrackTintColor(color)
}

/// Sets the colour of the pop-up label.
pub fn with_text_color(color: Rgba) -> ProgressOption {
    ProgressOption::WithTextColor(color)
}

/// Sets the pop-up label font; `None` keeps the default bold font.
pub fn with_font(font: Option<Font>) -> ProgressOption {
    ProgressOption::WithFont(font)
}

/// Uses a single pop-up colour.
pub fn with_pop_up_view_color(color: Rgba) -> ProgressOption {
    ProgressOption::WithPopUpViewColor(color)
}

/// Blends the pop-up colour across evenly spaced `colors`.
pub fn with_pop_up_view_animated_colors(colors: Vec<Rgba>) -> ProgressOption {
    ProgressOption::WithPopUpViewAnimatedColors(colors, None)
}

/// Blends the pop-up colour across `colors` placed at `positions`.
///
/// A length mismatch is logged and the option is ignored; use
/// [`Model::set_pop_up_view_animated_colors_with_positions`] to get the
/// error back.
pub fn with_pop_up_view_animated_colors_and_positions(
    colors: Vec<Rgba>,
    positions: Vec<f64>,
) -> ProgressOption {
    ProgressOption::WithPopUpViewAnimatedColors(colors, Some(positions))
}

/// Sets the pop-up corner radius.
pub fn with_pop_up_view_corner_radius(radius: f64) -> ProgressOption {
    ProgressOption::WithPopUpViewCornerRadius(radius)
}

/// Resizes the pop-up for every label.
pub fn with_continuously_adjust_pop_up_view_size(adjust: bool) -> ProgressOption {
    ProgressOption::WithContinuouslyAdjustPopUpViewSize(adjust)
}

/// Sets the duration of animated progress changes.
pub fn with_animation_duration(duration: Duration) -> ProgressOption {
    ProgressOption::WithAnimationDuration(duration)
}

/// Attaches a data source, held weakly.
pub fn with_data_source<D: DataSource + 'static>(source: &Arc<D>) -> ProgressOption {
    let source: Weak<D> = Arc::downgrade(source);
    ProgressOption::WithDataSource(source)
}

/// Attaches a delegate, held weakly.
pub fn with_delegate<D: Delegate + 'static>(delegate: &Arc<D>) -> ProgressOption {
    let delegate: Weak<D> = Arc::downgrade(delegate);
    ProgressOption::WithDelegate(delegate)
}

/// Creates a progress component with the given options.
///
/// # Default Configuration
///
/// - **Width**: 40 cells, `█` filled and `░` empty
/// - **Track tint**: `#606060`
/// - **Pop-up colour**: `#7571F9`, label `#FFFFFF` in bold
/// - **Corner radius**: 4.0
/// - **Sizing**: fixed, fitting `"100%"`
/// - **Animation**: 0.5 seconds
///
/// The pop-up starts hidden; call
/// [`show_pop_up_view`](Model::show_pop_up_view) to reveal it.
pub fn new(opts: &[ProgressOption]) -> Model {
    let (sender, events) = channel();
    let mut m = Model::with_channel(sender, events);

    for opt in opts {
        opt.apply(&mut m);
    }

    m.place_initial();
    m
}
