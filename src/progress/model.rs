//! State and behaviour of the progress component.

use super::types::{DataSource, Delegate};
use crate::color::Rgba;
use crate::error::Result;
use crate::font::Font;
use crate::geometry::{Rect, Size};
use crate::popup::{self, BubbleEvent};
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::debug;

// Internal ID management for progress instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

pub(crate) fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

pub(crate) const DEFAULT_WIDTH: i32 = 40;
pub(crate) const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Every label the percentage formatter can produce.
static PERCENT_STRINGS: Lazy<Vec<String>> =
    Lazy::new(|| (0..=100).map(|p| format!("{p}%")).collect());

/// Formats progress as a whole percentage, e.g. `0.256` → `"26%"`.
///
/// ```rust
/// use popup_progress::progress::percent_text;
///
/// assert_eq!(percent_text(0.0), "0%");
/// assert_eq!(percent_text(0.256), "26%");
/// assert_eq!(percent_text(1.0), "100%");
/// ```
pub fn percent_text(progress: f64) -> String {
    format!("{}%", (progress.clamp(0.0, 1.0) * 100.0).round() as i32)
}

/// The progress component: a bar plus its pop-up label.
///
/// Build one with [`new`](super::new) and the `with_*` options. Progress is
/// changed through [`Model::set_progress`]; animated changes return a
/// command whose messages must be forwarded to [`Model::update`].
#[derive(Debug)]
pub struct Model {
    id: i64,
    progress: f64,

    /// Width of the bar in cells.
    pub width: i32,
    /// Character for the filled part of the bar.
    pub full: char,
    /// Character for the empty part of the bar.
    pub empty: char,

    track_tint: Rgba,
    /// Colour of the filled part; follows the pop-up colour.
    fill_color: Rgba,
    resolved_color: Option<Rgba>,

    continuously_adjust: bool,
    static_size: Size,
    animation_duration: Duration,

    pub(crate) bubble: popup::Model,
    sender: Sender<BubbleEvent>,
    events: Receiver<BubbleEvent>,

    data_source: Option<Weak<dyn DataSource>>,
    delegate: Option<Weak<dyn Delegate>>,
}

impl Model {
    pub(crate) fn with_channel(sender: Sender<BubbleEvent>, events: Receiver<BubbleEvent>) -> Self {
        let mut bubble = popup::new();
        bubble.set_notifier(sender.clone());
        let track_tint = Rgba::from_rgb8(0x60, 0x60, 0x60);
        bubble.set_backdrop_color(track_tint);
        let fill_color = bubble.opaque_color();

        let mut model = Self {
            id: next_id(),
            progress: 0.0,
            width: DEFAULT_WIDTH,
            full: '█',
            empty: '░',
            track_tint,
            fill_color,
            resolved_color: None,
            continuously_adjust: false,
            static_size: Size::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            bubble,
            sender,
            events,
            data_source: None,
            delegate: None,
        };
        model.recompute_static_size();
        model
    }

    /// Unique identifier, passed to [`Delegate`] callbacks.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current progress in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Sets progress, pinning it to `0.0..=1.0` (NaN becomes `0.0`), and
    /// moves the pop-up.
    ///
    /// When `animated` the pop-up and bar glide to the new value and the
    /// returned command drives the animation. A running animation is
    /// finished off first at its current position.
    pub fn set_progress(&mut self, value: f64, animated: bool) -> Option<Cmd> {
        self.progress = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };

        let text = self.display_text();
        let (frame, arrow_offset) = self.layout(&text);

        let cmd = if animated {
            let sender = self.sender.clone();
            self.bubble.animate_to(
                frame,
                arrow_offset,
                text,
                self.progress,
                self.animation_duration,
                move |color| {
                    let _ = sender.send(BubbleEvent::AnimationFinished(color));
                },
            )
        } else {
            self.bubble
                .set_geometry_and_text(frame, arrow_offset, text, self.progress);
            None
        };

        self.drain_events();
        cmd
    }

    /// Shows the pop-up. The delegate hears about it before anything is
    /// drawn.
    pub fn show_pop_up_view(&mut self, animated: bool) -> Option<Cmd> {
        let delegate = self.delegate();
        let id = self.id;
        let cmd = self.bubble.show_with(animated, |_| {
            if let Some(delegate) = delegate {
                delegate.will_display_pop_up(id);
            }
        });
        self.drain_events();
        cmd
    }

    /// Hides the pop-up, finishing off any running animation.
    pub fn hide_pop_up_view(&mut self, animated: bool) -> Option<Cmd> {
        let cmd = self.bubble.hide(animated);
        self.drain_events();
        cmd
    }

    /// Whether the pop-up is shown or being shown.
    pub fn is_pop_up_visible(&self) -> bool {
        self.bubble.is_visible()
    }

    /// Read-only access to the pop-up.
    pub fn pop_up(&self) -> &popup::Model {
        &self.bubble
    }

    /// Colour of the empty part of the bar.
    pub fn track_tint_color(&self) -> Rgba {
        self.track_tint
    }

    /// Sets the colour of the empty part of the bar.
    pub fn set_track_tint_color(&mut self, color: Rgba) {
        self.track_tint = color;
        self.bubble.set_backdrop_color(color);
    }

    /// Colour of the filled part of the bar, kept in sync with the pop-up.
    pub fn progress_tint_color(&self) -> Rgba {
        self.fill_color
    }

    /// Colour the last animated update settled on, if any.
    pub fn resolved_color(&self) -> Option<Rgba> {
        self.resolved_color
    }

    /// Label colour.
    pub fn text_color(&self) -> Rgba {
        self.bubble.text_color()
    }

    /// Sets the label colour.
    pub fn set_text_color(&mut self, color: Rgba) {
        self.bubble.set_text_color(color);
    }

    /// Label font.
    pub fn font(&self) -> Font {
        self.bubble.font()
    }

    /// Sets the label font. `None` restores the default bold font.
    pub fn set_font(&mut self, font: Option<Font>) {
        self.bubble.set_font(font);
        self.recompute_static_size();
        self.relayout();
    }

    /// The colour the pop-up currently displays.
    pub fn pop_up_view_color(&self) -> Rgba {
        self.bubble.color()
    }

    /// Uses one static pop-up colour, replacing any animated colours.
    pub fn set_pop_up_view_color(&mut self, color: Rgba) {
        self.bubble.set_color(color);
        self.drain_events();
    }

    /// The colours of the installed timeline, if any.
    pub fn pop_up_view_animated_colors(&self) -> Option<Vec<Rgba>> {
        self.bubble
            .color_source()
            .timeline()
            .map(|timeline| timeline.stops().iter().map(|stop| stop.color).collect())
    }

    /// Blends the pop-up colour across `colors`, spread evenly over the bar.
    ///
    /// # Errors
    ///
    /// Rejects an empty list; the previous colour configuration is kept.
    pub fn set_pop_up_view_animated_colors(&mut self, colors: &[Rgba]) -> Result<()> {
        self.bubble.set_animated_colors(colors, None)?;
        self.drain_events();
        Ok(())
    }

    /// Blends the pop-up colour across `colors` placed at `positions`.
    ///
    /// # Errors
    ///
    /// Rejects mismatched lengths, positions outside `0.0..=1.0` and
    /// descending positions; the previous colour configuration is kept.
    pub fn set_pop_up_view_animated_colors_with_positions(
        &mut self,
        colors: &[Rgba],
        positions: &[f64],
    ) -> Result<()> {
        self.bubble.set_animated_colors(colors, Some(positions))?;
        self.drain_events();
        Ok(())
    }

    /// Corner radius of the pop-up.
    pub fn pop_up_view_corner_radius(&self) -> f64 {
        self.bubble.corner_radius()
    }

    /// Sets the corner radius of the pop-up.
    pub fn set_pop_up_view_corner_radius(&mut self, radius: f64) {
        self.bubble.set_corner_radius(radius);
    }

    /// Whether the pop-up is resized for every label.
    pub fn continuously_adjust_pop_up_view_size(&self) -> bool {
        self.continuously_adjust
    }

    /// Resizes the pop-up for every label instead of using one size that
    /// fits the widest possible label.
    pub fn set_continuously_adjust_pop_up_view_size(&mut self, adjust: bool) {
        self.continuously_adjust = adjust;
        self.relayout();
    }

    /// The size used when not continuously adjusting.
    pub fn static_pop_up_size(&self) -> Size {
        self.static_size
    }

    /// Duration of animated progress changes.
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Sets the duration of animated progress changes.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Attaches a data source and turns on continuous resizing.
    ///
    /// Only a weak reference is kept; once the host drops the source the
    /// percentage is shown again.
    pub fn set_data_source<D: DataSource + 'static>(&mut self, source: &Arc<D>) {
        let source: Weak<D> = Arc::downgrade(source);
        self.set_data_source_weak(source);
    }

    /// Attaches an already-downgraded data source. See [`Model::set_data_source`].
    pub fn set_data_source_weak(&mut self, source: Weak<dyn DataSource>) {
        self.data_source = Some(source);
        self.continuously_adjust = true;
        debug!(id = self.id, "data source attached");
        self.recompute_static_size();
        self.relayout();
    }

    /// Detaches the data source; the label shows the percentage again.
    pub fn clear_data_source(&mut self) {
        self.data_source = None;
        self.recompute_static_size();
        self.relayout();
    }

    /// Whether a live data source is attached.
    pub fn has_data_source(&self) -> bool {
        self.data_source().is_some()
    }

    /// Sets the delegate, keeping only a weak reference.
    pub fn set_delegate<D: Delegate + 'static>(&mut self, delegate: &Arc<D>) {
        let delegate: Weak<D> = Arc::downgrade(delegate);
        self.set_delegate_weak(delegate);
    }

    /// Sets an already-downgraded delegate.
    pub fn set_delegate_weak(&mut self, delegate: Weak<dyn Delegate>) {
        self.delegate = Some(delegate);
    }

    /// Removes the delegate.
    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    fn data_source(&self) -> Option<Arc<dyn DataSource>> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    fn delegate(&self) -> Option<Arc<dyn Delegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn display_text(&self) -> String {
        match self.data_source() {
            Some(source) => source.string_for_progress(self.progress),
            None => percent_text(self.progress),
        }
    }

    /// Sizes the pop-up to the largest label that can ever be shown.
    fn recompute_static_size(&mut self) {
        let strings = match self.data_source() {
            Some(source) => source.all_strings(),
            None => PERCENT_STRINGS.clone(),
        };
        let bubble = &self.bubble;
        self.static_size = strings
            .iter()
            .map(|text| bubble.size_for_text(text))
            .fold(bubble.size_for_text(""), Size::max);
    }

    /// Frame above the thumb, kept inside the bar, and the arrow position
    /// within that frame.
    pub(crate) fn layout(&self, text: &str) -> (Rect, f64) {
        let size = if self.continuously_adjust {
            self.bubble.size_for_text(text)
        } else {
            self.static_size
        };
        let track = f64::from(self.width.max(0));
        let thumb = track * self.progress;
        let x = (thumb - size.width / 2.0).min(track - size.width).max(0.0);
        let frame = Rect::new(x, -size.height, size.width, size.height);
        (frame, thumb - x)
    }

    /// Re-places the pop-up after a configuration change. A running
    /// animation is steered to the new layout instead of being cut short.
    fn relayout(&mut self) {
        let text = self.display_text();
        let (frame, arrow_offset) = self.layout(&text);
        if self.bubble.is_animating() {
            self.bubble.retarget(frame, arrow_offset, text);
        } else {
            self.bubble
                .set_geometry_and_text(frame, arrow_offset, text, self.progress);
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                BubbleEvent::ColorDidUpdate(color) => {
                    self.fill_color = color.opaque();
                }
                BubbleEvent::AnimationFinished(color) => {
                    self.fill_color = color.opaque();
                    self.resolved_color = Some(color);
                }
                BubbleEvent::DidHide => {
                    debug!(id = self.id, "pop-up did hide");
                    if let Some(delegate) = self.delegate() {
                        delegate.did_hide_pop_up(self.id);
                    }
                }
            }
        }
    }

    /// Forwards animation frames to the pop-up and applies what it reports.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = self.bubble.update(msg);
        self.drain_events();
        cmd
    }

    pub(crate) fn place_initial(&mut self) {
        self.relayout();
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (super::new(&[]), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        super::new(&[])
    }
}
