//! State, colour evaluation and animation of the pop-up bubble.

use crate::color::{ColorSource, ColorTimeline, Rgba};
use crate::error::Result;
use crate::font::Font;
use crate::geometry::{BubbleGeometry, Rect, Size, ARROW_HEIGHT};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc::Sender;
use std::time::Duration;
use tracing::debug;

// Internal ID management for bubble instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;

/// Blank columns between the border and the label on each side.
pub(crate) const HORIZONTAL_PADDING: f64 = 1.0;
/// Border rows (top and bottom) or columns (left and right).
pub(crate) const BORDER: f64 = 2.0;

pub(crate) const DEFAULT_CORNER_RADIUS: f64 = 4.0;
const SHOW_DURATION: Duration = Duration::from_millis(150);
const HIDE_DURATION: Duration = Duration::from_millis(500);

/// Single-shot callback receiving the colour an animation resolved to.
pub type Completion = Box<dyn FnOnce(Rgba) + Send>;

/// Notifications a bubble sends to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BubbleEvent {
    /// The displayed colour changed.
    ColorDidUpdate(Rgba),
    /// An animated update finished or was cancelled with this colour.
    /// Sent by completion handlers that forward into the owner's channel.
    AnimationFinished(Rgba),
    /// A hide transition completed.
    DidHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Update,
    Fade,
}

/// Message advancing a bubble animation by one frame.
///
/// Frames carry the bubble's id and the tag of the animation that scheduled
/// them; frames from a cancelled animation are ignored.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    pub(crate) id: i64,
    pub(crate) kind: FrameKind,
    pub(crate) tag: i64,
}

struct Animation {
    from: BubbleGeometry,
    to: BubbleGeometry,
    from_offset: f64,
    to_offset: f64,
    duration: Duration,
    elapsed: Duration,
    on_complete: Option<Completion>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("from_offset", &self.from_offset)
            .field("to_offset", &self.to_offset)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("pending", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

/// The pop-up bubble.
#[derive(Debug)]
pub struct Model {
    id: i64,
    pub(crate) update_tag: i64,
    pub(crate) fade_tag: i64,

    geometry: BubbleGeometry,
    text: String,
    /// Offset the displayed colour was resolved at.
    offset: f64,
    /// Colour currently displayed.
    color: Rgba,
    source: ColorSource,

    pub(crate) font: Font,
    pub(crate) text_color: Rgba,
    /// Colour behind the bubble, used when fading and for translucent colours.
    pub(crate) backdrop: Rgba,

    visible: bool,
    pub(crate) opacity: f64,
    fade: Option<Fade>,
    animation: Option<Animation>,

    notifier: Option<Sender<BubbleEvent>>,
}

/// Creates a hidden bubble with the default colour, font and corner radius.
pub fn new() -> Model {
    let source = ColorSource::default();
    let color = source.resolve(0.0);
    Model {
        id: next_id(),
        update_tag: 0,
        fade_tag: 0,
        geometry: BubbleGeometry::new(Rect::default(), 0.0, DEFAULT_CORNER_RADIUS),
        text: String::new(),
        offset: 0.0,
        color,
        source,
        font: Font::default(),
        text_color: Rgba::WHITE,
        backdrop: Rgba::from_rgb8(0x60, 0x60, 0x60),
        visible: false,
        opacity: 0.0,
        fade: None,
        animation: None,
        notifier: None,
    }
}

impl Model {
    /// Unique identifier of this bubble.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Routes [`BubbleEvent`]s to the owner holding the receiving end.
    pub fn set_notifier(&mut self, notifier: Sender<BubbleEvent>) {
        self.notifier = Some(notifier);
    }

    fn notify(&self, event: BubbleEvent) {
        if let Some(notifier) = &self.notifier {
            // A dropped receiver means nobody is listening any more.
            let _ = notifier.send(event);
        }
    }

    /// The colour currently displayed.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// The displayed colour with alpha forced to opaque.
    pub fn opaque_color(&self) -> Rgba {
        self.color.opaque()
    }

    /// The configured colour source.
    pub fn color_source(&self) -> &ColorSource {
        &self.source
    }

    /// Uses a single static colour, discarding any timeline.
    pub fn set_color(&mut self, color: Rgba) {
        self.source = ColorSource::Static(color);
        self.apply_offset(self.offset);
    }

    /// Installs a colour timeline, discarding the static colour.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`ColorTimeline::new`]; the previous
    /// colour source stays in effect.
    pub fn set_animated_colors(&mut self, colors: &[Rgba], positions: Option<&[f64]>) -> Result<()> {
        let timeline = ColorTimeline::new(colors, positions)?;
        self.source = ColorSource::Timeline(timeline);
        self.apply_offset(self.offset);
        Ok(())
    }

    /// Resolves the colour for `offset` without changing the bubble.
    pub fn color_for_offset(&self, offset: f64) -> Rgba {
        self.source.resolve(offset)
    }

    /// Moves the colour to `offset`, notifying the owner if it changed.
    fn apply_offset(&mut self, offset: f64) {
        self.offset = offset;
        let color = self.source.resolve(offset);
        if color != self.color {
            self.color = color;
            self.notify(BubbleEvent::ColorDidUpdate(color));
        }
    }

    /// Offset of the displayed colour, tracking the animation.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The label font.
    pub fn font(&self) -> Font {
        self.font
    }

    /// Sets the label font; `None` falls back to the default bold font.
    pub fn set_font(&mut self, font: Option<Font>) {
        self.font = Font::or_default(font);
    }

    /// The label colour.
    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    /// Sets the label colour.
    pub fn set_text_color(&mut self, color: Rgba) {
        self.text_color = color;
    }

    /// Sets the colour drawn behind the bubble.
    pub fn set_backdrop_color(&mut self, color: Rgba) {
        self.backdrop = color;
    }

    /// The requested corner radius.
    pub fn corner_radius(&self) -> f64 {
        self.geometry.corner_radius
    }

    /// Sets the corner radius. Negative or non-finite values become `0.0`.
    pub fn set_corner_radius(&mut self, radius: f64) {
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        self.geometry = BubbleGeometry::new(self.geometry.frame, self.geometry.arrow_offset, radius);
        if let Some(animation) = self.animation.as_mut() {
            animation.to = BubbleGeometry::new(animation.to.frame, animation.to.arrow_offset, radius);
        }
    }

    /// Current geometry, interpolated while animating.
    pub fn geometry(&self) -> &BubbleGeometry {
        &self.geometry
    }

    /// Current frame.
    pub fn frame(&self) -> Rect {
        self.geometry.frame
    }

    /// Current arrow tip offset relative to the frame's left edge.
    pub fn arrow_offset(&self) -> f64 {
        self.geometry.arrow_offset
    }

    /// The label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Smallest bubble that fits `text` in the current font, including
    /// padding, borders and the arrow.
    ///
    /// Longer text never yields a smaller size.
    pub fn size_for_text(&self, text: &str) -> Size {
        let text_size = self.font.measure(text);
        Size::new(
            text_size.width + 2.0 * HORIZONTAL_PADDING + BORDER,
            text_size.height + BORDER + ARROW_HEIGHT,
        )
    }

    /// Applies frame, arrow offset, text and colour offset at once.
    ///
    /// An in-flight animation is cancelled first and its completion runs with
    /// the colour shown at that moment.
    pub fn set_geometry_and_text(
        &mut self,
        frame: Rect,
        arrow_offset: f64,
        text: impl Into<String>,
        offset: f64,
    ) {
        self.cancel_animation();
        self.geometry = BubbleGeometry::new(frame, arrow_offset, self.geometry.corner_radius);
        self.text = text.into();
        self.apply_offset(offset);
    }

    /// Animates frame, arrow offset and colour to new targets over `duration`.
    ///
    /// The text changes immediately. `on_complete` receives the resolved
    /// colour exactly once: after the final frame, or synchronously when the
    /// animation is cancelled by another update or by [`Model::hide`]. A
    /// zero duration applies the change at once, runs `on_complete` and
    /// returns `None`.
    pub fn animate_to<F>(
        &mut self,
        frame: Rect,
        arrow_offset: f64,
        text: impl Into<String>,
        offset: f64,
        duration: Duration,
        on_complete: F,
    ) -> Option<Cmd>
    where
        F: FnOnce(Rgba) + Send + 'static,
    {
        if duration.is_zero() {
            self.set_geometry_and_text(frame, arrow_offset, text, offset);
            on_complete(self.color);
            return None;
        }

        self.cancel_animation();
        self.text = text.into();
        let to = BubbleGeometry::new(frame, arrow_offset, self.geometry.corner_radius);
        self.animation = Some(Animation {
            from: self.geometry,
            to,
            from_offset: self.offset,
            to_offset: offset,
            duration,
            elapsed: Duration::ZERO,
            on_complete: Some(Box::new(on_complete)),
        });
        self.update_tag += 1;
        debug!(id = self.id, tag = self.update_tag, offset, "pop-up animation started");

        Some(self.next_frame(FrameKind::Update, self.update_tag))
    }

    /// Points the running animation at a new frame and text. The colour
    /// target and the remaining duration are kept, and the move continues
    /// from where the bubble is now. Without an animation the change is
    /// applied at once.
    pub fn retarget(&mut self, frame: Rect, arrow_offset: f64, text: impl Into<String>) {
        let current = self.geometry;
        let offset = self.offset;
        if let Some(animation) = self.animation.as_mut() {
            animation.duration = animation.duration.saturating_sub(animation.elapsed);
            animation.elapsed = Duration::ZERO;
            animation.from = current;
            animation.from_offset = offset;
            animation.to = BubbleGeometry::new(frame, arrow_offset, current.corner_radius);
            self.text = text.into();
            debug!(id = self.id, tag = self.update_tag, "pop-up animation retargeted");
            return;
        }
        self.set_geometry_and_text(frame, arrow_offset, text, offset);
    }

    /// Stops the running update animation, leaving the bubble where it is
    /// and resolving the completion with the current colour.
    fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            self.update_tag += 1;
            debug!(id = self.id, offset = self.offset, "pop-up animation cancelled");
            if let Some(on_complete) = animation.on_complete.take() {
                on_complete(self.color);
            }
        }
    }

    /// Whether an update animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the bubble is shown or being shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current opacity between `0.0` and `1.0`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Shows the bubble, fading in when `animated`.
    ///
    /// Showing during a fade-out reverses it; no did-hide is sent for the
    /// interrupted hide. The last geometry and colour are kept.
    pub fn show(&mut self, animated: bool) -> Option<Cmd> {
        self.show_with(animated, |_| {})
    }

    /// Like [`Model::show`], but runs `will_show` first with the bubble
    /// still hidden. `will_show` only runs when the bubble is not already
    /// visible.
    pub fn show_with<F>(&mut self, animated: bool, will_show: F) -> Option<Cmd>
    where
        F: FnOnce(&Model),
    {
        if self.visible {
            return None;
        }
        will_show(self);
        self.visible = true;
        debug!(id = self.id, animated, "pop-up shown");
        self.start_fade(1.0, SHOW_DURATION, animated)
    }

    /// Hides the bubble, fading out when `animated`.
    ///
    /// Cancels any update animation. [`BubbleEvent::DidHide`] is sent once,
    /// when the bubble has become fully transparent. Hiding a hidden bubble
    /// does nothing.
    pub fn hide(&mut self, animated: bool) -> Option<Cmd> {
        if !self.visible {
            return None;
        }
        self.cancel_animation();
        self.visible = false;
        debug!(id = self.id, animated, "pop-up hidden");
        let cmd = self.start_fade(0.0, HIDE_DURATION, animated);
        if cmd.is_none() {
            self.notify(BubbleEvent::DidHide);
        }
        cmd
    }

    fn start_fade(&mut self, to: f64, duration: Duration, animated: bool) -> Option<Cmd> {
        self.fade_tag += 1;
        if !animated || self.opacity == to {
            self.fade = None;
            self.opacity = to;
            return None;
        }
        self.fade = Some(Fade {
            from: self.opacity,
            to,
            duration,
            elapsed: Duration::ZERO,
        });
        Some(self.next_frame(FrameKind::Fade, self.fade_tag))
    }

    /// Advances animations in response to this bubble's [`FrameMsg`]s.
    ///
    /// Returns the command for the next frame while an animation runs.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id {
                return None;
            }
            return match frame.kind {
                FrameKind::Update if frame.tag == self.update_tag => self.step_animation(),
                FrameKind::Fade if frame.tag == self.fade_tag => self.step_fade(),
                _ => None,
            };
        }
        None
    }

    fn step_animation(&mut self) -> Option<Cmd> {
        let (geometry, offset, finished) = {
            let animation = self.animation.as_mut()?;
            animation.elapsed += frame_interval();
            let t = progress_of(animation.elapsed, animation.duration);
            let offset = animation.from_offset + t * (animation.to_offset - animation.from_offset);
            let offset = if t >= 1.0 { animation.to_offset } else { offset };
            (animation.from.lerp(&animation.to, t), offset, t >= 1.0)
        };

        self.geometry = geometry;
        self.apply_offset(offset);

        if !finished {
            return Some(self.next_frame(FrameKind::Update, self.update_tag));
        }

        if let Some(mut animation) = self.animation.take() {
            debug!(id = self.id, offset, "pop-up animation finished");
            if let Some(on_complete) = animation.on_complete.take() {
                on_complete(self.color);
            }
        }
        None
    }

    fn step_fade(&mut self) -> Option<Cmd> {
        let fade = self.fade.as_mut()?;
        fade.elapsed += frame_interval();
        let t = progress_of(fade.elapsed, fade.duration);
        self.opacity = if t >= 1.0 {
            fade.to
        } else {
            fade.from + t * (fade.to - fade.from)
        };

        if t < 1.0 {
            return Some(self.next_frame(FrameKind::Fade, self.fade_tag));
        }

        self.fade = None;
        if !self.visible {
            self.notify(BubbleEvent::DidHide);
        }
        None
    }

    fn next_frame(&self, kind: FrameKind, tag: i64) -> Cmd {
        let id = self.id;
        bubbletea_tick(frame_interval(), move |_| {
            Box::new(FrameMsg { id, kind, tag }) as Msg
        })
    }
}

fn frame_interval() -> Duration {
    Duration::from_nanos(1_000_000_000 / FPS as u64)
}

fn progress_of(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(), None)
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
        new()
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        // Never leave a completion dangling.
        self.cancel_animation();
    }
}
