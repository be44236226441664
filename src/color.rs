//! Colours and colour timelines for the pop-up bubble.
//!
//! A [`ColorTimeline`] maps a normalised offset (usually the progress value)
//! to a colour by blending between caller-supplied stops. The pop-up view
//! either shows a single static colour or evaluates a timeline, which is
//! modelled by [`ColorSource`].
//!
//! ```rust
//! use popup_progress::color::{ColorTimeline, Rgba};
//!
//! let red = Rgba::from_rgb8(255, 0, 0);
//! let blue = Rgba::from_rgb8(0, 0, 255);
//! let timeline = ColorTimeline::evenly_spaced(&[red, blue]).unwrap();
//!
//! assert_eq!(timeline.color_at(0.0), red);
//! assert_eq!(timeline.color_at(1.0), blue);
//! ```

use crate::error::{ColorError, Result};
use lipgloss_extras::lipgloss;
use std::fmt;
use std::str::FromStr;

/// An RGBA colour with channels stored as `f64` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel, `1.0` is fully opaque.
    pub a: f64,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a colour from float channels. Values are not clamped.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque colour from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Creates a colour from 8-bit channels including alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use popup_progress::color::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#f00").unwrap(), Rgba::from_rgb8(255, 0, 0));
    /// assert_eq!(Rgba::from_hex("7571F9").unwrap(), Rgba::from_rgb8(0x75, 0x71, 0xF9));
    /// assert!(Rgba::from_hex("#12").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let nibble = |i: usize| byte(&digits[i..=i]).map(|n| n * 17);
                Ok(Self::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::from_rgb8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
            )),
            8 => Ok(Self::from_rgba8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Formats the colour as `#RRGGBB`, dropping alpha.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Linearly interpolates every channel independently.
    ///
    /// `t == 0.0` returns `self` and `t == 1.0` returns `other` exactly.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let mix = |a: f64, b: f64| a + t * (b - a);
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// The same colour with alpha forced to `1.0`.
    pub fn opaque(self) -> Rgba {
        Rgba { a: 1.0, ..self }
    }

    /// Composites this colour over an opaque background.
    pub fn over(self, background: Rgba) -> Rgba {
        background.opaque().lerp(self.opaque(), self.a.clamp(0.0, 1.0))
    }

    /// Converts to a lipgloss colour for terminal rendering.
    pub fn to_lipgloss(&self) -> lipgloss::Color {
        lipgloss::Color::from(self.to_hex().as_str())
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A colour pinned to a position on a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `0.0..=1.0`.
    pub position: f64,
    /// Colour shown at `position`.
    pub color: Rgba,
}

/// An ordered set of colour stops evaluated by a single scalar offset.
///
/// Stops are ascending by position but need not be evenly spaced. Offsets
/// before the first stop or after the last one clamp to the boundary colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTimeline {
    stops: Vec<ColorStop>,
}

impl ColorTimeline {
    /// Builds a timeline from colours and optional explicit positions.
    ///
    /// Without positions the stops are spread evenly at `i / (n - 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error when `colors` is empty, when the number of positions
    /// differs from the number of colours, or when positions are out of range
    /// or descending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use popup_progress::color::{ColorTimeline, Rgba};
    /// use popup_progress::error::ColorError;
    ///
    /// let colors = [Rgba::WHITE, Rgba::BLACK, Rgba::WHITE];
    /// let err = ColorTimeline::new(&colors, Some(&[0.0, 1.0])).unwrap_err();
    /// assert_eq!(err, ColorError::MismatchedPositions { colors: 3, positions: 2 });
    /// ```
    pub fn new(colors: &[Rgba], positions: Option<&[f64]>) -> Result<Self> {
        if colors.is_empty() {
            return Err(ColorError::EmptyTimeline);
        }

        let stops = match positions {
            None => {
                let last = colors.len().saturating_sub(1).max(1) as f64;
                colors
                    .iter()
                    .enumerate()
                    .map(|(i, &color)| ColorStop {
                        position: i as f64 / last,
                        color,
                    })
                    .collect()
            }
            Some(positions) => {
                if positions.len() != colors.len() {
                    return Err(ColorError::MismatchedPositions {
                        colors: colors.len(),
                        positions: positions.len(),
                    });
                }
                let mut previous = 0.0_f64;
                for &position in positions {
                    if !(0.0..=1.0).contains(&position) {
                        return Err(ColorError::PositionOutOfRange(position));
                    }
                    if position < previous {
                        return Err(ColorError::UnorderedPositions {
                            previous,
                            next: position,
                        });
                    }
                    previous = position;
                }
                colors
                    .iter()
                    .zip(positions)
                    .map(|(&color, &position)| ColorStop { position, color })
                    .collect()
            }
        };

        Ok(Self { stops })
    }

    /// Builds a timeline with evenly spaced stops.
    pub fn evenly_spaced(colors: &[Rgba]) -> Result<Self> {
        Self::new(colors, None)
    }

    /// The stops, ascending by position.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// True when the timeline cannot blend: fewer than two stops, or the
    /// first and last stop share one position.
    pub fn is_degenerate(&self) -> bool {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => self.stops.len() < 2 || first.position == last.position,
            _ => true,
        }
    }

    /// Evaluates the timeline at `offset`.
    ///
    /// Exactly at a stop position the stop's colour is returned untouched.
    /// Between two stops each channel is interpolated linearly. A degenerate
    /// timeline yields its first colour.
    pub fn color_at(&self, offset: f64) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Rgba::default(),
        };
        if self.is_degenerate() || offset.is_nan() || offset <= first.position {
            return first.color;
        }
        if offset >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if offset > upper.position {
                continue;
            }
            if offset == upper.position {
                return upper.color;
            }
            if offset == lower.position || lower.position == upper.position {
                return lower.color;
            }
            let t = (offset - lower.position) / (upper.position - lower.position);
            return lower.color.lerp(upper.color, t);
        }

        last.color
    }
}

/// Where the pop-up colour comes from. Setting one variant replaces the other.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    /// One colour regardless of progress.
    Static(Rgba),
    /// A colour blended from a timeline by progress.
    Timeline(ColorTimeline),
}

impl ColorSource {
    /// Resolves the colour to display at `offset`.
    pub fn resolve(&self, offset: f64) -> Rgba {
        match self {
            ColorSource::Static(color) => *color,
            ColorSource::Timeline(timeline) => timeline.color_at(offset),
        }
    }

    /// The installed timeline, if any.
    pub fn timeline(&self) -> Option<&ColorTimeline> {
        match self {
            ColorSource::Timeline(timeline) => Some(timeline),
            ColorSource::Static(_) => None,
        }
    }
}

impl Default for ColorSource {
    fn default() -> Self {
        ColorSource::Static(Rgba::from_rgb8(0x75, 0x71, 0xF9))
    }
}
