//! Geometry of the pop-up bubble.
//!
//! All values are terminal cells stored as `f64` so that frames can be
//! interpolated smoothly while animating; rasterisation rounds to whole cells.
//!
//! The bubble is a rounded rectangle (the body) with a triangular arrow
//! hanging from its bottom edge. [`BubbleGeometry`] is what callers set;
//! [`BubbleShape`] is the resolved outline used for drawing.

/// Height of the arrow below the body, in rows.
pub const ARROW_HEIGHT: f64 = 1.0;

/// Half the width of the arrow's base, in columns.
pub const ARROW_HALF_WIDTH: f64 = 1.0;

/// A point in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in columns.
    pub width: f64,
    /// Height in rows.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in columns.
    pub width: f64,
    /// Height in rows.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at `origin` with the given size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// The rectangle's size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Interpolates every edge from `self` towards `to`.
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        if t >= 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + t * (b - a);
        Rect::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// Corner radius actually usable on a frame of the given width.
fn usable_radius(width: f64, corner_radius: f64) -> f64 {
    let radius = if corner_radius.is_finite() {
        corner_radius.max(0.0)
    } else {
        0.0
    };
    radius.min(width.max(0.0) / 2.0)
}

/// Clamps an arrow offset into `[radius, width - radius]`.
///
/// The radius is limited to half the width, so a frame narrower than two
/// radii pins the arrow to its centre. A NaN offset is treated as centred.
///
/// ```rust
/// use popup_progress::geometry::clamp_arrow_offset;
///
/// assert_eq!(clamp_arrow_offset(20.0, 4.0, 1.0), 4.0);
/// assert_eq!(clamp_arrow_offset(20.0, 4.0, 19.0), 16.0);
/// assert_eq!(clamp_arrow_offset(20.0, 4.0, 9.5), 9.5);
/// assert_eq!(clamp_arrow_offset(6.0, 4.0, 0.0), 3.0);
/// ```
pub fn clamp_arrow_offset(width: f64, corner_radius: f64, arrow_offset: f64) -> f64 {
    let width = width.max(0.0);
    let radius = usable_radius(width, corner_radius);
    if arrow_offset.is_nan() {
        return width / 2.0;
    }
    arrow_offset.clamp(radius, width - radius)
}

/// Frame, arrow position and corner radius of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BubbleGeometry {
    /// Bounding box including the arrow.
    pub frame: Rect,
    /// Arrow tip x, relative to `frame.x`.
    pub arrow_offset: f64,
    /// Requested corner radius of the body.
    pub corner_radius: f64,
}

impl BubbleGeometry {
    /// Creates a geometry, clamping the arrow offset so the arrow never
    /// leaves the straight part of the bottom edge.
    pub fn new(frame: Rect, arrow_offset: f64, corner_radius: f64) -> Self {
        Self {
            frame,
            arrow_offset: clamp_arrow_offset(frame.width, corner_radius, arrow_offset),
            corner_radius,
        }
    }

    /// Interpolates frame and arrow offset towards `to`, keeping the
    /// arrow clamp valid at every step.
    pub fn lerp(&self, to: &BubbleGeometry, t: f64) -> BubbleGeometry {
        if t >= 1.0 {
            return *to;
        }
        let frame = self.frame.lerp(&to.frame, t);
        let arrow = self.arrow_offset + t * (to.arrow_offset - self.arrow_offset);
        BubbleGeometry::new(frame, arrow, to.corner_radius)
    }
}

/// The resolved outline of a bubble: body, rounded corners and arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleShape {
    /// The rounded body, i.e. the frame without the arrow rows.
    pub body: Rect,
    /// Corner radius limited to half the smaller body dimension.
    pub corner_radius: f64,
    /// Arrow tip, on the bottom edge of the frame.
    pub arrow_tip: Point,
    /// Left end of the arrow base, on the bottom edge of the body.
    pub arrow_left: Point,
    /// Right end of the arrow base, on the bottom edge of the body.
    pub arrow_right: Point,
}

impl BubbleShape {
    /// Resolves the outline described by `geometry`.
    pub fn new(geometry: &BubbleGeometry) -> Self {
        let frame = geometry.frame;
        let body = Rect::new(
            frame.x,
            frame.y,
            frame.width.max(0.0),
            (frame.height - ARROW_HEIGHT).max(0.0),
        );
        let corner_radius =
            usable_radius(body.width, geometry.corner_radius).min(body.height / 2.0);

        let tip_x = frame.x + geometry.arrow_offset;
        let base_y = body.max_y();
        Self {
            body,
            corner_radius,
            arrow_tip: Point::new(tip_x, base_y + ARROW_HEIGHT),
            arrow_left: Point::new((tip_x - ARROW_HALF_WIDTH).max(body.x), base_y),
            arrow_right: Point::new((tip_x + ARROW_HALF_WIDTH).min(body.max_x()), base_y),
        }
    }

    /// Rasterises the outline into terminal box-drawing rows.
    pub fn outline(&self) -> Outline {
        let width = (self.body.width.round() as usize).max(2);
        let height = (self.body.height.round() as usize).max(2);
        let rounded = self.corner_radius >= 0.5;
        let (top_left, top_right, bottom_left, bottom_right) = if rounded {
            ('╭', '╮', '╰', '╯')
        } else {
            ('┌', '┐', '└', '┘')
        };

        let local_tip = self.arrow_tip.x - self.body.x;
        let arrow_column = if width > 2 {
            (local_tip.floor().max(1.0) as usize).min(width - 2)
        } else {
            0
        };

        let horizontal = "─".repeat(width - 2);
        let top = format!("{top_left}{horizontal}{top_right}");

        let mut bottom = String::with_capacity(width * 3);
        bottom.push(bottom_left);
        for column in 1..width - 1 {
            bottom.push(if column == arrow_column { '┬' } else { '─' });
        }
        bottom.push(bottom_right);

        let arrow_rows = ARROW_HEIGHT.round() as usize;
        let arrow = format!("{}▼", " ".repeat(arrow_column));

        Outline {
            width,
            top,
            bottom,
            interior_rows: height - 2,
            arrow,
            arrow_rows,
            arrow_column,
        }
    }
}

/// Box-drawing rows of a rasterised bubble, uncoloured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    /// Width of the body in columns, borders included.
    pub width: usize,
    /// Top border row.
    pub top: String,
    /// Bottom border row, with a junction above the arrow.
    pub bottom: String,
    /// Rows between the borders, available for text.
    pub interior_rows: usize,
    /// The arrow row: padding followed by the tip glyph.
    pub arrow: String,
    /// How many times the arrow row is drawn.
    pub arrow_rows: usize,
    /// Column of the arrow tip within the body.
    pub arrow_column: usize,
}
