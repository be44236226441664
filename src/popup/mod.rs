//! Pop-up bubble component.
//!
//! The bubble is a rounded box with an arrow on its bottom edge that shows a
//! short label. It owns the colour source (a static colour or a
//! [`ColorTimeline`](crate::color::ColorTimeline)) and sizes itself to fit its
//! text. It is normally driven by the progress controller, but it can be used
//! on its own.
//!
//! # Basic Usage
//!
//! ```rust
//! use popup_progress::geometry::Rect;
//! use popup_progress::popup::new;
//!
//! let mut bubble = new();
//! let size = bubble.size_for_text("42%");
//! let frame = Rect::new(0.0, 0.0, size.width, size.height);
//!
//! bubble.set_geometry_and_text(frame, size.width / 2.0, "42%", 0.42);
//! bubble.show(false);
//! assert!(bubble.view().contains("42%"));
//! ```
//!
//! # Animated Updates
//!
//! [`Model::animate_to`] tweens frame, arrow and colour over a duration and
//! returns the tick command that drives it. The completion callback runs
//! exactly once, either when the last frame lands or when a later update or
//! [`Model::hide`] cancels the animation.
//!
//! ```rust
//! use popup_progress::geometry::Rect;
//! use popup_progress::popup::new;
//! use std::time::Duration;
//!
//! let mut bubble = new();
//! let frame = Rect::new(10.0, -4.0, 8.0, 4.0);
//! let cmd = bubble.animate_to(frame, 4.0, "80%", 0.8, Duration::from_millis(300), |color| {
//!     println!("settled on {color}");
//! });
//! assert!(cmd.is_some());
//! assert!(bubble.is_animating());
//! ```

pub mod model;
pub mod view;


pub use model::{new, BubbleEvent, Completion, FrameMsg, Model};
