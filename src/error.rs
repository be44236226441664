//! Errors raised while configuring pop-up colours.

use thiserror::Error;

/// Rejections produced when a colour or colour timeline is configured.
///
/// None of these are fatal: the component that received the bad value keeps
/// whatever configuration it had before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// A hex string could not be parsed as `#rgb`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
    /// A timeline was requested without any colours.
    #[error("a color timeline needs at least one color")]
    EmptyTimeline,
    /// The number of explicit positions differs from the number of colours.
    #[error("{colors} colors were given with {positions} positions")]
    MismatchedPositions {
        /// Number of colours supplied.
        colors: usize,
        /// Number of positions supplied.
        positions: usize,
    },
    /// A stop position is outside `0.0..=1.0` or not a number.
    #[error("stop position {0} is outside 0.0..=1.0")]
    PositionOutOfRange(f64),
    /// Stop positions are not in ascending order.
    #[error("stop positions must be ascending ({previous} is followed by {next})")]
    UnorderedPositions {
        /// The earlier position.
        previous: f64,
        /// The smaller position that follows it.
        next: f64,
    },
}

/// Result alias for colour configuration.
pub type Result<T> = std::result::Result<T, ColorError>;
