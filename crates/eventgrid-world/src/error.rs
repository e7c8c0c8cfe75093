//! Error types for the `eventgrid-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type.

use eventgrid_types::EventId;

/// A grid axis, used to say which pair of bounds was inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Errors that can occur during world construction, lookup, and generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The minimum bound of an axis is greater than its maximum.
    #[error("min_{axis} ({min}) must be less than or equal to max_{axis} ({max})")]
    InvalidBounds {
        /// The offending axis.
        axis: Axis,
        /// The requested minimum.
        min: i32,
        /// The requested maximum.
        max: i32,
    },

    /// A coordinate lies outside the world.
    #[error("coordinate ({x}, {y}) is outside the world bounds x {min_x}..={max_x}, y {min_y}..={max_y}")]
    OutOfBounds {
        /// Requested x.
        x: i32,
        /// Requested y.
        y: i32,
        /// Smallest valid x.
        min_x: i32,
        /// Smallest valid y.
        min_y: i32,
        /// Largest valid x.
        max_x: i32,
        /// Largest valid y.
        max_y: i32,
    },

    /// The cheapest ticket was requested from an event that has none.
    ///
    /// The search path filters on availability first, so seeing this error
    /// means a bug in the caller, not bad user input.
    #[error("event {0} has no tickets available")]
    NoTicketsAvailable(EventId),

    /// The grid has more cells than can be addressed.
    #[error("world of {width} x {height} cells is too large to allocate")]
    GridTooLarge {
        /// Number of columns.
        width: u64,
        /// Number of rows.
        height: u64,
    },

    /// The identifier allocator ran out of `u32` values.
    #[error("identifier space exhausted")]
    IdentifiersExhausted,

    /// Generation parameters that cannot drive the generator.
    #[error("invalid generation settings: {0}")]
    InvalidSettings(String),
}

impl WorldError {
    /// Whether this error was caused by caller-supplied bounds or
    /// coordinates, and so is safe to report and continue from.
    pub const fn is_range_error(&self) -> bool {
        matches!(self, Self::InvalidBounds { .. } | Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_errors_are_recoverable() {
        let inverted = WorldError::InvalidBounds {
            axis: Axis::X,
            min: 3,
            max: 1,
        };
        let outside = WorldError::OutOfBounds {
            x: 100,
            y: 0,
            min_x: -10,
            min_y: -10,
            max_x: 10,
            max_y: 10,
        };
        assert!(inverted.is_range_error());
        assert!(outside.is_range_error());
        assert!(!WorldError::NoTicketsAvailable(EventId::new(1)).is_range_error());
        assert!(!WorldError::IdentifiersExhausted.is_range_error());
    }

    #[test]
    fn messages_name_the_axis_and_values() {
        let err = WorldError::InvalidBounds {
            axis: Axis::Y,
            min: 5,
            max: -5,
        };
        assert_eq!(
            err.to_string(),
            "min_y (5) must be less than or equal to max_y (-5)"
        );
    }
}
