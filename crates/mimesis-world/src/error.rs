//! Error types for the `mimesis-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur while building or querying the world grid.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested grid has a zero or unrepresentable dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A tile write fell outside the grid.
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
}
