//! Screen-space coordinate types.
//!
//! Logical pixels (DPI-aware), origin top-left, +X right, +Y down.
//! Flat 2D geometry is authored in NDC and converted with [`Viewport`] where
//! pointer input is involved.

mod viewport;

pub use viewport::Viewport;
