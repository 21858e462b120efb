//! Flat 2D drawing in normalized device coordinates.
//!
//! Commands are recorded into a [`DrawList`] with a z-index and drawn
//! back-to-front by [`FlatRenderer`] without depth testing.

mod cmd;
mod list;
mod renderer;

pub use cmd::{FlatCmd, FlatPrimitive, FlatVertex};
pub use list::{DrawItem, DrawList, ZIndex};
pub use renderer::FlatRenderer;
