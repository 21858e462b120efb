//! Tessera engine crate.
//!
//! Window runtime, GPU device, input and timing, plus the 3D scene model and
//! the renderers that draw it. Geometry comes from `tessera-geom`.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
