//! Colour representation shared by renderers and demos.

pub mod color;

pub use color::Color;
