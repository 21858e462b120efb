//! What a program built on the engine implements, and what it is handed.
//!
//! The runtime owns the window and the GPU. Once per redraw it ticks the
//! frame clock and calls [`App::on_frame`] with a [`FrameCtx`]; input events
//! have already been folded into the context's input state by then.

mod ctx;

pub use ctx::{FrameCtx, WindowCtx};

/// Whether the runtime keeps going after a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Per-frame entry point driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Updates and draws one frame. [`FrameCtx::render`] does the drawing.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Flow;
}
