//! Lit parametric surfaces.
//!
//! Three fixed WGSL programs share one bind-group layout; see
//! `shaders/common.wgsl` for the uniform blocks mirrored by [`uniforms`].

mod cache;
mod renderer;
mod uniforms;

pub use renderer::SurfaceRenderer;
