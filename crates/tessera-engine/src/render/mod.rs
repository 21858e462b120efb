//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and
//! record into a [`RenderTarget`] whose colour and depth attachments were
//! cleared at the start of the frame.
//!
//! - [`SurfaceRenderer`] draws a lit 3D [`crate::scene::Scene`].
//! - [`FlatRenderer`] draws a 2D [`flat::DrawList`] in NDC on top.

mod common;
mod ctx;
mod mesh;
mod texture;

pub mod flat;
pub mod surface;

pub use ctx::{RenderCtx, RenderTarget};
pub use flat::FlatRenderer;
pub use mesh::GpuMesh;
pub use surface::SurfaceRenderer;
pub use texture::{GpuTexture, TexelEncoding, TextureData};
