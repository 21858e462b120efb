//! Tessera geometry crate.
//!
//! CPU-side math shared by the renderer and the demos: forward-mode
//! differentiation, parametric surfaces and their strip tessellation,
//! plane curves, polygon triangulation and clipping, gradient noise.
//! Nothing here touches the GPU or a window.

pub mod arcball;
pub mod curve;
pub mod dual;
pub mod error;
pub mod frenet;
pub mod heightfield;
pub mod jet;
pub mod noise;
pub mod polygon;
pub mod surface;
pub mod tessellate;
pub mod transform;
pub mod vertex;

pub use dual::{Dual, Dual1, Dual2};
pub use error::GeomError;
pub use surface::{DualVec3, ParamSurface};
pub use tessellate::{StripMesh, tessellate, tessellate_with};
pub use transform::Transform;
pub use vertex::SurfaceVertex;

pub use glam;
