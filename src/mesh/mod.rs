//! Renderable mesh data.
//!
//! A [`Mesh`] is the only thing generators hand to a rendering backend: an
//! ordered list of per-vertex attribute arrays (bound to input slots by
//! position) and a flat triangle index list.

mod buffer;
mod wireframe;

pub use buffer::{AttributeData, AttributeKind, Mesh, MeshError, VertexAttribute};
