use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use nalgebra_glm::{TVec2, TVec3};

/// Interleaved vertex layout shared by every model in the scene. The attribute order matches the
/// layout locations in "sceneVertexShader.glsl"
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex
{
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
    pub tangent: [f32; 3],
    pub binormal: [f32; 3],
}

impl Vertex
{
    pub const STRIDE: usize = size_of::<Vertex>();

    /// Creates a vertex with no normal and no tangent space; those are filled in when the model's
    /// buffers are built
    #[cfg(test)]
    pub fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Vertex
    {
        Vertex { position, tex_coord, ..Vertex::default() }
    }

    pub fn with_normal(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Vertex
    {
        Vertex { position, normal, tex_coord, ..Vertex::default() }
    }

    pub fn position(&self) -> TVec3<f32>
    {
        TVec3::from(self.position)
    }

    pub fn tex_coord(&self) -> TVec2<f32>
    {
        TVec2::from(self.tex_coord)
    }

    pub fn has_normal(&self) -> bool
    {
        self.normal != [0.0; 3]
    }
}

/// One contiguous slice of a model's index buffer, drawn with a single bound material
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexRange
{
    /// Offset of the first index, in indices
    pub start: u32,
    /// Number of indices to draw
    pub size: u32,
    /// Added to every index before it is used to fetch a vertex. Always 0 for loaded models
    pub base_vertex: i32,
    /// `None` when the drawcall has no material
    pub material_index: Option<usize>,
}
