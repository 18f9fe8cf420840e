use std::mem::size_of;
use crate::geometry::vertex::Vertex;

/// Binding point the interleaved vertex buffer is attached to
const VERTEX_BUFFER_BINDING: u32 = 0;

/// Abstraction of a VAO object
pub struct VAO
{
    vao: u32
}

impl VAO
{
    /// Creates a new VAO. The VAO is not binded
    pub fn new() -> VAO
    {
        let mut vao: u32 = 0;

        unsafe
            {
                gl::CreateVertexArrays(1, &mut vao);
            }

        VAO{ vao }
    }

    /// Creates a VAO describing the interleaved `Vertex` layout. The attribute indices correspond to
    /// "sceneVertexShader.glsl" in the shaders folder
    pub fn for_vertex_layout() -> VAO
    {
        let vao = VAO::new();
        let float_size = size_of::<f32>() as u32;

        // position, normal, tex coord, tangent, binormal
        let attributes: [(u32, i32, u32); 5] = [(0, 3, 0), (1, 3, 3), (2, 2, 6), (3, 3, 8), (4, 3, 11)];

        for (index, count, offset_floats) in attributes.iter()
        {
            vao.specify_index_layout(*index, *count, gl::FLOAT, false, offset_floats * float_size);
        }

        vao
    }

    /// Subsequent draws read their vertices through this VAO
    pub fn bind_vao(&self)
    {
        unsafe
            {
                gl::BindVertexArray(self.vao);
            }
    }

    /// Specify how to interpret a portion of the vertex buffer for rendering
    pub fn specify_index_layout(&self, index: u32, count: i32, data_type: u32, normalized: bool, relative_offset: u32)
    {
        unsafe
            {
                gl::VertexArrayAttribFormat(self.vao, index, count, data_type, normalized as u8, relative_offset);
                gl::VertexArrayAttribBinding(self.vao, index, VERTEX_BUFFER_BINDING);
                gl::EnableVertexArrayAttrib(self.vao, index);
            }
    }

    /// Specify which buffers to use for rendering
    ///
    /// `vertex_buffer` - buffer of interleaved vertices
    /// `stride` - size of one vertex in bytes
    /// `index_buffer` - buffer of 32-bit indices
    pub fn update_buffer_bindings(&self, vertex_buffer: u32, stride: usize, index_buffer: u32)
    {
        debug_assert_eq!(stride, Vertex::STRIDE);

        unsafe
            {
                gl::VertexArrayVertexBuffer(self.vao, VERTEX_BUFFER_BINDING, vertex_buffer, 0, stride as i32);
                gl::VertexArrayElementBuffer(self.vao, index_buffer);
            }
    }
}

impl Drop for VAO
{
    fn drop(&mut self)
    {
        unsafe
            {
                gl::DeleteVertexArrays(1, &self.vao);
            }
    }
}
