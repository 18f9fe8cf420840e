use std::path::Path;
use crate::error::{GpuError, TextureError};

/// Texture unit the diffuse texture of a material is bound to
pub const DIFFUSE_TEXTURE_SLOT: u32 = 0;

/// Texture unit the normal map of a material is bound to
pub const NORMAL_TEXTURE_SLOT: u32 = 1;

/// The constant (uniform) buffer blocks the scene shaders read from. The binding index of each
/// matches the `binding` qualifier in the shaders folder
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstantBufferSlot
{
    /// Model, view and projection matrices; read by the vertex shader
    Transformation,
    /// Light and camera positions; read by the fragment shader
    LightCamera,
    /// Phong material parameters; read by the fragment shader
    Material,
}

impl ConstantBufferSlot
{
    pub fn binding_index(self) -> u32
    {
        match self
        {
            ConstantBufferSlot::Transformation => 0,
            ConstantBufferSlot::LightCamera => 1,
            ConstantBufferSlot::Material => 2,
        }
    }
}

/// The subset of a graphics API the scene needs: create buffers and textures, write constant
/// buffers, bind resources and issue indexed draws
///
/// Resources are released when the returned handles are dropped, so whoever holds a handle owns
/// the GPU object behind it
pub trait GraphicsDevice
{
    type Buffer;
    type Texture;

    /// Creates an immutable vertex buffer holding exactly `data`
    fn create_vertex_buffer(&mut self, data: &[u8], label: &str) -> Result<Self::Buffer, GpuError>;

    /// Creates an immutable index buffer of 32-bit indices holding exactly `indices`
    fn create_index_buffer(&mut self, indices: &[u32], label: &str) -> Result<Self::Buffer, GpuError>;

    /// Creates a CPU-writable buffer of `size_bytes` used for per-draw constants
    fn create_constant_buffer(&mut self, size_bytes: usize, label: &str) -> Result<Self::Buffer, GpuError>;

    /// Replaces the whole contents of a constant buffer. The previous contents are discarded
    fn write_constant_buffer(&mut self, buffer: &Self::Buffer, data: &[u8]) -> Result<(), GpuError>;

    fn bind_constant_buffer(&mut self, slot: ConstantBufferSlot, buffer: &Self::Buffer);

    /// Loads an image file into a texture. Blocks until the upload is done
    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture, TextureError>;

    /// Binds the vertex and index buffer used by subsequent draws
    fn bind_geometry(&mut self, vertex_buffer: &Self::Buffer, stride: usize, index_buffer: &Self::Buffer);

    /// Binds a texture to a texture unit; `None` leaves the unit without a texture
    fn bind_texture(&mut self, slot: u32, texture: Option<&Self::Texture>);

    /// Draws `index_count` indices from the bound index buffer as triangles
    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32);
}
