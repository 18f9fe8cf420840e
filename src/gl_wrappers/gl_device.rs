use std::ffi::c_void;
use std::mem::size_of;
use std::path::Path;
use log::info;
use crate::error::{GpuError, TextureError};
use crate::gl_wrappers::buffer::{BufferType, GlBuffer};
use crate::gl_wrappers::shader_program_creation::{ShaderInitInfo, ShaderProgram, ShaderType};
use crate::gl_wrappers::texture::GlTexture;
use crate::gl_wrappers::vao::VAO;
use crate::rendering::graphics_device::{ConstantBufferSlot, GraphicsDevice, DIFFUSE_TEXTURE_SLOT, NORMAL_TEXTURE_SLOT};

/// OpenGL 4.5 implementation of the graphics device. It owns the single VAO and shader program
/// every object of the scene is drawn with, and requires a current context on the calling thread
///
/// Unset texture slots are bound to a white diffuse texture and a flat normal map so that
/// untextured materials are lit by their constant colours alone
pub struct GlDevice
{
    vao: VAO,
    shader_program: ShaderProgram,
    blank_diffuse: GlTexture,
    flat_normal: GlTexture,
}

impl GlDevice
{
    /// Compiles the scene shaders and sets up the vertex layout
    ///
    /// `shaders_folder` - folder holding "sceneVertexShader.glsl" and "sceneFragmentShader.glsl"
    pub fn new(shaders_folder: &Path) -> Result<GlDevice, GpuError>
    {
        let shader_program = ShaderProgram::new(vec!
            [
                ShaderInitInfo { shader_type: ShaderType::Vertex, shader_location: shaders_folder.join("sceneVertexShader.glsl") },
                ShaderInitInfo { shader_type: ShaderType::Fragment, shader_location: shaders_folder.join("sceneFragmentShader.glsl") },
            ])?;

        let vao = VAO::for_vertex_layout();

        unsafe
            {
                gl::Enable(gl::DEPTH_TEST);
            }

        info!("Graphics device ready");

        Ok(GlDevice
        {
            vao,
            shader_program,
            blank_diffuse: GlTexture::solid_colour([255, 255, 255, 255]),
            flat_normal: GlTexture::solid_colour([128, 128, 255, 255]),
        })
    }

    /// Clears the colour and depth of the default framebuffer and makes the scene program current
    pub fn begin_frame(&self)
    {
        unsafe
            {
                gl::ClearColor(0.0, 0.0, 0.0, 1.0);
                gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            }

        self.shader_program.use_program();
        self.vao.bind_vao();
    }

    /// Resizes the viewport to cover the whole window
    pub fn set_viewport(&self, width: i32, height: i32)
    {
        unsafe
            {
                gl::Viewport(0, 0, width, height);
            }
    }
}

impl GraphicsDevice for GlDevice
{
    type Buffer = GlBuffer;
    type Texture = GlTexture;

    fn create_vertex_buffer(&mut self, data: &[u8], label: &str) -> Result<GlBuffer, GpuError>
    {
        GlBuffer::new(data, BufferType::Immutable, label)
    }

    fn create_index_buffer(&mut self, indices: &[u32], label: &str) -> Result<GlBuffer, GpuError>
    {
        GlBuffer::new(bytemuck::cast_slice(indices), BufferType::Immutable, label)
    }

    fn create_constant_buffer(&mut self, size_bytes: usize, label: &str) -> Result<GlBuffer, GpuError>
    {
        GlBuffer::with_size(size_bytes, label)
    }

    fn write_constant_buffer(&mut self, buffer: &GlBuffer, data: &[u8]) -> Result<(), GpuError>
    {
        buffer.write(data)
    }

    fn bind_constant_buffer(&mut self, slot: ConstantBufferSlot, buffer: &GlBuffer)
    {
        unsafe
            {
                gl::BindBufferBase(gl::UNIFORM_BUFFER, slot.binding_index(), buffer.id());
            }
    }

    fn load_texture(&mut self, path: &Path) -> Result<GlTexture, TextureError>
    {
        GlTexture::from_file(path)
    }

    fn bind_geometry(&mut self, vertex_buffer: &GlBuffer, stride: usize, index_buffer: &GlBuffer)
    {
        self.vao.update_buffer_bindings(vertex_buffer.id(), stride, index_buffer.id());
        self.vao.bind_vao();
    }

    fn bind_texture(&mut self, slot: u32, texture: Option<&GlTexture>)
    {
        match texture
        {
            Some(i) => i.bind(slot),
            None if slot == DIFFUSE_TEXTURE_SLOT => self.blank_diffuse.bind(slot),
            None if slot == NORMAL_TEXTURE_SLOT => self.flat_normal.bind(slot),
            None =>
                {
                    unsafe
                        {
                            gl::BindTextureUnit(slot, 0);
                        }
                }
        }
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32)
    {
        let offset_bytes = start_index as usize * size_of::<u32>();

        unsafe
            {
                gl::DrawElementsBaseVertex(gl::TRIANGLES, index_count as i32, gl::UNSIGNED_INT, offset_bytes as *const c_void, base_vertex);
            }
    }
}
