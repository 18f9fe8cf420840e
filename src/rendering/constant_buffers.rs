use std::marker::PhantomData;
use std::mem::size_of;
use bytemuck::{Pod, Zeroable};
use nalgebra_glm::{TMat4, TVec3};
use crate::error::GpuError;
use crate::rendering::graphics_device::{ConstantBufferSlot, GraphicsDevice};

// The layouts below follow std140 rules: every member is a vec4 or a mat4, so no padding is needed

/// Matrices used by the vertex shader for the object being drawn
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformationBuffer
{
    pub model_to_world: [[f32; 4]; 4],
    pub world_to_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightCameraBuffer
{
    pub light_pos: [f32; 4],
    pub camera_pos: [f32; 4],
}

/// Phong material parameters. Shininess is stored in the x component of its vec4
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialBuffer
{
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: [f32; 4],
}

impl TransformationBuffer
{
    pub fn new(model_to_world: &TMat4<f32>, world_to_view: &TMat4<f32>, projection: &TMat4<f32>) -> TransformationBuffer
    {
        TransformationBuffer
        {
            model_to_world: column_major(model_to_world),
            world_to_view: column_major(world_to_view),
            projection: column_major(projection),
        }
    }
}

impl LightCameraBuffer
{
    pub fn new(light_pos: &TVec3<f32>, camera_pos: &TVec3<f32>) -> LightCameraBuffer
    {
        LightCameraBuffer
        {
            light_pos: [light_pos.x, light_pos.y, light_pos.z, 1.0],
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
        }
    }
}

impl MaterialBuffer
{
    pub fn new(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> MaterialBuffer
    {
        MaterialBuffer
        {
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            diffuse: [diffuse[0], diffuse[1], diffuse[2], 1.0],
            specular: [specular[0], specular[1], specular[2], 1.0],
            shininess: [shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// GLSL expects mat4 members column by column, which is also how nalgebra stores them
fn column_major(matrix: &TMat4<f32>) -> [[f32; 4]; 4]
{
    let mut columns = [[0.0; 4]; 4];
    for (c, column) in columns.iter_mut().enumerate()
    {
        for (r, value) in column.iter_mut().enumerate()
        {
            *value = matrix[(r, c)];
        }
    }
    columns
}

/// A device constant buffer sized for exactly one `T`. Every update discards the previous
/// contents and writes the whole block
pub struct ConstantBuffer<T: Pod, D: GraphicsDevice>
{
    buffer: D::Buffer,
    slot: ConstantBufferSlot,
    _contents: PhantomData<T>,
}

impl<T: Pod, D: GraphicsDevice> ConstantBuffer<T, D>
{
    /// Creates the buffer on the device. Nothing is written until the first update
    ///
    /// `device` - device creating the buffer
    /// `slot` - the shader block this buffer is bound to
    pub fn new(device: &mut D, slot: ConstantBufferSlot, label: &str) -> Result<ConstantBuffer<T, D>, GpuError>
    {
        let buffer = device.create_constant_buffer(size_of::<T>(), label)?;
        Ok(ConstantBuffer { buffer, slot, _contents: PhantomData })
    }

    pub fn update(&self, device: &mut D, contents: &T) -> Result<(), GpuError>
    {
        device.write_constant_buffer(&self.buffer, bytemuck::bytes_of(contents))
    }

    pub fn bind(&self, device: &mut D)
    {
        device.bind_constant_buffer(self.slot, &self.buffer);
    }
}
