use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use crate::error::{GpuError, TextureError};
use crate::rendering::graphics_device::{ConstantBufferSlot, GraphicsDevice};

/// A call made on the recording device, in the order it was made
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall
{
    CreateVertexBuffer { id: u32, size_bytes: usize },
    CreateIndexBuffer { id: u32, size_bytes: usize },
    CreateConstantBuffer { id: u32, size_bytes: usize },
    WriteConstantBuffer { id: u32, data: Vec<u8> },
    BindConstantBuffer { slot: ConstantBufferSlot, id: u32 },
    LoadTexture { path: PathBuf, id: Option<u32> },
    BindGeometry { vertex_buffer: u32, stride: usize, index_buffer: u32 },
    BindTexture { slot: u32, id: Option<u32> },
    DrawIndexed { index_count: u32, start_index: u32, base_vertex: i32 },
    ReleaseBuffer { id: u32 },
    ReleaseTexture { id: u32 },
    DropDevice,
}

pub type CallLog = Rc<RefCell<Vec<DeviceCall>>>;

/// Graphics device that performs no rendering and records every call instead
pub struct RecordingDevice
{
    log: CallLog,
    next_id: u32,
    failing_textures: Vec<PathBuf>,
    failing_writes: bool,
}

pub struct MockBuffer
{
    pub id: u32,
    log: CallLog,
}

pub struct MockTexture
{
    pub id: u32,
    log: CallLog,
}

impl RecordingDevice
{
    pub fn new() -> RecordingDevice
    {
        RecordingDevice { log: Rc::new(RefCell::new(Vec::new())), next_id: 1, failing_textures: Vec::new(), failing_writes: false }
    }

    /// Makes every subsequent constant buffer write fail, as if the buffer could not be mapped
    pub fn fail_writes(&mut self)
    {
        self.failing_writes = true;
    }

    /// Makes every subsequent load of the given file fail
    pub fn fail_texture<P: Into<PathBuf>>(&mut self, path: P)
    {
        self.failing_textures.push(path.into());
    }

    /// Shared handle to the call log; it stays readable after the device is dropped
    pub fn log(&self) -> CallLog
    {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<DeviceCall>
    {
        self.log.borrow().clone()
    }

    pub fn clear(&self)
    {
        self.log.borrow_mut().clear();
    }

    fn next_id(&mut self) -> u32
    {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn record(&self, call: DeviceCall)
    {
        self.log.borrow_mut().push(call);
    }

    fn buffer(&mut self) -> MockBuffer
    {
        MockBuffer { id: self.next_id(), log: self.log.clone() }
    }
}

impl GraphicsDevice for RecordingDevice
{
    type Buffer = MockBuffer;
    type Texture = MockTexture;

    fn create_vertex_buffer(&mut self, data: &[u8], _label: &str) -> Result<MockBuffer, GpuError>
    {
        let buffer = self.buffer();
        self.record(DeviceCall::CreateVertexBuffer { id: buffer.id, size_bytes: data.len() });
        Ok(buffer)
    }

    fn create_index_buffer(&mut self, indices: &[u32], _label: &str) -> Result<MockBuffer, GpuError>
    {
        let buffer = self.buffer();
        self.record(DeviceCall::CreateIndexBuffer { id: buffer.id, size_bytes: indices.len() * 4 });
        Ok(buffer)
    }

    fn create_constant_buffer(&mut self, size_bytes: usize, _label: &str) -> Result<MockBuffer, GpuError>
    {
        let buffer = self.buffer();
        self.record(DeviceCall::CreateConstantBuffer { id: buffer.id, size_bytes });
        Ok(buffer)
    }

    fn write_constant_buffer(&mut self, buffer: &MockBuffer, data: &[u8]) -> Result<(), GpuError>
    {
        if self.failing_writes
        {
            return Err(GpuError::BufferMap { buffer: buffer.id });
        }

        self.record(DeviceCall::WriteConstantBuffer { id: buffer.id, data: data.to_vec() });
        Ok(())
    }

    fn bind_constant_buffer(&mut self, slot: ConstantBufferSlot, buffer: &MockBuffer)
    {
        self.record(DeviceCall::BindConstantBuffer { slot, id: buffer.id });
    }

    fn load_texture(&mut self, path: &Path) -> Result<MockTexture, TextureError>
    {
        if self.failing_textures.iter().any(|x| x == path)
        {
            self.record(DeviceCall::LoadTexture { path: path.to_path_buf(), id: None });
            return Err(TextureError::Decode { path: path.to_path_buf(), reason: "mock failure".to_string() });
        }

        let texture = MockTexture { id: self.next_id(), log: self.log.clone() };
        self.record(DeviceCall::LoadTexture { path: path.to_path_buf(), id: Some(texture.id) });
        Ok(texture)
    }

    fn bind_geometry(&mut self, vertex_buffer: &MockBuffer, stride: usize, index_buffer: &MockBuffer)
    {
        self.record(DeviceCall::BindGeometry { vertex_buffer: vertex_buffer.id, stride, index_buffer: index_buffer.id });
    }

    fn bind_texture(&mut self, slot: u32, texture: Option<&MockTexture>)
    {
        self.record(DeviceCall::BindTexture { slot, id: texture.map(|x| x.id) });
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32)
    {
        self.record(DeviceCall::DrawIndexed { index_count, start_index, base_vertex });
    }
}

impl Drop for RecordingDevice
{
    fn drop(&mut self)
    {
        self.log.borrow_mut().push(DeviceCall::DropDevice);
    }
}

impl Drop for MockBuffer
{
    fn drop(&mut self)
    {
        self.log.borrow_mut().push(DeviceCall::ReleaseBuffer { id: self.id });
    }
}

impl Drop for MockTexture
{
    fn drop(&mut self)
    {
        self.log.borrow_mut().push(DeviceCall::ReleaseTexture { id: self.id });
    }
}
