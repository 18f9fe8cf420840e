use std::ffi::c_void;
use std::ptr::{copy_nonoverlapping, null};
use crate::error::GpuError;

/// The ways a buffer on the GPU is used by the scene
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferType
{
    /// Written once at creation, never changed afterwards
    Immutable,
    /// Rewritten as a whole, possibly many times per frame
    Dynamic,
}

/// Abstraction of a buffer object on the GPU. The buffer is deleted when this is dropped
#[derive(Debug)]
pub struct GlBuffer
{
    buffer: u32,
    size_bytes: usize,
    buffer_type: BufferType,
}

impl GlBuffer
{
    /// Creates a buffer holding exactly the given data
    ///
    /// `data` - contents of the buffer; the buffer size is the length of this slice
    /// `buffer_type` - how the buffer will be used
    /// `label` - name used when reporting errors
    pub fn new(data: &[u8], buffer_type: BufferType, label: &str) -> Result<GlBuffer, GpuError>
    {
        GlBuffer::create(data.len(), data.as_ptr() as *const c_void, buffer_type, label)
    }

    /// Creates a dynamic buffer of the given size whose contents are undefined until written
    pub fn with_size(size_bytes: usize, label: &str) -> Result<GlBuffer, GpuError>
    {
        GlBuffer::create(size_bytes, null(), BufferType::Dynamic, label)
    }

    pub fn id(&self) -> u32
    {
        self.buffer
    }

    /// Replaces the contents of a dynamic buffer. The previous contents are orphaned so the write
    /// does not wait on draws still reading them
    ///
    /// `data` - the new contents; must not be larger than the buffer
    pub fn write(&self, data: &[u8]) -> Result<(), GpuError>
    {
        debug_assert_eq!(self.buffer_type, BufferType::Dynamic, "immutable buffers cannot be written");
        debug_assert!(data.len() <= self.size_bytes);

        let map_flags = gl::MAP_WRITE_BIT | gl::MAP_INVALIDATE_BUFFER_BIT;

        unsafe
            {
                let ptr = gl::MapNamedBufferRange(self.buffer, 0, self.size_bytes as isize, map_flags);

                if ptr.is_null()
                {
                    return Err(GpuError::BufferMap { buffer: self.buffer });
                }

                copy_nonoverlapping(data.as_ptr(), ptr as *mut u8, data.len());
                gl::UnmapNamedBuffer(self.buffer);
            }

        Ok(())
    }

    fn create(size_bytes: usize, data: *const c_void, buffer_type: BufferType, label: &str) -> Result<GlBuffer, GpuError>
    {
        if size_bytes == 0
        {
            return Err(GpuError::BufferCreation { label: label.to_string(), size_bytes, reason: "buffer would be empty".to_string() });
        }

        let mut buffer: u32 = 0;

        unsafe
            {
                // Clear any error left behind by earlier calls so the check below only sees this creation
                while gl::GetError() != gl::NO_ERROR {}

                gl::CreateBuffers(1, &mut buffer);

                match buffer_type
                {
                    BufferType::Immutable => gl::NamedBufferStorage(buffer, size_bytes as isize, data, 0),
                    BufferType::Dynamic => gl::NamedBufferData(buffer, size_bytes as isize, data, gl::DYNAMIC_DRAW),
                }

                let error = gl::GetError();
                if buffer == 0 || error != gl::NO_ERROR
                {
                    gl::DeleteBuffers(1, &buffer);
                    return Err(GpuError::BufferCreation { label: label.to_string(), size_bytes, reason: format!("GL error 0x{:X}", error) });
                }
            }

        Ok(GlBuffer { buffer, size_bytes, buffer_type })
    }
}

impl Drop for GlBuffer
{
    fn drop(&mut self)
    {
        unsafe
            {
                gl::DeleteBuffers(1, &self.buffer);
            }
    }
}
