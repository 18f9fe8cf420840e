pub mod buffer;
pub mod gl_device;
pub mod shader_program_creation;
pub mod texture;
pub mod vao;
