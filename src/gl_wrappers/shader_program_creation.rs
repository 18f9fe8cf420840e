use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr::{null, null_mut};
use log::debug;
use crate::error::GpuError;

/// Abstraction of a shader program
pub struct ShaderProgram
{
    shader_program: u32
}

/// Abstraction of a shader
struct Shader
{
    shader: u32,
}

/// Information bundle used to create and initialize an OpenGL shader
#[derive(Debug)]
pub struct ShaderInitInfo
{
    pub shader_type: ShaderType,
    pub shader_location: PathBuf,
}

/// The possible types of shaders supported
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShaderType
{
    Fragment = gl::FRAGMENT_SHADER,
    Vertex = gl::VERTEX_SHADER,
}

impl ShaderProgram
{
    /// Creates a new shader program using the shaders that will be created from the given shader information
    ///
    /// `shaders` - information to create shaders used in the creation of the shader program. There
    ///             must be exactly one vertex and one fragment shader
    pub fn new(shaders: Vec<ShaderInitInfo>) -> Result<ShaderProgram, GpuError>
    {
        ShaderProgram::check_validate_shader_info(&shaders)?;

        let mut created_shaders = Vec::new();
        for x in &shaders
        {
            created_shaders.push(ShaderProgram::create_shader(x)?);
        }

        // Owning the id right away deletes the program if linking fails below
        let shader_program = ShaderProgram { shader_program: unsafe { gl::CreateProgram() } };

        unsafe
            {
                for x in &created_shaders
                {
                    gl::AttachShader(shader_program.shader_program, x.shader);
                }

                gl::LinkProgram(shader_program.shader_program);

                for x in &created_shaders
                {
                    // This is required if the DeleteShader called in the Shader drop function is
                    // to have any effect
                    gl::DetachShader(shader_program.shader_program, x.shader);
                }
            }

        ShaderProgram::check_shader_program_linkage(shader_program.shader_program)?;

        debug!("Linked shader program from {:?}", shaders.iter().map(|x| &x.shader_location).collect::<Vec<_>>());
        Ok(shader_program)
    }

    /// Use the program for subsequent draw operations
    pub fn use_program(&self)
    {
        unsafe
            {
                gl::UseProgram(self.shader_program);
            }
    }

    /// Check if the given shader information is sufficient to create a shader program
    ///
    /// `shaders` - all of the information required to create shaders for a shader program
    fn check_validate_shader_info(shaders: &[ShaderInitInfo]) -> Result<(), GpuError>
    {
        for (shader_type, name) in [(ShaderType::Vertex, "vertex"), (ShaderType::Fragment, "fragment")].iter()
        {
            let count = shaders.iter().filter(|x| x.shader_type == *shader_type).count();

            if count != 1
            {
                return Err(GpuError::ShaderLink(format!("expected exactly one {} shader, got {}", name, count)));
            }
        }

        Ok(())
    }

    /// Creates an shader from the given initialization information
    ///
    /// `shader_info` - information required to create a shader
    fn create_shader(shader_info: &ShaderInitInfo) -> Result<Shader, GpuError>
    {
        let shader_content = read_file(&shader_info.shader_location)?;

        let shader_content_cstr = CString::new(shader_content).map_err(|_| GpuError::ShaderCompilation
            {
                path: shader_info.shader_location.clone(),
                log: "source contains a nul byte".to_string(),
            })?;

        let shader = Shader { shader: unsafe { gl::CreateShader(shader_info.shader_type as u32) } };

        unsafe
            {
                gl::ShaderSource(shader.shader, 1, &shader_content_cstr.as_ptr(), null());
                gl::CompileShader(shader.shader);
            }

        match ShaderProgram::check_shader_compilation(shader.shader)
        {
            Some(log) => Err(GpuError::ShaderCompilation { path: shader_info.shader_location.clone(), log }),
            None => Ok(shader)
        }
    }

    /// Determine if the shader source code is valid GLSL
    ///
    /// `shader` - the shader for which to check compilation for
    fn check_shader_compilation(shader: u32) -> Option<String>
    {
        let mut success = 1;

        unsafe
            {
                gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);

                if success == 0
                {
                    let mut error_message_length = 0;
                    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut error_message_length);

                    let mut error_buffer = vec![0_u8; error_message_length.max(1) as usize];
                    gl::GetShaderInfoLog(shader, error_message_length, null_mut(), error_buffer.as_mut_ptr() as *mut gl::types::GLchar);

                    return Some(info_log_to_string(error_buffer));
                }
            }

        None
    }

    /// Checks that the shader program was successfully created
    ///
    /// `shader_program` - the shader program to check for linkage
    fn check_shader_program_linkage(shader_program: u32) -> Result<(), GpuError>
    {
        let mut success = 1;

        unsafe
            {
                gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut success);

                if success == 0
                {
                    let mut error_message_length = 0;
                    gl::GetProgramiv(shader_program, gl::INFO_LOG_LENGTH, &mut error_message_length);

                    let mut error_buffer = vec![0_u8; error_message_length.max(1) as usize];
                    gl::GetProgramInfoLog(shader_program, error_message_length, null_mut(), error_buffer.as_mut_ptr() as *mut gl::types::GLchar);

                    return Err(GpuError::ShaderLink(info_log_to_string(error_buffer)));
                }
            }

        Ok(())
    }
}

/// Read the file containing the shader source code
///
/// `file_location` - path to the file containing the shader source code
fn read_file(file_location: &Path) -> Result<String, GpuError>
{
    fs::read_to_string(file_location).map_err(|source| GpuError::ShaderRead { path: file_location.to_path_buf(), source })
}

/// Info logs are nul terminated; everything from the first nul on is dropped
fn info_log_to_string(mut buffer: Vec<u8>) -> String
{
    if let Some(end) = buffer.iter().position(|x| *x == 0)
    {
        buffer.truncate(end);
    }

    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl Drop for Shader
{
    fn drop(&mut self)
    {
       unsafe
           {
               gl::DeleteShader(self.shader);
           }
    }
}

impl Drop for ShaderProgram
{
    fn drop(&mut self)
    {
        unsafe
            {
                gl::DeleteProgram(self.shader_program);
            }
    }
}

#[cfg(test)]
mod tests
{
    use crate::gl_wrappers::shader_program_creation::info_log_to_string;

    #[test]
    fn info_log_stops_at_nul()
    {
        let log = b"0(12) : error C0000: syntax error\n\0garbage".to_vec();
        assert_eq!(info_log_to_string(log), "0(12) : error C0000: syntax error");
    }
}
