use std::ffi::c_void;
use std::path::Path;
use std::sync::Once;
use log::debug;
use stb_image::image::LoadResult;
use stb_image::stb_image::bindgen::stbi_set_flip_vertically_on_load;
use crate::error::TextureError;

static FLIP_ON_LOAD: Once = Once::new();

/// A mipmapped 2D texture on the GPU. The texture is deleted when this is dropped
#[derive(Debug)]
pub struct GlTexture
{
    texture: u32,
}

impl GlTexture
{
    /// Loads an image file into a new texture. Images are flipped so that the first row of the
    /// file is the top of the texture, matching OBJ texture coordinates
    ///
    /// `path` - location of the image file
    pub fn from_file(path: &Path) -> Result<GlTexture, TextureError>
    {
        FLIP_ON_LOAD.call_once(||
            {
                unsafe
                    {
                        stbi_set_flip_vertically_on_load(1);
                    }
            });

        let image = match stb_image::image::load(path)
        {
            LoadResult::ImageU8(i) => i,
            LoadResult::ImageF32(_) => return Err(TextureError::Decode { path: path.to_path_buf(), reason: "HDR images are not supported".to_string() }),
            LoadResult::Error(err) => return Err(TextureError::Decode { path: path.to_path_buf(), reason: err }),
        };

        let (internal_format, format) = match image.depth
        {
            1 => (gl::R8, gl::RED),
            3 => (gl::RGB8, gl::RGB),
            4 => (gl::RGBA8, gl::RGBA),
            channels => return Err(TextureError::UnsupportedChannels { path: path.to_path_buf(), channels }),
        };

        let width = image.width as i32;
        let height = image.height as i32;
        let mip_levels = mip_level_count(width, height);
        let mut texture: u32 = 0;

        unsafe
            {
                // Rows of RGB images are not padded to four bytes
                gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

                gl::CreateTextures(gl::TEXTURE_2D, 1, &mut texture);
                gl::TextureStorage2D(texture, mip_levels, internal_format, width, height);

                gl::TextureParameteri(texture, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as i32);
                gl::TextureParameteri(texture, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
                gl::TextureParameteri(texture, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
                gl::TextureParameteri(texture, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);

                gl::TextureSubImage2D(texture, 0, 0, 0, width, height, format, gl::UNSIGNED_BYTE, image.data.as_ptr() as *const c_void);
                gl::GenerateTextureMipmap(texture);
            }

        debug!("Loaded texture {:?} ({}x{}, {} channels)", path, width, height, image.depth);

        Ok(GlTexture { texture })
    }

    /// Creates a 1x1 texture of a single colour, bound in place of textures a material does not have
    ///
    /// `colour` - RGBA colour of the texel
    pub fn solid_colour(colour: [u8; 4]) -> GlTexture
    {
        let mut texture: u32 = 0;

        unsafe
            {
                gl::CreateTextures(gl::TEXTURE_2D, 1, &mut texture);
                gl::TextureStorage2D(texture, 1, gl::RGBA8, 1, 1);
                gl::TextureSubImage2D(texture, 0, 0, 0, 1, 1, gl::RGBA, gl::UNSIGNED_BYTE, colour.as_ptr() as *const c_void);
            }

        GlTexture { texture }
    }

    /// Binds the texture to the given texture unit
    pub fn bind(&self, unit: u32)
    {
        unsafe
            {
                gl::BindTextureUnit(unit, self.texture);
            }
    }
}

/// Number of mip levels down to a 1x1 image
pub fn mip_level_count(width: i32, height: i32) -> i32
{
    let largest = width.max(height).max(1) as u32;
    (32 - largest.leading_zeros()) as i32
}

impl Drop for GlTexture
{
    fn drop(&mut self)
    {
        unsafe
            {
                gl::DeleteTextures(1, &self.texture);
            }
    }
}
