//! "Texture" is the OpenGL term for an image passed to the graphics pipeline. The fragment shader
//! samples it to color the pixels ("fragments") it produces.

use std::ffi::c_void;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use gl::types::*;
use image::DynamicImage;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::handle::{Handle, Resource};
use crate::utils;

/// Pixel layout of decoded texture data, one byte per channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Only three- and four-channel images can be uploaded.
    pub fn from_channels(channels: u8) -> Result<Self> {
        match channels {
            3 => Ok(PixelFormat::Rgb),
            4 => Ok(PixelFormat::Rgba),
            _ => Err(Error::UnsupportedFormat { channels }),
        }
    }

    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            PixelFormat::Rgb => gl::RGB,
            PixelFormat::Rgba => gl::RGBA,
        }
    }
}

/// Decoded pixels ready for upload, bottom row first as the GL expects.
#[derive(Debug, Clone)]
pub struct TextureImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl TextureImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading texture {}", path.display());

        let bytes = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_dynamic(image::load_from_memory(&bytes)?)
    }

    /// Uses the image's own channel count to pick the format.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        let format = PixelFormat::from_channels(image.color().channel_count())?;
        let image = image.flipv();
        let (width, height) = (image.width(), image.height());

        let data = match format {
            PixelFormat::Rgb => image.into_rgb8().into_raw(),
            PixelFormat::Rgba => image.into_rgba8().into_raw(),
        };

        Ok(Self { width, height, format, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

pub(crate) enum TextureObject {}

impl Resource for TextureObject {
    const NAME: &'static str = "texture";

    unsafe fn destroy(id: GLuint) {
        gl::DeleteTextures(1, &id);
    }
}

/// A 2D texture with mipmaps, repeating in both directions.
pub struct Texture<'gl> {
    handle: Handle<TextureObject>,
    _context: PhantomData<&'gl Context>,
}

impl<'gl> Texture<'gl> {
    pub fn new(_gl: &'gl Context, image: &TextureImage) -> Result<Self> {
        let mut id = 0;
        unsafe { gl::GenTextures(1, &mut id) };

        let handle = Handle::new(id).ok_or_else(|| Error::Creation(String::from("texture object")))?;
        let texture = Self { handle, _context: PhantomData };

        let format = image.format().gl_enum();
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);

            // RGB rows aren't 4-byte aligned for most widths.
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format as GLint,
                image.width() as GLsizei,
                image.height() as GLsizei,
                0,
                format,
                gl::UNSIGNED_BYTE,
                image.data().as_ptr() as *const c_void,
            );
        }
        utils::check_error("glTexImage2D")?;

        unsafe { gl::GenerateMipmap(gl::TEXTURE_2D) };
        utils::check_error("glGenerateMipmap")?;

        log::debug!("uploaded {}x{} {:?} texture {}", image.width(), image.height(), image.format(), id);
        Ok(texture)
    }

    pub fn id(&self) -> GLuint {
        self.handle.id()
    }

    /// Binds the texture to texture unit `unit` (`GL_TEXTURE0 + unit`).
    pub fn bind(&self, unit: u32) -> Result<()> {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id());
        }

        utils::check_error("glBindTexture")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn channel_count_picks_the_format() {
        assert_eq!(PixelFormat::from_channels(3).unwrap(), PixelFormat::Rgb);
        assert_eq!(PixelFormat::from_channels(4).unwrap(), PixelFormat::Rgba);
        assert_eq!(PixelFormat::Rgba.gl_enum(), gl::RGBA);
    }

    #[test]
    fn other_channel_counts_are_unsupported() {
        for channels in [0u8, 1, 2, 5].iter() {
            match PixelFormat::from_channels(*channels) {
                Err(Error::UnsupportedFormat { channels: c }) => assert_eq!(c, *channels),
                other => panic!("expected UnsupportedFormat, got {:?}", other),
            }
        }
    }

    #[test]
    fn rgb_images_keep_three_channels() {
        let image = TextureImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::new(3, 2))).unwrap();

        assert_eq!(image.format(), PixelFormat::Rgb);
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.data().len(), 3 * 2 * 3);
    }

    #[test]
    fn rgba_images_keep_four_channels() {
        let image = TextureImage::from_dynamic(DynamicImage::ImageRgba8(RgbaImage::new(4, 4))).unwrap();

        assert_eq!(image.format(), PixelFormat::Rgba);
        assert_eq!(image.data().len(), 4 * 4 * 4);
    }

    #[test]
    fn grayscale_images_are_rejected() {
        let gray = TextureImage::from_dynamic(DynamicImage::ImageLuma8(GrayImage::new(2, 2)));
        let gray_alpha = TextureImage::from_dynamic(DynamicImage::ImageLumaA8(GrayAlphaImage::new(2, 2)));

        assert!(matches!(gray, Err(Error::UnsupportedFormat { channels: 1 })));
        assert!(matches!(gray_alpha, Err(Error::UnsupportedFormat { channels: 2 })));
    }

    #[test]
    fn rows_are_flipped_for_the_gl_origin() {
        let mut rgba = RgbaImage::new(1, 2);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(0, 1, Rgba([0, 0, 255, 255]));

        let image = TextureImage::from_dynamic(DynamicImage::ImageRgba8(rgba)).unwrap();

        // The top row of the file ends up last.
        assert_eq!(&image.data()[..4], &[0, 0, 255, 255]);
        assert_eq!(&image.data()[4..], &[255, 0, 0, 255]);
    }

    #[test]
    fn encoded_files_decode_through_load() {
        let mut rgb = RgbImage::new(2, 2);
        rgb.put_pixel(1, 1, Rgb([10, 20, 30]));

        let path = std::env::temp_dir().join(format!("glw-texture-{}.png", std::process::id()));
        rgb.save(&path).unwrap();

        let image = TextureImage::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(image.format(), PixelFormat::Rgb);
        // Bottom-right of the file is the top-right after flipping.
        assert_eq!(&image.data()[9..12], &[10, 20, 30]);
    }

    #[test]
    fn missing_files_report_the_path() {
        assert!(matches!(
            TextureImage::load("textures/does-not-exist.png"),
            Err(Error::Io { .. })
        ));
    }
}
