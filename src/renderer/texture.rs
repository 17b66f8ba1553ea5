//! 2D textures: CPU-side decode, then GPU upload.
//!
//! [`TextureImage`] is the pure half (decode, RGBA8 conversion, vertical
//! flip for GL's bottom-left origin) and needs no context. [`Texture`]
//! uploads one of those and owns the GL object.

use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use glow::HasContext;
use image::io::Reader as ImageReader;

use crate::error::{RenderError, RenderResult};
use crate::renderer::debug::{gl_check, gl_cleanup};

/// Decoded RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an image file into RGBA8, flipping it vertically so row 0
    /// is the bottom row GL samples at `v = 0`.
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        Ok(Self::from_dynamic(image::open(path.as_ref())?))
    }

    /// Decodes encoded bytes (format guessed from their header).
    pub fn from_encoded_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Ok(Self::from_dynamic(image))
    }

    fn from_dynamic(image: image::DynamicImage) -> Self {
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }
    }

    /// Wraps pixels that are already RGBA8 with row 0 at the bottom.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::ImageSize {
                width,
                height,
                data_len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A GL texture object holding one uploaded [`TextureImage`].
pub struct Texture {
    gl: Rc<glow::Context>,
    raw: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates the texture object, uploads `image` at mip level 0 and
    /// leaves the 2D binding clear.
    pub fn new(gl: &Rc<glow::Context>, image: &TextureImage) -> RenderResult<Self> {
        let raw = gl_check!(gl, gl.create_texture()).map_err(RenderError::ObjectCreation)?;
        let texture = Self {
            gl: Rc::clone(gl),
            raw,
            width: image.width(),
            height: image.height(),
        };

        gl_check!(gl, gl.bind_texture(glow::TEXTURE_2D, Some(raw)));
        gl_check!(
            gl,
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32)
        );
        gl_check!(
            gl,
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32)
        );
        gl_check!(
            gl,
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            )
        );
        gl_check!(
            gl,
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            )
        );
        gl_check!(
            gl,
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width() as i32,
                image.height() as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels())),
            )
        );
        gl_check!(gl, gl.bind_texture(glow::TEXTURE_2D, None));

        Ok(texture)
    }

    /// Decode-and-upload shorthand for a file on disk.
    pub fn from_file(gl: &Rc<glow::Context>, path: impl AsRef<Path>) -> RenderResult<Self> {
        Self::new(gl, &TextureImage::from_file(path)?)
    }

    /// Makes the texture current on unit `slot`; pass the same index to
    /// the program's sampler uniform.
    pub fn bind(&self, slot: u32) {
        gl_check!(&self.gl, self.gl.active_texture(glow::TEXTURE0 + slot));
        gl_check!(&self.gl, self.gl.bind_texture(glow::TEXTURE_2D, Some(self.raw)));
    }

    pub fn unbind(&self) {
        gl_check!(&self.gl, self.gl.bind_texture(glow::TEXTURE_2D, None));
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        gl_cleanup!(&self.gl, self.gl.delete_texture(self.raw));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(image: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image.clone())
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let red = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let decoded = TextureImage::from_encoded_bytes(&encode_png(&red)).unwrap();

        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.pixels().len(), 2 * 2 * 4);
        assert!(decoded
            .pixels()
            .chunks_exact(4)
            .all(|px| px == [255, 0, 0, 255]));
    }

    #[test]
    fn decode_flips_rows_for_gl_origin() {
        // top row red, bottom row blue in image coordinates
        let mut source = image::RgbaImage::new(1, 2);
        source.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        source.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let decoded = TextureImage::from_encoded_bytes(&encode_png(&source)).unwrap();

        // row 0 of the upload is the bottom row GL samples at v = 0
        assert_eq!(&decoded.pixels()[0..4], [0, 0, 255, 255]);
        assert_eq!(&decoded.pixels()[4..8], [255, 0, 0, 255]);
    }

    #[test]
    fn rejects_undecodable_bytes() {
        assert!(matches!(
            TextureImage::from_encoded_bytes(b"not an image at all"),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TextureImage::from_file("/no/such/texture.png").is_err());
    }

    #[test]
    fn raw_pixels_must_match_dimensions() {
        assert!(TextureImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            TextureImage::from_rgba8(2, 2, vec![0; 15]),
            Err(RenderError::ImageSize { data_len: 15, .. })
        ));
    }
}
