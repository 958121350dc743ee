use std::path::Path;

use crate::error::LoadError;

/// Pixel format of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba8,
    Rgb8,
}

impl TextureFormat {
    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            TextureFormat::Rgba8 => 4,
            TextureFormat::Rgb8 => 3,
        }
    }
}

/// A loaded texture asset with raw pixel data, bottom row first.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: TextureFormat,
}

/// Load an image file for upload as a GL texture.
///
/// Rows are flipped so the first row in `data` is the bottom of the image,
/// matching GL's texture origin. Images without alpha stay RGB8.
pub fn load_texture(path: &Path) -> Result<TextureAsset, LoadError> {
    let img = image::open(path)
        .map_err(|e| LoadError::ImageLoadFailed(path.to_path_buf(), e.to_string()))?
        .flipv();

    let (width, height) = (img.width(), img.height());
    let (data, format) = if img.color().has_alpha() {
        (img.to_rgba8().into_raw(), TextureFormat::Rgba8)
    } else {
        (img.to_rgb8().into_raw(), TextureFormat::Rgb8)
    };

    Ok(TextureAsset {
        width,
        height,
        data,
        format,
    })
}
