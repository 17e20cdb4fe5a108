use image::RgbaImage;
use image::imageops::{dither, index_colors};

use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::quantize::palette::Plan9Palette;
use crate::render::backend::FrameRGBA;

/// A frame reduced to indices into the [`Plan9Palette`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Expand back to opaque RGBA8 through the palette.
    pub fn to_rgba_image(&self) -> ScrappersResult<RgbaImage> {
        let palette = Plan9Palette::get();
        let data = self
            .indices
            .iter()
            .flat_map(|&i| palette.rgba(i))
            .collect::<Vec<_>>();
        RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| ScrappersError::render("indexed frame size does not match its indices"))
    }
}

/// Reduce a full-color frame to the Plan 9 palette with Floyd–Steinberg error diffusion.
pub fn quantize_frame(frame: FrameRGBA) -> ScrappersResult<IndexedFrame> {
    let FrameRGBA {
        width,
        height,
        data,
    } = frame;
    let mut img = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        ScrappersError::render(format!(
            "frame buffer does not match its {width}x{height} dimensions"
        ))
    })?;

    let palette = Plan9Palette::get();
    dither(&mut img, palette);
    let indices = index_colors(&img, palette).into_raw();

    Ok(IndexedFrame {
        width,
        height,
        indices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/dither.rs"]
mod tests;
