use std::path::PathBuf;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::quantize::dither::IndexedFrame;

/// Animated GIF sink that loops forever.
///
/// Frames are held until `end`, then encoded into memory and written to `path` in one go, so a
/// failed run never leaves a partial file behind.
#[derive(Debug)]
pub struct GifSink {
    path: PathBuf,
    cfg: Option<SinkConfig>,
    frames: Vec<(IndexedFrame, u16)>,
}

impl GifSink {
    /// Sink writing to `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cfg: None,
            frames: Vec::new(),
        }
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> ScrappersResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ScrappersError::encode("gif dimensions must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(ScrappersError::encode(format!(
                "gif dimensions {}x{} exceed {}",
                cfg.width,
                cfg.height,
                u16::MAX
            )));
        }
        self.cfg = Some(cfg);
        self.frames = Vec::with_capacity(cfg.frames);
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &IndexedFrame, delay: u16) -> ScrappersResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ScrappersError::encode("push_frame called before begin"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ScrappersError::encode(format!(
                "frame {idx} is {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.frames.push((frame.clone(), delay));
        Ok(())
    }

    fn end(&mut self) -> ScrappersResult<()> {
        if self.cfg.take().is_none() {
            return Err(ScrappersError::encode("end called before begin"));
        }
        let frames = std::mem::take(&mut self.frames);
        let bytes = encode_gif(&frames)?;
        std::fs::write(&self.path, &bytes)
            .with_context(|| format!("write gif '{}'", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            frames = frames.len(),
            bytes = bytes.len(),
            "gif written"
        );
        Ok(())
    }
}

/// Encode frames with delays in hundredths of a second as a looping GIF.
pub(crate) fn encode_gif(frames: &[(IndexedFrame, u16)]) -> ScrappersResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ScrappersError::encode(format!("gif repeat: {e}")))?;
        for (idx, (frame, delay)) in frames.iter().enumerate() {
            let delay = Delay::from_numer_denom_ms(u32::from(*delay) * 10, 1);
            encoder
                .encode_frame(Frame::from_parts(frame.to_rgba_image()?, 0, 0, delay))
                .map_err(|e| ScrappersError::encode(format!("gif frame {idx}: {e}")))?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
