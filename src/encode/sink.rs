use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::pipeline::Animation;
use crate::quantize::dither::IndexedFrame;

/// Configuration provided to an [`AnimationSink`] before any frame is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frames: usize,
}

/// Consumer of finished animation frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
pub trait AnimationSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ScrappersResult<()>;
    /// Push one frame and its delay in hundredths of a second.
    fn push_frame(&mut self, idx: usize, frame: &IndexedFrame, delay: u16) -> ScrappersResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ScrappersResult<()>;
}

/// Hand every frame of `anim` to `sink` in order.
#[tracing::instrument(skip_all, fields(frames = anim.len()))]
pub fn write_animation(anim: &Animation, sink: &mut dyn AnimationSink) -> ScrappersResult<()> {
    if anim.frames.len() != anim.delays.len() {
        return Err(ScrappersError::encode(format!(
            "animation has {} frames but {} delays",
            anim.frames.len(),
            anim.delays.len()
        )));
    }
    sink.begin(SinkConfig {
        width: anim.size,
        height: anim.size,
        frames: anim.len(),
    })?;
    for (idx, (frame, &delay)) in anim.frames.iter().zip(&anim.delays).enumerate() {
        sink.push_frame(idx, frame, delay)?;
    }
    sink.end()
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(IndexedFrame, u16)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames with their delays.
    pub fn frames(&self) -> &[(IndexedFrame, u16)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ScrappersResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &IndexedFrame, delay: u16) -> ScrappersResult<()> {
        if idx != self.frames.len() {
            return Err(ScrappersError::encode(format!(
                "frame {idx} pushed out of order, expected {}",
                self.frames.len()
            )));
        }
        self.frames.push((frame.clone(), delay));
        Ok(())
    }

    fn end(&mut self) -> ScrappersResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
