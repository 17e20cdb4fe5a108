use std::sync::OnceLock;

use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::quantize::dither::IndexedFrame;

/// Pre-sized storage for quantized frames, one write-once slot per tick.
///
/// Workers fill slots in whatever order they finish; readers collect them by slot index.
#[derive(Debug)]
pub(crate) struct FrameArena {
    slots: Vec<OnceLock<IndexedFrame>>,
}

impl FrameArena {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Fill slot `index`. A slot accepts exactly one frame.
    pub(crate) fn store(&self, index: usize, frame: IndexedFrame) -> ScrappersResult<()> {
        let slot = self.slots.get(index).ok_or_else(|| {
            ScrappersError::render(format!(
                "frame slot {index} is out of range for {} slots",
                self.slots.len()
            ))
        })?;
        slot.set(frame)
            .map_err(|_| ScrappersError::render(format!("frame slot {index} was written twice")))
    }

    /// Take every frame in slot order. Fails if any slot is still empty.
    pub(crate) fn into_frames(self) -> ScrappersResult<Vec<IndexedFrame>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.into_inner().ok_or_else(|| {
                    ScrappersError::render(format!("frame slot {index} was never filled"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/arena.rs"]
mod tests;
