/// Hold time of the first frame, in hundredths of a second.
pub const FIRST_FRAME_DELAY: u16 = 100;

/// Multiplier applied to the regular delay for the last frame.
pub const LAST_FRAME_HOLD: u16 = 10;

/// Per-frame delays in hundredths of a second for `frames` ticks played at `ticks_per_second`.
///
/// Every frame gets `100 / ticks_per_second`. The first frame is then held for one second and the
/// last for ten regular delays. With a single frame the last-frame hold wins.
pub fn frame_delays(frames: usize, ticks_per_second: u32) -> Vec<u16> {
    let tps = u16::try_from(ticks_per_second.clamp(1, 100)).unwrap_or(100);
    let regular = 100 / tps;

    let mut delays = vec![regular; frames];
    if let Some(first) = delays.first_mut() {
        *first = FIRST_FRAME_DELAY;
    }
    if let Some(last) = delays.last_mut() {
        *last = regular * LAST_FRAME_HOLD;
    }
    delays
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/delays.rs"]
mod tests;
