pub(crate) mod arena;
pub(crate) mod delays;

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::sync::{Arc, Mutex};

use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::pipeline::arena::FrameArena;
use crate::pipeline::delays::frame_delays;
use crate::quantize::dither::{IndexedFrame, quantize_frame};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::compile_tick;
use crate::replay::model::{Replay, Tick};
use crate::viewport::policy::{ViewportPolicy, ViewportTracker};

/// Largest raster edge the CPU rasterizer accepts.
pub const MAX_SIZE: u32 = u16::MAX as u32;

/// Options for [`render_animation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Edge length of the square output raster, in pixels.
    pub size: u32,
    /// Replay ticks shown per second of animation (1..=100).
    pub ticks_per_second: u32,
    /// Number of quantize workers.
    pub workers: usize,
    /// When to refit the world-to-raster mapping.
    pub policy: ViewportPolicy,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            size: 600,
            ticks_per_second: 12,
            workers: 8,
            policy: ViewportPolicy::default(),
        }
    }
}

impl RenderOpts {
    /// Reject options the pipeline cannot run with.
    pub fn validate(&self) -> ScrappersResult<()> {
        if self.size == 0 {
            return Err(ScrappersError::config("size must be > 0"));
        }
        if self.size > MAX_SIZE {
            return Err(ScrappersError::config(format!(
                "size must be <= {MAX_SIZE}, got {}",
                self.size
            )));
        }
        if !(1..=100).contains(&self.ticks_per_second) {
            return Err(ScrappersError::config(format!(
                "speed must be within 1..=100 ticks per second, got {}",
                self.ticks_per_second
            )));
        }
        if self.workers == 0 {
            return Err(ScrappersError::config("workers must be >= 1"));
        }
        Ok(())
    }
}

/// Quantized frames and their delays, both in tick order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animation {
    /// Edge length of every frame.
    pub size: u32,
    /// One palette-indexed frame per tick.
    pub frames: Vec<IndexedFrame>,
    /// Per-frame delay in hundredths of a second.
    pub delays: Vec<u16>,
}

impl Animation {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total play time of one loop, in hundredths of a second.
    pub fn duration_hundredths(&self) -> u64 {
        self.delays.iter().map(|&d| u64::from(d)).sum()
    }
}

struct QuantizeJob {
    index: usize,
    frame: FrameRGBA,
}

/// Draw every tick of `replay` and quantize the frames on `opts.workers` threads.
///
/// Ticks are drawn in order on the calling thread with `backend`. Each drawn frame is handed to
/// the next free worker; when every worker is busy the hand-off waits. Output order is tick order
/// regardless of which worker finishes first. No more workers are started than there are ticks.
#[tracing::instrument(skip_all, fields(ticks = replay.len(), size = opts.size, workers = opts.workers))]
pub fn render_animation(
    replay: &Replay,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
) -> ScrappersResult<Animation> {
    opts.validate()?;
    replay.validate()?;
    tracing::info!(ticks = replay.len(), "rendering replay");

    let workers = opts.workers.min(replay.len());
    let arena = FrameArena::new(replay.len());
    let (driven, worked) = std::thread::scope(|scope| {
        let (tx, rx) = sync_channel::<QuantizeJob>(0);
        let rx = Arc::new(Mutex::new(rx));
        let mut handles = Vec::with_capacity(workers);
        let mut spawned = Ok(());
        for id in 0..workers {
            let rx = Arc::clone(&rx);
            let arena = &arena;
            let handle = std::thread::Builder::new()
                .name(format!("scrappers-quantize-{id}"))
                .spawn_scoped(scope, move || quantize_worker(id, &rx, arena));
            match handle {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawned = Err(ScrappersError::render(format!(
                        "failed to spawn quantize worker {id}: {e}"
                    )));
                    break;
                }
            }
        }
        drop(rx);

        let driven = match spawned {
            Ok(()) => drive(replay, opts, backend, tx),
            Err(e) => {
                drop(tx);
                Err(e)
            }
        };

        let mut worked = Ok(());
        for handle in handles {
            let res = handle
                .join()
                .map_err(|_| ScrappersError::render("quantize worker panicked"))
                .and_then(|res| res);
            if worked.is_ok() {
                worked = res;
            }
        }
        (driven, worked)
    });
    worked?;
    driven?;

    let frames = arena.into_frames()?;
    let delays = frame_delays(frames.len(), opts.ticks_per_second);
    tracing::info!(frames = frames.len(), "replay rendered");
    Ok(Animation {
        size: opts.size,
        frames,
        delays,
    })
}

/// Single-threaded reference for [`render_animation`]: draw and quantize each tick in turn.
#[tracing::instrument(skip_all, fields(ticks = replay.len(), size = opts.size))]
pub fn render_animation_sequential(
    replay: &Replay,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
) -> ScrappersResult<Animation> {
    opts.validate()?;
    replay.validate()?;

    let mut tracker = ViewportTracker::new(opts.policy, opts.size);
    let frames = replay
        .ticks
        .iter()
        .map(|tick| quantize_frame(draw_tick(&mut tracker, tick, backend)?))
        .collect::<ScrappersResult<Vec<_>>>()?;
    let delays = frame_delays(frames.len(), opts.ticks_per_second);
    Ok(Animation {
        size: opts.size,
        frames,
        delays,
    })
}

/// Full-color frame of tick `index`, drawn with the viewport the animation would use there.
pub fn render_tick_frame(
    replay: &Replay,
    index: usize,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
) -> ScrappersResult<FrameRGBA> {
    opts.validate()?;
    replay.validate()?;
    let Some((last, earlier)) = replay.ticks.get(..=index).and_then(|t| t.split_last()) else {
        return Err(ScrappersError::config(format!(
            "tick index {index} is out of range for a replay of {} ticks",
            replay.len()
        )));
    };

    let mut tracker = ViewportTracker::new(opts.policy, opts.size);
    for tick in earlier {
        tracker.advance(tick)?;
    }
    draw_tick(&mut tracker, last, backend)
}

fn draw_tick(
    tracker: &mut ViewportTracker,
    tick: &Tick,
    backend: &mut dyn RenderBackend,
) -> ScrappersResult<FrameRGBA> {
    let (viewport, _) = tracker.advance(tick)?;
    let plan = compile_tick(tick, &viewport)?;
    backend.render_plan(&plan)
}

// `tx` is consumed so the queue closes on every exit path, including errors.
fn drive(
    replay: &Replay,
    opts: &RenderOpts,
    backend: &mut dyn RenderBackend,
    tx: SyncSender<QuantizeJob>,
) -> ScrappersResult<()> {
    let mut tracker = ViewportTracker::new(opts.policy, opts.size);
    let mut progress = Progress::new(replay.len());
    for (index, tick) in replay.ticks.iter().enumerate() {
        let frame = draw_tick(&mut tracker, tick, backend)?;
        tx.send(QuantizeJob { index, frame }).map_err(|_| {
            ScrappersError::render(format!(
                "no quantize worker left to take tick {}",
                tick.number
            ))
        })?;
        progress.published(index);
    }
    Ok(())
}

fn quantize_worker(
    id: usize,
    rx: &Mutex<Receiver<QuantizeJob>>,
    arena: &FrameArena,
) -> ScrappersResult<()> {
    tracing::debug!(worker = id, "quantize worker started");
    let mut done = 0usize;
    loop {
        let job = {
            let rx = rx
                .lock()
                .map_err(|_| ScrappersError::render("quantize queue lock poisoned"))?;
            rx.recv()
        };
        let Ok(QuantizeJob { index, frame }) = job else {
            break;
        };
        arena.store(index, quantize_frame(frame)?)?;
        done += 1;
    }
    tracing::debug!(worker = id, frames = done, "quantize worker stopped");
    Ok(())
}

/// Logs completion once per 10% step.
struct Progress {
    total: usize,
    last_step: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            last_step: 0,
        }
    }

    fn published(&mut self, index: usize) {
        let Some(percent) = ((index + 1) * 100).checked_div(self.total) else {
            return;
        };
        let step = percent / 10;
        if step > self.last_step {
            self.last_step = step;
            tracing::info!(percent, "progress");
        }
    }
}
