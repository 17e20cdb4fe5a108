//! Scrappers renders recorded matches of the Scrappers bot game into looping animated GIFs.
//!
//! - Load a [`Replay`] of ticks
//! - Draw each tick through an adaptive [`Viewport`] that keeps every bot on screen
//! - Quantize frames to the Plan 9 palette on a worker pool with [`render_animation`]
//! - Hand the finished [`Animation`] to an [`AnimationSink`] such as [`GifSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod quantize;
pub(crate) mod render;
pub(crate) mod replay;
pub(crate) mod viewport;

pub use crate::foundation::core::{BezPath, Canvas, Point, Rgba8, WorldPoint};
pub use crate::foundation::error::{ScrappersError, ScrappersResult};

pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{AnimationSink, InMemorySink, SinkConfig, write_animation};
pub use crate::pipeline::delays::frame_delays;
pub use crate::pipeline::{
    Animation, MAX_SIZE, RenderOpts, render_animation, render_animation_sequential,
    render_tick_frame,
};
pub use crate::quantize::dither::{IndexedFrame, quantize_frame};
pub use crate::quantize::palette::Plan9Palette;
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::plan::{DrawLayer, DrawOp, FramePlan, Paint, compile_tick};
pub use crate::replay::model::{Bot, Replay, Tick, WorldBounds};
pub use crate::viewport::policy::{RebuildReason, ViewportPolicy, ViewportTracker};
pub use crate::viewport::transform::Viewport;
