//! loopfx procedurally generates short, seamlessly-looping transparent clips (drifting lights,
//! rain, snow, fireflies, film grain) and exports them at several resolutions through `ffmpeg`.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: an [`EffectContext`] fixes resolution, duration, fps, speed, density and
//!    particle size range (all inputs are clamped, never rejected).
//! 2. **Synthesize**: a [`Renderer`] owns one effect instance plus a BGRA [`FrameBgra`] and
//!    produces frames strictly in order.
//! 3. **Seam**: [`SeamBlender`] crossfades the tail of the clip into its first frames so the last
//!    frame is bit-identical to frame `cross - 1`.
//! 4. **Encode**: frames flow into a [`FrameSink`], either streamed raw into the encoder's stdin
//!    ([`StreamingSink`]) or written as a PNG sequence followed by one encoder run
//!    ([`BatchSink`]).
//!
//! [`run_export`] ties the steps together for a whole [`ExportJob`], one independent renderer per
//! resolution.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod encode;
mod export;
mod foundation;
mod generator;
mod raster;
mod render;

pub use effects::context::EffectContext;
pub use effects::{EffectKind, StatePolicy};
pub use encode::batch::{BatchSink, frame_file_name};
pub use encode::ffmpeg::{EncoderOpts, StreamingSink, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::profile::{CodecProfile, EncoderInput, encoder_args};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use encode::still::{write_bgra_png, write_rgba_png};
pub use export::exporter::{
    ExportOutcome, output_file_name, render_loop, run_export, to_kebab_case,
};
pub use export::job::{DeliveryMode, ExportJob};
pub use export::seam::{SeamBlender, blend_toward, crossfade_len, tail_weight};
pub use foundation::core::{FrameIndex, Resolution, Rgba8};
pub use foundation::error::{LoopfxError, LoopfxResult};
pub use generator::Generator;
pub use raster::composite::{Background, blend_pixel, flatten_over_background, source_over};
pub use raster::frame::FrameBgra;
pub use raster::shapes::{draw_line, draw_quad_curve, fill_circle, fill_rect};
pub use render::renderer::{Renderer, RendererState};
