use std::path::PathBuf;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::effects::EffectKind;
use crate::effects::context::EffectContext;
use crate::encode::batch::BatchSink;
use crate::encode::ffmpeg::{EncoderOpts, StreamingSink};
use crate::encode::profile::CodecProfile;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::export::job::{DeliveryMode, ExportJob};
use crate::export::seam::SeamBlender;
use crate::foundation::core::{FrameIndex, Resolution};
use crate::foundation::error::{LoopfxError, LoopfxResult};
use crate::render::renderer::Renderer;

/// Result of exporting one resolution.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Target size.
    pub resolution: Resolution,
    /// Video path that was (or would have been) written.
    pub out_path: PathBuf,
    /// Frames emitted on success, or the single terminal failure.
    pub result: LoopfxResult<u64>,
}

impl ExportOutcome {
    /// `true` when the video was written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Render one full loop of `effect` with the seam applied and push it through `sink`.
///
/// A fresh [`Renderer`] is built for the call; returns the number of frames emitted.
pub fn render_loop(
    ctx: &EffectContext,
    effect: &str,
    sink: &mut dyn FrameSink,
) -> LoopfxResult<u64> {
    let mut renderer = Renderer::new(ctx.clone());
    renderer.set_effect(effect);
    renderer.setup();

    let total = ctx.total_frames();
    let mut seam = SeamBlender::new(total, ctx.fps());
    sink.begin(SinkConfig {
        width: ctx.width(),
        height: ctx.height(),
        fps: ctx.fps(),
    })?;
    for i in 0..total {
        renderer.render_next_frame();
        let out = seam.process(i, &renderer.frame().data)?;
        sink.push_frame(FrameIndex(i), out)?;
    }
    sink.end()?;
    Ok(total)
}

/// Export every resolution of `job`, each with its own renderer, effect and sink.
///
/// One resolution failing does not stop the others; per-resolution results come back in
/// `job.resolutions` order. Only job-level problems (invalid job, unusable output directory,
/// thread pool) fail the whole call.
#[tracing::instrument(skip(job), fields(effect = %job.effect, mode = %job.mode, codec = %job.codec))]
pub fn run_export(job: &ExportJob) -> LoopfxResult<Vec<ExportOutcome>> {
    job.validate()?;
    let kind = job.effect_kind();
    if EffectKind::lookup(&job.effect).is_none() {
        tracing::warn!(requested = %job.effect, "unknown effect, exporting golden-lights");
    }
    std::fs::create_dir_all(&job.out_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            job.out_dir.display()
        )
    })?;

    let outcomes: Vec<ExportOutcome> = if job.parallel && job.resolutions.len() > 1 {
        let pool = build_thread_pool(job.threads)?;
        pool.install(|| {
            job.resolutions
                .par_iter()
                .map(|&res| export_one(job, res))
                .collect()
        })
    } else {
        job.resolutions
            .iter()
            .map(|&res| export_one(job, res))
            .collect()
    };

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    tracing::info!(
        effect = kind.name(),
        exported = outcomes.len() - failed,
        failed,
        "export finished"
    );
    Ok(outcomes)
}

fn export_one(job: &ExportJob, res: Resolution) -> ExportOutcome {
    let out_path = job.output_path(res);
    let ctx = job.context_for(res);
    tracing::info!(resolution = %res, out = %out_path.display(), "exporting");

    let mut opts = EncoderOpts::new(&out_path, job.codec).with_program(&job.encoder);
    if job.save_logs {
        opts = opts.with_saved_log();
    }
    let result = match job.mode {
        DeliveryMode::Streaming => render_loop(&ctx, &job.effect, &mut StreamingSink::new(opts)),
        DeliveryMode::Batch => {
            let mut sink = BatchSink::new(opts).with_pattern(job.frame_pattern.clone());
            if let Some(root) = &job.temp_root {
                sink = sink.with_temp_root(root);
            }
            render_loop(&ctx, &job.effect, &mut sink)
        }
    };

    match &result {
        Ok(frames) => tracing::info!(resolution = %res, frames, "export ok"),
        Err(err) => tracing::error!(resolution = %res, error = %err, "export failed"),
    }
    ExportOutcome {
        resolution: res,
        out_path,
        result,
    }
}

fn build_thread_pool(threads: Option<usize>) -> LoopfxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LoopfxError::validation(
            "export threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LoopfxError::encode(format!("failed to build rayon thread pool: {e}")))
}

/// `<kebab-case effect title>-<W>x<H>.<ext>`.
pub fn output_file_name(kind: EffectKind, res: Resolution, profile: CodecProfile) -> String {
    format!(
        "{}-{res}.{}",
        to_kebab_case(kind.title()),
        profile.extension()
    )
}

/// Lowercase ASCII alphanumerics; every other run of characters becomes one `-`.
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut gap = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
