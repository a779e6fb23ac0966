use std::collections::HashMap;

use crate::effects::program::{EffectKind, TransitionDescriptor, Uniforms};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::foundation::math::progress;
use crate::render::device::{GraphicsDevice, ProgramId, TextureId};
use crate::render::scheduler::FrameScheduler;
use crate::surface::bitmap::BitmapSurface;

/// Stand-in for a device that failed to initialize.
struct NullDevice;

impl GraphicsDevice for NullDevice {
    fn size(&self) -> Option<SurfaceSize> {
        None
    }

    fn resize(&mut self, _size: SurfaceSize) -> ViewerResult<()> {
        Err(ViewerError::graphics_init("no graphics device"))
    }

    fn compile_program(&mut self, _kind: &EffectKind) -> ViewerResult<(ProgramId, EffectKind)> {
        Err(ViewerError::graphics_init("no graphics device"))
    }

    fn upload_texture(&mut self, _bitmap: &BitmapSurface) -> ViewerResult<TextureId> {
        Err(ViewerError::graphics_init("no graphics device"))
    }

    fn release_texture(&mut self, _id: TextureId) {}

    fn live_textures(&self) -> usize {
        0
    }

    fn draw(
        &mut self,
        _program: ProgramId,
        _from: TextureId,
        _to: TextureId,
        _uniforms: &Uniforms,
    ) -> ViewerResult<()> {
        Err(ViewerError::graphics_init("no graphics device"))
    }

    fn read_pixels(&self, _scale: f32) -> ViewerResult<BitmapSurface> {
        Err(ViewerError::graphics_init("no graphics device"))
    }
}

/// Whether the engine is currently animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No transition running.
    Idle,
    /// A transition is running.
    Transitioning,
}

/// How a transition run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionOutcome {
    /// The animation reached progress 1.
    Completed,
    /// No (or only a partial) animation was shown. The caller should still commit the page.
    Skipped {
        /// Why the animation was skipped.
        reason: String,
    },
}

/// Result of [`TransitionEngine::run_transition`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionReport {
    /// Effect that ran after fallback resolution, `None` when nothing ran.
    pub effect: Option<EffectKind>,
    /// Frames drawn.
    pub frames: u64,
    /// Progress of the last drawn frame.
    pub final_progress: f32,
    /// How the run ended.
    pub outcome: TransitionOutcome,
}

impl TransitionReport {
    fn skipped(reason: impl Into<String>) -> Self {
        Self {
            effect: None,
            frames: 0,
            final_progress: 0.0,
            outcome: TransitionOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    /// `true` when the animation ran to completion.
    pub fn completed(&self) -> bool {
        self.outcome == TransitionOutcome::Completed
    }
}

/// Owns the graphics device of the transition surface and animates between two bitmaps.
pub struct TransitionEngine {
    device: Box<dyn GraphicsDevice>,
    programs: HashMap<EffectKind, (ProgramId, EffectKind)>,
    disabled: Option<String>,
    state: EngineState,
    sink: Option<Box<dyn FrameSink>>,
}

impl std::fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("size", &self.device.size())
            .field("programs", &self.programs.len())
            .field("disabled", &self.disabled)
            .field("state", &self.state)
            .finish()
    }
}

impl TransitionEngine {
    /// Wrap a device.
    pub fn new(device: Box<dyn GraphicsDevice>) -> Self {
        Self {
            device,
            programs: HashMap::new(),
            disabled: None,
            state: EngineState::Idle,
            sink: None,
        }
    }

    /// An engine whose device could not be created. Every run is skipped.
    pub fn unavailable(err: &ViewerError) -> Self {
        let mut e = Self::new(Box::new(NullDevice));
        e.disable(err.to_string());
        e
    }

    /// `false` once a graphics init failure disabled transitions for the session.
    pub fn is_enabled(&self) -> bool {
        self.disabled.is_none()
    }

    /// Reason transitions were disabled, if they were.
    pub fn disabled_reason(&self) -> Option<&str> {
        self.disabled.as_deref()
    }

    /// Current engine state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Borrow the device.
    pub fn device(&self) -> &dyn GraphicsDevice {
        self.device.as_ref()
    }

    /// Attach a sink receiving every drawn frame.
    pub fn set_frame_sink(&mut self, sink: Option<Box<dyn FrameSink>>) {
        self.sink = sink;
    }

    /// Detach and return the frame sink.
    pub fn take_frame_sink(&mut self) -> Option<Box<dyn FrameSink>> {
        self.sink.take()
    }

    /// Resize the transition surface. Must be called when the incoming page size changes.
    pub fn resize(&mut self, size: SurfaceSize) -> ViewerResult<()> {
        self.device.resize(size)
    }

    fn disable(&mut self, reason: String) {
        tracing::warn!(%reason, "disabling page transitions for this session");
        self.disabled = Some(reason);
    }

    fn program_for(&mut self, kind: &EffectKind) -> ViewerResult<(ProgramId, EffectKind)> {
        if let Some(p) = self.programs.get(kind) {
            return Ok(p.clone());
        }
        let compiled = self.device.compile_program(kind)?;
        self.programs.insert(kind.clone(), compiled.clone());
        Ok(compiled)
    }

    /// Animate from `from` to `to`.
    ///
    /// Never fails: internal errors end the run early with [`TransitionOutcome::Skipped`] so the
    /// caller can still commit the incoming page. A graphics init failure additionally disables
    /// all further transitions. Durations of zero or less draw a single frame at progress 1
    /// without waiting for the scheduler.
    #[tracing::instrument(
        skip_all,
        fields(effect = %desc.kind, duration_ms = desc.duration_ms)
    )]
    pub async fn run_transition<S: FrameScheduler>(
        &mut self,
        from: &BitmapSurface,
        to: &BitmapSurface,
        desc: &TransitionDescriptor,
        scheduler: &mut S,
    ) -> TransitionReport {
        if let Some(reason) = &self.disabled {
            return TransitionReport::skipped(format!("transitions disabled: {reason}"));
        }
        self.state = EngineState::Transitioning;
        let report = self.animate(from, to, desc, scheduler).await;
        self.state = EngineState::Idle;
        tracing::debug!(frames = report.frames, outcome = ?report.outcome, "transition finished");
        report
    }

    async fn animate<S: FrameScheduler>(
        &mut self,
        from: &BitmapSurface,
        to: &BitmapSurface,
        desc: &TransitionDescriptor,
        scheduler: &mut S,
    ) -> TransitionReport {
        let Some(resolution) = self.device.size() else {
            return TransitionReport::skipped("transition surface was never sized");
        };

        let (program, effect) = match self.program_for(&desc.kind) {
            Ok(p) => p,
            Err(err) => {
                if err.is_graphics_init() {
                    self.disable(err.to_string());
                }
                return TransitionReport::skipped(err.to_string());
            }
        };

        let (tex_from, tex_to) = match self.upload_pair(from, to) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(error = %err, "texture upload failed, skipping animation");
                return TransitionReport::skipped(err.to_string());
            }
        };

        let mut sink_ok = self.begin_sink(SinkConfig {
            size: resolution,
            effect: effect.clone(),
            duration_ms: desc.duration_ms,
        });

        let mut frames = 0u64;
        let mut start: Option<f64> = None;
        let mut last = 0.0f32;
        let result = loop {
            let p = if desc.duration_ms <= 0 {
                1.0
            } else {
                let now = scheduler.next_frame().await;
                let t0 = *start.get_or_insert(now);
                progress(now - t0, desc.duration_ms)
            };

            let uniforms = Uniforms {
                progress: p,
                direction: desc.direction.sign(),
                soft_edge: desc.soft_edge,
                resolution,
            };
            if let Err(err) = self.device.draw(program, tex_from, tex_to, &uniforms) {
                break Err(err);
            }
            if sink_ok {
                sink_ok = self.push_sink_frame(frames, p, to.scale());
            }
            frames += 1;
            last = p;

            if p >= 1.0 {
                break Ok(());
            }
        };

        self.device.release_texture(tex_from);
        self.device.release_texture(tex_to);
        if sink_ok && let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.end() {
                tracing::warn!(error = %err, "frame sink failed to finish");
            }
        }

        match result {
            Ok(()) => TransitionReport {
                effect: Some(effect),
                frames,
                final_progress: last,
                outcome: TransitionOutcome::Completed,
            },
            Err(err) => {
                tracing::warn!(error = %err, frames, "draw failed, abandoning animation");
                TransitionReport {
                    effect: Some(effect),
                    frames,
                    final_progress: last,
                    outcome: TransitionOutcome::Skipped {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    fn upload_pair(
        &mut self,
        from: &BitmapSurface,
        to: &BitmapSurface,
    ) -> ViewerResult<(TextureId, TextureId)> {
        let a = self.device.upload_texture(from)?;
        match self.device.upload_texture(to) {
            Ok(b) => Ok((a, b)),
            Err(err) => {
                self.device.release_texture(a);
                Err(err)
            }
        }
    }

    fn begin_sink(&mut self, cfg: SinkConfig) -> bool {
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };
        match sink.begin(cfg) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "frame sink rejected transition");
                false
            }
        }
    }

    fn push_sink_frame(&mut self, frame_no: u64, p: f32, scale: f32) -> bool {
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };
        let pushed = self
            .device
            .read_pixels(scale)
            .and_then(|frame| sink.push_frame(frame_no, p, &frame));
        match pushed {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "frame capture failed, detaching for this run");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/engine.rs"]
mod tests;
