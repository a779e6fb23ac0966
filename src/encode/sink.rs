use std::path::PathBuf;

use crate::effects::program::EffectKind;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::surface::bitmap::BitmapSurface;

/// Configuration provided to a [`FrameSink`] at the start of a transition.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Transition surface size in pixels.
    pub size: SurfaceSize,
    /// Effect that is actually running (after fallback resolution).
    pub effect: EffectKind,
    /// Requested duration.
    pub duration_ms: i64,
}

/// Consumer of transition frames, e.g. for capture or debugging.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame numbers and
/// non-decreasing progress between one `begin` and its `end`.
pub trait FrameSink {
    /// Called once before the first frame of a transition.
    fn begin(&mut self, cfg: SinkConfig) -> ViewerResult<()>;
    /// Push one drawn frame.
    fn push_frame(&mut self, frame_no: u64, progress: f32, frame: &BitmapSurface)
    -> ViewerResult<()>;
    /// Called once after the last frame of a transition.
    fn end(&mut self) -> ViewerResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, f32, BitmapSurface)>,
    runs: usize,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration of the most recent transition, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Frames of the most recent transition, as `(frame number, progress, pixels)`.
    pub fn frames(&self) -> &[(u64, f32, BitmapSurface)] {
        &self.frames
    }

    /// Number of completed transitions seen.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ViewerResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame_no: u64,
        progress: f32,
        frame: &BitmapSurface,
    ) -> ViewerResult<()> {
        self.frames.push((frame_no, progress, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ViewerResult<()> {
        self.runs += 1;
        Ok(())
    }
}

/// Writes every frame as a PNG: `<dir>/<prefix>_<run>_<frame>.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    run: usize,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, which must exist.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            run: 0,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ViewerResult<()> {
        if !self.dir.is_dir() {
            return Err(ViewerError::validation(format!(
                "frame output directory '{}' does not exist",
                self.dir.display()
            )));
        }
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame_no: u64,
        _progress: f32,
        frame: &BitmapSurface,
    ) -> ViewerResult<()> {
        let path = self
            .dir
            .join(format!("{}_{:02}_{frame_no:04}.png", self.prefix, self.run));
        frame
            .to_rgba_image()?
            .save(&path)
            .map_err(|e| ViewerError::Other(anyhow::Error::new(e)))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ViewerResult<()> {
        self.run += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
