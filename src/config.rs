use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::document::source::RasterScale;
use crate::effects::program::{Direction, EffectKind, TransitionDescriptor};
use crate::foundation::error::{ViewerError, ViewerResult};

/// Transition configuration, settable before any navigation request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionOpts {
    /// Effect name: `fade`, `slide`, `zoom` or a registered custom effect.
    pub effect: String,
    /// Duration in milliseconds. Zero or negative disables the animation.
    pub duration_ms: i64,
    /// Soft edge for wipe-like effects, fraction of the surface width.
    pub soft_edge: f32,
}

impl Default for TransitionOpts {
    fn default() -> Self {
        Self {
            effect: "fade".to_string(),
            duration_ms: 400,
            soft_edge: 0.0,
        }
    }
}

impl TransitionOpts {
    /// Descriptor for a run in `direction`.
    pub fn descriptor(&self, direction: Direction) -> TransitionDescriptor {
        TransitionDescriptor {
            kind: EffectKind::parse(&self.effect),
            duration_ms: self.duration_ms,
            direction,
            soft_edge: self.soft_edge.clamp(0.0, 1.0),
        }
    }

    /// Reject malformed values.
    pub fn validate(&self) -> ViewerResult<()> {
        if self.effect.trim().is_empty() {
            return Err(ViewerError::validation("transition effect must be non-empty"));
        }
        if !self.soft_edge.is_finite() {
            return Err(ViewerError::validation("transition soft_edge must be finite"));
        }
        Ok(())
    }
}

/// Viewer session configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerOpts {
    /// Document zoom.
    pub render_scale: f32,
    /// Physical pixels per logical unit of the display.
    pub device_pixel_ratio: f32,
    /// Host refresh rate used by the interval frame scheduler.
    pub refresh_hz: u32,
    /// Rasterize neighbours of the current page in the background.
    pub prefetch: bool,
    /// Page transition settings.
    pub transition: TransitionOpts,
    /// Optional premultiplied backdrop color behind transition frames.
    pub backdrop_rgba: Option<[u8; 4]>,
}

impl Default for ViewerOpts {
    fn default() -> Self {
        Self {
            render_scale: 1.0,
            device_pixel_ratio: 1.0,
            refresh_hz: 60,
            prefetch: true,
            transition: TransitionOpts::default(),
            backdrop_rgba: None,
        }
    }
}

impl ViewerOpts {
    /// Parse and validate options from JSON text.
    pub fn from_json_str(s: &str) -> ViewerResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| ViewerError::serde(format!("parse viewer options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load and validate options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ViewerError::validation(format!("open viewer options '{}': {e}", path.display()))
        })?;
        let opts: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ViewerError::serde(format!("parse viewer options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Scale pages are rasterized at.
    pub fn raster_scale(&self) -> RasterScale {
        RasterScale {
            zoom: self.render_scale,
            device_pixel_ratio: self.device_pixel_ratio,
        }
    }

    /// Reject malformed values.
    pub fn validate(&self) -> ViewerResult<()> {
        self.raster_scale().validate()?;
        if self.refresh_hz == 0 {
            return Err(ViewerError::validation("refresh_hz must be > 0"));
        }
        self.transition.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/opts.rs"]
mod tests;
