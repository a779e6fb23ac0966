//! pageflip renders animated page transitions for a paged document viewer.
//!
//! The public API is session-oriented:
//!
//! - Load a document through a [`Rasterizer`] (for example [`SvgDocument`])
//! - Create a [`ViewerSession`] with a graphics device and a [`FrameScheduler`]
//! - Call [`ViewerSession::navigate`] to change pages with a [`TransitionEngine`] animation,
//!   while [`ViewerSession::run_prefetcher`] keeps neighbouring pages warm in a [`PageCache`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Options loaded from JSON.
pub mod config;
/// Documents and rasterization.
pub mod document;
/// Transition effect programs.
pub mod effects;
/// Frame sinks.
pub mod encode;
/// Shared types and errors.
pub mod foundation;
/// Graphics devices and frame scheduling.
pub mod render;
/// Page bitmaps.
pub mod surface;
/// Transition engine.
pub mod transition;
/// Viewer orchestration.
pub mod viewer;

pub use crate::config::{TransitionOpts, ViewerOpts};
pub use crate::document::source::{DocumentInfo, DocumentSource, RasterScale, Rasterizer};
pub use crate::document::svg::SvgDocument;
pub use crate::effects::program::{
    Direction, EffectKind, FragmentProgram, TextureView, TransitionDescriptor, Uniforms,
};
pub use crate::effects::registry::EffectRegistry;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::foundation::core::{LogicalSize, PageCount, PageIndex, SurfaceSize};
pub use crate::foundation::error::{ViewerError, ViewerResult};
pub use crate::render::cpu::CpuDevice;
pub use crate::render::device::{DeviceKind, DeviceSettings, GraphicsDevice, create_device};
pub use crate::render::scheduler::{FrameScheduler, IntervalScheduler, ManualScheduler};
pub use crate::surface::bitmap::{BitmapSurface, PremulRgba8};
pub use crate::transition::engine::{
    EngineState, TransitionEngine, TransitionOutcome, TransitionReport,
};
pub use crate::viewer::cache::PageCache;
pub use crate::viewer::display::{DisplaySurfaces, Visible};
pub use crate::viewer::prefetch::{PrefetchOutcome, Prefetcher};
pub use crate::viewer::session::{NavOutcome, Phase, ViewerSession};
