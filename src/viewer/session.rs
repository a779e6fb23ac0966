use std::cell::{Cell, RefCell};

use tokio::sync::Notify;

use crate::config::{TransitionOpts, ViewerOpts};
use crate::document::source::{RasterScale, Rasterizer};
use crate::effects::program::Direction;
use crate::encode::sink::FrameSink;
use crate::foundation::core::{PageCount, PageIndex};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::render::device::{DeviceKind, DeviceSettings, create_device};
use crate::render::scheduler::FrameScheduler;
use crate::surface::bitmap::BitmapSurface;
use crate::transition::engine::{TransitionEngine, TransitionReport};
use crate::viewer::cache::PageCache;
use crate::viewer::display::DisplaySurfaces;
use crate::viewer::prefetch::{PrefetchOutcome, Prefetcher};

/// Step of a page change. Anything other than `Idle` rejects new requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Ready for a request.
    Idle,
    /// Copying the displayed page.
    Capturing,
    /// Looking up or rasterizing the destination page.
    Resolving,
    /// The engine is animating.
    Transitioning,
    /// Copying the destination page to the plain surface.
    Committing,
}

/// What a navigation request did.
#[derive(Debug)]
pub enum NavOutcome {
    /// The page was changed through the transition engine. The report says whether the
    /// animation actually ran.
    Transitioned(TransitionReport),
    /// The page was shown without animation.
    Direct {
        /// Why no transition ran.
        reason: String,
    },
    /// The requested page was already displayed.
    Unchanged,
    /// Another page change was in progress; the request was dropped.
    Ignored,
    /// The destination page could not be rasterized. The previous page stays displayed.
    Failed(ViewerError),
}

impl NavOutcome {
    /// `true` when the displayed page now matches the request.
    pub fn landed(&self) -> bool {
        matches!(self, Self::Transitioned(_) | Self::Direct { .. } | Self::Unchanged)
    }
}

/// Holds the phase for the duration of one request and returns it to `Idle` on drop, including
/// when the request future is dropped midway.
struct PhaseGuard<'a>(&'a Cell<Phase>);

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a Cell<Phase>) -> Option<Self> {
        if phase.get() != Phase::Idle {
            return None;
        }
        phase.set(Phase::Capturing);
        Some(Self(phase))
    }

    fn advance(&self, next: Phase) {
        tracing::trace!(from = ?self.0.get(), to = ?next, "phase");
        self.0.set(next);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.0.set(Phase::Idle);
    }
}

/// One viewer instance: orchestrates page changes across the rasterizer, the page cache, the
/// transition engine and the display surfaces.
///
/// All methods take `&self` and run on a single-threaded loop. Only one page change runs at a
/// time; requests arriving while one is in progress are dropped, not queued. Background
/// prefetching is driven by [`ViewerSession::run_prefetcher`], which the host runs alongside its
/// input handling.
pub struct ViewerSession<R: Rasterizer, S: FrameScheduler> {
    rasterizer: R,
    scale: RasterScale,
    engine: RefCell<TransitionEngine>,
    scheduler: RefCell<S>,
    cache: RefCell<PageCache>,
    prefetcher: Prefetcher,
    prefetch_enabled: bool,
    prefetch_signal: Notify,
    display: RefCell<DisplaySurfaces>,
    current: Cell<Option<PageIndex>>,
    phase: Cell<Phase>,
    transitions_enabled: Cell<bool>,
    transition: RefCell<TransitionOpts>,
}

impl<R: Rasterizer, S: FrameScheduler> std::fmt::Debug for ViewerSession<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerSession")
            .field("current", &self.current.get())
            .field("phase", &self.phase.get())
            .field("scale", &self.scale)
            .field("transitions_enabled", &self.transitions_enabled.get())
            .finish_non_exhaustive()
    }
}

impl<R: Rasterizer, S: FrameScheduler> ViewerSession<R, S> {
    /// Build a session around an existing engine.
    pub fn new(
        rasterizer: R,
        engine: TransitionEngine,
        scheduler: S,
        opts: &ViewerOpts,
    ) -> ViewerResult<Self> {
        opts.validate()?;
        tracing::info!(
            pages = rasterizer.page_count().get(),
            scale = opts.raster_scale().effective(),
            effect = %opts.transition.effect,
            "viewer session created"
        );
        Ok(Self {
            rasterizer,
            scale: opts.raster_scale(),
            transitions_enabled: Cell::new(engine.is_enabled()),
            engine: RefCell::new(engine),
            scheduler: RefCell::new(scheduler),
            cache: RefCell::new(PageCache::default()),
            prefetcher: Prefetcher::new(),
            prefetch_enabled: opts.prefetch,
            prefetch_signal: Notify::new(),
            display: RefCell::new(DisplaySurfaces::default()),
            current: Cell::new(None),
            phase: Cell::new(Phase::Idle),
            transition: RefCell::new(opts.transition.clone()),
        })
    }

    /// Build a session with a device of `kind`. A device that fails to initialize leaves the
    /// session working with plain page swaps.
    pub fn with_device(
        rasterizer: R,
        kind: DeviceKind,
        scheduler: S,
        opts: &ViewerOpts,
    ) -> ViewerResult<Self> {
        let settings = DeviceSettings {
            clear_rgba: opts.backdrop_rgba,
            ..Default::default()
        };
        let engine = match create_device(kind, settings) {
            Ok(device) => TransitionEngine::new(device),
            Err(err) => TransitionEngine::unavailable(&err),
        };
        Self::new(rasterizer, engine, scheduler, opts)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Page currently displayed, `None` before the first page was shown.
    pub fn current_page(&self) -> Option<PageIndex> {
        self.current.get()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> PageCount {
        self.rasterizer.page_count()
    }

    /// Scale pages are rasterized at.
    pub fn raster_scale(&self) -> RasterScale {
        self.scale
    }

    /// `false` once the graphics device failed; navigation keeps working without animation.
    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled.get()
    }

    /// Inspect the display surfaces.
    pub fn with_display<T>(&self, f: impl FnOnce(&DisplaySurfaces) -> T) -> T {
        f(&self.display.borrow())
    }

    /// Copy of the committed page.
    pub fn displayed_bitmap(&self) -> Option<BitmapSurface> {
        self.display.borrow().snapshot()
    }

    /// Pages currently held by the page cache, ascending.
    pub fn cache_keys(&self) -> Vec<PageIndex> {
        self.cache.borrow().keys()
    }

    /// Transition settings used by the next navigation.
    pub fn transition_opts(&self) -> TransitionOpts {
        self.transition.borrow().clone()
    }

    /// Replace the transition settings. Takes effect on the next accepted request.
    pub fn set_transition(&self, opts: TransitionOpts) -> ViewerResult<()> {
        opts.validate()?;
        *self.transition.borrow_mut() = opts;
        Ok(())
    }

    /// Attach (or detach with `None`) a sink receiving every transition frame.
    pub fn set_frame_sink(&self, sink: Option<Box<dyn FrameSink>>) -> ViewerResult<()> {
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|_| ViewerError::validation("cannot change frame sink during a transition"))?;
        engine.set_frame_sink(sink);
        Ok(())
    }

    /// Detach the frame sink. `None` while a transition runs or when no sink is attached.
    pub fn take_frame_sink(&self) -> Option<Box<dyn FrameSink>> {
        self.engine.try_borrow_mut().ok()?.take_frame_sink()
    }

    /// The document this session displays.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Navigate to the page after the current one.
    pub async fn next_page(&self) -> ViewerResult<NavOutcome> {
        match self.current.get() {
            None => self.navigate(PageIndex::FIRST).await,
            Some(cur) => match cur.next_within(self.page_count()) {
                Some(next) => self.navigate(next).await,
                None => Ok(NavOutcome::Unchanged),
            },
        }
    }

    /// Navigate to the page before the current one.
    pub async fn prev_page(&self) -> ViewerResult<NavOutcome> {
        match self.current.get().and_then(PageIndex::prev) {
            Some(prev) => self.navigate(prev).await,
            None => Ok(NavOutcome::Unchanged),
        }
    }

    /// Change the displayed page to `target` with a transition.
    ///
    /// Out-of-range pages are a validation error. Requests made while another page change is
    /// in progress return [`NavOutcome::Ignored`]. Everything else is reported through the
    /// outcome: if the animation cannot run the page is shown directly, and if the page cannot
    /// be rasterized the previous page stays up.
    #[tracing::instrument(skip(self), fields(target = target.get()))]
    pub async fn navigate(&self, target: PageIndex) -> ViewerResult<NavOutcome> {
        let target = target.checked_in(self.page_count())?;
        let Some(guard) = PhaseGuard::enter(&self.phase) else {
            tracing::debug!("page change in progress, request dropped");
            return Ok(NavOutcome::Ignored);
        };
        if self.current.get() == Some(target) {
            return Ok(NavOutcome::Unchanged);
        }

        let snapshot = self.display.borrow().snapshot();
        let outcome = match (self.current.get(), snapshot) {
            (Some(current), Some(from)) => {
                self.transition_to(current, target, from, &guard).await
            }
            _ => self.show_direct(target, "no page displayed yet", &guard).await,
        };
        drop(guard);

        self.request_prefetch();
        Ok(outcome)
    }

    /// Change the displayed page to `target` without animation.
    #[tracing::instrument(skip(self), fields(target = target.get()))]
    pub async fn show_page(&self, target: PageIndex) -> ViewerResult<NavOutcome> {
        let target = target.checked_in(self.page_count())?;
        let Some(guard) = PhaseGuard::enter(&self.phase) else {
            tracing::debug!("page change in progress, request dropped");
            return Ok(NavOutcome::Ignored);
        };
        let outcome = self.show_direct(target, "direct display requested", &guard).await;
        drop(guard);

        self.request_prefetch();
        Ok(outcome)
    }

    async fn transition_to(
        &self,
        current: PageIndex,
        target: PageIndex,
        from: BitmapSurface,
        guard: &PhaseGuard<'_>,
    ) -> NavOutcome {
        guard.advance(Phase::Resolving);
        let to = match self.resolve(target).await {
            Ok(to) => to,
            Err(err) => {
                tracing::warn!(error = %err, "destination page unavailable, retrying without animation");
                return self.show_direct(target, &err.to_string(), guard).await;
            }
        };

        guard.advance(Phase::Transitioning);
        let desc = self
            .transition
            .borrow()
            .descriptor(Direction::from_delta(current.distance_to(target)));

        let report = {
            // Only the request holding the phase guard touches the engine and the scheduler.
            let mut engine = self.engine.borrow_mut();
            if let Err(err) = engine.resize(to.size()) {
                drop(engine);
                tracing::warn!(error = %err, "transition surface resize failed");
                guard.advance(Phase::Committing);
                self.commit(target, to);
                return NavOutcome::Direct {
                    reason: err.to_string(),
                };
            }
            self.display.borrow_mut().show_transition(&to);
            let mut scheduler = self.scheduler.borrow_mut();
            #[allow(clippy::await_holding_refcell_ref)]
            let report = engine
                .run_transition(&from, &to, &desc, &mut *scheduler)
                .await;
            self.transitions_enabled.set(engine.is_enabled());
            report
        };

        guard.advance(Phase::Committing);
        self.commit(target, to);
        NavOutcome::Transitioned(report)
    }

    async fn show_direct(
        &self,
        target: PageIndex,
        reason: &str,
        guard: &PhaseGuard<'_>,
    ) -> NavOutcome {
        guard.advance(Phase::Resolving);
        match self.resolve(target).await {
            Ok(bitmap) => {
                guard.advance(Phase::Committing);
                self.commit(target, bitmap);
                NavOutcome::Direct {
                    reason: reason.to_string(),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "page could not be displayed");
                self.display.borrow_mut().show_plain();
                NavOutcome::Failed(err)
            }
        }
    }

    async fn resolve(&self, page: PageIndex) -> ViewerResult<BitmapSurface> {
        let hit = self.cache.borrow().get(page).cloned();
        if let Some(bitmap) = hit {
            tracing::debug!(page = page.get(), "page cache hit");
            return Ok(bitmap);
        }
        tracing::debug!(page = page.get(), "page cache miss");
        self.rasterizer.rasterize(page, self.scale).await
    }

    fn commit(&self, target: PageIndex, bitmap: BitmapSurface) {
        self.display.borrow_mut().commit(&bitmap);
        self.current.set(Some(target));
        // Keep the committed page around for the way back.
        self.cache.borrow_mut().put(target, bitmap);
        tracing::debug!(page = target.get(), "page committed");
    }

    fn request_prefetch(&self) {
        if self.prefetch_enabled {
            self.prefetch_signal.notify_one();
        }
    }

    /// Rasterize the neighbours of the current page into the cache and trim it.
    ///
    /// Returns [`PrefetchOutcome::Skipped`] before the first page is shown or while another
    /// prefetch runs.
    pub async fn prefetch_adjacent(&self) -> PrefetchOutcome {
        self.prefetcher
            .prefetch_adjacent(&self.cache, &self.rasterizer, &self.current, self.scale)
            .await
    }

    /// Background prefetch loop. Runs forever: every accepted page change wakes it once;
    /// changes that happen while it is busy are picked up by the next iteration.
    pub async fn run_prefetcher(&self) {
        loop {
            self.prefetch_signal.notified().await;
            self.prefetch_adjacent().await;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/session.rs"]
mod tests;
