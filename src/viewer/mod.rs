//! Viewer-side orchestration: page cache, prefetch, display surfaces and the session that ties
//! them to the transition engine.

/// Bounded page bitmap cache.
pub mod cache;
/// Display surface state.
pub mod display;
/// Adjacent page prefetching.
pub mod prefetch;
/// Page change orchestration.
pub mod session;
