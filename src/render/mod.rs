//! Graphics device abstraction for the transition surface (CPU-first).

/// CPU device running fragment programs row-parallel.
pub mod cpu;
/// Device trait and factory.
pub mod device;
/// Frame cadence sources.
pub mod scheduler;
