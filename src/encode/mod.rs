//! Frame sinks.
//!
//! Sinks receive transition frames in draw order, used for offline export and tests.

/// Frame sink trait and built-in sinks.
pub mod sink;
