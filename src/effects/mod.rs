//! Transition effects expressed as per-pixel fragment programs.

/// Built-in fade, slide and zoom programs.
pub mod builtin;
pub(crate) mod composite;
/// Program contract, effect names and uniforms.
pub mod program;
/// Effect name to program lookup.
pub mod registry;
