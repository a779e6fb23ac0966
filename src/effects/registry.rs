use std::collections::HashMap;
use std::sync::Arc;

use crate::effects::builtin::{FadeProgram, SlideProgram, ZoomProgram};
use crate::effects::program::{EffectKind, FragmentProgram};

/// Registration table mapping effect kinds to fragment programs.
///
/// Lookups never fail: kinds without a registered program resolve to the fade program.
#[derive(Clone)]
pub struct EffectRegistry {
    programs: HashMap<EffectKind, Arc<dyn FragmentProgram>>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.programs.keys().map(EffectKind::name).collect();
        names.sort_unstable();
        f.debug_struct("EffectRegistry")
            .field("programs", &names)
            .finish()
    }
}

impl EffectRegistry {
    /// Registry holding `fade`, `slide` and `zoom`.
    pub fn with_builtins() -> Self {
        let mut r = Self {
            programs: HashMap::new(),
        };
        r.register(EffectKind::Fade, Arc::new(FadeProgram));
        r.register(EffectKind::Slide, Arc::new(SlideProgram));
        r.register(EffectKind::Zoom, Arc::new(ZoomProgram));
        r
    }

    /// Register (or replace) the program for `kind`.
    pub fn register(&mut self, kind: EffectKind, program: Arc<dyn FragmentProgram>) {
        self.programs.insert(kind, program);
    }

    /// Return `true` when `kind` has its own program.
    pub fn contains(&self, kind: &EffectKind) -> bool {
        self.programs.contains_key(kind)
    }

    /// Resolve `kind` to the effect that will actually run and its program.
    ///
    /// Unregistered kinds fall back to [`EffectKind::Fade`].
    pub fn resolve(&self, kind: &EffectKind) -> (EffectKind, Arc<dyn FragmentProgram>) {
        if let Some(p) = self.programs.get(kind) {
            return (kind.clone(), Arc::clone(p));
        }
        tracing::debug!(effect = %kind, "unknown effect, falling back to fade");
        let fade = self
            .programs
            .get(&EffectKind::Fade)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::new(FadeProgram));
        (EffectKind::Fade, fade)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;
