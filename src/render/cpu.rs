use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Point;
use rayon::prelude::*;

use crate::effects::composite::over;
use crate::effects::program::{EffectKind, FragmentProgram, TextureView, Uniforms};
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::render::device::{DeviceSettings, GraphicsDevice, ProgramId, TextureId};
use crate::surface::bitmap::BitmapSurface;

/// Largest surface the software device accepts.
const MAX_DIM: u32 = 16_384;

struct Texture {
    size: SurfaceSize,
    data: Vec<u8>,
}

/// Software graphics device.
///
/// Programs are fragment functions from the [`crate::EffectRegistry`]; a draw shades every
/// pixel of the surface, rows in parallel.
pub struct CpuDevice {
    settings: DeviceSettings,
    size: Option<SurfaceSize>,
    framebuffer: Vec<u8>,
    programs: Vec<Arc<dyn FragmentProgram>>,
    textures: HashMap<TextureId, Texture>,
    next_texture: u32,
}

impl CpuDevice {
    /// Create a device with no surface yet.
    pub fn new(settings: DeviceSettings) -> Self {
        Self {
            settings,
            size: None,
            framebuffer: Vec::new(),
            programs: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1,
        }
    }
}

impl GraphicsDevice for CpuDevice {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ViewerResult<()> {
        if size.width == 0 || size.height == 0 {
            return Err(ViewerError::validation(format!(
                "surface size must be non-zero, got {}x{}",
                size.width, size.height
            )));
        }
        if size.width > MAX_DIM || size.height > MAX_DIM {
            return Err(ViewerError::graphics_init(format!(
                "surface {}x{} exceeds device limit {MAX_DIM}x{MAX_DIM}",
                size.width, size.height
            )));
        }
        if self.size == Some(size) {
            return Ok(());
        }
        self.framebuffer.clear();
        self.framebuffer.resize(size.rgba_len()?, 0);
        self.size = Some(size);
        Ok(())
    }

    fn compile_program(&mut self, kind: &EffectKind) -> ViewerResult<(ProgramId, EffectKind)> {
        let (resolved, program) = self.settings.registry.resolve(kind);
        let id = u32::try_from(self.programs.len())
            .map_err(|_| ViewerError::graphics_init("program table exhausted"))?;
        tracing::debug!(effect = %resolved, program = id, "compiled fragment program");
        self.programs.push(program);
        Ok((ProgramId(id), resolved))
    }

    fn upload_texture(&mut self, bitmap: &BitmapSurface) -> ViewerResult<TextureId> {
        let id = TextureId(self.next_texture);
        self.next_texture = self.next_texture.wrapping_add(1).max(1);
        self.textures.insert(
            id,
            Texture {
                size: bitmap.size(),
                data: bitmap.data().to_vec(),
            },
        );
        Ok(id)
    }

    fn release_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
    }

    fn live_textures(&self) -> usize {
        self.textures.len()
    }

    fn draw(
        &mut self,
        program: ProgramId,
        from: TextureId,
        to: TextureId,
        uniforms: &Uniforms,
    ) -> ViewerResult<()> {
        let Self {
            settings,
            size,
            framebuffer,
            programs,
            textures,
            ..
        } = self;
        let size = size.ok_or_else(|| ViewerError::graphics_init("draw before resize"))?;
        let program = programs
            .get(program.0 as usize)
            .ok_or_else(|| ViewerError::validation(format!("unknown program {}", program.0)))?;
        let lookup = |id: TextureId| {
            textures
                .get(&id)
                .map(|t| TextureView::new(t.size, &t.data))
                .ok_or_else(|| ViewerError::validation(format!("unknown texture {}", id.0)))
        };
        let from = lookup(from)?;
        let to = lookup(to)?;
        let clear = settings.clear_rgba;

        let w = size.width as usize;
        let (fw, fh) = (f64::from(size.width), f64::from(size.height));
        framebuffer
            .par_chunks_exact_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                let v = (y as f64 + 0.5) / fh;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let uv = Point::new((x as f64 + 0.5) / fw, v);
                    let mut out = program.shade(uv, &from, &to, uniforms);
                    if let Some(bg) = clear {
                        out = over(bg, out, 1.0);
                    }
                    px.copy_from_slice(&out);
                }
            });
        Ok(())
    }

    fn read_pixels(&self, scale: f32) -> ViewerResult<BitmapSurface> {
        let size = self
            .size
            .ok_or_else(|| ViewerError::graphics_init("read before resize"))?;
        BitmapSurface::from_premul_rgba8(size.width, size.height, scale, self.framebuffer.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
