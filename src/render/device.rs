use crate::effects::program::{EffectKind, Uniforms};
use crate::effects::registry::EffectRegistry;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::ViewerResult;
use crate::surface::bitmap::BitmapSurface;

/// Handle to a compiled program on a [`GraphicsDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub(crate) u32);

/// Handle to an uploaded texture on a [`GraphicsDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

/// Graphics context bound to the transition surface.
///
/// This is the seam between the transition engine and whatever draws pixels. Failures to
/// create the context or compile a program are reported as
/// [`crate::ViewerError::GraphicsInit`].
pub trait GraphicsDevice {
    /// Current viewport size, `None` before the first resize.
    fn size(&self) -> Option<SurfaceSize>;

    /// Resize the surface and re-establish the viewport. Contents become undefined.
    fn resize(&mut self, size: SurfaceSize) -> ViewerResult<()>;

    /// Compile the program for `kind`. Returns the id and the effect it actually implements
    /// (unknown kinds compile to fade).
    fn compile_program(&mut self, kind: &EffectKind) -> ViewerResult<(ProgramId, EffectKind)>;

    /// Upload a bitmap as a texture.
    fn upload_texture(&mut self, bitmap: &BitmapSurface) -> ViewerResult<TextureId>;

    /// Release a texture. Unknown ids are ignored.
    fn release_texture(&mut self, id: TextureId);

    /// Number of textures currently alive.
    fn live_textures(&self) -> usize;

    /// Draw a full-surface quad with `program`, sampling `from` and `to`.
    fn draw(
        &mut self,
        program: ProgramId,
        from: TextureId,
        to: TextureId,
        uniforms: &Uniforms,
    ) -> ViewerResult<()>;

    /// Read back the surface contents, stamped with display `scale`.
    fn read_pixels(&self, scale: f32) -> ViewerResult<BitmapSurface>;
}

/// Available device kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceKind {
    /// Software fragment pipeline.
    #[default]
    Cpu,
}

/// Backend-agnostic device settings.
#[derive(Clone, Debug, Default)]
pub struct DeviceSettings {
    /// If set, fragments are composited over this premultiplied color.
    pub clear_rgba: Option<[u8; 4]>,
    /// Effect programs available for compilation.
    pub registry: EffectRegistry,
}

/// Create a graphics device.
pub fn create_device(
    kind: DeviceKind,
    settings: DeviceSettings,
) -> ViewerResult<Box<dyn GraphicsDevice>> {
    match kind {
        DeviceKind::Cpu => Ok(Box::new(crate::render::cpu::CpuDevice::new(settings))),
    }
}
