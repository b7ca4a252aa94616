//! The seam between the viewer and whatever draws the frame.
//!
//! The viewer never talks to a GPU API directly. Each scheduled render
//! hands a [`FrameContext`] to a [`RenderBackend`]; the backend decides
//! how to draw the scene for every [`EyeView`] the context describes.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::scene::Scene;

/// Default interpupillary distance used by the stereo path, in scene units.
pub const DEFAULT_EYE_SEPARATION: f32 = 0.064;

/// Which render path a frame uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPath {
    /// Single full-surface view.
    #[default]
    Normal,
    /// Side-by-side left/right views for head-mounted viewers.
    Stereo,
}

/// Pixel rectangle within the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// One view to draw: where on the surface and with which camera matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeView {
    /// Target rectangle.
    pub viewport: Viewport,
    /// Combined view-projection matrix for this eye.
    pub view_proj: Mat4,
    /// Eye position in world space.
    pub eye: Vec3,
}

/// Everything a backend needs to draw one frame.
pub struct FrameContext<'a> {
    /// Scene graph to draw.
    pub scene: &'a Scene,
    /// Camera the frame is viewed through.
    pub camera: &'a Camera,
    /// Active render path.
    pub path: RenderPath,
    /// Surface size in pixels.
    pub size: (u32, u32),
}

impl FrameContext<'_> {
    /// The per-eye views for this frame's render path.
    #[must_use]
    pub fn views(&self) -> Vec<EyeView> {
        let (width, height) = (self.size.0 as f32, self.size.1 as f32);
        match self.path {
            RenderPath::Normal => vec![EyeView {
                viewport: Viewport {
                    x: 0.0,
                    y: 0.0,
                    width,
                    height,
                },
                view_proj: self.camera.view_proj(),
                eye: self.camera.position,
            }],
            RenderPath::Stereo => {
                let half = width / 2.0;
                let aspect = if height > 0.0 { half / height } else { 1.0 };
                [-0.5_f32, 0.5]
                    .iter()
                    .enumerate()
                    .map(|(i, side)| {
                        let offset = side * DEFAULT_EYE_SEPARATION;
                        let eye_camera = self.camera.offset_eye(offset, aspect);
                        EyeView {
                            viewport: Viewport {
                                x: half * i as f32,
                                y: 0.0,
                                width: half,
                                height,
                            },
                            view_proj: eye_camera.view_proj(),
                            eye: eye_camera.position,
                        }
                    })
                    .collect()
            }
        }
    }
}

/// A 3D rendering runtime the viewer can draw through.
///
/// The render surface behind a backend is owned by exactly one viewer.
pub trait RenderBackend {
    /// Draw one frame.
    fn render(&mut self, frame: &FrameContext<'_>);

    /// The render surface changed size.
    fn resize(&mut self, width: u32, height: u32);

    /// Whether the backend can draw the stereo path.
    fn supports_stereo(&self) -> bool {
        true
    }
}
