use glam::{Mat4, Quat, Vec2, Vec3};

use crate::picking::Ray;

/// Near clipping plane distance.
pub const DEFAULT_NEAR: f32 = 1.0;
/// Far clipping plane distance.
pub const DEFAULT_FAR: f32 = 10_000.0;

/// Perspective camera defined by position, orientation, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// World-space orientation. Identity looks down -Z with +Y up.
    pub orientation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Camera {
    /// Camera at the origin looking down -Z.
    #[must_use]
    pub fn new(fov: f32, aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov,
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Viewing direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Camera-space right vector in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Rotate the camera in place so it faces `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() < 1e-12 {
            return;
        }
        let dir = dir.normalize();
        let up = if dir.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_to_rh(Vec3::ZERO, dir, up);
        self.orientation = Quat::from_mat4(&view.inverse()).normalize();
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Projection matrix ([0,1] depth range).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    /// A copy shifted sideways by `offset` along the right vector, with a
    /// new aspect ratio. Used to build stereo eye views.
    #[must_use]
    pub fn offset_eye(&self, offset: f32, aspect: f32) -> Self {
        Self {
            position: self.position + self.right() * offset,
            aspect,
            ..self.clone()
        }
    }
}
