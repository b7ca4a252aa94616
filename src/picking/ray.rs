use glam::Vec3;

/// A ray in 3D space with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized (zero stays zero).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Both ray parameters where the ray crosses a sphere, nearest first.
    fn sphere_roots(&self, center: Vec3, radius: f32) -> Option<(f32, f32)> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        Some((-b - sq, -b + sq))
    }

    /// Distance to the first sphere surface crossing in front of the origin.
    /// An origin inside the sphere counts as a hit at the exit point.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let (near, far) = self.sphere_roots(center, radius)?;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }

    /// Distance to the far side of a sphere, for rays cast from inside a
    /// panorama shell.
    #[must_use]
    pub fn exit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let (_, far) = self.sphere_roots(center, radius)?;
        (far >= 0.0).then_some(far)
    }
}
