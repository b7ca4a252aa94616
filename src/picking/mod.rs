//! Screen-space input resolution: pointer coordinates → camera ray →
//! distance-ordered hits against the active panorama's descendants →
//! effective interactive target.
//!
//! Everything here is a pure function of (coordinates, camera, scene graph)
//! at call time.

mod ray;

use glam::{Vec2, Vec3};
pub use ray::Ray;

use crate::camera::Camera;
use crate::scene::{Collider, ObjectId, Scene};

/// One geometric intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Raw object that was hit.
    pub object: ObjectId,
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// The outcome of resolving one pointer sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Every hit, nearest first.
    pub hits: Vec<Hit>,
    /// Raw object of the first hit that is not pass-through.
    pub object: Option<ObjectId>,
    /// Logical entity of that hit: the object's owning entity if it has
    /// one, otherwise the object itself.
    pub entity: Option<ObjectId>,
}

impl Resolution {
    /// Whether any geometry was hit at all.
    #[must_use]
    pub fn has_hits(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Placement of the render surface inside the host, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left offset.
    pub left: f32,
    /// Top offset.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl SurfaceRect {
    /// Rect of the given size at the host origin.
    #[must_use]
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Center of the surface in screen coordinates.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert a screen position to normalized device coordinates.
    #[must_use]
    pub fn to_ndc(&self, screen: Vec2) -> Vec2 {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        Vec2::new(
            ((screen.x - self.left) / width) * 2.0 - 1.0,
            -((screen.y - self.top) / height) * 2.0 + 1.0,
        )
    }
}

/// Intersect a ray against a set of scene objects. Returns hits sorted by
/// distance, nearest first.
#[must_use]
pub fn intersect_objects(
    scene: &Scene,
    ray: &Ray,
    candidates: &[ObjectId],
) -> Vec<Hit> {
    let mut hits: Vec<Hit> = candidates
        .iter()
        .filter_map(|&id| {
            let obj = scene.object(id)?;
            let Collider::Sphere { radius } = obj.collider?;
            let center = scene.world_position(id)?;
            let distance = ray.intersect_sphere(center, radius)?;
            Some(Hit {
                object: id,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Pick the effective `(object, entity)` pair from distance-ordered hits.
///
/// Hits whose raw object is pass-through, or whose owning entity is
/// pass-through, are skipped.
#[must_use]
pub fn resolve_target(
    scene: &Scene,
    hits: &[Hit],
) -> (Option<ObjectId>, Option<ObjectId>) {
    for hit in hits {
        let Some(obj) = scene.object(hit.object) else {
            continue;
        };
        if obj.pass_through {
            continue;
        }
        match obj.entity {
            Some(entity_id) => {
                let entity_passes = scene
                    .object(entity_id)
                    .is_some_and(|entity| entity.pass_through);
                if entity_passes {
                    continue;
                }
                return (Some(hit.object), Some(entity_id));
            }
            None => return (Some(hit.object), Some(hit.object)),
        }
    }
    (None, None)
}

/// Resolves screen coordinates to interactive targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputResolver {
    surface: SurfaceRect,
}

impl InputResolver {
    /// Resolver for a render surface.
    #[must_use]
    pub fn new(surface: SurfaceRect) -> Self {
        Self { surface }
    }

    /// The surface this resolver maps from.
    #[must_use]
    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Update the surface placement (after a resize).
    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    /// Camera ray through a screen position.
    #[must_use]
    pub fn ray(&self, camera: &Camera, screen: Vec2) -> Ray {
        camera.ray_from_ndc(self.surface.to_ndc(screen))
    }

    /// Resolve a screen position against the descendants of `panorama`.
    ///
    /// Returns an empty resolution when no panorama is active.
    #[must_use]
    pub fn resolve(
        &self,
        scene: &Scene,
        camera: &Camera,
        screen: Vec2,
        panorama: Option<ObjectId>,
    ) -> Resolution {
        let Some(panorama) = panorama else {
            return Resolution::default();
        };
        let ray = self.ray(camera, screen);
        let candidates = scene.visible_descendants(panorama);
        let hits = intersect_objects(scene, &ray, &candidates);
        let (object, entity) = resolve_target(scene, &hits);
        Resolution {
            hits,
            object,
            entity,
        }
    }

    /// Point on the panorama shell under a screen position.
    #[must_use]
    pub fn panorama_point(
        &self,
        scene: &Scene,
        camera: &Camera,
        screen: Vec2,
        panorama: ObjectId,
    ) -> Option<Vec3> {
        let info = scene.object(panorama)?.as_panorama()?;
        let center = scene.world_position(panorama)?;
        let ray = self.ray(camera, screen);
        ray.exit_sphere(center, info.radius).map(|t| ray.at(t))
    }
}
