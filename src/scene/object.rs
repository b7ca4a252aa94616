use glam::Vec3;

use super::event::ObjectEvent;
use crate::events::{EventTarget, Listeners};

/// Stable identifier for an object in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    /// Raw numeric value.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Panorama-specific data the viewer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaInfo {
    /// Whether this panorama plays video (needs the auxiliary frame pump).
    pub video: bool,
    /// Radius of the panorama shell.
    pub radius: f32,
}

impl Default for PanoramaInfo {
    fn default() -> Self {
        Self {
            video: false,
            radius: 5000.0,
        }
    }
}

/// What an object is, as far as the interaction core cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    /// Plain grouping node.
    Group,
    /// Generic intersectable object.
    Mesh,
    /// Hotspot marker attached to a panorama.
    Infospot,
    /// Panorama shell. Its descendants are what the pointer can hit.
    Panorama(PanoramaInfo),
    /// On-screen gaze indicator.
    Reticle,
}

/// Intersection volume used by the input resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Sphere centered on the object's world position.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
}

/// A node in the scene graph.
#[derive(Debug)]
pub struct SceneObject {
    pub(crate) id: Option<ObjectId>,
    /// Human-readable name.
    pub name: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Intersection volume; objects without one are never hit.
    pub collider: Option<Collider>,
    /// Skip this object when resolving the interactive target.
    pub pass_through: bool,
    /// Logical entity this object delegates interaction to.
    pub entity: Option<ObjectId>,
    /// Invisible objects and their subtrees are not intersected.
    pub visible: bool,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    listeners: Listeners<ObjectEvent>,
}

impl SceneObject {
    /// New object of `kind` at the origin.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: None,
            name: String::new(),
            kind,
            position: Vec3::ZERO,
            collider: None,
            pass_through: false,
            entity: None,
            visible: true,
            parent: None,
            children: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Panorama shell.
    #[must_use]
    pub fn panorama(info: PanoramaInfo) -> Self {
        Self::new(ObjectKind::Panorama(info))
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the parent-relative position.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Give the object a sphere collider.
    #[must_use]
    pub fn with_sphere(mut self, radius: f32) -> Self {
        self.collider = Some(Collider::Sphere { radius });
        self
    }

    /// Set the pass-through flag.
    #[must_use]
    pub fn with_pass_through(mut self, pass_through: bool) -> Self {
        self.pass_through = pass_through;
        self
    }

    /// Delegate interaction to `entity`.
    #[must_use]
    pub fn with_entity(mut self, entity: ObjectId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Id assigned when the object was inserted into a scene.
    #[must_use]
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    /// Parent node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Panorama data when this object is a panorama.
    #[must_use]
    pub fn as_panorama(&self) -> Option<PanoramaInfo> {
        match self.kind {
            ObjectKind::Panorama(info) => Some(info),
            _ => None,
        }
    }

    /// Whether this object is an infospot.
    #[must_use]
    pub fn is_infospot(&self) -> bool {
        self.kind == ObjectKind::Infospot
    }

    /// Number of listeners attached to this object.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventTarget<ObjectEvent> for SceneObject {
    fn listeners_mut(&mut self) -> &mut Listeners<ObjectEvent> {
        &mut self.listeners
    }
}
