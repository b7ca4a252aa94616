//! Scene graph: objects keyed by [`ObjectId`], parent/child links, and
//! event delivery to individual objects.
//!
//! Panorama content itself (textures, video decoding) lives outside this
//! crate. The graph only carries what input resolution and mode broadcast
//! need: positions, colliders, pass-through flags and entity back-references.

mod event;
mod object;

pub use event::{ObjectEvent, ObjectEventKind};
use glam::Vec3;
pub use object::{Collider, ObjectId, ObjectKind, PanoramaInfo, SceneObject};
use rustc_hash::FxHashMap;

use crate::events::EventTarget;

/// The scene graph owned by a viewer.
#[derive(Debug, Default)]
pub struct Scene {
    objects: FxHashMap<ObjectId, SceneObject>,
    roots: Vec<ObjectId>,
    next_id: u32,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object at the root. Returns its id.
    pub fn insert(&mut self, object: SceneObject) -> ObjectId {
        self.attach(None, object)
    }

    /// Insert an object under `parent`. Returns `None` if the parent does
    /// not exist.
    pub fn insert_child(
        &mut self,
        parent: ObjectId,
        object: SceneObject,
    ) -> Option<ObjectId> {
        if !self.objects.contains_key(&parent) {
            return None;
        }
        Some(self.attach(Some(parent), object))
    }

    fn attach(
        &mut self,
        parent: Option<ObjectId>,
        mut object: SceneObject,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        object.id = Some(id);
        object.parent = parent;
        object.children.clear();
        match parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent_obj) => parent_obj.children.push(id),
            None => self.roots.push(id),
        }
        let _ = self.objects.insert(id, object);
        id
    }

    /// Remove an object and its whole subtree. Returns the removed object.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let parent = self.objects.get(&id)?.parent;
        match parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent_obj) => parent_obj.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        for descendant in self.descendants(id) {
            let _ = self.objects.remove(&descendant);
        }
        self.objects.remove(&id)
    }

    /// Read access to an object.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Write access to an object.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Whether `id` is in the scene.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All descendants of `id` in depth-first pre-order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: ObjectId) -> Vec<ObjectId> {
        self.collect_descendants(id, false)
    }

    /// Descendants of `id` that are visible, skipping hidden subtrees.
    #[must_use]
    pub fn visible_descendants(&self, id: ObjectId) -> Vec<ObjectId> {
        self.collect_descendants(id, true)
    }

    fn collect_descendants(
        &self,
        id: ObjectId,
        visible_only: bool,
    ) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let Some(root) = self.objects.get(&id) else {
            return out;
        };
        let mut stack: Vec<ObjectId> =
            root.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            let Some(obj) = self.objects.get(&next) else {
                continue;
            };
            if visible_only && !obj.visible {
                continue;
            }
            out.push(next);
            stack.extend(obj.children.iter().rev().copied());
        }
        out
    }

    /// Every object in the graph, roots first, depth-first pre-order.
    #[must_use]
    pub fn traverse(&self) -> Vec<ObjectId> {
        let mut out = Vec::with_capacity(self.objects.len());
        for root in &self.roots {
            out.push(*root);
            out.extend(self.descendants(*root));
        }
        out
    }

    /// World-space position, accumulated through the parent chain.
    #[must_use]
    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        let mut obj = self.objects.get(&id)?;
        let mut position = obj.position;
        while let Some(parent) = obj.parent.and_then(|p| self.objects.get(&p))
        {
            position += parent.position;
            obj = parent;
        }
        Some(position)
    }

    /// Deliver an event to one object. Missing objects receive nothing.
    pub fn dispatch(&mut self, id: ObjectId, event: &ObjectEvent) -> usize {
        self.objects
            .get_mut(&id)
            .map_or(0, |obj| obj.dispatch(event))
    }

    /// Deliver an event to every object in the graph.
    pub fn broadcast(&mut self, event: &ObjectEvent) -> usize {
        self.traverse()
            .into_iter()
            .map(|id| self.dispatch(id, event))
            .sum()
    }

    /// Total listeners attached across all objects.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.objects.values().map(SceneObject::listener_count).sum()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.roots.clear();
    }
}
