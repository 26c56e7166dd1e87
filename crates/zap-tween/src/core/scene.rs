use crate::api::host::{TweenHost, Tweenable};
use crate::api::types::{EntityId, ObjectId, Target};
use crate::components::bag::PropertyBag;
use crate::components::entity::Entity;

/// Simple target storage using flat Vecs.
/// Designed for small-to-medium counts (hundreds, not millions).
///
/// Nodes (`Entity`) carry the node capability: visibility, parenting and
/// destruction. Property bags are plain tween targets.
pub struct Scene {
    entities: Vec<Entity>,
    objects: Vec<PropertyBag>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
            objects: Vec::new(),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Add a property bag to the scene.
    pub fn insert_object(&mut self, object: PropertyBag) {
        self.objects.push(object);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Children of the removed entity become roots.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let removed = self.entities.swap_remove(idx);
        for e in self.entities.iter_mut().filter(|e| e.parent == Some(id)) {
            e.parent = None;
        }
        Some(removed)
    }

    /// Remove a property bag by ID.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<PropertyBag> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.swap_remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PropertyBag> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut PropertyBag> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Attach `child` to `parent`, or detach it with `None`.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        if let Some(e) = self.get_mut(child) {
            e.parent = parent;
        }
    }

    /// IDs of the direct children of `id`.
    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.parent == Some(id))
            .map(|e| e.id)
            .collect()
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities and objects.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.objects.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenHost for Scene {
    fn tweenable(&mut self, target: Target) -> Option<&mut dyn Tweenable> {
        match target {
            Target::Node(id) => self.get_mut(id).map(|e| e as &mut dyn Tweenable),
            Target::Object(id) => self.object_mut(id).map(|o| o as &mut dyn Tweenable),
        }
    }

    fn contains(&self, target: Target) -> bool {
        match target {
            Target::Node(id) => self.get(id).is_some(),
            Target::Object(id) => self.object(id).is_some(),
        }
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        if let Target::Node(id) = target {
            if let Some(e) = self.get_mut(id) {
                e.active = visible;
            }
        }
    }

    fn remove_from_parent(&mut self, target: Target) {
        if let Target::Node(id) = target {
            self.set_parent(id, None);
        }
    }

    fn destroy(&mut self, target: Target) {
        if let Target::Node(id) = target {
            self.despawn(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::value::Value;
    use glam::{Vec2, Vec3};

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_position(Vec3::new(10.0, 20.0, 0.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.position, Vec3::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn despawn_orphans_children() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        assert_eq!(scene.children(EntityId(1)), vec![EntityId(2)]);

        scene.despawn(EntityId(1));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(EntityId(2)).unwrap().parent, None);
    }

    #[test]
    fn host_resolves_nodes_and_objects() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene.insert_object(PropertyBag::new(ObjectId(7)).with("content_size", Vec2::ZERO));

        let size = Value::Vec2(Vec2::new(3.0, 4.0));
        assert!(scene.write(Target::Object(ObjectId(7)), "content_size", size));
        assert_eq!(scene.read(Target::Object(ObjectId(7)), "content_size"), Some(size));
        assert!(!scene.write(Target::Node(EntityId(9)), "position", Value::Vec3(Vec3::ONE)));
        assert!(!scene.contains(Target::Object(ObjectId(8))));
    }

    #[test]
    fn node_capability_ignores_objects() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_parent(EntityId(5)));
        scene.insert_object(PropertyBag::new(ObjectId(1)));

        scene.set_visible(Target::Node(EntityId(1)), false);
        scene.remove_from_parent(Target::Node(EntityId(1)));
        scene.destroy(Target::Object(ObjectId(1)));

        let e = scene.get(EntityId(1)).unwrap();
        assert!(!e.active);
        assert_eq!(e.parent, None);
        assert!(scene.contains(Target::Object(ObjectId(1))));
    }
}
