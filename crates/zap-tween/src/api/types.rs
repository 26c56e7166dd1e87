/// Unique identifier for an entity (scene node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Unique identifier for a plain property object (component, data record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// The object an action mutates.
///
/// Only `Node` targets carry the node capability (visibility, removal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Node(EntityId),
    Object(ObjectId),
}

impl Target {
    /// Whether this target is a scene node.
    pub fn is_node(self) -> bool {
        matches!(self, Target::Node(_))
    }
}

impl From<EntityId> for Target {
    fn from(id: EntityId) -> Self {
        Target::Node(id)
    }
}

impl From<ObjectId> for Target {
    fn from(id: ObjectId) -> Self {
        Target::Object(id)
    }
}

/// Caller-assigned integer used for bulk lookup and cancellation.
pub type Tag = i32;

/// Tag carried by actions nobody tagged.
pub const TAG_INVALID: Tag = -1;

/// Handle to a tree registered with the `ActionManager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_convert_into_targets() {
        let node: Target = EntityId(3).into();
        let object: Target = ObjectId(3).into();
        assert_eq!(node, Target::Node(EntityId(3)));
        assert!(node.is_node());
        assert!(!object.is_node());
        assert_ne!(node, object);
    }
}
