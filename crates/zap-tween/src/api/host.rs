use crate::api::types::Target;
use crate::extensions::value::Value;

/// Named property access on a single target object.
pub trait Tweenable {
    /// Current value of `name`, or `None` if the object has no such property.
    fn property(&self, name: &str) -> Option<Value>;

    /// Write `value` to `name`. Returns `false` if the property does not
    /// exist or has a different kind.
    fn set_property(&mut self, name: &str, value: Value) -> bool;
}

/// The world actions run against.
///
/// Resolves targets to their property accessors and optionally exposes the
/// node capability used by the show/hide/remove leaves. Hosts without a
/// node hierarchy keep the default no-op implementations.
pub trait TweenHost {
    /// Resolve a target for property access.
    fn tweenable(&mut self, target: Target) -> Option<&mut dyn Tweenable>;

    /// Whether `target` still exists. Trees whose root target is gone are
    /// dropped by the scheduler.
    fn contains(&self, _target: Target) -> bool {
        true
    }

    fn set_visible(&mut self, _target: Target, _visible: bool) {}

    fn remove_from_parent(&mut self, _target: Target) {}

    fn destroy(&mut self, _target: Target) {}

    /// Read one property of a target.
    fn read(&mut self, target: Target, name: &str) -> Option<Value> {
        self.tweenable(target).and_then(|t| t.property(name))
    }

    /// Write one property of a target. Returns `false` if it could not be written.
    fn write(&mut self, target: Target, name: &str, value: Value) -> bool {
        self.tweenable(target).is_some_and(|t| t.set_property(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, ObjectId};

    struct Counter {
        value: f32,
    }

    impl Tweenable for Counter {
        fn property(&self, name: &str) -> Option<Value> {
            (name == "value").then_some(Value::Float(self.value))
        }

        fn set_property(&mut self, name: &str, value: Value) -> bool {
            match (name, value) {
                ("value", Value::Float(v)) => {
                    self.value = v;
                    true
                }
                _ => false,
            }
        }
    }

    /// One property object and no node capability.
    struct Single(Counter);

    impl TweenHost for Single {
        fn tweenable(&mut self, target: Target) -> Option<&mut dyn Tweenable> {
            match target {
                Target::Object(ObjectId(0)) => Some(&mut self.0),
                _ => None,
            }
        }
    }

    #[test]
    fn default_read_and_write_go_through_tweenable() {
        let mut host = Single(Counter { value: 1.0 });
        let obj = Target::Object(ObjectId(0));
        assert_eq!(host.read(obj, "value"), Some(Value::Float(1.0)));
        assert!(host.write(obj, "value", Value::Float(3.0)));
        assert_eq!(host.0.value, 3.0);

        assert!(!host.write(obj, "other", Value::Float(3.0)));
        assert!(!host.write(Target::Object(ObjectId(5)), "value", Value::Float(3.0)));
        assert_eq!(host.read(Target::Node(EntityId(1)), "value"), None);
    }

    #[test]
    fn node_operations_default_to_no_ops() {
        let mut host = Single(Counter { value: 1.0 });
        let node = Target::Node(EntityId(1));
        assert!(host.contains(node));
        host.set_visible(node, false);
        host.remove_from_parent(node);
        host.destroy(node);
        assert_eq!(host.0.value, 1.0);
    }
}
