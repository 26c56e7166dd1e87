// actions/instant.rs
//
// Zero-duration leaves: property assignment and callbacks.
// Visibility and removal leaves carry no data and live directly in ActionKind.

use std::fmt;
use std::rc::Rc;
use crate::api::host::TweenHost;
use crate::api::types::Target;
use super::action::TargetCallback;
use super::tween_action::Props;

/// Writes a property list to the target in one go.
#[derive(Clone, Debug)]
pub struct SetAction {
    props: Props,
}

impl SetAction {
    pub fn new(props: Props) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub(crate) fn apply(&self, target: Option<Target>, host: &mut dyn TweenHost) {
        let Some(target) = target else { return };
        for (name, value) in self.props.values() {
            if !host.write(target, name, value) {
                log::debug!("set: {target:?} has no writable `{name}` of kind {}", value.kind());
            }
        }
    }
}

/// Runs a callback with the effective target.
#[derive(Clone)]
pub struct CallFunc {
    callback: TargetCallback,
}

impl CallFunc {
    pub fn new(callback: impl Fn(Target, &mut dyn TweenHost) + 'static) -> Self {
        Self { callback: Rc::new(callback) }
    }

    /// Callback that also receives caller data by reference.
    pub fn with_data<D: 'static>(data: D, callback: impl Fn(Target, &D, &mut dyn TweenHost) + 'static) -> Self {
        Self::new(move |target, host| callback(target, &data, host))
    }

    pub(crate) fn invoke(&self, target: Option<Target>, host: &mut dyn TweenHost) {
        if let Some(target) = target {
            (self.callback)(target, host);
        }
    }
}

impl fmt::Debug for CallFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallFunc(..)")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use crate::core::scene::Scene;
    use super::*;

    const NODE: Target = Target::Node(EntityId(1));

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene
    }

    #[test]
    fn set_skips_missing_and_mistyped_properties() {
        let mut scene = scene();
        let set = SetAction::new(
            Props::new()
                .with("missing", 1.0_f32)
                .with("opacity", 2.5_f32)
                .with("angle", 45.0_f32),
        );
        set.apply(Some(NODE), &mut scene);
        let e = scene.get(EntityId(1)).unwrap();
        assert_eq!(e.angle, 45.0);
        assert_eq!(e.opacity, 255);
    }

    #[test]
    fn set_without_target_writes_nothing() {
        let mut scene = scene();
        SetAction::new(Props::new().with("angle", 45.0_f32)).apply(None, &mut scene);
        assert_eq!(scene.get(EntityId(1)).unwrap().angle, 0.0);
    }

    #[test]
    fn call_passes_target_and_data() {
        let mut scene = scene();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let call = CallFunc::with_data(7u32, move |target, data, _| {
            assert_eq!(target, NODE);
            h.set(h.get() + *data);
        });
        call.invoke(Some(NODE), &mut scene);
        call.invoke(None, &mut scene);
        assert_eq!(hits.get(), 7);
    }
}
