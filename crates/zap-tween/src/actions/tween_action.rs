// actions/tween_action.rs
//
// Property tween leaf. Start values are captured lazily from the target
// when the action starts, so a tween always begins wherever the property
// is at that moment.

use std::fmt;
use std::rc::Rc;
use crate::api::host::TweenHost;
use crate::api::types::Target;
use crate::extensions::easing::{Easing, EasingFn};
use crate::extensions::value::{ProgressFn, Value};
use super::action::{StopCallback, TargetCallback, UpdateCallback};

/// One animated property as described by the caller.
#[derive(Clone)]
struct PropSpec {
    name: String,
    /// End value, or the delta for relative tweens.
    value: Value,
    easing: Option<EasingFn>,
    progress: Option<ProgressFn>,
}

/// Ordered property list for `to`/`by`/`set`.
#[derive(Clone, Default)]
pub struct Props {
    specs: Vec<PropSpec>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate `name` towards (or by) `value`.
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name.into(), value.into(), None, None)
    }

    /// Animate `name` with its own easing, overriding the tween-wide one.
    pub fn with_easing(self, name: impl Into<String>, value: impl Into<Value>, easing: impl Into<EasingFn>) -> Self {
        self.push(name.into(), value.into(), Some(easing.into()), None)
    }

    /// Animate `name` with its own per-component interpolation
    /// `(start, end, current, t) -> value`.
    pub fn with_progress(
        self,
        name: impl Into<String>,
        value: impl Into<Value>,
        progress: impl Fn(f32, f32, f32, f32) -> f32 + 'static,
    ) -> Self {
        self.push(name.into(), value.into(), None, Some(Rc::new(progress)))
    }

    fn push(mut self, name: String, value: Value, easing: Option<EasingFn>, progress: Option<ProgressFn>) -> Self {
        self.specs.retain(|s| s.name != name);
        self.specs.push(PropSpec { name, value, easing, progress });
        self
    }

    /// Property names with their end values (or deltas), in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (&str, Value)> {
        self.specs.iter().map(|s| (s.name.as_str(), s.value))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values()).finish()
    }
}

/// Tween-wide options for `to`/`by`.
#[derive(Clone, Default)]
pub struct TweenOptions {
    pub(crate) relative: bool,
    easing: Option<EasingFn>,
    progress: Option<ProgressFn>,
    on_start: Option<TargetCallback>,
    on_update: Option<UpdateCallback>,
    on_complete: Option<TargetCallback>,
    on_stop: Option<StopCallback>,
}

impl TweenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn easing(mut self, easing: impl Into<EasingFn>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Easing by curve name (`"quadOut"`, `"bounceInOut"`, ...).
    /// Unknown names are reported and leave the tween linear.
    pub fn easing_name(mut self, name: &str) -> Self {
        match name.parse::<Easing>() {
            Ok(e) => self.easing = Some(EasingFn::Named(e)),
            Err(e) => log::warn!("tween: {e}, falling back to linear"),
        }
        self
    }

    pub fn easing_fn(mut self, f: impl Fn(f32) -> f32 + 'static) -> Self {
        self.easing = Some(EasingFn::custom(f));
        self
    }

    /// Per-component interpolation `(start, end, current, t) -> value` for
    /// every property without its own.
    pub fn progress(mut self, f: impl Fn(f32, f32, f32, f32) -> f32 + 'static) -> Self {
        self.progress = Some(Rc::new(f));
        self
    }

    pub fn on_start(mut self, f: impl Fn(Target, &mut dyn TweenHost) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(Target, f32, &mut dyn TweenHost) + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl Fn(Target, &mut dyn TweenHost) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    pub fn on_stop(mut self, f: impl Fn(Target) + 'static) -> Self {
        self.on_stop = Some(Rc::new(f));
        self
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }
}

/// Runtime state of one property.
#[derive(Clone)]
struct PropertyTween {
    spec: PropSpec,
    start: Option<Value>,
    end: Option<Value>,
    current: Option<Value>,
}

#[derive(Clone)]
pub struct TweenAction {
    props: Vec<PropertyTween>,
    opts: TweenOptions,
}

impl TweenAction {
    pub fn new(props: Props, opts: TweenOptions) -> Self {
        let props = props
            .specs
            .into_iter()
            .map(|spec| PropertyTween { spec, start: None, end: None, current: None })
            .collect();
        Self { props, opts }
    }

    pub fn is_relative(&self) -> bool {
        self.opts.relative
    }

    /// Last value written for `name`, if the tween has run.
    pub fn current(&self, name: &str) -> Option<Value> {
        self.props.iter().find(|p| p.spec.name == name).and_then(|p| p.current)
    }

    /// Resolved end value for `name`, if the tween has started.
    pub fn end(&self, name: &str) -> Option<Value> {
        self.props.iter().find(|p| p.spec.name == name).and_then(|p| p.end)
    }

    pub(crate) fn start(&mut self, target: Option<Target>, host: &mut dyn TweenHost) {
        let Some(target) = target else { return };
        let relative = self.opts.relative;
        for prop in &mut self.props {
            prop.start = None;
            prop.end = None;
            prop.current = None;

            let Some(now) = host.read(target, &prop.spec.name) else {
                log::debug!("tween: {target:?} has no `{}`, skipped", prop.spec.name);
                continue;
            };
            if !now.same_kind(&prop.spec.value) {
                log::debug!(
                    "tween: `{}` on {target:?} is {}, not {}, skipped",
                    prop.spec.name,
                    now.kind(),
                    prop.spec.value.kind()
                );
                continue;
            }
            let end = if relative { now.add(&prop.spec.value) } else { Some(prop.spec.value) };
            prop.start = Some(now);
            prop.current = Some(now);
            prop.end = end;
        }
        if let Some(cb) = &self.opts.on_start {
            cb(target, host);
        }
    }

    pub(crate) fn update(&mut self, t: f32, target: Option<Target>, host: &mut dyn TweenHost) {
        let Some(target) = target else { return };
        let eased = self.opts.easing.as_ref().map_or(t, |e| e.apply(t));
        for prop in &mut self.props {
            let (Some(start), Some(end), Some(current)) = (prop.start, prop.end, prop.current) else {
                continue;
            };
            let time = prop.spec.easing.as_ref().map_or(eased, |e| e.apply(t));
            let progress = prop.spec.progress.as_ref().or(self.opts.progress.as_ref());
            if let Some(value) = Value::interpolate(&start, &end, &current, time, progress) {
                prop.current = Some(value);
                host.write(target, &prop.spec.name, value);
            }
        }
        if let Some(cb) = &self.opts.on_update {
            cb(target, t, host);
        }
        if t >= 1.0 {
            if let Some(cb) = &self.opts.on_complete {
                cb(target, host);
            }
        }
    }

    pub(crate) fn stopped(&self, target: Option<Target>) {
        if let (Some(cb), Some(target)) = (&self.opts.on_stop, target) {
            cb(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use glam::Vec3;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use crate::core::scene::Scene;

    fn scene_with_node() -> (Scene, Target) {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_position(Vec3::new(10.0, 0.0, 0.0)));
        (scene, Target::Node(EntityId(1)))
    }

    #[test]
    fn absolute_tween_captures_start() {
        let (mut scene, node) = scene_with_node();
        let mut tween = TweenAction::new(
            Props::new().with("position", Vec3::new(20.0, 0.0, 0.0)),
            TweenOptions::new(),
        );
        tween.start(Some(node), &mut scene);
        tween.update(0.5, Some(node), &mut scene);
        assert_eq!(scene.get(EntityId(1)).unwrap().position, Vec3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn relative_tween_adds_delta() {
        let (mut scene, node) = scene_with_node();
        let mut opts = TweenOptions::new();
        opts.relative = true;
        let mut tween = TweenAction::new(Props::new().with("position", Vec3::new(5.0, 5.0, 0.0)), opts);
        tween.start(Some(node), &mut scene);
        tween.update(1.0, Some(node), &mut scene);
        assert_eq!(tween.end("position"), Some(Value::Vec3(Vec3::new(15.0, 5.0, 0.0))));
        assert_eq!(scene.get(EntityId(1)).unwrap().position, Vec3::new(15.0, 5.0, 0.0));
    }

    #[test]
    fn skips_missing_and_mistyped_properties() {
        let (mut scene, node) = scene_with_node();
        let mut tween = TweenAction::new(
            Props::new().with("speed", 3.0_f32).with("angle", Vec3::ONE).with("scale", Vec3::splat(2.0)),
            TweenOptions::new(),
        );
        tween.start(Some(node), &mut scene);
        tween.update(1.0, Some(node), &mut scene);
        assert_eq!(tween.current("speed"), None);
        assert_eq!(tween.current("angle"), None);
        assert_eq!(scene.get(EntityId(1)).unwrap().scale, Vec3::splat(2.0));
    }

    #[test]
    fn per_property_easing_wins() {
        let (mut scene, node) = scene_with_node();
        let mut tween = TweenAction::new(
            Props::new()
                .with("angle", 100.0_f32)
                .with_easing("scale", Vec3::splat(3.0), Easing::Constant),
            TweenOptions::new().easing(Easing::Linear),
        );
        tween.start(Some(node), &mut scene);
        tween.update(0.5, Some(node), &mut scene);
        let e = scene.get(EntityId(1)).unwrap();
        assert!((e.angle - 50.0).abs() < 1e-4);
        assert_eq!(e.scale, Vec3::ONE);
    }

    #[test]
    fn callbacks_fire_in_order() {
        let (mut scene, node) = scene_with_node();
        let log = Rc::new(Cell::new(0u32));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let mut tween = TweenAction::new(
            Props::new().with("angle", 90.0_f32),
            TweenOptions::new()
                .on_start(move |_, _| a.set(a.get() * 10 + 1))
                .on_update(move |_, _, _| b.set(b.get() * 10 + 2))
                .on_complete(move |_, _| c.set(c.get() * 10 + 3)),
        );
        tween.start(Some(node), &mut scene);
        tween.update(0.5, Some(node), &mut scene);
        tween.update(1.0, Some(node), &mut scene);
        assert_eq!(log.get(), 1223);
    }

    #[test]
    fn unknown_easing_name_stays_linear() {
        let (mut scene, node) = scene_with_node();
        let mut tween = TweenAction::new(
            Props::new().with("angle", 10.0_f32),
            TweenOptions::new().easing_name("wobbly"),
        );
        tween.start(Some(node), &mut scene);
        tween.update(0.25, Some(node), &mut scene);
        assert!((scene.get(EntityId(1)).unwrap().angle - 2.5).abs() < 1e-4);
    }
}
