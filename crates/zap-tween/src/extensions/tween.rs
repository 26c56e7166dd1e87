// extensions/tween.rs
//
// Fluent tween chains on top of the action algebra.
//
// Usage:
//   let mut chain = tween(entity_id)
//       .to(0.5, Props::new().with("position", Vec3::new(100.0, 0.0, 0.0)), TweenOptions::new())
//       .delay(0.2)
//       .by(0.3, Props::new().with("angle", 90.0_f32), TweenOptions::new().easing(Easing::QuadOut));
//   chain.start(&mut actions);
//   actions.update(dt, &mut scene);  // Once per frame
//
// A chain keeps an ordered list of pending actions. `repeat`, `repeat_forever`
// and `reverse_time` without an embedded chain take the last pending action
// as their operand and replace it with the wrapped one.

use crate::actions::action::Action;
use crate::actions::compose::{self, CompositionError, RepeatCount};
use crate::actions::tween_action::{Props, TweenOptions};
use crate::api::host::TweenHost;
use crate::api::types::{ActionId, Tag, Target, TAG_INVALID};
use crate::systems::action_manager::ActionManager;

/// Start a chain on `target`.
pub fn tween(target: impl Into<Target>) -> Tween {
    Tween { target: Some(target.into()), ..Tween::default() }
}

#[derive(Debug)]
pub struct Tween {
    actions: Vec<Action>,
    /// Registration of the last `start`.
    final_action: Option<ActionId>,
    target: Option<Target>,
    tag: Tag,
}

impl Default for Tween {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            final_action: None,
            target: None,
            tag: TAG_INVALID,
        }
    }
}

impl Tween {
    /// A chain with no target yet, for use as a sub-chain or with a later
    /// [`target`](Self::target).
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn to(self, duration: f32, props: Props, opts: TweenOptions) -> Self {
        self.push(compose::tween_to(duration, props, opts))
    }

    /// Like [`to`](Self::to), with every value a delta from the start value.
    pub fn by(self, duration: f32, props: Props, opts: TweenOptions) -> Self {
        self.push(compose::tween_by(duration, props, opts))
    }

    pub fn set(self, props: Props) -> Self {
        self.push(compose::set(props))
    }

    pub fn delay(self, duration: f32) -> Self {
        self.push(compose::delay_time(duration))
    }

    pub fn call(self, f: impl Fn(Target, &mut dyn TweenHost) + 'static) -> Self {
        self.push(compose::call_func(f))
    }

    pub fn call_with<D: 'static>(self, data: D, f: impl Fn(Target, &D, &mut dyn TweenHost) + 'static) -> Self {
        self.push(compose::call_func_with(data, f))
    }

    /// Resolve the pending list into one action without consuming it.
    fn resolve(&self) -> Result<Action, CompositionError> {
        compose::sequence(self.actions.iter().cloned())
    }

    /// Resolve a consumed chain. Its own unbound leaves get its target.
    fn into_action(self) -> Result<Action, CompositionError> {
        let target = self.target;
        let mut action = compose::sequence(self.actions)?;
        if let Some(target) = target {
            action.bind_target(target);
        }
        Ok(action)
    }

    /// Append another chain as a single action.
    pub fn then(self, other: Tween) -> Self {
        match other.into_action() {
            Ok(action) => self.push(action),
            Err(e) => {
                log::warn!("tween: then: {e}");
                self
            }
        }
    }

    fn combine(
        self,
        chains: impl IntoIterator<Item = Tween>,
        op: &'static str,
        join: fn(Vec<Action>) -> Result<Action, CompositionError>,
    ) -> Self {
        let mut actions = Vec::new();
        for chain in chains {
            match chain.into_action() {
                Ok(action) => actions.push(action),
                Err(e) => log::warn!("tween: {op}: skipping chain: {e}"),
            }
        }
        match join(actions) {
            Ok(action) => self.push(action),
            Err(e) => {
                log::warn!("tween: {op}: {e}");
                self
            }
        }
    }

    /// Append the chains, run one after another.
    pub fn sequence(self, chains: impl IntoIterator<Item = Tween>) -> Self {
        self.combine(chains, "sequence", compose::sequence)
    }

    /// Append the chains, run side by side.
    pub fn parallel(self, chains: impl IntoIterator<Item = Tween>) -> Self {
        self.combine(chains, "parallel", compose::spawn)
    }

    /// Wrap the last pending action with `wrap`. A rejected operand is
    /// dropped: the chain comes out one action shorter.
    fn wrap_last(
        mut self,
        op: &'static str,
        wrap: impl FnOnce(Action) -> Result<Action, CompositionError>,
    ) -> Self {
        let Some(last) = self.actions.pop() else {
            log::warn!("tween: {op}: no action to wrap");
            return self;
        };
        match wrap(last) {
            Ok(action) => self.push(action),
            Err(e) => {
                log::warn!("tween: {op}: {e}, operand dropped");
                self
            }
        }
    }

    fn wrap_chain(
        self,
        op: &'static str,
        embed: Tween,
        wrap: impl FnOnce(Action) -> Result<Action, CompositionError>,
    ) -> Self {
        match embed.into_action().and_then(wrap) {
            Ok(action) => self.push(action),
            Err(e) => {
                log::warn!("tween: {op}: {e}");
                self
            }
        }
    }

    /// Repeat the last pending action `count` times.
    pub fn repeat(self, count: impl Into<RepeatCount>) -> Self {
        let count = count.into();
        if count == RepeatCount::Times(0) {
            log::warn!("tween: repeat: {}", CompositionError::ZeroRepeat);
            return self;
        }
        self.wrap_last("repeat", |a| compose::repeat(a, count))
    }

    /// Append `embed`, repeated `count` times.
    pub fn repeat_with(self, count: impl Into<RepeatCount>, embed: Tween) -> Self {
        let count = count.into();
        self.wrap_chain("repeat", embed, |a| compose::repeat(a, count))
    }

    pub fn repeat_forever(self) -> Self {
        self.wrap_last("repeatForever", compose::repeat_forever)
    }

    pub fn repeat_forever_with(self, embed: Tween) -> Self {
        self.wrap_chain("repeatForever", embed, compose::repeat_forever)
    }

    pub fn reverse_time(self) -> Self {
        self.wrap_last("reverseTime", compose::reverse_time)
    }

    pub fn reverse_time_with(self, embed: Tween) -> Self {
        self.wrap_chain("reverseTime", embed, compose::reverse_time)
    }

    /// Retarget the chain. Leaves that came from a sub-chain with its own
    /// target keep it.
    pub fn target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Collapse the pending list into a single action.
    pub fn union(mut self) -> Self {
        if self.actions.len() < 2 {
            return self;
        }
        match self.resolve() {
            Ok(action) => self.actions = vec![action],
            Err(e) => log::warn!("tween: union: {e}"),
        }
        self
    }

    /// Copy of this chain aimed at `target`. Shares no run state.
    pub fn clone_to(&self, target: impl Into<Target>) -> Tween {
        Tween {
            actions: self.actions.clone(),
            final_action: None,
            target: Some(target.into()),
            tag: self.tag,
        }
    }

    /// Register the chain with `manager`, replacing any earlier
    /// registration. Returns `None` when there is nothing to run.
    pub fn start(&mut self, manager: &mut ActionManager) -> Option<ActionId> {
        let Some(target) = self.target else {
            log::warn!("tween: start: chain has no target");
            return None;
        };
        self.stop(manager);
        let mut action = match self.resolve() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("tween: start: {e}");
                return None;
            }
        };
        action.set_tag(self.tag);
        let id = manager.add_action(action, target, false);
        self.final_action = Some(id);
        Some(id)
    }

    /// Cancel the registration of the last `start`, if any.
    pub fn stop(&mut self, manager: &mut ActionManager) {
        if let Some(id) = self.final_action.take() {
            manager.remove_action(id);
        }
    }

    fn node_only(self, action: impl FnOnce() -> Action) -> Self {
        match self.target {
            Some(target) if target.is_node() => self.push(action()),
            _ => self,
        }
    }

    pub fn show(self) -> Self {
        self.node_only(compose::show)
    }

    pub fn hide(self) -> Self {
        self.node_only(compose::hide)
    }

    /// Detach the node from its parent.
    pub fn remove_self(self) -> Self {
        self.node_only(|| compose::remove_self(false))
    }

    /// Destroy the node.
    pub fn destroy_self(self) -> Self {
        self.node_only(|| compose::remove_self(true))
    }

    pub fn stop_all(manager: &mut ActionManager) {
        manager.remove_all_actions();
    }

    pub fn stop_all_by_tag(manager: &mut ActionManager, tag: Tag, target: Option<Target>) {
        manager.remove_all_actions_by_tag(tag, target);
    }

    pub fn stop_all_by_target(manager: &mut ActionManager, target: Target) {
        manager.remove_all_actions_from_target(target);
    }

    pub fn current_target(&self) -> Option<Target> {
        self.target
    }

    pub fn current_tag(&self) -> Tag {
        self.tag
    }

    /// Registration of the last `start`, if still held.
    pub fn action_id(&self) -> Option<ActionId> {
        self.final_action
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Total duration of the pending list.
    pub fn duration(&self) -> f32 {
        self.actions.iter().map(Action::duration).sum()
    }
}
