// actions/action.rs
//
// The action tree node. Every action kind shares the same timing state
// (duration, elapsed, first tick) and lifecycle; the kind decides what an
// update at progress `t` does.
//
// Roots are driven with `step(dt)`; composites drive their children with
// `update(t)` where `t` is the child's own progress in [0, 1].

use std::fmt;
use std::rc::Rc;
use crate::api::host::TweenHost;
use crate::api::types::{Tag, Target, TAG_INVALID};
use super::instant::{CallFunc, SetAction};
use super::interval::{Repeat, RepeatForever, ReverseTime, Sequence, Spawn};
use super::tween_action::TweenAction;

/// Progress this close to 1.0 counts as complete. Absorbs single-precision
/// drift when a whole number of ticks should exactly cover a duration.
pub const PROGRESS_EPSILON: f32 = 1e-5;

/// Callback receiving the effective target and the host, run synchronously
/// inside the step that triggers it.
pub type TargetCallback = Rc<dyn Fn(Target, &mut dyn TweenHost)>;

/// Per-update callback: target, raw progress, host.
pub type UpdateCallback = Rc<dyn Fn(Target, f32, &mut dyn TweenHost)>;

/// Callback fired when a running action is cancelled. Cancellation happens
/// outside a tick, so no host is available.
pub type StopCallback = Rc<dyn Fn(Target)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Built, never started.
    Created,
    /// Started and not yet at progress 1.
    Running,
    /// Reached progress 1 on its last update.
    Completed,
    /// Cancelled while running.
    Stopped,
}

/// The closed set of action kinds.
#[derive(Clone)]
pub enum ActionKind {
    /// Instant property assignment.
    Set(SetAction),
    /// Instant callback.
    Call(CallFunc),
    Show,
    Hide,
    RemoveSelf { destroy: bool },
    /// Property tween over the action's duration.
    Tween(TweenAction),
    /// Waits for the action's duration.
    Delay,
    Sequence(Sequence),
    Spawn(Spawn),
    Repeat(Repeat),
    RepeatForever(RepeatForever),
    ReverseTime(ReverseTime),
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Set(_) => "set",
            ActionKind::Call(_) => "call",
            ActionKind::Show => "show",
            ActionKind::Hide => "hide",
            ActionKind::RemoveSelf { destroy: false } => "removeSelf",
            ActionKind::RemoveSelf { destroy: true } => "destroySelf",
            ActionKind::Tween(_) => "tween",
            ActionKind::Delay => "delay",
            ActionKind::Sequence(_) => "sequence",
            ActionKind::Spawn(_) => "spawn",
            ActionKind::Repeat(_) => "repeat",
            ActionKind::RepeatForever(_) => "repeatForever",
            ActionKind::ReverseTime(_) => "reverseTime",
        }
    }

    fn is_composite(&self) -> bool {
        matches!(
            self,
            ActionKind::Sequence(_)
                | ActionKind::Spawn(_)
                | ActionKind::Repeat(_)
                | ActionKind::RepeatForever(_)
                | ActionKind::ReverseTime(_)
        )
    }
}

/// A node of an action tree.
///
/// Composite nodes own their children exclusively; `Clone` deep-copies the
/// whole tree. Only the callback closures are shared between copies.
#[derive(Clone)]
pub struct Action {
    kind: ActionKind,
    duration: f32,
    elapsed: f32,
    first_tick: bool,
    tag: Tag,
    /// Target this action was started against.
    target: Option<Target>,
    /// Explicit target bound at build time; wins over `target`.
    worker_target: Option<Target>,
    state: ActionState,
}

impl Action {
    pub(crate) fn new(kind: ActionKind, duration: f32) -> Self {
        Self {
            kind,
            duration,
            elapsed: 0.0,
            first_tick: true,
            tag: TAG_INVALID,
            target: None,
            worker_target: None,
            state: ActionState::Created,
        }
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Total duration in seconds. `f32::INFINITY` for repeat-forever nodes.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn worker_target(&self) -> Option<Target> {
        self.worker_target
    }

    /// The object this node mutates: its bound target, else the one it was started with.
    pub fn effective_target(&self) -> Option<Target> {
        self.worker_target.or(self.target)
    }

    /// Zero-duration action that completes on its first step.
    pub fn is_instant(&self) -> bool {
        matches!(
            self.kind,
            ActionKind::Set(_)
                | ActionKind::Call(_)
                | ActionKind::Show
                | ActionKind::Hide
                | ActionKind::RemoveSelf { .. }
        )
    }

    /// Whether the action has a finite duration.
    pub fn is_bounded(&self) -> bool {
        self.duration.is_finite()
    }

    /// Whether the last update reached completion. Repeat-forever nodes never finish.
    pub fn is_done(&self) -> bool {
        self.state == ActionState::Completed
    }

    /// Bind `target` to every leaf that has no explicit target yet.
    pub fn bind_target(&mut self, target: Target) {
        if !self.kind.is_composite() {
            if self.worker_target.is_none() {
                self.worker_target = Some(target);
            }
            return;
        }
        for child in self.children_mut() {
            child.bind_target(target);
        }
    }

    /// Direct children of a composite node.
    pub fn children(&self) -> Vec<&Action> {
        match &self.kind {
            ActionKind::Sequence(s) => s.actions().iter().collect(),
            ActionKind::Spawn(s) => s.actions().iter().collect(),
            ActionKind::Repeat(r) => vec![r.inner()],
            ActionKind::RepeatForever(r) => vec![r.inner()],
            ActionKind::ReverseTime(r) => vec![r.inner()],
            _ => Vec::new(),
        }
    }

    fn children_mut(&mut self) -> Vec<&mut Action> {
        match &mut self.kind {
            ActionKind::Sequence(s) => s.actions_mut().iter_mut().collect(),
            ActionKind::Spawn(s) => s.actions_mut().iter_mut().collect(),
            ActionKind::Repeat(r) => vec![r.inner_mut()],
            ActionKind::RepeatForever(r) => vec![r.inner_mut()],
            ActionKind::ReverseTime(r) => vec![r.inner_mut()],
            _ => Vec::new(),
        }
    }

    /// Reset timing and bind the run target. Tweens capture their start
    /// values here, from the effective target's current state.
    pub fn start_with_target(&mut self, target: Option<Target>, host: &mut dyn TweenHost) {
        self.target = target;
        self.elapsed = 0.0;
        self.first_tick = true;
        self.state = ActionState::Running;

        let effective = self.effective_target();
        let duration = self.duration;
        match &mut self.kind {
            ActionKind::Tween(tween) => tween.start(effective, host),
            ActionKind::Sequence(seq) => seq.start(duration),
            ActionKind::Spawn(spawn) => spawn.start(effective, host),
            ActionKind::Repeat(repeat) => repeat.start(effective, host),
            ActionKind::RepeatForever(forever) => forever.inner_mut().start_with_target(effective, host),
            ActionKind::ReverseTime(reverse) => reverse.inner_mut().start_with_target(effective, host),
            _ => {}
        }
    }

    /// Advance a root action by `dt` seconds.
    ///
    /// The first step after a start counts as zero elapsed time; later steps
    /// add `dt`. Zero-duration actions complete on their first step.
    pub fn step(&mut self, dt: f32, host: &mut dyn TweenHost) {
        if let ActionKind::RepeatForever(_) = self.kind {
            self.step_forever(dt, host);
            return;
        }

        if self.first_tick {
            self.first_tick = false;
            self.elapsed = 0.0;
        } else {
            self.elapsed += dt;
        }
        let t = self.progress();
        self.update(t, host);
    }

    /// Normalized progress of a step-driven action.
    pub fn progress(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            return 1.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 - PROGRESS_EPSILON { 1.0 } else { t }
    }

    /// Apply progress `t` in [0, 1].
    pub fn update(&mut self, t: f32, host: &mut dyn TweenHost) {
        let effective = self.effective_target();
        let duration = self.duration;
        match &mut self.kind {
            ActionKind::Set(set) => set.apply(effective, host),
            ActionKind::Call(call) => call.invoke(effective, host),
            ActionKind::Show => {
                if let Some(target) = effective {
                    host.set_visible(target, true);
                }
            }
            ActionKind::Hide => {
                if let Some(target) = effective {
                    host.set_visible(target, false);
                }
            }
            ActionKind::RemoveSelf { destroy } => {
                if let Some(target) = effective {
                    if *destroy {
                        host.destroy(target);
                    } else {
                        host.remove_from_parent(target);
                    }
                }
            }
            ActionKind::Tween(tween) => tween.update(t, effective, host),
            ActionKind::Delay => {}
            ActionKind::Sequence(seq) => seq.update(t, effective, host),
            ActionKind::Spawn(spawn) => spawn.update(t, duration, host),
            ActionKind::Repeat(repeat) => repeat.update(t, effective, host),
            // Unbounded: only driven through `step`.
            ActionKind::RepeatForever(_) => return,
            ActionKind::ReverseTime(reverse) => reverse.inner_mut().update(1.0 - t, host),
        }
        self.state = if t >= 1.0 { ActionState::Completed } else { ActionState::Running };
    }

    /// Cancel a running action. Running tweens get their `on_stop` callback;
    /// finished or never-started nodes are left alone.
    pub fn stop(&mut self) {
        if self.state != ActionState::Running {
            return;
        }
        let effective = self.effective_target();
        if let ActionKind::Tween(tween) = &mut self.kind {
            tween.stopped(effective);
        } else {
            for child in self.children_mut() {
                child.stop();
            }
        }
        self.state = ActionState::Stopped;
    }

    /// Continue a freshly restarted action from `elapsed` seconds in.
    pub(crate) fn resume_from(&mut self, elapsed: f32, host: &mut dyn TweenHost) {
        self.first_tick = false;
        self.elapsed = elapsed;
        let t = self.progress();
        self.update(t, host);
    }

    fn step_forever(&mut self, dt: f32, host: &mut dyn TweenHost) {
        let effective = self.effective_target();
        self.state = ActionState::Running;
        let ActionKind::RepeatForever(forever) = &mut self.kind else {
            return;
        };
        let inner = forever.inner_mut();
        inner.step(dt, host);
        if !inner.is_done() {
            return;
        }
        // At most one restart per step. Whole cycles of overshoot are dropped.
        let cycle = inner.duration();
        let over = (inner.elapsed() - cycle).max(0.0);
        let carry = if over.is_finite() { over % cycle } else { 0.0 };
        inner.start_with_target(effective, host);
        inner.resume_from(carry, host);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind.name())
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("tag", &self.tag)
            .field("target", &self.target)
            .field("worker_target", &self.worker_target)
            .field("state", &self.state)
            .field("children", &self.children())
            .finish()
    }
}
