// actions/interval.rs
//
// Composite nodes. Each one owns its children and maps its own progress
// onto theirs; timing state (elapsed, first tick) lives on the enclosing
// Action.

use crate::api::host::TweenHost;
use crate::api::types::Target;
use super::action::{Action, PROGRESS_EPSILON};

fn snap(t: f32) -> f32 {
    if t >= 1.0 - PROGRESS_EPSILON { 1.0 } else { t.max(0.0) }
}

/// Two actions back to back.
#[derive(Clone)]
pub struct Sequence {
    actions: Box<[Action; 2]>,
    /// First child's share of the total duration.
    split: f32,
    /// Child updated on the previous call.
    last: Option<usize>,
    /// Children started since the sequence itself started.
    entered: [bool; 2],
}

impl Sequence {
    pub(crate) fn new(first: Action, second: Action) -> Self {
        Self {
            actions: Box::new([first, second]),
            split: 0.0,
            last: None,
            entered: [false; 2],
        }
    }

    pub fn actions(&self) -> &[Action; 2] {
        &self.actions
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action; 2] {
        &mut self.actions
    }

    pub(crate) fn start(&mut self, duration: f32) {
        self.split = if duration > 0.0 { self.actions[0].duration() / duration } else { 0.0 };
        self.last = None;
        self.entered = [false; 2];
    }

    fn enter(&mut self, index: usize, target: Option<Target>, host: &mut dyn TweenHost) {
        if !self.entered[index] {
            self.entered[index] = true;
            self.actions[index].start_with_target(target, host);
        }
    }

    pub(crate) fn update(&mut self, t: f32, target: Option<Target>, host: &mut dyn TweenHost) {
        let split = self.split;
        let (found, local) = if t < split {
            (0, if split > 0.0 { t / split } else { 1.0 })
        } else {
            (1, if split >= 1.0 { 1.0 } else { (t - split) / (1.0 - split) })
        };
        let local = snap(local);

        if found == 1 {
            // Finish the first child before the second one starts, even
            // when a single tick jumps straight past it.
            if self.last != Some(1) {
                self.enter(0, target, host);
                if !self.actions[0].is_done() {
                    self.actions[0].update(1.0, host);
                }
            }
        } else if self.last == Some(1) {
            // Driven backwards across the boundary.
            self.actions[1].update(0.0, host);
        }

        if self.last == Some(found) && self.actions[found].is_done() && local >= 1.0 {
            return;
        }
        self.enter(found, target, host);
        self.actions[found].update(local, host);
        self.last = Some(found);
    }
}

/// Two actions side by side. The shorter one holds its final state until
/// the longer one finishes.
#[derive(Clone)]
pub struct Spawn {
    actions: Box<[Action; 2]>,
}

impl Spawn {
    pub(crate) fn new(first: Action, second: Action) -> Self {
        Self { actions: Box::new([first, second]) }
    }

    pub fn actions(&self) -> &[Action; 2] {
        &self.actions
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action; 2] {
        &mut self.actions
    }

    pub(crate) fn start(&mut self, target: Option<Target>, host: &mut dyn TweenHost) {
        for child in self.actions.iter_mut() {
            child.start_with_target(target, host);
        }
    }

    pub(crate) fn update(&mut self, t: f32, duration: f32, host: &mut dyn TweenHost) {
        for child in self.actions.iter_mut() {
            let local = if child.duration() <= f32::EPSILON {
                1.0
            } else {
                snap((t * duration / child.duration()).min(1.0))
            };
            if child.is_done() && local >= 1.0 {
                continue;
            }
            child.update(local, host);
        }
    }
}

/// Replays its inner action a fixed number of times.
#[derive(Clone)]
pub struct Repeat {
    inner: Box<Action>,
    times: u32,
    /// Cycles completed since start.
    total: u32,
}

impl Repeat {
    pub(crate) fn new(inner: Action, times: u32) -> Self {
        Self { inner: Box::new(inner), times, total: 0 }
    }

    pub fn inner(&self) -> &Action {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Action {
        &mut self.inner
    }

    pub fn times(&self) -> u32 {
        self.times
    }

    pub fn completed_cycles(&self) -> u32 {
        self.total
    }

    pub(crate) fn start(&mut self, target: Option<Target>, host: &mut dyn TweenHost) {
        self.total = 0;
        self.inner.start_with_target(target, host);
    }

    pub(crate) fn update(&mut self, t: f32, target: Option<Target>, host: &mut dyn TweenHost) {
        let times = self.times as f32;
        let cycles = if t >= 1.0 { times } else { t * times };

        if cycles + PROGRESS_EPSILON < self.total as f32 {
            // Driven backwards: replay within the current cycle, no cycle
            // bookkeeping.
            self.inner.update(cycles.fract(), host);
            return;
        }

        while self.total < self.times && cycles + PROGRESS_EPSILON >= (self.total + 1) as f32 {
            self.inner.update(1.0, host);
            self.total += 1;
            if self.total < self.times {
                self.inner.stop();
                // Restart re-captures start values from the current state.
                self.inner.start_with_target(target, host);
            }
        }

        if self.total < self.times {
            let frac = (cycles - self.total as f32).clamp(0.0, 1.0);
            self.inner.update(frac, host);
        }
    }
}

/// Replays its inner action until stopped. Only ever a root.
#[derive(Clone)]
pub struct RepeatForever {
    inner: Box<Action>,
}

impl RepeatForever {
    pub(crate) fn new(inner: Action) -> Self {
        Self { inner: Box::new(inner) }
    }

    pub fn inner(&self) -> &Action {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Action {
        &mut self.inner
    }
}

/// Plays its inner action backwards.
#[derive(Clone)]
pub struct ReverseTime {
    inner: Box<Action>,
}

impl ReverseTime {
    pub(crate) fn new(inner: Action) -> Self {
        Self { inner: Box::new(inner) }
    }

    pub fn inner(&self) -> &Action {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Action {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use glam::Vec3;
    use crate::actions::action::{ActionKind, ActionState};
    use crate::actions::compose::{delay_time, repeat, repeat_forever, reverse_time, sequence, set, spawn, tween_by, tween_to};
    use crate::actions::tween_action::{Props, TweenOptions};
    use crate::api::types::{EntityId, Target};
    use crate::components::entity::Entity;
    use crate::core::scene::Scene;
    use super::*;

    const NODE: Target = Target::Node(EntityId(1));

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)));
        scene
    }

    fn angle(scene: &Scene) -> f32 {
        scene.get(EntityId(1)).unwrap().angle
    }

    fn run(action: &mut Action, scene: &mut Scene, dts: &[f32]) {
        action.start_with_target(Some(NODE), scene);
        for &dt in dts {
            action.step(dt, scene);
        }
    }

    fn to_angle(duration: f32, value: f32) -> Action {
        tween_to(duration, Props::new().with("angle", value), TweenOptions::new())
    }

    #[test]
    fn sequence_carries_leftover_into_second_child() {
        let mut scene = scene();
        let mut seq = sequence([
            tween_to(1.0, Props::new().with("position", Vec3::new(100.0, 0.0, 0.0)), TweenOptions::new()),
            to_angle(1.0, 90.0),
        ])
        .unwrap();

        run(&mut seq, &mut scene, &[0.0, 1.5]);
        let e = scene.get(EntityId(1)).unwrap();
        assert_eq!(e.position.x, 100.0);
        assert!((e.angle - 45.0).abs() < 1e-4);

        seq.step(0.5, &mut scene);
        assert!(seq.is_done());
        assert_eq!(angle(&scene), 90.0);
    }

    #[test]
    fn sequence_single_tick_finishes_both_children() {
        let mut scene = scene();
        let done = Rc::new(Cell::new(0));
        let d = done.clone();
        let first = tween_to(
            0.5,
            Props::new().with("scale", Vec3::splat(2.0)),
            TweenOptions::new().on_complete(move |_, _| d.set(d.get() + 1)),
        );
        let mut seq = sequence([first, to_angle(0.5, 30.0)]).unwrap();
        run(&mut seq, &mut scene, &[0.0, 5.0]);
        assert!(seq.is_done());
        assert_eq!(done.get(), 1);
        assert_eq!(scene.get(EntityId(1)).unwrap().scale, Vec3::splat(2.0));
        assert_eq!(angle(&scene), 30.0);
    }

    #[test]
    fn spawn_holds_short_child() {
        let mut scene = scene();
        let done = Rc::new(Cell::new(0));
        let d = done.clone();
        let short = tween_to(
            0.5,
            Props::new().with("scale", Vec3::splat(3.0)),
            TweenOptions::new().on_complete(move |_, _| d.set(d.get() + 1)),
        );
        let mut par = spawn([short, to_angle(2.0, 100.0)]).unwrap();
        assert_eq!(par.duration(), 2.0);

        run(&mut par, &mut scene, &[0.0, 1.0]);
        assert_eq!(scene.get(EntityId(1)).unwrap().scale, Vec3::splat(3.0));
        assert!((angle(&scene) - 50.0).abs() < 1e-4);

        par.step(1.0, &mut scene);
        assert!(par.is_done());
        assert_eq!(done.get(), 1);
        assert_eq!(angle(&scene), 100.0);
    }

    #[test]
    fn repeat_recaptures_relative_start() {
        let mut scene = scene();
        let mut rep = repeat(tween_by(1.0, Props::new().with("angle", 10.0_f32), TweenOptions::new()), 3).unwrap();
        run(&mut rep, &mut scene, &[0.0, 1.0, 1.0, 0.5]);
        assert!((angle(&scene) - 25.0).abs() < 1e-4);
        rep.step(0.5, &mut scene);
        assert!(rep.is_done());
        assert!((angle(&scene) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn repeat_fires_inner_complete_per_cycle() {
        let mut scene = scene();
        let cycles = Rc::new(Cell::new(0));
        let c = cycles.clone();
        let inner = tween_to(
            0.25,
            Props::new().with("angle", 45.0_f32),
            TweenOptions::new().on_complete(move |_, _| c.set(c.get() + 1)),
        );
        let mut rep = repeat(inner, 4).unwrap();
        let mut dts = vec![0.0];
        dts.extend(std::iter::repeat(0.1).take(10));
        run(&mut rep, &mut scene, &dts);
        assert!(rep.is_done());
        assert_eq!(cycles.get(), 4);

        let ActionKind::Repeat(r) = rep.kind() else { panic!("not a repeat") };
        assert_eq!(r.completed_cycles(), 4);
    }

    #[test]
    fn repeat_forever_carries_overshoot() {
        let mut scene = scene();
        let mut forever = repeat_forever(tween_by(1.0, Props::new().with("angle", 10.0_f32), TweenOptions::new())).unwrap();
        assert_eq!(forever.duration(), f32::INFINITY);

        run(&mut forever, &mut scene, &[0.0, 0.75, 0.75, 0.75, 0.75]);
        assert!(!forever.is_done());
        assert!((angle(&scene) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn repeat_forever_restarts_once_on_huge_step() {
        let mut scene = scene();
        let cycles = Rc::new(Cell::new(0));
        let c = cycles.clone();
        let inner = tween_by(
            0.5,
            Props::new().with("angle", 1.0_f32),
            TweenOptions::new().on_complete(move |_, _| c.set(c.get() + 1)),
        );
        let mut forever = repeat_forever(inner).unwrap();

        run(&mut forever, &mut scene, &[0.0, 1.0e9]);
        assert!(!forever.is_done());
        assert_eq!(cycles.get(), 1);
        assert!((angle(&scene) - 1.0).abs() < 1e-4);

        forever.step(0.25, &mut scene);
        assert!((angle(&scene) - 1.5).abs() < 1e-4);

        forever.step(f32::INFINITY, &mut scene);
        assert_eq!(cycles.get(), 2);
        assert!(angle(&scene).is_finite());
    }

    #[test]
    fn reverse_over_repeat_replays_each_cycle() {
        let mut scene = scene();
        let cycle = sequence([set(Props::new().with("angle", 0.0_f32)), to_angle(1.0, 90.0)]).unwrap();
        let mut rev = reverse_time(repeat(cycle, 2).unwrap()).unwrap();
        assert_eq!(rev.duration(), 2.0);

        run(&mut rev, &mut scene, &[0.0]);
        assert_eq!(angle(&scene), 90.0);
        rev.step(0.5, &mut scene);
        assert!((angle(&scene) - 45.0).abs() < 1e-4, "angle = {}", angle(&scene));
        rev.step(1.0, &mut scene);
        assert!((angle(&scene) - 45.0).abs() < 1e-4, "angle = {}", angle(&scene));
        rev.step(0.5, &mut scene);
        assert!(rev.is_done());
        assert!(angle(&scene).abs() < 1e-4);

        let ActionKind::ReverseTime(r) = rev.kind() else { panic!("not a reverse") };
        let ActionKind::Repeat(inner) = r.inner().kind() else { panic!("not a repeat") };
        assert_eq!(inner.completed_cycles(), 2);
    }

    #[test]
    fn reverse_time_runs_backwards() {
        let mut scene = scene();
        let seq = sequence([delay_time(1.0), to_angle(1.0, 80.0)]).unwrap();
        let mut rev = reverse_time(seq).unwrap();

        // Reversed, the tween plays back from its end value before the delay.
        run(&mut rev, &mut scene, &[0.0]);
        assert_eq!(angle(&scene), 80.0);
        rev.step(0.5, &mut scene);
        assert!((angle(&scene) - 40.0).abs() < 1e-4);
        rev.step(1.5, &mut scene);
        assert!(rev.is_done());
        assert!(angle(&scene).abs() < 1e-4);
    }

    #[test]
    fn stop_reaches_running_tweens_only() {
        let mut scene = scene();
        let stops = Rc::new(Cell::new(0));
        let (a, b) = (stops.clone(), stops.clone());
        let first = tween_to(0.5, Props::new().with("angle", 1.0_f32), TweenOptions::new().on_stop(move |_| a.set(a.get() + 1)));
        let second = tween_to(0.5, Props::new().with("angle", 2.0_f32), TweenOptions::new().on_stop(move |_| b.set(b.get() + 10)));
        let mut seq = sequence([first, second]).unwrap();
        run(&mut seq, &mut scene, &[0.0, 0.75]);
        seq.stop();
        assert_eq!(seq.state(), ActionState::Stopped);
        assert_eq!(stops.get(), 10);
    }
}
