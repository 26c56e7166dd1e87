// systems/action_manager.rs
//
// Scheduler for root action trees.
//
// Usage:
//   let mut actions = ActionManager::new();
//   let id = actions.add_action(tree, Target::Node(entity), false);
//   actions.update(dt, &mut scene);  // Steps every tree once, drops finished ones

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use crate::actions::action::Action;
use crate::api::config::TweenConfig;
use crate::api::host::TweenHost;
use crate::api::types::{ActionId, Tag, Target, TAG_INVALID};

#[derive(Debug)]
struct Entry {
    id: ActionId,
    target: Target,
    paused: bool,
    started: bool,
    action: Action,
}

/// Owns every running root tree and advances them in registration order.
#[derive(Debug, Default)]
pub struct ActionManager {
    entries: Vec<Entry>,
    next_id: u32,
    /// Trees that finished since the last drain.
    completed: Vec<ActionId>,
    config: TweenConfig,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

impl ActionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TweenConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale;
    }

    /// Register a tree against `target`. It starts on its first update.
    pub fn add_action(&mut self, action: Action, target: Target, paused: bool) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        log::debug!("actions: add {id:?} ({}, {:.3}s) on {target:?}", action.name(), action.duration());
        self.entries.push(Entry { id, target, paused, started: false, action });
        id
    }

    /// Stop and drop every entry matching `pred`. Returns how many went.
    fn remove_where(&mut self, mut pred: impl FnMut(&Entry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain_mut(|entry| {
            if !pred(entry) {
                return true;
            }
            entry.action.stop();
            log::debug!("actions: removed {:?} on {:?}", entry.id, entry.target);
            false
        });
        before - self.entries.len()
    }

    pub fn remove_action(&mut self, id: ActionId) -> bool {
        self.remove_where(|e| e.id == id) > 0
    }

    /// Remove the first tree on `target` tagged `tag`.
    pub fn remove_action_by_tag(&mut self, tag: Tag, target: Target) -> bool {
        if tag == TAG_INVALID {
            log::warn!("actions: remove_action_by_tag called with TAG_INVALID");
            return false;
        }
        let Some(idx) = self
            .entries
            .iter()
            .position(|e| e.target == target && e.action.tag() == tag)
        else {
            return false;
        };
        let mut entry = self.entries.remove(idx);
        entry.action.stop();
        true
    }

    pub fn remove_all_actions(&mut self) {
        self.remove_where(|_| true);
    }

    /// Remove every tree tagged `tag`, on `target` only when one is given.
    pub fn remove_all_actions_by_tag(&mut self, tag: Tag, target: Option<Target>) -> usize {
        if tag == TAG_INVALID {
            log::warn!("actions: remove_all_actions_by_tag called with TAG_INVALID");
            return 0;
        }
        self.remove_where(|e| e.action.tag() == tag && target.map_or(true, |t| e.target == t))
    }

    pub fn remove_all_actions_from_target(&mut self, target: Target) -> usize {
        self.remove_where(|e| e.target == target)
    }

    /// First tree on `target` tagged `tag`.
    pub fn get_action_by_tag(&self, tag: Tag, target: Target) -> Option<&Action> {
        if tag == TAG_INVALID {
            log::warn!("actions: get_action_by_tag called with TAG_INVALID");
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.target == target && e.action.tag() == tag)
            .map(|e| &e.action)
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.action)
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn set_paused(&mut self, id: ActionId, paused: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.paused = paused;
                true
            }
            None => false,
        }
    }

    pub fn pause(&mut self, id: ActionId) -> bool {
        self.set_paused(id, true)
    }

    pub fn resume(&mut self, id: ActionId) -> bool {
        self.set_paused(id, false)
    }

    pub fn is_paused(&self, id: ActionId) -> Option<bool> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.paused)
    }

    pub fn pause_target(&mut self, target: Target) {
        for entry in self.entries.iter_mut().filter(|e| e.target == target) {
            entry.paused = true;
        }
    }

    pub fn resume_target(&mut self, target: Target) {
        for entry in self.entries.iter_mut().filter(|e| e.target == target) {
            entry.paused = false;
        }
    }

    /// Pause everything. Returns the targets that had running trees, for
    /// a later `resume_targets`.
    pub fn pause_all(&mut self) -> Vec<Target> {
        let mut targets = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| !e.paused) {
            entry.paused = true;
            if !targets.contains(&entry.target) {
                targets.push(entry.target);
            }
        }
        targets
    }

    pub fn resume_targets(&mut self, targets: &[Target]) {
        for &target in targets {
            self.resume_target(target);
        }
    }

    pub fn number_of_running_actions_in_target(&self, target: Target) -> usize {
        self.entries.iter().filter(|e| e.target == target).count()
    }

    /// Step every unpaused tree once. Returns the number that completed.
    ///
    /// Finished trees are removed in the same tick and their ids queued for
    /// [`drain_completed`](Self::drain_completed). Trees whose target is
    /// gone from `host` are dropped without completing.
    pub fn update(&mut self, dt: f32, host: &mut dyn TweenHost) -> usize {
        debug_assert!(dt >= 0.0, "ActionManager::update with dt = {dt}");
        let dt = if dt >= 0.0 { dt * self.config.time_scale.max(0.0) } else { 0.0 };

        let Self { entries, completed, config, .. } = self;
        let before = completed.len();

        entries.retain_mut(|entry| {
            if entry.paused {
                return true;
            }
            if config.prune_missing_targets && !host.contains(entry.target) {
                log::debug!("actions: {:?} target {:?} is gone, dropped", entry.id, entry.target);
                entry.action.stop();
                return false;
            }

            let target = entry.target;
            let action = &mut entry.action;
            let started = &mut entry.started;
            let mut tick = || {
                if !*started {
                    *started = true;
                    action.start_with_target(Some(target), &mut *host);
                }
                action.step(dt, &mut *host);
            };
            if config.isolate_faults {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(tick)) {
                    log::error!(
                        "actions: {:?} on {:?} panicked: {}, dropped",
                        entry.id,
                        entry.target,
                        panic_message(&*payload)
                    );
                    return false;
                }
            } else {
                tick();
            }

            if entry.action.is_done() {
                entry.action.stop();
                completed.push(entry.id);
                return false;
            }
            true
        });

        completed.len() - before
    }

    /// Ids of trees that finished since the last call.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = ActionId> + '_ {
        self.completed.drain(..)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every tree without stopping it.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.completed.clear();
    }
}
