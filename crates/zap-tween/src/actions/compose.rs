// actions/compose.rs
//
// Construction functions for action trees. Composites take their operands
// by value; callers clone first when they want to reuse an operand.

use thiserror::Error;
use crate::api::host::TweenHost;
use crate::api::types::Target;
use super::action::{Action, ActionKind};
use super::instant::{CallFunc, SetAction};
use super::interval::{Repeat, RepeatForever, ReverseTime, Sequence, Spawn};
use super::tween_action::{Props, TweenAction, TweenOptions};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("{op}: no actions to combine")]
    EmptyList { op: &'static str },
    #[error("{op}: operand must have a non-zero duration")]
    NotInterval { op: &'static str },
    #[error("{op}: operand repeats forever")]
    Unbounded { op: &'static str },
    #[error("repeat: count must be at least 1")]
    ZeroRepeat,
}

/// How many times `repeat` replays its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Times(u32),
    Forever,
}

impl From<u32> for RepeatCount {
    fn from(n: u32) -> Self {
        RepeatCount::Times(n)
    }
}

fn interval_duration(duration: f32, op: &'static str) -> f32 {
    if duration >= 0.0 {
        duration
    } else {
        log::warn!("{op}: invalid duration {duration}, using 0");
        0.0
    }
}

fn bounded(action: &Action, op: &'static str) -> Result<(), CompositionError> {
    if action.is_bounded() { Ok(()) } else { Err(CompositionError::Unbounded { op }) }
}

pub fn tween_to(duration: f32, props: Props, opts: TweenOptions) -> Action {
    let duration = interval_duration(duration, "to");
    Action::new(ActionKind::Tween(TweenAction::new(props, opts)), duration)
}

/// Tween whose property values are deltas added to the captured start.
pub fn tween_by(duration: f32, props: Props, mut opts: TweenOptions) -> Action {
    let duration = interval_duration(duration, "by");
    opts.relative = true;
    Action::new(ActionKind::Tween(TweenAction::new(props, opts)), duration)
}

pub fn set(props: Props) -> Action {
    Action::new(ActionKind::Set(SetAction::new(props)), 0.0)
}

pub fn delay_time(duration: f32) -> Action {
    Action::new(ActionKind::Delay, interval_duration(duration, "delay"))
}

pub fn call_func(f: impl Fn(Target, &mut dyn TweenHost) + 'static) -> Action {
    Action::new(ActionKind::Call(CallFunc::new(f)), 0.0)
}

pub fn call_func_with<D: 'static>(data: D, f: impl Fn(Target, &D, &mut dyn TweenHost) + 'static) -> Action {
    Action::new(ActionKind::Call(CallFunc::with_data(data, f)), 0.0)
}

pub fn show() -> Action {
    Action::new(ActionKind::Show, 0.0)
}

pub fn hide() -> Action {
    Action::new(ActionKind::Hide, 0.0)
}

/// Detach the target from its parent, or destroy it outright.
pub fn remove_self(destroy: bool) -> Action {
    Action::new(ActionKind::RemoveSelf { destroy }, 0.0)
}

/// Check that `actions` could be sequenced or spawned without consuming them.
/// Every operand of a multi-action list must be bounded.
pub fn validate_sequence(actions: &[Action], op: &'static str) -> Result<(), CompositionError> {
    if actions.is_empty() {
        return Err(CompositionError::EmptyList { op });
    }
    actions.iter().try_for_each(|a| bounded(a, op))
}

fn fold(
    actions: impl IntoIterator<Item = Action>,
    op: &'static str,
    join: impl Fn(Action, Action) -> Action,
) -> Result<Action, CompositionError> {
    let mut actions: Vec<Action> = actions.into_iter().collect();
    if actions.len() == 1 {
        return actions.pop().ok_or(CompositionError::EmptyList { op });
    }
    validate_sequence(&actions, op)?;
    let mut iter = actions.into_iter();
    let first = iter.next().ok_or(CompositionError::EmptyList { op })?;
    Ok(iter.fold(first, join))
}

/// Run actions back to back. A single action is returned as is; longer
/// lists fold left into binary sequence nodes.
pub fn sequence(actions: impl IntoIterator<Item = Action>) -> Result<Action, CompositionError> {
    fold(actions, "sequence", |a, b| {
        let duration = a.duration() + b.duration();
        Action::new(ActionKind::Sequence(Sequence::new(a, b)), duration)
    })
}

/// Run actions side by side; the result lasts as long as the longest one.
pub fn spawn(actions: impl IntoIterator<Item = Action>) -> Result<Action, CompositionError> {
    fold(actions, "spawn", |a, b| {
        let duration = a.duration().max(b.duration());
        Action::new(ActionKind::Spawn(Spawn::new(a, b)), duration)
    })
}

/// Alias of [`spawn`].
pub fn parallel(actions: impl IntoIterator<Item = Action>) -> Result<Action, CompositionError> {
    spawn(actions)
}

pub fn repeat(action: Action, count: impl Into<RepeatCount>) -> Result<Action, CompositionError> {
    match count.into() {
        RepeatCount::Forever => repeat_forever(action),
        RepeatCount::Times(0) => Err(CompositionError::ZeroRepeat),
        RepeatCount::Times(n) => {
            bounded(&action, "repeat")?;
            let duration = action.duration() * n as f32;
            Ok(Action::new(ActionKind::Repeat(Repeat::new(action, n)), duration))
        }
    }
}

pub fn repeat_forever(action: Action) -> Result<Action, CompositionError> {
    bounded(&action, "repeatForever")?;
    if action.is_instant() || action.duration() <= f32::EPSILON {
        return Err(CompositionError::NotInterval { op: "repeatForever" });
    }
    Ok(Action::new(ActionKind::RepeatForever(RepeatForever::new(action)), f32::INFINITY))
}

pub fn reverse_time(action: Action) -> Result<Action, CompositionError> {
    bounded(&action, "reverseTime")?;
    if action.is_instant() {
        return Err(CompositionError::NotInterval { op: "reverseTime" });
    }
    let duration = action.duration();
    Ok(Action::new(ActionKind::ReverseTime(ReverseTime::new(action)), duration))
}
