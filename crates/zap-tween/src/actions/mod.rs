// actions/mod.rs
//
// Action trees: the node type, its leaves and composites, and the
// functions that build them.

pub mod action;
pub mod compose;
pub mod instant;
pub mod interval;
pub mod tween_action;

pub use action::{Action, ActionKind, ActionState, PROGRESS_EPSILON};
pub use compose::{
    call_func, call_func_with, delay_time, hide, parallel, remove_self, repeat, repeat_forever,
    reverse_time, sequence, set, show, spawn, tween_by, tween_to, validate_sequence,
    CompositionError, RepeatCount,
};
pub use tween_action::{Props, TweenOptions};
