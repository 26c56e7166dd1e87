// extensions/mod.rs
//
// Value types, easing curves and the fluent chain builder.
// The action core only depends on `value` and `easing`; `tween` is the
// convenience layer most callers use.

pub mod easing;
pub mod tween;
pub mod value;

pub use easing::{Easing, EasingFn, UnknownEasing, lerp, ease};
pub use tween::{tween, Tween};
pub use value::{Color, ProgressFn, Value, ValueKind};
