pub mod api;
pub mod core;
pub mod components;
pub mod actions;
pub mod systems;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::TweenConfig;
pub use api::host::{TweenHost, Tweenable};
pub use api::types::{ActionId, EntityId, ObjectId, Tag, Target, TAG_INVALID};
pub use components::bag::PropertyBag;
pub use components::entity::Entity;
pub use crate::core::scene::Scene;
pub use actions::{
    Action, ActionKind, ActionState, CompositionError, Props, RepeatCount, TweenOptions,
};
pub use systems::action_manager::ActionManager;

// Extensions
pub use extensions::{
    Easing, EasingFn, lerp, ease,
    Color, Value, ValueKind,
    tween, Tween,
};
