use glam::{Quat, Vec3};
use crate::api::host::Tweenable;
use crate::api::types::EntityId;
use crate::extensions::value::{Color, Value};

/// Scene node: a single struct with the transform and appearance
/// properties tweens usually animate.
///
/// Tweenable properties: `position` (vec3), `scale` (vec3), `angle`
/// (float, degrees), `rotation` (quat), `color` (color), `opacity` (int, 0..=255).
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Whether this entity is visible/active.
    pub active: bool,
    /// Parent node, if attached to one.
    pub parent: Option<EntityId>,
    /// Position relative to the parent.
    pub position: Vec3,
    pub scale: Vec3,
    /// Z-axis rotation in degrees.
    pub angle: f32,
    pub rotation: Quat,
    pub color: Color,
    pub opacity: i32,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            active: true,
            parent: None,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            angle: 0.0,
            rotation: Quat::IDENTITY,
            color: Color::WHITE,
            opacity: 255,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl Tweenable for Entity {
    fn property(&self, name: &str) -> Option<Value> {
        let value = match name {
            "position" => Value::Vec3(self.position),
            "scale" => Value::Vec3(self.scale),
            "angle" => Value::Float(self.angle),
            "rotation" => Value::Quat(self.rotation),
            "color" => Value::Color(self.color),
            "opacity" => Value::Int(self.opacity),
            _ => return None,
        };
        Some(value)
    }

    fn set_property(&mut self, name: &str, value: Value) -> bool {
        match (name, value) {
            ("position", Value::Vec3(v)) => self.position = v,
            ("scale", Value::Vec3(v)) => self.scale = v,
            ("angle", Value::Float(v)) => self.angle = v,
            ("rotation", Value::Quat(v)) => self.rotation = v,
            ("color", Value::Color(v)) => self.color = v,
            ("opacity", Value::Int(v)) => self.opacity = v.clamp(0, 255),
            _ => return false,
        }
        true
    }
}
