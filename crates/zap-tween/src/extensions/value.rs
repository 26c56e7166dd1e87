// extensions/value.rs
//
// Tweenable value kinds and their per-component interpolation.
// A property is animated by applying a scalar progress function to every
// component of its start/end/current values.

use std::fmt;
use std::rc::Rc;
use glam::{Quat, Vec2, Vec3, Vec4};
use super::easing::lerp;

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn to_array(self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, self.a as f32]
    }

    fn from_array(c: [f32; 4]) -> Self {
        let ch = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Self::new(ch(c[0]), ch(c[1]), ch(c[2]), ch(c[3]))
    }
}

/// Custom interpolation applied per component: `(start, end, current, t) -> value`.
pub type ProgressFn = Rc<dyn Fn(f32, f32, f32, f32) -> f32>;

/// Discriminant of a [`Value`], used for type checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Quat,
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Vec2 => "vec2",
            ValueKind::Vec3 => "vec3",
            ValueKind::Vec4 => "vec4",
            ValueKind::Quat => "quat",
            ValueKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// A property value a tween can read, write and interpolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    /// Integer-valued property (opacity, integer angle). Interpolated in
    /// float space and rounded on write.
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    Color(Color),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
            Value::Color(_) => ValueKind::Color,
        }
    }

    pub fn same_kind(&self, other: &Value) -> bool {
        self.kind() == other.kind()
    }

    /// Component-wise sum, used to turn a relative delta into an end value.
    /// Returns `None` when the kinds differ.
    pub fn add(&self, delta: &Value) -> Option<Value> {
        let sum = match (self, delta) {
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            (Value::Int(a), Value::Int(b)) => Value::Int(a.saturating_add(*b)),
            (Value::Vec2(a), Value::Vec2(b)) => Value::Vec2(*a + *b),
            (Value::Vec3(a), Value::Vec3(b)) => Value::Vec3(*a + *b),
            (Value::Vec4(a), Value::Vec4(b)) => Value::Vec4(*a + *b),
            (Value::Quat(a), Value::Quat(b)) => Value::Quat(*a + *b),
            (Value::Color(a), Value::Color(b)) => Value::Color(Color::new(
                a.r.saturating_add(b.r),
                a.g.saturating_add(b.g),
                a.b.saturating_add(b.b),
                a.a.saturating_add(b.a),
            )),
            _ => return None,
        };
        Some(sum)
    }

    /// Interpolate between `start` and `end` at eased progress `t`.
    ///
    /// With no custom `progress` the components are lerped (quaternions are
    /// slerped). A custom function is applied to every component and a
    /// resulting quaternion is re-normalised. Returns `None` when the three
    /// values are not all of the same kind.
    pub fn interpolate(
        start: &Value,
        end: &Value,
        current: &Value,
        t: f32,
        progress: Option<&ProgressFn>,
    ) -> Option<Value> {
        let f = |s: f32, e: f32, c: f32| match progress {
            Some(p) => p(s, e, c, t),
            None => lerp(s, e, t),
        };
        let value = match (start, end, current) {
            (Value::Float(s), Value::Float(e), Value::Float(c)) => Value::Float(f(*s, *e, *c)),
            (Value::Int(s), Value::Int(e), Value::Int(c)) => {
                Value::Int(f(*s as f32, *e as f32, *c as f32).round() as i32)
            }
            (Value::Vec2(s), Value::Vec2(e), Value::Vec2(c)) => {
                Value::Vec2(Vec2::new(f(s.x, e.x, c.x), f(s.y, e.y, c.y)))
            }
            (Value::Vec3(s), Value::Vec3(e), Value::Vec3(c)) => Value::Vec3(Vec3::new(
                f(s.x, e.x, c.x),
                f(s.y, e.y, c.y),
                f(s.z, e.z, c.z),
            )),
            (Value::Vec4(s), Value::Vec4(e), Value::Vec4(c)) => Value::Vec4(Vec4::new(
                f(s.x, e.x, c.x),
                f(s.y, e.y, c.y),
                f(s.z, e.z, c.z),
                f(s.w, e.w, c.w),
            )),
            (Value::Quat(s), Value::Quat(e), Value::Quat(c)) => match progress {
                None => Value::Quat(s.slerp(*e, t)),
                Some(_) => {
                    let q = Quat::from_xyzw(
                        f(s.x, e.x, c.x),
                        f(s.y, e.y, c.y),
                        f(s.z, e.z, c.z),
                        f(s.w, e.w, c.w),
                    );
                    Value::Quat(if q.length_squared() > 0.0 { q.normalize() } else { *c })
                }
            },
            (Value::Color(s), Value::Color(e), Value::Color(c)) => {
                let (s, e, c) = (s.to_array(), e.to_array(), c.to_array());
                Value::Color(Color::from_array([
                    f(s[0], e[0], c[0]),
                    f(s[1], e[1], c[1]),
                    f(s[2], e[2], c[2]),
                    f(s[3], e[3], c[3]),
                ]))
            }
            _ => return None,
        };
        Some(value)
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vec4> {
        match self {
            Value::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<Quat> {
        match self {
            Value::Quat(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vec2(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<Vec4> for Value {
    fn from(v: Vec4) -> Self {
        Value::Vec4(v)
    }
}

impl From<Quat> for Value {
    fn from(v: Quat) -> Self {
        Value::Quat(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerps_vec3_components() {
        let s = Value::Vec3(Vec3::ZERO);
        let e = Value::Vec3(Vec3::new(100.0, 50.0, -10.0));
        let v = Value::interpolate(&s, &e, &s, 0.5, None).unwrap();
        assert_eq!(v, Value::Vec3(Vec3::new(50.0, 25.0, -5.0)));
    }

    #[test]
    fn int_and_color_round() {
        let v = Value::interpolate(&Value::Int(0), &Value::Int(255), &Value::Int(0), 0.5, None);
        assert_eq!(v, Some(Value::Int(128)));

        let s = Value::Color(Color::WHITE);
        let e = Value::Color(Color::TRANSPARENT);
        let c = Value::interpolate(&s, &e, &s, 1.0, None).unwrap();
        assert_eq!(c, Value::Color(Color::TRANSPARENT));
    }

    #[test]
    fn mismatched_kinds_are_rejected() {
        let v = Value::interpolate(&Value::Float(0.0), &Value::Int(1), &Value::Float(0.0), 0.5, None);
        assert!(v.is_none());
        assert!(Value::Float(1.0).add(&Value::Vec2(Vec2::ONE)).is_none());
    }

    #[test]
    fn custom_progress_sees_current() {
        let step: ProgressFn = Rc::new(|s, e, _c, t| if t < 0.5 { s } else { e });
        let v = Value::interpolate(&Value::Float(1.0), &Value::Float(9.0), &Value::Float(1.0), 0.4, Some(&step));
        assert_eq!(v, Some(Value::Float(1.0)));
        let v = Value::interpolate(&Value::Float(1.0), &Value::Float(9.0), &Value::Float(1.0), 0.6, Some(&step));
        assert_eq!(v, Some(Value::Float(9.0)));
    }

    #[test]
    fn relative_color_saturates() {
        let a = Value::Color(Color::new(250, 10, 0, 255));
        let sum = a.add(&Value::Color(Color::new(10, 10, 0, 10))).unwrap();
        assert_eq!(sum, Value::Color(Color::new(255, 20, 0, 255)));
    }
}
