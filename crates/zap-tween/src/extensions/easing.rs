// extensions/easing.rs
//
// Pure easing functions for animation interpolation.
// No dependencies on actions or targets, just math.

use std::f32::consts::PI;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Named easing curve. Serialized with the camelCase curve names
/// (`"quadOut"`, `"bounceInOut"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Holds the start value until the end.
    Constant,
    /// Smoothstep.
    Smooth,
    /// Smootherstep.
    Fade,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    QuadOutIn,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    CubicOutIn,
    /// Very strong slow start.
    QuartIn,
    /// Very strong slow end.
    QuartOut,
    /// Very strong slow start and end.
    QuartInOut,
    QuartOutIn,
    QuintIn,
    QuintOut,
    QuintInOut,
    QuintOutIn,
    /// Sine wave easing (smooth).
    SineIn,
    SineOut,
    SineInOut,
    SineOutIn,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    ExpoOutIn,
    /// Circular arc.
    CircIn,
    CircOut,
    CircInOut,
    CircOutIn,
    /// Elastic spring.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    ElasticOutIn,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    BackOutIn,
    /// Bouncy finish.
    BounceIn,
    BounceOut,
    BounceInOut,
    BounceOutIn,
}

impl Easing {
    /// Every named curve, in declaration order.
    pub const ALL: [Easing; 44] = [
        Easing::Linear, Easing::Constant, Easing::Smooth, Easing::Fade,
        Easing::QuadIn, Easing::QuadOut, Easing::QuadInOut, Easing::QuadOutIn,
        Easing::CubicIn, Easing::CubicOut, Easing::CubicInOut, Easing::CubicOutIn,
        Easing::QuartIn, Easing::QuartOut, Easing::QuartInOut, Easing::QuartOutIn,
        Easing::QuintIn, Easing::QuintOut, Easing::QuintInOut, Easing::QuintOutIn,
        Easing::SineIn, Easing::SineOut, Easing::SineInOut, Easing::SineOutIn,
        Easing::ExpoIn, Easing::ExpoOut, Easing::ExpoInOut, Easing::ExpoOutIn,
        Easing::CircIn, Easing::CircOut, Easing::CircInOut, Easing::CircOutIn,
        Easing::ElasticIn, Easing::ElasticOut, Easing::ElasticInOut, Easing::ElasticOutIn,
        Easing::BackIn, Easing::BackOut, Easing::BackInOut, Easing::BackOutIn,
        Easing::BounceIn, Easing::BounceOut, Easing::BounceInOut, Easing::BounceOutIn,
    ];

    /// The camelCase name this curve is looked up by.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Constant => "constant",
            Easing::Smooth => "smooth",
            Easing::Fade => "fade",
            Easing::QuadIn => "quadIn",
            Easing::QuadOut => "quadOut",
            Easing::QuadInOut => "quadInOut",
            Easing::QuadOutIn => "quadOutIn",
            Easing::CubicIn => "cubicIn",
            Easing::CubicOut => "cubicOut",
            Easing::CubicInOut => "cubicInOut",
            Easing::CubicOutIn => "cubicOutIn",
            Easing::QuartIn => "quartIn",
            Easing::QuartOut => "quartOut",
            Easing::QuartInOut => "quartInOut",
            Easing::QuartOutIn => "quartOutIn",
            Easing::QuintIn => "quintIn",
            Easing::QuintOut => "quintOut",
            Easing::QuintInOut => "quintInOut",
            Easing::QuintOutIn => "quintOutIn",
            Easing::SineIn => "sineIn",
            Easing::SineOut => "sineOut",
            Easing::SineInOut => "sineInOut",
            Easing::SineOutIn => "sineOutIn",
            Easing::ExpoIn => "expoIn",
            Easing::ExpoOut => "expoOut",
            Easing::ExpoInOut => "expoInOut",
            Easing::ExpoOutIn => "expoOutIn",
            Easing::CircIn => "circIn",
            Easing::CircOut => "circOut",
            Easing::CircInOut => "circInOut",
            Easing::CircOutIn => "circOutIn",
            Easing::ElasticIn => "elasticIn",
            Easing::ElasticOut => "elasticOut",
            Easing::ElasticInOut => "elasticInOut",
            Easing::ElasticOutIn => "elasticOutIn",
            Easing::BackIn => "backIn",
            Easing::BackOut => "backOut",
            Easing::BackInOut => "backInOut",
            Easing::BackOutIn => "backOutIn",
            Easing::BounceIn => "bounceIn",
            Easing::BounceOut => "bounceOut",
            Easing::BounceInOut => "bounceInOut",
            Easing::BounceOutIn => "bounceOutIn",
        }
    }

    /// Look a curve up by name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Easing> {
        Easing::ALL.iter().copied().find(|e| e.name() == name)
    }

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Returns the eased value, also typically in [0, 1] (but can overshoot for Back/Elastic).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Constant => 0.0,
            Easing::Smooth => t * t * (3.0 - 2.0 * t),
            Easing::Fade => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => in_out(t, Easing::QuadIn),
            Easing::QuadOutIn => out_in(t, Easing::QuadIn),

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out(t, Easing::CubicIn),
            Easing::CubicOutIn => out_in(t, Easing::CubicIn),

            Easing::QuartIn => t * t * t * t,
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => in_out(t, Easing::QuartIn),
            Easing::QuartOutIn => out_in(t, Easing::QuartIn),

            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => in_out(t, Easing::QuintIn),
            Easing::QuintOutIn => out_in(t, Easing::QuintIn),

            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::SineOutIn => out_in(t, Easing::SineIn),

            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Easing::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::ExpoOutIn => out_in(t, Easing::ExpoIn),

            Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Easing::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::CircInOut => in_out(t, Easing::CircIn),
            Easing::CircOutIn => out_in(t, Easing::CircIn),

            Easing::ElasticIn => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            Easing::ElasticInOut => in_out(t, Easing::ElasticIn),
            Easing::ElasticOutIn => out_in(t, Easing::ElasticIn),

            Easing::BackIn => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::BackInOut => {
                const C1: f32 = 1.70158;
                const C2: f32 = C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }
            Easing::BackOutIn => out_in(t, Easing::BackIn),

            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => in_out(t, Easing::BounceIn),
            Easing::BounceOutIn => out_in(t, Easing::BounceIn),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown easing name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing `{0}`")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s).ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

/// Symmetric in-out built from an "in" curve.
#[inline]
fn in_out(t: f32, ease_in: Easing) -> f32 {
    if t < 0.5 {
        ease_in.apply(t * 2.0) / 2.0
    } else {
        1.0 - ease_in.apply((1.0 - t) * 2.0) / 2.0
    }
}

/// Out-in built from an "in" curve: fast in the middle, slow at both ends' centre.
#[inline]
fn out_in(t: f32, ease_in: Easing) -> f32 {
    if t < 0.5 {
        (1.0 - ease_in.apply(1.0 - t * 2.0)) / 2.0
    } else {
        ease_in.apply(t * 2.0 - 1.0) / 2.0 + 0.5
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Easing applied to a tween: a named curve or a caller closure.
#[derive(Clone)]
pub enum EasingFn {
    Named(Easing),
    Custom(Rc<dyn Fn(f32) -> f32>),
}

impl EasingFn {
    pub fn custom(f: impl Fn(f32) -> f32 + 'static) -> Self {
        EasingFn::Custom(Rc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            EasingFn::Named(e) => e.apply(t),
            EasingFn::Custom(f) => f(t),
        }
    }
}

impl From<Easing> for EasingFn {
    fn from(e: Easing) -> Self {
        EasingFn::Named(e)
    }
}

impl fmt::Debug for EasingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingFn::Named(e) => write!(f, "Named({e})"),
            EasingFn::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn quad_out_faster_start() {
        // QuadOut should be > 0.5 at t=0.5 (faster start, slower end)
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_overshoots() {
        let early = Easing::BackOut.apply(0.3);
        assert!(early > 0.3, "BackOut should overshoot");
    }

    #[test]
    fn curves_hit_endpoints() {
        for e in Easing::ALL {
            if e == Easing::Constant {
                continue;
            }
            assert!(e.apply(0.0).abs() < 1e-4, "{e} at 0 was {}", e.apply(0.0));
            assert!((e.apply(1.0) - 1.0).abs() < 1e-4, "{e} at 1 was {}", e.apply(1.0));
        }
    }

    #[test]
    fn names_round_trip() {
        for e in Easing::ALL {
            assert_eq!(e.name().parse::<Easing>(), Ok(e));
        }
        assert_eq!("bounceOut".parse::<Easing>(), Ok(Easing::BounceOut));
        assert!("wobble".parse::<Easing>().is_err());
    }

    #[test]
    fn serde_uses_curve_names() {
        let e: Easing = serde_json::from_str("\"sineInOut\"").unwrap();
        assert_eq!(e, Easing::SineInOut);
        assert_eq!(serde_json::to_string(&Easing::QuadOut).unwrap(), "\"quadOut\"");
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
