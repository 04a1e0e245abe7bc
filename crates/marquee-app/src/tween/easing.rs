use std::fmt;

use serde::{Deserialize, Serialize};

/// Easing curves understood by the tween engine.
///
/// Names follow the `family.direction` convention used by the site's
/// stylesheets, so `power1.inOut` round-trips through config files as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "linear", alias = "none")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[default]
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to 0..=1) onto the curve.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power1InOut => in_out(t, 2),
            Easing::Power2InOut => in_out(t, 3),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Power1In => "power1.in",
            Easing::Power1Out => "power1.out",
            Easing::Power1InOut => "power1.inOut",
            Easing::Power2InOut => "power2.inOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Symmetric polynomial ease of the given exponent.
fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        0.5 * (2.0 * t).powi(power)
    } else {
        1.0 - 0.5 * (2.0 * (1.0 - t)).powi(power)
    }
}
