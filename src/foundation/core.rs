use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 3D offset in block units, used by base layouts.
///
/// Deserializes from either `[x, y, z]` or `{ "x": .., "y": .., "z": .. }`; missing object fields
/// default to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl<'de> Deserialize<'de> for Vec3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 3]),
            Obj {
                #[serde(default)]
                x: f64,
                #[serde(default)]
                y: f64,
                #[serde(default)]
                z: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, z]) => Ok(Self { x, y, z }),
            Repr::Obj { x, y, z } => Ok(Self { x, y, z }),
        }
    }
}

/// Clamp an estimated duration into the non-negative finite range.
///
/// NaN, negative infinity and non-positive values become `0.0`; positive infinity saturates to
/// `f64::MAX`.
pub fn sanitize_secs(secs: f64) -> f64 {
    if secs == f64::INFINITY {
        f64::MAX
    } else if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

/// Convert sanitized seconds into a [`Duration`], saturating at [`Duration::MAX`].
pub fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(sanitize_secs(secs)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
