use serde::{Deserialize, Serialize};

use crate::error::HullResult;

pub const DEFAULT_ARC_RESOLUTION: usize = 128;
pub const MIN_CIRCLE_RADIUS: f32 = 10.0;
pub const MAX_CIRCLE_RADIUS: f32 = 200.0;
pub const DEFAULT_CIRCLE_RADIUS: f32 = 50.0;

/// Tunables for boundary construction and interaction.
///
/// Persisted by the app through `eframe::Storage`; every field falls back to
/// its default when missing from older stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Subdivisions per arc; an arc emits `arc_resolution + 1` vertices
    pub arc_resolution: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius given to circles created by double-click
    pub default_radius: f32,
    /// Members needed before a purely inner hull draws a boundary
    pub min_inner_circles: usize,
    /// Members needed once an outer circle takes part
    pub min_circles_with_outer: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            arc_resolution: DEFAULT_ARC_RESOLUTION,
            min_radius: MIN_CIRCLE_RADIUS,
            max_radius: MAX_CIRCLE_RADIUS,
            default_radius: DEFAULT_CIRCLE_RADIUS,
            min_inner_circles: 3,
            min_circles_with_outer: 2,
        }
    }
}

impl EditorConfig {
    /// Clamp values that would break drawing or radius clamping
    pub fn validated(mut self) -> Self {
        self.arc_resolution = self.arc_resolution.max(1);

        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            self.min_radius = MIN_CIRCLE_RADIUS;
        }
        if !self.max_radius.is_finite() || self.max_radius < self.min_radius {
            self.max_radius = self.min_radius.max(MAX_CIRCLE_RADIUS);
        }
        if !self.default_radius.is_finite() {
            self.default_radius = DEFAULT_CIRCLE_RADIUS;
        }
        self.default_radius = self.clamp_radius(self.default_radius);

        self.min_inner_circles = self.min_inner_circles.max(1);
        self.min_circles_with_outer = self.min_circles_with_outer.max(1);
        self
    }

    /// Same ordering as `min(max(r, min), max)`, never panics on NaN
    pub fn clamp_radius(&self, radius: f32) -> f32 {
        radius.max(self.min_radius).min(self.max_radius)
    }

    pub fn from_json(json: &str) -> HullResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn to_json(&self) -> HullResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.arc_resolution, 128);
        assert_eq!(config.min_radius, 10.0);
        assert_eq!(config.max_radius, 200.0);
        assert_eq!(config.min_inner_circles, 3);
        assert_eq!(config.min_circles_with_outer, 2);
    }

    #[test]
    fn test_clamp_radius() {
        let config = EditorConfig::default();
        assert_eq!(config.clamp_radius(5.0), 10.0);
        assert_eq!(config.clamp_radius(75.0), 75.0);
        assert_eq!(config.clamp_radius(500.0), 200.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = EditorConfig::from_json(r#"{ "arc_resolution": 16 }"#).unwrap();
        assert_eq!(config.arc_resolution, 16);
        assert_eq!(config.default_radius, DEFAULT_CIRCLE_RADIUS);
    }

    #[test]
    fn test_validated_repairs_nonsense() {
        let config = EditorConfig {
            arc_resolution: 0,
            min_radius: -3.0,
            max_radius: 1.0,
            default_radius: 1000.0,
            min_inner_circles: 0,
            min_circles_with_outer: 0,
        }
        .validated();

        assert_eq!(config.arc_resolution, 1);
        assert_eq!(config.min_radius, MIN_CIRCLE_RADIUS);
        assert!(config.max_radius >= config.min_radius);
        assert!(config.default_radius <= config.max_radius);
        assert_eq!(config.min_inner_circles, 1);
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let config = EditorConfig {
            arc_resolution: 64,
            ..EditorConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
