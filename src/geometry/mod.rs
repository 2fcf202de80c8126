//! Geometry consumed by the hull: the tangent-point generator and the
//! circle-inside-polygon predicate, behind the [`GeometryProvider`] trait.

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::circle::CircleQuery;
use crate::id_generator::CircleId;

pub mod polygon;
mod provider;
pub mod tangents;

pub use provider::TangentHullProvider;

/// A boundary vertex returned by the provider, tagged with the circle it lies on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentPoint {
    pub circle_id: CircleId,
    pub x: f32,
    pub y: f32,
}

impl TangentPoint {
    pub fn new(circle_id: CircleId, pos: Pos2) -> Self {
        Self {
            circle_id,
            x: pos.x,
            y: pos.y,
        }
    }

    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

/// Source of hull geometry.
///
/// Implementations must be deterministic for a fixed input and total: no
/// valid hull is reported as an empty sequence, never as a panic.
pub trait GeometryProvider: Send + Sync {
    /// Ordered cyclic tangent points wrapping `circles`. Input order carries
    /// no meaning; the provider picks the cyclic order.
    fn generate(&self, circles: &[CircleQuery]) -> Vec<TangentPoint>;

    /// Whether `circle` lies inside `polygon`, the flattened boundary of one
    /// hull. Degenerate polygons contain nothing.
    fn is_circle_inside_polygon(&self, circle: &CircleQuery, polygon: &[Pos2]) -> bool;
}
