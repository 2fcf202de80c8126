#![allow(dead_code)]

use eframe_hull::circle::{Circle, CircleQuery, CircleRole, HullCircle};
use eframe_hull::geometry::{GeometryProvider, TangentPoint};
use eframe_hull::id_generator::CircleId;
use egui::Pos2;

/// Provider double: replays a fixed tangent sequence and a fixed
/// containment answer, so stitching can be checked against known input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    pub points: Vec<TangentPoint>,
    pub inside: bool,
}

impl ScriptedProvider {
    pub fn new(points: Vec<TangentPoint>) -> Self {
        Self { points, inside: false }
    }

    pub fn inside(mut self, inside: bool) -> Self {
        self.inside = inside;
        self
    }
}

impl GeometryProvider for ScriptedProvider {
    fn generate(&self, _circles: &[CircleQuery]) -> Vec<TangentPoint> {
        self.points.clone()
    }

    fn is_circle_inside_polygon(&self, _circle: &CircleQuery, polygon: &[Pos2]) -> bool {
        self.inside && polygon.len() >= 3
    }
}

pub fn point(id: u64, x: f32, y: f32) -> TangentPoint {
    TangentPoint::new(CircleId(id), Pos2::new(x, y))
}

pub fn inner(id: u64, x: f32, y: f32, radius: f32) -> HullCircle {
    HullCircle::inner(Circle::new(CircleId(id), Pos2::new(x, y), radius))
}

pub fn outer(id: u64, x: f32, y: f32, radius: f32) -> HullCircle {
    HullCircle::new(Circle::new(CircleId(id), Pos2::new(x, y), radius), CircleRole::outer())
}

/// Whether `part` appears in `whole` in order, not necessarily contiguously
pub fn is_subsequence(part: &[Pos2], whole: &[Pos2]) -> bool {
    let mut rest = whole.iter();
    part.iter().all(|p| rest.any(|w| w == p))
}
