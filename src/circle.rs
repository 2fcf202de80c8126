use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryProvider;
use crate::hull::Hull;
use crate::id_generator::CircleId;

/// A drawable circle. Mutated in place by drag and resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    id: CircleId,
    center: Pos2,
    radius: f32,
}

impl Circle {
    pub fn new(id: CircleId, center: Pos2, radius: f32) -> Self {
        Self {
            id,
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn id(&self) -> CircleId {
        self.id
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Disk test, boundary included
    pub fn contains(&self, pos: Pos2) -> bool {
        self.center.distance(pos) <= self.radius
    }
}

/// The two inner circles an outer circle carves its notch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotchPair {
    pub a: CircleId,
    pub b: CircleId,
}

impl NotchPair {
    pub fn involves(&self, id: CircleId) -> bool {
        self.a == id || self.b == id
    }
}

/// Whether a circle adds to or subtracts from its hull's extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircleRole {
    Inner,
    /// Shapes the boundary only once paired with two inner circles
    Outer { notch: Option<NotchPair> },
}

impl CircleRole {
    pub fn outer() -> Self {
        CircleRole::Outer { notch: None }
    }

    pub fn is_inner(&self) -> bool {
        matches!(self, CircleRole::Inner)
    }

    pub fn is_outer(&self) -> bool {
        matches!(self, CircleRole::Outer { .. })
    }

    pub fn notch(&self) -> Option<NotchPair> {
        match self {
            CircleRole::Inner => None,
            CircleRole::Outer { notch } => *notch,
        }
    }
}

/// Immutable snapshot handed to the geometry provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleQuery {
    pub id: CircleId,
    pub role: CircleRole,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl CircleQuery {
    pub fn center(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

/// A circle as a member of a hull, or of the scene's uncontained set.
///
/// `boundary_vertices` is derived data: the hull clears and refills it on
/// every draw, and it is never read back as a source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct HullCircle {
    circle: Circle,
    role: CircleRole,
    boundary_vertices: Vec<Pos2>,
}

impl HullCircle {
    pub fn new(circle: Circle, role: CircleRole) -> Self {
        Self {
            circle,
            role,
            boundary_vertices: Vec::new(),
        }
    }

    pub fn inner(circle: Circle) -> Self {
        Self::new(circle, CircleRole::Inner)
    }

    pub fn outer(circle: Circle) -> Self {
        Self::new(circle, CircleRole::outer())
    }

    pub fn id(&self) -> CircleId {
        self.circle.id()
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    pub fn circle_mut(&mut self) -> &mut Circle {
        &mut self.circle
    }

    pub fn role(&self) -> CircleRole {
        self.role
    }

    pub(crate) fn set_role(&mut self, role: CircleRole) {
        self.role = role;
    }

    /// Vertices of the current boundary path that came from this circle
    pub fn boundary_vertices(&self) -> &[Pos2] {
        &self.boundary_vertices
    }

    pub(crate) fn push_boundary_vertex(&mut self, vertex: Pos2) {
        self.boundary_vertices.push(vertex);
    }

    pub(crate) fn clear_boundary_vertices(&mut self) {
        self.boundary_vertices.clear();
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.circle.translate(delta);
        for vertex in &mut self.boundary_vertices {
            *vertex += delta;
        }
    }

    pub fn to_query(&self) -> CircleQuery {
        CircleQuery {
            id: self.circle.id(),
            role: self.role,
            x: self.circle.center().x,
            y: self.circle.center().y,
            radius: self.circle.radius(),
        }
    }

    /// Containment against the hull's current boundary. Fails closed: a hull
    /// without a path contains nothing and the provider is not consulted.
    pub fn is_inside(&self, hull: &Hull, provider: &dyn GeometryProvider) -> bool {
        match hull.boundary() {
            Some(polygon) => provider.is_circle_inside_polygon(&self.to_query(), polygon),
            None => false,
        }
    }
}
