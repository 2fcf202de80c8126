use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

use egui::{Pos2, Vec2};
use log::{debug, warn};

use crate::circle::{CircleQuery, CircleRole, HullCircle};
use crate::config::EditorConfig;
use crate::geometry::GeometryProvider;
use crate::geometry::polygon::polygon_contains;
use crate::id_generator::{CircleId, HullId};

/// The stitched boundary of one hull. The last vertex connects back to the
/// first when `closed` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct HullPath {
    vertices: Vec<Pos2>,
    closed: bool,
}

impl HullPath {
    pub fn vertices(&self) -> &[Pos2] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }
}

/// A group of circles and the single closed boundary wrapping them.
///
/// Members are kept in a `BTreeMap` so iteration order, and therefore the
/// snapshot handed to the provider, is stable between draws.
#[derive(Debug, Clone)]
pub struct Hull {
    id: HullId,
    circles: BTreeMap<CircleId, HullCircle>,
    path: Option<HullPath>,
    // Total rigid displacement applied by hull drags
    translation: Vec2,
}

impl Hull {
    pub fn new(id: HullId) -> Self {
        Self {
            id,
            circles: BTreeMap::new(),
            path: None,
            translation: Vec2::ZERO,
        }
    }

    pub fn id(&self) -> HullId {
        self.id
    }

    /// Adds a member. Replaces any previous member with the same id.
    pub fn add_circle(&mut self, circle: HullCircle) {
        debug!("{} gains {} ({:?})", self.id, circle.id(), circle.role());
        self.circles.insert(circle.id(), circle);
    }

    /// Removes a member and returns it with its boundary vertices cleared.
    ///
    /// The boundary is erased since it may still run over the removed
    /// circle, and every notch pairing that names it is dropped.
    pub fn remove_circle(&mut self, id: CircleId) -> Option<HullCircle> {
        let mut removed = self.circles.remove(&id)?;
        self.erase();
        removed.clear_boundary_vertices();

        for member in self.circles.values_mut() {
            if member.role().notch().is_some_and(|pair| pair.involves(id)) {
                debug!("{} loses its notch: {} left {}", member.id(), id, self.id);
                member.set_role(CircleRole::outer());
            }
        }

        Some(removed)
    }

    pub fn has_circle(&self, id: CircleId) -> bool {
        self.circles.contains_key(&id)
    }

    pub fn circle(&self, id: CircleId) -> Option<&HullCircle> {
        self.circles.get(&id)
    }

    pub fn circle_mut(&mut self, id: CircleId) -> Option<&mut HullCircle> {
        self.circles.get_mut(&id)
    }

    pub fn circles(&self) -> impl Iterator<Item = &HullCircle> {
        self.circles.values()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn inner_count(&self) -> usize {
        self.circles.values().filter(|c| c.role().is_inner()).count()
    }

    pub fn has_outer(&self) -> bool {
        self.circles.values().any(|c| c.role().is_outer())
    }

    /// Members needed before `draw` attempts a boundary
    pub fn minimum_circle_count(&self, config: &EditorConfig) -> usize {
        if self.has_outer() {
            config.min_circles_with_outer
        } else {
            config.min_inner_circles
        }
    }

    pub fn path(&self) -> Option<&HullPath> {
        self.path.as_ref()
    }

    /// Flattened boundary vertices, or None when no path is drawn
    pub fn boundary(&self) -> Option<&[Pos2]> {
        self.path.as_ref().map(HullPath::vertices)
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Drops the path and every member's boundary vertices together
    pub fn erase(&mut self) {
        self.path = None;
        for member in self.circles.values_mut() {
            member.clear_boundary_vertices();
        }
    }

    /// Rebuilds the boundary from scratch.
    ///
    /// Returns the new path, or None when there are too few members or the
    /// provider finds no hull. Either way the previous path is gone.
    pub fn draw(&mut self, provider: &dyn GeometryProvider, config: &EditorConfig) -> Option<&HullPath> {
        self.erase();

        let minimum = self.minimum_circle_count(config);
        if self.circles.len() < minimum {
            debug!("{} not drawn: {} of {} circles", self.id, self.circles.len(), minimum);
            return None;
        }

        let queries: Vec<CircleQuery> = self.circles.values().map(HullCircle::to_query).collect();
        let points = provider.generate(&queries);
        if points.is_empty() {
            debug!("{} not drawn: provider found no hull", self.id);
            return None;
        }

        if let Some(stray) = points.iter().find(|p| !self.circles.contains_key(&p.circle_id)) {
            warn!("{} not drawn: tangent point on non-member {}", self.id, stray.circle_id);
            return None;
        }

        let mut vertices = Vec::new();
        let count = points.len();
        for (i, current) in points.iter().enumerate() {
            let next = &points[(i + 1) % count];
            let Some(member) = self.circles.get_mut(&current.circle_id) else {
                continue;
            };

            let emitted = if current.circle_id == next.circle_id {
                let circle = member.circle();
                sample_arc(circle.center(), circle.radius(), current.pos(), next.pos(), config.arc_resolution)
            } else {
                vec![current.pos()]
            };

            for vertex in emitted {
                member.push_boundary_vertex(vertex);
                vertices.push(vertex);
            }
        }

        debug!("{} drawn: {} tangent points, {} vertices", self.id, count, vertices.len());
        self.path = Some(HullPath {
            vertices,
            closed: true,
        });
        self.path.as_ref()
    }

    /// Moves every member and the boundary rigidly
    pub fn translate(&mut self, delta: Vec2) {
        for member in self.circles.values_mut() {
            member.translate(delta);
        }
        if let Some(path) = &mut self.path {
            path.translate(delta);
        }
        self.translation += delta;
    }

    /// Whether `pos` falls inside the drawn boundary
    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.boundary().is_some_and(|boundary| polygon_contains(boundary, pos))
    }

    /// Topmost member under `pos`; later members paint above earlier ones
    pub fn circle_at(&self, pos: Pos2) -> Option<CircleId> {
        self.circles
            .values()
            .rev()
            .find(|member| member.circle().contains(pos))
            .map(HullCircle::id)
    }

    pub(crate) fn set_role(&mut self, id: CircleId, role: CircleRole) -> bool {
        match self.circles.get_mut(&id) {
            Some(member) => {
                member.set_role(role);
                true
            }
            None => false,
        }
    }
}

/// Samples the shorter arc of a circle between two points on it.
///
/// Yields `resolution + 1` vertices, both endpoints included. The sweep is
/// normalized into `(-PI, PI]`.
pub fn sample_arc(center: Pos2, radius: f32, from: Pos2, to: Pos2, resolution: usize) -> Vec<Pos2> {
    let start = (from.y - center.y).atan2(from.x - center.x);
    let end = (to.y - center.y).atan2(to.x - center.x);

    let mut sweep = end - start;
    if sweep <= -PI {
        sweep += TAU;
    } else if sweep > PI {
        sweep -= TAU;
    }

    let steps = resolution.max(1);
    (0..=steps)
        .map(|i| {
            let angle = start + sweep * (i as f32 / steps as f32);
            Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
