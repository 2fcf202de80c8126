use egui::Pos2;
use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::{ConvexHull, Coord, MultiPoint, Point, Winding, coord};
use itertools::Itertools;
use log::trace;

use super::polygon::circle_inside_polygon;
use super::tangents::{common_tangents, internal_tangents};
use super::{GeometryProvider, TangentPoint};
use crate::circle::{CircleQuery, NotchPair};
use crate::id_generator::CircleId;

// Hull vertices closer than this on the same circle are merged
const MERGE_EPSILON: f32 = 1e-3;

/// Default provider: convex hull over every common tangent point of every
/// pair of inner circles, with notches carved for paired outer circles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TangentHullProvider;

impl TangentHullProvider {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryProvider for TangentHullProvider {
    fn generate(&self, circles: &[CircleQuery]) -> Vec<TangentPoint> {
        let inner: Vec<&CircleQuery> = circles.iter().filter(|c| c.role.is_inner()).collect();
        if inner.len() < 2 {
            return Vec::new();
        }

        let candidates: Vec<TangentPoint> = inner
            .iter()
            .tuple_combinations()
            .flat_map(|(a, b)| {
                common_tangents(a.center(), a.radius, b.center(), b.radius)
                    .into_iter()
                    .flatten()
                    .flat_map(move |t| [TangentPoint::new(a.id, t.on_a), TangentPoint::new(b.id, t.on_b)])
            })
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut points: Vec<TangentPoint> = Vec::new();
        for vertex in hull_ring(&candidates) {
            // Hull vertices are copies of candidate coordinates
            let Some(&point) = candidates.iter().find(|p| p.x == vertex.x && p.y == vertex.y) else {
                continue;
            };
            let duplicate = points.last().is_some_and(|last: &TangentPoint| {
                last.circle_id == point.circle_id && last.pos().distance(point.pos()) < MERGE_EPSILON
            });
            if !duplicate {
                points.push(point);
            }
        }

        if points.len() < 3 {
            return Vec::new();
        }

        for outer in circles {
            if let Some(pair) = outer.role.notch() {
                if !carve_notch(&mut points, outer, pair, circles) {
                    trace!("Notch of {} skipped: pair not adjacent or overlapping", outer.id);
                }
            }
        }

        trace!("Generated {} tangent points for {} circles", points.len(), circles.len());
        points
    }

    fn is_circle_inside_polygon(&self, circle: &CircleQuery, polygon: &[Pos2]) -> bool {
        circle_inside_polygon(circle.center(), circle.radius, polygon)
    }
}

/// Replace the hull edge between the paired circles with an internal tangent
/// into the outer circle, an arc along its interior side, and an internal
/// tangent back out. Returns false when the notch cannot be built.
fn carve_notch(
    points: &mut Vec<TangentPoint>,
    outer: &CircleQuery,
    pair: NotchPair,
    circles: &[CircleQuery],
) -> bool {
    let n = points.len();
    let Some(i) = (0..n).find(|&i| {
        let (from, to) = (points[i].circle_id, points[(i + 1) % n].circle_id);
        (from == pair.a && to == pair.b) || (from == pair.b && to == pair.a)
    }) else {
        return false;
    };
    let j = (i + 1) % n;

    let lookup = |id: CircleId| circles.iter().find(|c| c.id == id);
    let (Some(first), Some(second)) = (lookup(points[i].circle_id), lookup(points[j].circle_id)) else {
        return false;
    };

    // The hull runs counter-clockwise, so the interior is on the left of
    // every edge and the outer circle must end up on the right.
    let entry = internal_tangents(first.center(), first.radius, outer.center(), outer.radius)
        .into_iter()
        .flatten()
        .find(|t| is_left_of(t.on_a, t.on_b, first.center()));
    let exit = internal_tangents(outer.center(), outer.radius, second.center(), second.radius)
        .into_iter()
        .flatten()
        .find(|t| is_left_of(t.on_a, t.on_b, second.center()));

    let (Some(entry), Some(exit)) = (entry, exit) else {
        return false;
    };

    points[i] = TangentPoint::new(first.id, entry.on_a);
    points[j] = TangentPoint::new(second.id, exit.on_b);
    points.splice(
        i + 1..i + 1,
        [
            TangentPoint::new(outer.id, entry.on_b),
            TangentPoint::new(outer.id, exit.on_a),
        ],
    );
    true
}

/// Convex hull of the candidates as an open counter-clockwise ring
fn hull_ring(candidates: &[TangentPoint]) -> Vec<Coord<f32>> {
    let cloud: MultiPoint<f32> = candidates.iter().map(|p| Point::new(p.x, p.y)).collect();
    let mut hull = cloud.convex_hull();
    hull.exterior_mut(|ring| ring.make_ccw_winding());

    let mut ring: Vec<Coord<f32>> = hull.exterior().coords().copied().collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn is_left_of(from: Pos2, to: Pos2, point: Pos2) -> bool {
    let orientation = RobustKernel::orient2d(
        coord! { x: from.x, y: from.y },
        coord! { x: to.x, y: to.y },
        coord! { x: point.x, y: point.y },
    );
    orientation == Orientation::CounterClockwise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::CircleRole;

    fn inner(id: u64, x: f32, y: f32, radius: f32) -> CircleQuery {
        CircleQuery {
            id: CircleId(id),
            role: CircleRole::Inner,
            x,
            y,
            radius,
        }
    }

    #[test]
    fn test_single_circle_has_no_hull() {
        let provider = TangentHullProvider::new();
        assert!(provider.generate(&[inner(0, 0.0, 0.0, 10.0)]).is_empty());
        assert!(provider.generate(&[]).is_empty());
    }

    #[test]
    fn test_co_located_circles_have_no_hull() {
        let provider = TangentHullProvider::new();
        let circles = [inner(0, 5.0, 5.0, 10.0), inner(1, 5.0, 5.0, 10.0)];
        assert!(provider.generate(&circles).is_empty());
    }

    #[test]
    fn test_triangle_points_are_tagged_with_members() {
        let provider = TangentHullProvider::new();
        let circles = [
            inner(0, 0.0, 0.0, 50.0),
            inner(1, 200.0, 0.0, 50.0),
            inner(2, 100.0, 150.0, 50.0),
        ];

        let points = provider.generate(&circles);
        assert!(points.len() >= 6);
        for point in &points {
            let owner = circles.iter().find(|c| c.id == point.circle_id).unwrap();
            assert!((owner.center().distance(point.pos()) - owner.radius).abs() < 1e-2);
        }
    }

    #[test]
    fn test_hull_runs_counter_clockwise() {
        let provider = TangentHullProvider::new();
        let circles = [
            inner(0, 0.0, 0.0, 20.0),
            inner(1, 150.0, 30.0, 25.0),
            inner(2, 40.0, 120.0, 15.0),
            // Interior circle contributes no hull vertex
            inner(3, 60.0, 50.0, 5.0),
        ];

        let points = provider.generate(&circles);
        assert!(points.iter().all(|p| p.circle_id != CircleId(3)));

        let n = points.len();
        let doubled_area: f32 = (0..n)
            .map(|i| {
                let (p, q) = (points[i].pos(), points[(i + 1) % n].pos());
                p.x * q.y - q.x * p.y
            })
            .sum();
        assert!(doubled_area > 0.0);

        // Open ring: the first vertex is not repeated at the end
        assert_ne!(points[0], points[n - 1]);
    }

    #[test]
    fn test_input_order_does_not_change_cycle() {
        let provider = TangentHullProvider::new();
        let a = inner(0, 0.0, 0.0, 30.0);
        let b = inner(1, 120.0, 10.0, 20.0);
        let c = inner(2, 60.0, 140.0, 40.0);

        let forward = provider.generate(&[a, b, c]);
        let backward = provider.generate(&[c, b, a]);
        assert_eq!(forward.len(), backward.len());

        // Same cycle, possibly rotated
        let start = backward
            .iter()
            .position(|p| p.pos().distance(forward[0].pos()) < 1e-3)
            .unwrap();
        for (k, point) in forward.iter().enumerate() {
            let other = backward[(start + k) % backward.len()];
            assert_eq!(point.circle_id, other.circle_id);
        }
    }

    #[test]
    fn test_notch_inserts_two_outer_points() {
        let provider = TangentHullProvider::new();
        let a = inner(0, 0.0, 0.0, 30.0);
        let b = inner(1, 300.0, 0.0, 30.0);
        let c = inner(2, 150.0, 260.0, 30.0);
        let plain = provider.generate(&[a, b, c]);

        let outer = CircleQuery {
            id: CircleId(3),
            role: CircleRole::Outer {
                notch: Some(NotchPair { a: a.id, b: b.id }),
            },
            x: 150.0,
            y: 0.0,
            radius: 40.0,
        };
        let notched = provider.generate(&[a, b, c, outer]);

        assert_eq!(notched.len(), plain.len() + 2);
        let on_outer: Vec<&TangentPoint> = notched.iter().filter(|p| p.circle_id == outer.id).collect();
        assert_eq!(on_outer.len(), 2);
        for point in on_outer {
            assert!((outer.center().distance(point.pos()) - outer.radius).abs() < 1e-2);
        }
    }

    #[test]
    fn test_unpaired_outer_is_ignored() {
        let provider = TangentHullProvider::new();
        let circles = [
            inner(0, 0.0, 0.0, 30.0),
            inner(1, 300.0, 0.0, 30.0),
            inner(2, 150.0, 260.0, 30.0),
        ];
        let mut with_outer = circles.to_vec();
        with_outer.push(CircleQuery {
            id: CircleId(3),
            role: CircleRole::outer(),
            x: 150.0,
            y: 0.0,
            radius: 40.0,
        });

        assert_eq!(provider.generate(&circles), provider.generate(&with_outer));
    }
}
