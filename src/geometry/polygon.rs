use egui::Pos2;
use geo::{Contains, EuclideanDistance, LineString, Point, Polygon};

/// Builds a geo polygon from a flattened boundary. Fewer than three
/// vertices is no polygon at all.
pub fn to_polygon(vertices: &[Pos2]) -> Option<Polygon<f32>> {
    if vertices.len() < 3 {
        return None;
    }
    let coords: Vec<(f32, f32)> = vertices.iter().map(|v| (v.x, v.y)).collect();
    Some(Polygon::new(LineString::from(coords), vec![]))
}

/// Point-in-polygon test. Points on the boundary are not contained.
pub fn polygon_contains(vertices: &[Pos2], point: Pos2) -> bool {
    to_polygon(vertices).is_some_and(|polygon| polygon.contains(&Point::new(point.x, point.y)))
}

/// A disk is inside when its center is inside and it crosses no edge.
/// A zero radius reduces this to the point test.
pub fn circle_inside_polygon(center: Pos2, radius: f32, vertices: &[Pos2]) -> bool {
    let Some(polygon) = to_polygon(vertices) else {
        return false;
    };
    let center = Point::new(center.x, center.y);
    polygon.contains(&center) && center.euclidean_distance(polygon.exterior()) >= radius
}
