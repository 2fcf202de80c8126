use egui::Pos2;

/// A common tangent line between two circles, as its two touching points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent {
    pub on_a: Pos2,
    pub on_b: Pos2,
}

/// Both external tangents (circles on the same side of the line).
///
/// None when one circle lies inside the other.
pub fn external_tangents(a: Pos2, radius_a: f32, b: Pos2, radius_b: f32) -> [Option<Tangent>; 2] {
    tangent_pair(a, radius_a, b, radius_b, 1.0)
}

/// Both internal tangents (circles on opposite sides of the line).
///
/// None when the circles overlap.
pub fn internal_tangents(a: Pos2, radius_a: f32, b: Pos2, radius_b: f32) -> [Option<Tangent>; 2] {
    tangent_pair(a, radius_a, b, radius_b, -1.0)
}

/// All common tangents, internal ones first, packed to the front.
pub fn common_tangents(a: Pos2, radius_a: f32, b: Pos2, radius_b: f32) -> [Option<Tangent>; 4] {
    let mut res = [None; 4];
    let found = internal_tangents(a, radius_a, b, radius_b)
        .into_iter()
        .chain(external_tangents(a, radius_a, b, radius_b))
        .flatten();

    for (slot, tangent) in res.iter_mut().zip(found) {
        *slot = Some(tangent);
    }
    res
}

fn tangent_pair(a: Pos2, radius_a: f32, b: Pos2, radius_b: f32, sign_1: f32) -> [Option<Tangent>; 2] {
    let distance = a.distance(b);
    // Co-located centers have no direction to build a tangent from
    if distance <= f32::EPSILON {
        return [None, None];
    }

    let vx = (b.x - a.x) / distance;
    let vy = (b.y - a.y) / distance;

    let c = (radius_a - sign_1 * radius_b) / distance;
    if c * c > 1.0 {
        return [None, None];
    }

    let h = (1.0 - c * c).max(0.0).sqrt();

    [-1.0f32, 1.0].map(|sign_2| {
        let nx = vx * c - sign_2 * h * vy;
        let ny = vy * c + sign_2 * h * vx;

        Some(Tangent {
            on_a: Pos2::new(a.x + radius_a * nx, a.y + radius_a * ny),
            on_b: Pos2::new(b.x + sign_1 * radius_b * nx, b.y + sign_1 * radius_b * ny),
        })
    })
}
