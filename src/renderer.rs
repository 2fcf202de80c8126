use egui::{Color32, Painter, Shape, Stroke};

use crate::circle::HullCircle;
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct Renderer {
    boundary_stroke: Stroke,
    inner_color: Color32,
    outer_color: Color32,
    uncontained_color: Color32,
    highlight_color: Color32,
    circle_thickness: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            boundary_stroke: Stroke::new(2.0, Color32::from_rgba_unmultiplied(220, 40, 40, 128)),
            inner_color: Color32::BLACK,
            outer_color: Color32::BLUE,
            uncontained_color: Color32::GRAY,
            highlight_color: Color32::GOLD,
            circle_thickness: 1.5,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints the scene
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     scene (Scene): The scene to paint
    ///
    /// Each hull paints its boundary beneath its circles; uncontained circles
    /// go on top of everything.
    pub fn render(&self, painter: &Painter, scene: &Scene) {
        let selected = scene.selected_circle();

        for hull in scene.hulls() {
            if let Some(boundary) = hull.boundary() {
                painter.add(Shape::closed_line(boundary.to_vec(), self.boundary_stroke));
            }
            for member in hull.circles() {
                let color = if member.role().is_inner() {
                    self.inner_color
                } else {
                    self.outer_color
                };
                self.paint_circle(painter, member, color, selected == Some(member.id()));
            }
        }

        for member in scene.uncontained() {
            self.paint_circle(painter, member, self.uncontained_color, selected == Some(member.id()));
        }
    }

    fn paint_circle(&self, painter: &Painter, member: &HullCircle, color: Color32, selected: bool) {
        let circle = member.circle();
        let color = if selected { self.highlight_color } else { color };
        painter.circle_stroke(circle.center(), circle.radius(), Stroke::new(self.circle_thickness, color));
    }
}
