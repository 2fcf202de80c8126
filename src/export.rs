use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use egui::Pos2;
use log::info;

use crate::circle::HullCircle;
use crate::error::HullResult;
use crate::scene::Scene;

/// Writes a scene as a standalone SVG document.
///
/// Each hull becomes a group holding its boundary followed by its circles,
/// matching the on-screen layering. Uncontained circles come last.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn export(scene: &Scene) -> String {
        let mut svg = String::new();
        svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\">\n");

        for hull in scene.hulls() {
            let _ = writeln!(svg, "  <g id=\"{}\">", hull.id());
            if let Some(boundary) = hull.boundary() {
                let _ = writeln!(
                    svg,
                    "    <path d=\"{}\" fill=\"none\" stroke=\"red\" stroke-opacity=\"0.5\"/>",
                    path_data(boundary)
                );
            }
            for member in hull.circles() {
                let color = if member.role().is_inner() { "black" } else { "blue" };
                push_circle(&mut svg, member, color);
            }
            svg.push_str("  </g>\n");
        }

        let mut uncontained = scene.uncontained().peekable();
        if uncontained.peek().is_some() {
            svg.push_str("  <g id=\"uncontained\">\n");
            for member in uncontained {
                push_circle(&mut svg, member, "grey");
            }
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }

    pub fn write_to(scene: &Scene, path: impl AsRef<Path>) -> HullResult<()> {
        let path = path.as_ref();
        fs::write(path, Self::export(scene))?;
        info!("Exported scene to {}", path.display());
        Ok(())
    }
}

fn path_data(vertices: &[Pos2]) -> String {
    let mut data = String::new();
    for (i, vertex) in vertices.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            data.push(' ');
        }
        let _ = write!(data, "{} {:.2} {:.2}", command, vertex.x, vertex.y);
    }
    data.push_str(" Z");
    data
}

fn push_circle(svg: &mut String, member: &HullCircle, color: &str) {
    let circle = member.circle();
    let _ = writeln!(
        svg,
        "    <circle id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\"/>",
        circle.id(),
        circle.center().x,
        circle.center().y,
        circle.radius(),
        color
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_uses_two_decimals() {
        let data = path_data(&[Pos2::new(0.0, 0.0), Pos2::new(1.005, 2.5), Pos2::new(3.0, 4.0)]);
        assert!(data.starts_with("M 0.00 0.00 L "));
        assert!(data.ends_with("L 3.00 4.00 Z"));
    }
}
