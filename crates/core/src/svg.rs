//! SVG attribute serializers for computed geometry.
//!
//! Only attribute strings are produced; building the document is up to the
//! caller's scene graph.

use studyline_protocol::{ArrowGeometry, ConnectorGeometry, PathCommand, Point};

/// Renders the rounded path of an arrow as the `d` attribute of a `<path>`.
pub fn arrow_path_data(arrow: &ArrowGeometry) -> String {
    path_data(&arrow.path)
}

pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::with_capacity(commands.len() * 16);
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCommand::MoveTo(p) => d.push_str(&format!("M{}", coords(*p))),
            PathCommand::LineTo(p) => d.push_str(&format!("L{}", coords(*p))),
            PathCommand::QuadTo { control, to } => {
                d.push_str(&format!("Q{} {}", coords(*control), coords(*to)));
            }
        }
    }
    d
}

/// Renders a connector's fill as the `points` attribute of a `<polygon>`.
pub fn polygon_points(connector: &ConnectorGeometry) -> String {
    connector
        .fill
        .iter()
        .map(|p| coords(*p))
        .collect::<Vec<_>>()
        .join(" ")
}

fn coords(p: Point) -> String {
    format!("{},{}", round(p.x), round(p.y))
}

/// Two decimals are plenty on screen and keep the output stable across
/// float noise.
fn round(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}
