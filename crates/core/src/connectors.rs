//! Connector builder: joins bars of one course in consecutive periods.

use std::collections::BTreeMap;

use studyline_protocol::{BarGeometry, ConnectorGeometry, CourseId, Point, StyleClass};

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connections {
    pub connectors: Vec<ConnectorGeometry>,
    /// Indices into the bar list of every bar continuing a run. These bars
    /// carry no label.
    pub suppressed: Vec<usize>,
}

/// Scans each course's bars year by year and bridges every pair whose
/// period ordinals differ by exactly one.
pub fn build_connectors(bars: &[BarGeometry], config: &LayoutConfig) -> Connections {
    let mut runs: BTreeMap<(&CourseId, u32), Vec<usize>> = BTreeMap::new();
    for (idx, bar) in bars.iter().enumerate() {
        runs.entry((&bar.course_id, bar.year)).or_default().push(idx);
    }

    let mut out = Connections::default();
    for indices in runs.values_mut() {
        indices.sort_by(|&a, &b| {
            bars[a]
                .ordinal
                .cmp(&bars[b].ordinal)
                .then_with(|| bars[a].rect.y.total_cmp(&bars[b].rect.y))
                .then_with(|| a.cmp(&b))
        });
        for pair in indices.windows(2) {
            let (first, second) = (&bars[pair[0]], &bars[pair[1]]);
            if second.ordinal != first.ordinal + 1 {
                continue;
            }
            out.connectors.push(bridge(first, second, config));
            out.suppressed.push(pair[1]);
        }
    }

    out.suppressed.sort_unstable();
    out.suppressed.dedup();
    out
}

/// Fill between the facing edges of `left` and `right`.
///
/// The fill reaches `connector_radius` into both bars so their rounded
/// corners on the facing side are covered; the borders cover only the open
/// stretch between the bars.
fn bridge(left: &BarGeometry, right: &BarGeometry, config: &LayoutConfig) -> ConnectorGeometry {
    let (a, b) = (left.rect, right.rect);
    let radius = config
        .connector_radius
        .min(a.w / 2.0)
        .min(b.w / 2.0)
        .max(0.0);
    let x0 = a.right();
    let x1 = b.x.max(x0);

    let fill = vec![
        Point::new(x0 - radius, a.y),
        Point::new(x1 + radius, b.y),
        Point::new(x1 + radius, b.bottom()),
        Point::new(x0 - radius, a.bottom()),
    ];
    let borders = [
        [Point::new(x0, a.y), Point::new(x1, b.y)],
        [Point::new(x0, a.bottom()), Point::new(x1, b.bottom())],
    ];

    ConnectorGeometry {
        course_id: left.course_id.clone(),
        year: left.year,
        from_period: left.period_id,
        to_period: right.period_id,
        fill,
        borders,
        style: StyleClass::Connector,
        border_style: StyleClass::ConnectorBorder,
    }
}
