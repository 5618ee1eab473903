//! One layout pass over a study plan, plus the session that owns the frozen
//! baseline between passes.

use studyline_protocol::{Diagnostics, PlanLayout};

use crate::baseline::LayoutBaseline;
use crate::config::{LayerVisibility, LayoutConfig};
use crate::connectors::build_connectors;
use crate::error::LayoutError;
use crate::grid::TimeGrid;
use crate::model::StudyPlan;
use crate::router::route_arrows;
use crate::stack::stack_bars;

/// Computes every geometry of `plan` against a frozen `baseline`.
///
/// Pure: the same inputs always give the same layout. Hidden layers are left
/// out of the output but never change the geometry of the visible ones.
pub fn layout_plan(
    plan: &StudyPlan,
    grid: &TimeGrid,
    baseline: &LayoutBaseline,
    layers: &LayerVisibility,
    config: &LayoutConfig,
) -> PlanLayout {
    let stack = stack_bars(&plan.credit_slots(), grid, baseline, config);
    let connections = build_connectors(&stack.bars, config);
    let routed = route_arrows(&plan.courses, &stack.bars, &stack.bands, grid, config, layers);

    let mut bars = stack.bars;
    for &idx in &connections.suppressed {
        if let Some(bar) = bars.get_mut(idx) {
            bar.label_suppressed = true;
        }
    }

    let diagnostics = Diagnostics {
        dropped_slots: stack.dropped_slots,
        dropped_edges: routed.dropped_edges,
    };
    tracing::debug!(
        bars = bars.len(),
        connectors = connections.connectors.len(),
        arrows = routed.arrows.len(),
        ?diagnostics,
        "layout pass complete"
    );

    PlanLayout {
        bars: if layers.bars { bars } else { Vec::new() },
        connectors: if layers.connectors {
            connections.connectors
        } else {
            Vec::new()
        },
        arrows: routed.arrows,
        bands: stack.bands,
        cells: stack.cells,
        content_height: stack.content_height,
        viewport_height: stack.viewport_height,
        px_per_credit: baseline.px_per_credit(),
        diagnostics,
    }
}

/// Owns the inputs of a timeline view and the baseline measured from them.
///
/// The baseline is measured lazily and kept until the plan or the viewport
/// height actually changes. Layer toggles reuse it.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    plan: StudyPlan,
    config: LayoutConfig,
    viewport_height: f64,
    layers: LayerVisibility,
    baseline: Option<LayoutBaseline>,
}

impl LayoutSession {
    pub fn new(plan: StudyPlan, config: LayoutConfig) -> Self {
        Self {
            plan,
            viewport_height: config.viewport_height,
            config,
            layers: LayerVisibility::default(),
            baseline: None,
        }
    }

    pub fn plan(&self) -> &StudyPlan {
        &self.plan
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Replaces the plan. Returns whether the baseline was invalidated.
    pub fn set_plan(&mut self, plan: StudyPlan) -> bool {
        if plan == self.plan {
            return false;
        }
        self.plan = plan;
        self.baseline = None;
        true
    }

    /// Resizes the viewport. Returns whether the baseline was invalidated.
    pub fn set_viewport(&mut self, height: f64) -> bool {
        if height.total_cmp(&self.viewport_height).is_eq() {
            return false;
        }
        tracing::debug!(from = self.viewport_height, to = height, "viewport resized");
        self.viewport_height = height;
        self.baseline = None;
        true
    }

    pub fn set_layers(&mut self, layers: LayerVisibility) {
        self.layers = layers;
    }

    /// Whether a baseline is currently cached.
    pub fn is_measured(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&mut self) -> LayoutBaseline {
        *self.baseline.get_or_insert_with(|| {
            LayoutBaseline::measure(self.viewport_height, self.plan.year_count(), &self.config)
        })
    }

    pub fn layout(&mut self) -> Result<PlanLayout, LayoutError> {
        let grid = TimeGrid::new(
            &self.plan.periods,
            self.config.margin_left,
            self.config.grid_width,
        )?;
        let baseline = self.baseline();
        Ok(layout_plan(
            &self.plan,
            &grid,
            &baseline,
            &self.layers,
            &self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::grid::tests::quarters;
    use crate::model::Course;
    use studyline_protocol::PrerequisiteKind;

    fn plan() -> StudyPlan {
        StudyPlan::new(
            quarters(),
            vec![
                Course::new("ALG").with_slot(1, 1, 2.5).with_slot(1, 2, 2.5),
                Course::new("CALC").with_slot(1, 1, 5.0),
                Course::new("PROG")
                    .with_slot(1, 1, 3.0)
                    .with_slot(1, 3, 3.0),
                Course::new("DS")
                    .with_slot(1, 3, 7.5)
                    .requires(PrerequisiteKind::Completion, "PROG")
                    .requires(PrerequisiteKind::Participation, "ALG"),
                Course::new("OS")
                    .with_slot(2, 1, 7.5)
                    .requires(PrerequisiteKind::Completion, "DS"),
            ],
        )
    }

    fn session() -> LayoutSession {
        LayoutSession::new(plan(), LayoutConfig::default())
    }

    #[test]
    fn layout_is_idempotent() {
        let mut session = session();
        let first = session.layout().unwrap_or_default();
        let second = session.layout().unwrap_or_default();
        assert!(!first.bars.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn layer_toggles_keep_baseline_and_geometry() {
        let mut session = session();
        let full = session.layout().unwrap_or_default();
        let baseline = session.baseline();

        session.set_layers(LayerVisibility {
            participation_arrows: false,
            connectors: false,
            ..LayerVisibility::default()
        });
        assert!(session.is_measured());
        let reduced = session.layout().unwrap_or_default();

        assert_eq!(session.baseline(), baseline);
        assert_eq!(reduced.bars, full.bars);
        assert_eq!(reduced.bands, full.bands);
        assert!(reduced.connectors.is_empty());
        assert!(
            reduced
                .arrows
                .iter()
                .all(|a| a.kind == PrerequisiteKind::Completion)
        );
        assert_eq!(reduced.arrows.len(), full.arrows.len() - 1);
    }

    #[test]
    fn only_real_changes_invalidate_the_baseline() {
        let mut session = session();
        let before = session.baseline();

        assert!(!session.set_viewport(640.0));
        assert!(!session.set_plan(plan()));
        assert!(session.is_measured());

        assert!(session.set_viewport(400.0));
        assert!(!session.is_measured());
        assert!(session.baseline().px_per_credit() < before.px_per_credit());

        let mut bigger = plan();
        bigger.courses.push(Course::new("THESIS").with_slot(3, 4, 15.0));
        assert!(session.set_plan(bigger));
        assert_eq!(session.baseline().year_count(), 3);
    }

    #[test]
    fn non_adjacent_periods_are_not_connected() {
        let mut session = session();
        let layout = session.layout().unwrap_or_default();

        // ALG runs through periods 1 and 2; PROG skips period 2.
        assert_eq!(layout.connectors.len(), 1);
        assert_eq!(layout.connectors[0].course_id, "ALG");
        let labelled = |course: &str| {
            layout
                .bars
                .iter()
                .filter(|b| b.course_id == course)
                .map(|b| !b.label_suppressed)
                .collect::<Vec<_>>()
        };
        assert_eq!(labelled("ALG"), vec![true, false]);
        assert_eq!(labelled("PROG"), vec![true, true]);
    }

    #[test]
    fn one_credit_slot_is_drawn_as_two() {
        let mut session = LayoutSession::new(
            StudyPlan::new(quarters(), vec![Course::new("SEM").with_slot(1, 2, 1.0)]),
            LayoutConfig::default(),
        );
        let layout = session.layout().unwrap_or_default();
        assert!((layout.bars[0].rect.h - 2.0 * layout.px_per_credit).abs() < 1e-9);
        assert_eq!(layout.bands[0].total_credits, 1.0);
    }

    #[test]
    fn cell_totals_reach_the_caller_unfloored() {
        let mut session = session();
        let layout = session.layout().unwrap_or_default();
        let first_cell = layout
            .cells
            .iter()
            .find(|c| c.year == 1 && c.period_id == 1)
            .copied()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(first_cell.bar_count, 3);
        assert_eq!(first_cell.credits, 2.5 + 5.0 + 3.0);
        assert_eq!(layout.cells.len(), 4);
    }

    #[test]
    fn diagnostics_count_dropped_references() {
        let mut plan = plan();
        plan.courses.push(
            Course::new("GHOST")
                .with_slot(1, 7, 5.0)
                .requires(PrerequisiteKind::Completion, "MISSING"),
        );
        let mut session = LayoutSession::new(plan, LayoutConfig::default());
        let layout = session.layout().unwrap_or_default();
        assert_eq!(layout.diagnostics.dropped_slots, 1);
        assert_eq!(layout.diagnostics.dropped_edges, 1);
        assert_eq!(layout.arrows.len(), 3);
    }

    #[test]
    fn empty_period_table_is_fatal() {
        let mut session = LayoutSession::new(StudyPlan::default(), LayoutConfig::default());
        assert_eq!(session.layout(), Err(LayoutError::Grid(GridError::Empty)));
    }
}
