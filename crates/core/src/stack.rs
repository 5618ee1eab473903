//! Bar stack engine: vertical placement of course bars in year x period cells.

use std::collections::BTreeMap;

use studyline_protocol::{BarGeometry, CellTotals, Rect, StyleClass, YearBand};

use crate::baseline::LayoutBaseline;
use crate::config::LayoutConfig;
use crate::grid::TimeGrid;
use crate::model::CourseCreditSlot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackLayout {
    pub bars: Vec<BarGeometry>,
    pub bands: Vec<YearBand>,
    pub cells: Vec<CellTotals>,
    /// y of the last band's bottom edge.
    pub content_height: f64,
    /// Frozen viewport height, grown to fit the content.
    pub viewport_height: f64,
    pub dropped_slots: usize,
}

/// Pixel height of a slot: credits floored at `min_credit_floor`, scaled by
/// the frozen pixels-per-credit, never below `min_extent`.
pub fn effective_height(credits: f64, baseline: &LayoutBaseline, config: &LayoutConfig) -> f64 {
    (credits.max(config.min_credit_floor) * baseline.px_per_credit()).max(config.min_extent)
}

struct PlacedSlot<'a> {
    slot: &'a CourseCreditSlot,
    height: f64,
}

/// Stacks every slot into its cell and resolves the year bands.
///
/// Slots keep their first-seen order inside a cell. Slots naming an unknown
/// period, a year below 1 or non-positive credits are dropped and counted.
pub fn stack_bars(
    slots: &[CourseCreditSlot],
    grid: &TimeGrid,
    baseline: &LayoutBaseline,
    config: &LayoutConfig,
) -> StackLayout {
    let mut dropped_slots = 0usize;
    let mut cells: BTreeMap<(u32, usize), Vec<PlacedSlot<'_>>> = BTreeMap::new();

    for slot in slots {
        let Some(ordinal) = grid.ordinal(slot.period) else {
            tracing::warn!(
                course = %slot.course_id,
                year = slot.year,
                period = slot.period,
                "dropping slot with unknown period"
            );
            dropped_slots += 1;
            continue;
        };
        if slot.year == 0 || !slot.credits.is_finite() || slot.credits <= 0.0 {
            tracing::warn!(
                course = %slot.course_id,
                year = slot.year,
                credits = slot.credits,
                "dropping slot with invalid year or credits"
            );
            dropped_slots += 1;
            continue;
        }
        cells
            .entry((slot.year, ordinal))
            .or_default()
            .push(PlacedSlot {
                slot,
                height: effective_height(slot.credits, baseline, config),
            });
    }

    let last_year = cells
        .keys()
        .map(|&(year, _)| year)
        .max()
        .unwrap_or(0)
        .max(baseline.year_count());

    let mut totals = Vec::with_capacity(cells.len());
    for (&(year, ordinal), stack) in &cells {
        let gaps = stack.len().saturating_sub(1) as f64 * config.stack_gap;
        totals.push(CellTotals {
            year,
            period_id: grid.period_id(ordinal).unwrap_or_default(),
            ordinal,
            bar_count: stack.len(),
            credits: stack.iter().map(|p| p.slot.credits).sum(),
            stacked_height: stack.iter().map(|p| p.height).sum::<f64>() + gaps,
        });
    }

    let mut bands = Vec::with_capacity(last_year as usize);
    let mut y = config.margin_top;
    for year in 1..=last_year {
        let year_cells = totals.iter().filter(|c| c.year == year);
        let height = year_cells
            .clone()
            .map(|c| c.stacked_height)
            .fold(baseline.band_height(), f64::max);
        bands.push(YearBand {
            year,
            y_offset: y,
            height,
            total_credits: year_cells.map(|c| c.credits).sum(),
        });
        y += height + config.year_gap;
    }

    let content_height = bands.last().map_or(config.margin_top, YearBand::bottom);
    let viewport_height = baseline.viewport_height().max(content_height);

    let mut bars = Vec::with_capacity(slots.len() - dropped_slots);
    for (&(year, ordinal), stack) in &cells {
        let Some(band) = bands.get(year as usize - 1) else {
            continue;
        };
        let Some(span) = grid.bar_span(ordinal, config.column_inset, config.min_extent) else {
            continue;
        };
        let mut cursor = band.y_offset;
        for placed in stack {
            bars.push(BarGeometry {
                course_id: placed.slot.course_id.clone(),
                year,
                period_id: placed.slot.period,
                ordinal,
                rect: Rect::new(span.start, cursor, span.len(), placed.height),
                credits: placed.slot.credits,
                label_suppressed: false,
                style: StyleClass::CourseBar,
            });
            cursor += placed.height + config.stack_gap;
        }
    }

    if content_height > baseline.viewport_height() {
        tracing::debug!(
            content_height,
            frozen = baseline.viewport_height(),
            "growing viewport to fit stacked bars"
        );
    }
    tracing::debug!(bars = bars.len(), years = bands.len(), dropped_slots, "stacked bars");

    StackLayout {
        bars,
        bands,
        cells: totals,
        content_height,
        viewport_height,
        dropped_slots,
    }
}
