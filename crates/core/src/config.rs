use serde::{Deserialize, Serialize};

/// Fixed pixel constants of a layout pass.
///
/// Deserializes with per-field defaults, so a JSON document only needs to
/// name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// x where the projected time axis starts.
    pub margin_left: f64,
    /// y of the first year band.
    pub margin_top: f64,
    /// Pixel width of the projected time domain.
    pub grid_width: f64,
    /// Initial viewport height the baseline is measured from.
    pub viewport_height: f64,
    /// Credit load that exactly fills one baseline band.
    pub credits_per_full_band: f64,
    /// Slots below this many credits are drawn as if they had this many.
    pub min_credit_floor: f64,
    pub stack_gap: f64,
    pub year_gap: f64,
    /// Horizontal inset of bars inside their period column.
    pub column_inset: f64,
    /// Width of the routing corridors outside the first and last column and
    /// height of the corridor above the first year.
    pub outer_gutter: f64,
    pub lane_spacing: f64,
    /// Distance from a corridor edge to its lane 0.
    pub stub_length: f64,
    pub corner_radius: f64,
    pub connector_radius: f64,
    /// Smallest width or height any rectangle is clamped to.
    pub min_extent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_left: 48.0,
            margin_top: 32.0,
            grid_width: 960.0,
            viewport_height: 640.0,
            credits_per_full_band: 15.0,
            min_credit_floor: 2.0,
            stack_gap: 4.0,
            year_gap: 28.0,
            column_inset: 10.0,
            outer_gutter: 24.0,
            lane_spacing: 6.0,
            stub_length: 4.0,
            corner_radius: 4.0,
            connector_radius: 3.0,
            min_extent: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// Which element layers a pass emits. Toggling layers is cosmetic and never
/// changes the frozen baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub bars: bool,
    pub connectors: bool,
    pub completion_arrows: bool,
    pub participation_arrows: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            bars: true,
            connectors: true,
            completion_arrows: true,
            participation_arrows: true,
        }
    }
}

impl LayerVisibility {
    pub fn shows(&self, kind: studyline_protocol::PrerequisiteKind) -> bool {
        match kind {
            studyline_protocol::PrerequisiteKind::Completion => self.completion_arrows,
            studyline_protocol::PrerequisiteKind::Participation => self.participation_arrows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json(r#"{ "lane_spacing": 8.0, "year_gap": 40 }"#)
            .unwrap_or_default();
        assert_eq!(config.lane_spacing, 8.0);
        assert_eq!(config.year_gap, 40.0);
        assert_eq!(config.min_credit_floor, 2.0);
    }

    #[test]
    fn all_layers_visible_by_default() {
        let layers: LayerVisibility =
            serde_json::from_str(r#"{ "participation_arrows": false }"#).unwrap_or_default();
        assert!(layers.bars && layers.connectors && layers.completion_arrows);
        assert!(!layers.participation_arrows);
    }
}
