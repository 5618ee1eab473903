use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// Frozen measurement every layout pass is scaled by.
///
/// Measured once per data or viewport change and passed by reference into
/// the pure layout functions. Derived heights never feed back into it: if
/// they did, toggling a layer could change the measured height, which would
/// change `px_per_credit`, which would change the height again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBaseline {
    viewport_height: f64,
    year_count: u32,
    band_height: f64,
    px_per_credit: f64,
}

impl LayoutBaseline {
    pub fn measure(viewport_height: f64, year_count: u32, config: &LayoutConfig) -> Self {
        let viewport_height = if viewport_height.is_finite() {
            viewport_height.max(config.min_extent)
        } else {
            config.min_extent
        };
        let years = year_count.max(1);
        let gaps = f64::from(years - 1) * config.year_gap;
        // Bands start below the top margin, so the margin is not theirs to share.
        let available = viewport_height - config.margin_top - gaps;
        let band_height = (available / f64::from(years)).max(config.min_extent);
        let full_band = if config.credits_per_full_band.is_finite()
            && config.credits_per_full_band > 0.0
        {
            config.credits_per_full_band
        } else {
            1.0
        };

        Self {
            viewport_height,
            year_count,
            band_height,
            px_per_credit: band_height / full_band,
        }
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn year_count(&self) -> u32 {
        self.year_count
    }

    /// Height every year band gets before stacking grows it.
    pub fn band_height(&self) -> f64 {
        self.band_height
    }

    pub fn px_per_credit(&self) -> f64 {
        self.px_per_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_viewport_between_years() {
        let config = LayoutConfig {
            margin_top: 40.0,
            year_gap: 30.0,
            credits_per_full_band: 15.0,
            ..LayoutConfig::default()
        };
        let baseline = LayoutBaseline::measure(640.0, 3, &config);
        assert_eq!(baseline.band_height(), 180.0);
        assert!((baseline.px_per_credit() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let config = LayoutConfig {
            credits_per_full_band: 0.0,
            ..LayoutConfig::default()
        };
        let baseline = LayoutBaseline::measure(f64::NAN, 0, &config);
        assert_eq!(baseline.viewport_height(), config.min_extent);
        assert_eq!(baseline.band_height(), config.min_extent);
        assert_eq!(baseline.px_per_credit(), config.min_extent);
    }
}
