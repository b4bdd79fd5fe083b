use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::controller::ControllerSettings;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD_PX;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PanelConfig {
    pub caption: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CarouselConfig {
    /// Time between automatic advances.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Horizontal travel (px) a gesture needs before it counts as a swipe.
    pub swipe_threshold_px: f64,
    /// Panels in display order.
    pub panels: Vec<PanelConfig>,
    /// Number of indicators; defaults to one per panel.
    pub indicator_count: Option<usize>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            panels: Vec::new(),
            indicator_count: None,
        }
    }
}

impl CarouselConfig {
    const fn default_interval() -> Duration {
        Duration::from_millis(2000)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml_str(&s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Validate runtime invariants that serde defaults cannot express.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.interval.is_zero(), "interval must be greater than zero");
        ensure!(
            self.swipe_threshold_px.is_finite() && self.swipe_threshold_px >= 0.0,
            "swipe-threshold-px must be a finite, non-negative number"
        );
        Ok(self)
    }

    pub fn indicator_count(&self) -> usize {
        self.indicator_count.unwrap_or(self.panels.len())
    }

    pub fn settings(&self) -> ControllerSettings {
        ControllerSettings {
            interval: self.interval,
            swipe_threshold_px: self.swipe_threshold_px,
        }
    }
}
