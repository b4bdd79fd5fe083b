//! Display collaborators driven by the controller.

use std::fmt;

use tracing::{debug, info};

use crate::config::CarouselConfig;

/// A panel or indicator whose visual "active" state can be switched.
pub trait Toggle {
    fn set_active(&mut self, active: bool);
}

/// Panels, indicators and the play/pause control of one carousel.
///
/// Lookups are bounds-checked: an index past either collection yields `None`.
pub trait Stage {
    fn panel_count(&self) -> usize;
    fn indicator_count(&self) -> usize;
    fn panel_mut(&mut self, index: usize) -> Option<&mut dyn Toggle>;
    fn indicator_mut(&mut self, index: usize) -> Option<&mut dyn Toggle>;
    fn show_affordance(&mut self, affordance: Affordance);
}

/// Iconography on the play/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Shown while autoplay runs.
    Pause,
    /// Shown while autoplay is stopped.
    Play,
}

impl Affordance {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Pause => "\u{23f8}",
            Self::Play => "\u{25b6}",
        }
    }
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(Debug, Clone)]
pub struct TerminalPanel {
    index: usize,
    caption: String,
    active: bool,
}

impl Toggle for TerminalPanel {
    fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if active {
            info!(panel = self.index, caption = %self.caption, "panel shown");
        } else {
            debug!(panel = self.index, "panel hidden");
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerminalIndicator {
    index: usize,
    active: bool,
}

impl Toggle for TerminalIndicator {
    fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            debug!(indicator = self.index, active, "indicator toggled");
        }
    }
}

/// Stage for the command-line binary; reports changes through `tracing`.
#[derive(Debug, Clone)]
pub struct TerminalStage {
    panels: Vec<TerminalPanel>,
    indicators: Vec<TerminalIndicator>,
    affordance: Option<Affordance>,
}

impl TerminalStage {
    pub fn new<I, S>(captions: I, indicator_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let panels = captions
            .into_iter()
            .enumerate()
            .map(|(index, caption)| TerminalPanel {
                index,
                caption: caption.into(),
                active: false,
            })
            .collect();
        let indicators = (0..indicator_count)
            .map(|index| TerminalIndicator {
                index,
                active: false,
            })
            .collect();
        Self {
            panels,
            indicators,
            affordance: None,
        }
    }

    pub fn from_config(cfg: &CarouselConfig) -> Self {
        Self::new(
            cfg.panels.iter().map(|p| p.caption.clone()),
            cfg.indicator_count(),
        )
    }

    /// One-line strip such as `[o * o] Harbour ⏸`.
    pub fn status_line(&self) -> String {
        let dots: Vec<&str> = self
            .indicators
            .iter()
            .map(|i| if i.active { "*" } else { "o" })
            .collect();
        let caption = self
            .panels
            .iter()
            .find(|p| p.active)
            .map_or("-", |p| p.caption.as_str());
        let glyph = self.affordance.map_or("", Affordance::glyph);
        format!("[{}] {} {}", dots.join(" "), caption, glyph)
            .trim_end()
            .to_string()
    }
}

impl Stage for TerminalStage {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn panel_mut(&mut self, index: usize) -> Option<&mut dyn Toggle> {
        self.panels.get_mut(index).map(|p| p as &mut dyn Toggle)
    }

    fn indicator_mut(&mut self, index: usize) -> Option<&mut dyn Toggle> {
        self.indicators.get_mut(index).map(|i| i as &mut dyn Toggle)
    }

    fn show_affordance(&mut self, affordance: Affordance) {
        self.affordance = Some(affordance);
        debug!(%affordance, "play control updated");
    }
}
