use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::events::{ControlButton, Dispatch, EventKind, InputEvent, KeyCode};
use crate::gesture::{DEFAULT_SWIPE_THRESHOLD_PX, SwipeDirection, SwipeTracker};
use crate::input::InputSource;
use crate::stage::{Affordance, Stage};
use crate::ticker::Ticker;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Wraps any integer into `[0, n)`. Returns `None` for an empty carousel.
pub fn normalize_index(index: i64, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let wrapped = i128::from(index).rem_euclid(n as i128);
    Some(wrapped as usize)
}

/// [`normalize_index`] for integral targets of any magnitude.
pub fn normalize_target(target: f64, n: usize) -> Option<usize> {
    if n == 0 || !target.is_finite() || target.fract() != 0.0 {
        return None;
    }
    let wrapped = target.rem_euclid(n as f64) as usize;
    Some(wrapped.min(n - 1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub interval: Duration,
    pub swipe_threshold_px: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Slide-index state machine with autoplay, gesture and visibility handling.
///
/// All handlers run to completion on the caller's thread; the only
/// asynchronous piece is the ticker, whose ticks arrive back through
/// [`CarouselController::handle`].
pub struct CarouselController<S: Stage, T: Ticker> {
    stage: S,
    ticker: T,
    interval: Duration,
    current: usize,
    play: PlayState,
    swipe: SwipeTracker,
}

impl<S: Stage, T: Ticker> CarouselController<S, T> {
    pub fn new(stage: S, ticker: T, settings: ControllerSettings) -> Self {
        Self {
            stage,
            ticker,
            interval: settings.interval,
            current: 0,
            play: PlayState::Playing,
            swipe: SwipeTracker::new(settings.swipe_threshold_px),
        }
    }

    /// Validates the collections, registers input handlers and starts autoplay.
    pub fn init(&mut self, source: &mut impl InputSource) {
        let panels = self.stage.panel_count();
        let indicators = self.stage.indicator_count();
        if panels == 0 || indicators != panels {
            warn!(panels, indicators, "slides/indicators mismatch");
        }
        if panels == 0 {
            warn!("no panels to rotate; carousel left idle");
            return;
        }

        for kind in EventKind::ALL {
            source.subscribe(kind);
        }

        if let Some(panel) = self.stage.panel_mut(self.current) {
            panel.set_active(true);
        }
        if let Some(indicator) = self.stage.indicator_mut(self.current) {
            indicator.set_active(true);
        }

        self.play = PlayState::Playing;
        self.stage.show_affordance(Affordance::Pause);
        self.start_timer();
        info!(
            panels,
            interval_ms = self.interval.as_millis() as u64,
            "carousel started"
        );
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn play_state(&self) -> PlayState {
        self.play
    }

    pub fn is_playing(&self) -> bool {
        self.play == PlayState::Playing
    }

    pub fn slide_count(&self) -> usize {
        self.stage.panel_count()
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn go_to(&mut self, index: i64) {
        let Some(next) = normalize_index(index, self.slide_count()) else {
            debug!(index, "navigation skipped: no panels");
            return;
        };
        if next == self.current {
            return;
        }

        if let Some(panel) = self.stage.panel_mut(self.current) {
            panel.set_active(false);
        }
        if let Some(indicator) = self.stage.indicator_mut(self.current) {
            indicator.set_active(false);
        }

        debug!(from = self.current, to = next, "navigating");
        self.current = next;

        if let Some(panel) = self.stage.panel_mut(self.current) {
            panel.set_active(true);
        }
        if let Some(indicator) = self.stage.indicator_mut(self.current) {
            indicator.set_active(true);
        }
    }

    pub fn advance(&mut self) {
        self.go_to(self.current as i64 + 1);
    }

    pub fn retreat(&mut self) {
        self.go_to(self.current as i64 - 1);
    }

    pub fn start(&mut self) {
        if self.play == PlayState::Playing {
            return;
        }
        self.play = PlayState::Playing;
        self.stage.show_affordance(Affordance::Pause);
        self.start_timer();
        debug!("autoplay started");
    }

    pub fn stop(&mut self) {
        if self.play == PlayState::Paused {
            return;
        }
        self.play = PlayState::Paused;
        self.stage.show_affordance(Affordance::Play);
        self.ticker.cancel();
        debug!("autoplay stopped");
    }

    pub fn toggle_play(&mut self) {
        match self.play {
            PlayState::Playing => self.stop(),
            PlayState::Paused => self.start(),
        }
    }

    /// Hidden pauses the countdown only; the play flag is left untouched.
    pub fn on_visibility(&mut self, hidden: bool) {
        if hidden {
            self.ticker.cancel();
        } else if self.play == PlayState::Playing {
            self.start_timer();
        }
        trace!(hidden, playing = self.is_playing(), "visibility changed");
    }

    pub fn handle(&mut self, event: InputEvent) -> Dispatch {
        if self.slide_count() == 0 {
            trace!(?event, "no panels; event ignored");
            return Dispatch::default();
        }
        match event {
            InputEvent::Control(ControlButton::PausePlay) => self.toggle_play(),
            InputEvent::Control(ControlButton::Previous) => self.manual_retreat(),
            InputEvent::Control(ControlButton::Next) => self.manual_advance(),
            InputEvent::IndicatorClick(target) => {
                let Some(indicator) = target.closest_indicator() else {
                    trace!("click outside any indicator");
                    return Dispatch::default();
                };
                let Some(slide) = indicator.slide_to() else {
                    debug!(data = ?indicator.data, "indicator without a usable target");
                    return Dispatch::default();
                };
                if let Some(index) = normalize_target(slide, self.slide_count()) {
                    self.go_to(index as i64);
                }
                self.stop();
            }
            InputEvent::KeyDown(code) => match code {
                KeyCode::ArrowLeft => self.manual_retreat(),
                KeyCode::ArrowRight => self.manual_advance(),
                KeyCode::Space => {
                    self.toggle_play();
                    return Dispatch::prevent_default();
                }
                KeyCode::Other(_) => {}
            },
            InputEvent::PointerStart(sample) => {
                self.swipe.begin(sample.x());
                return Dispatch::prevent_default();
            }
            InputEvent::PointerEnd(sample) => match self.swipe.finish(sample.x()) {
                Some(SwipeDirection::Right) => self.manual_retreat(),
                Some(SwipeDirection::Left) => self.manual_advance(),
                None => {}
            },
            InputEvent::Visibility { hidden } => self.on_visibility(hidden),
            InputEvent::Tick(id) => {
                if self.ticker.is_current(id) {
                    self.advance();
                } else {
                    trace!(tick = id.0, "stale tick dropped");
                }
            }
        }
        Dispatch::default()
    }

    /// Teardown: cancels the timer and leaves the play flag as it was.
    pub fn stop_timer(&mut self) {
        self.ticker.cancel();
    }

    fn manual_advance(&mut self) {
        self.advance();
        self.stop();
    }

    fn manual_retreat(&mut self) {
        self.retreat();
        self.stop();
    }

    fn start_timer(&mut self) {
        self.ticker.cancel();
        self.ticker.schedule(self.interval);
    }
}
