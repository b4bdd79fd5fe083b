use std::collections::BTreeMap;

/// Data attribute carrying the panel an indicator jumps to.
pub const SLIDE_TO_ATTR: &str = "slide-to";

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Control(ControlButton),
    IndicatorClick(ClickTarget),
    KeyDown(KeyCode),
    PointerStart(PointerSample),
    PointerEnd(PointerSample),
    Visibility { hidden: bool },
    /// Emitted by the repeating timer; never subscribed to explicitly.
    Tick(TickId),
}

impl InputEvent {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Self::Control(ControlButton::PausePlay) => Some(EventKind::PauseButton),
            Self::Control(ControlButton::Previous) => Some(EventKind::PrevButton),
            Self::Control(ControlButton::Next) => Some(EventKind::NextButton),
            Self::IndicatorClick(_) => Some(EventKind::IndicatorClick),
            Self::KeyDown(_) => Some(EventKind::KeyDown),
            Self::PointerStart(_) => Some(EventKind::PointerStart),
            Self::PointerEnd(_) => Some(EventKind::PointerEnd),
            Self::Visibility { .. } => Some(EventKind::VisibilityChange),
            Self::Tick(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PauseButton,
    PrevButton,
    NextButton,
    IndicatorClick,
    KeyDown,
    VisibilityChange,
    PointerStart,
    PointerEnd,
}

impl EventKind {
    pub const ALL: [Self; 8] = [
        Self::PauseButton,
        Self::PrevButton,
        Self::NextButton,
        Self::IndicatorClick,
        Self::KeyDown,
        Self::VisibilityChange,
        Self::PointerStart,
        Self::PointerEnd,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    PausePlay,
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    Space,
    Other(String),
}

impl KeyCode {
    /// Maps a browser-style `code` value ("ArrowLeft", "Space", ...).
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Space" => Self::Space,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Indicator,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub role: ElementRole,
    pub data: BTreeMap<String, String>,
}

impl ElementNode {
    pub fn indicator() -> Self {
        Self {
            role: ElementRole::Indicator,
            data: BTreeMap::new(),
        }
    }

    pub fn other() -> Self {
        Self {
            role: ElementRole::Other,
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Target panel of an indicator, if the attribute holds an integral number.
    ///
    /// The value is not range-checked; callers wrap it into the panel range.
    pub fn slide_to(&self) -> Option<f64> {
        parse_target(self.data.get(SLIDE_TO_ATTR)?)
    }
}

fn parse_target(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = match parse_radix_literal(trimmed) {
        Some(parsed) => parsed?,
        None => trimmed.parse::<f64>().ok()?,
    };
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    Some(value)
}

/// `0x`/`0o`/`0b` literals. `None` when `raw` carries no radix prefix.
fn parse_radix_literal(raw: &str) -> Option<Option<f64>> {
    let prefix = raw.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &raw[2..];
    if digits.starts_with('+') {
        return Some(None);
    }
    Some(u128::from_str_radix(digits, radix).ok().map(|v| v as f64))
}

/// Elements from the click target outward to the indicator container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub path: Vec<ElementNode>,
}

impl ClickTarget {
    pub fn new(path: Vec<ElementNode>) -> Self {
        Self { path }
    }

    pub fn closest_indicator(&self) -> Option<&ElementNode> {
        self.path
            .iter()
            .find(|node| node.role == ElementRole::Indicator)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSample {
    pub client_x: Option<f64>,
    pub touches: Vec<f64>,
    pub changed_touches: Vec<f64>,
}

impl PointerSample {
    pub fn mouse(x: f64) -> Self {
        Self {
            client_x: Some(x),
            ..Self::default()
        }
    }

    pub fn touch_start(x: f64) -> Self {
        Self {
            touches: vec![x],
            changed_touches: vec![x],
            ..Self::default()
        }
    }

    /// On release the lifted finger only shows up in the changed list.
    pub fn touch_end(x: f64) -> Self {
        Self {
            changed_touches: vec![x],
            ..Self::default()
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.touches
            .first()
            .or_else(|| self.changed_touches.first())
            .copied()
            .or(self.client_x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub default_prevented: bool,
}

impl Dispatch {
    pub const fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }
}
