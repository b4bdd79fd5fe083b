//! Line-oriented commands fed to the binary on stdin.

use anyhow::{Context, Result, bail};

use crate::events::{
    ClickTarget, ControlButton, ElementNode, InputEvent, KeyCode, PointerSample, SLIDE_TO_ATTR,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    Event(InputEvent),
    Quit,
    Blank,
}

pub fn parse_line(line: &str) -> Result<ScriptLine> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ScriptLine::Blank);
    };
    let arg = words.next();

    let event = match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => return Ok(ScriptLine::Quit),
        "pause" | "play" => InputEvent::Control(ControlButton::PausePlay),
        "prev" => InputEvent::Control(ControlButton::Previous),
        "next" => InputEvent::Control(ControlButton::Next),
        "left" => InputEvent::KeyDown(KeyCode::ArrowLeft),
        "right" => InputEvent::KeyDown(KeyCode::ArrowRight),
        "space" => InputEvent::KeyDown(KeyCode::Space),
        "key" => {
            let code = arg.context("key needs a code, e.g. `key ArrowLeft`")?;
            InputEvent::KeyDown(KeyCode::from_code(code))
        }
        "click" => {
            let mut indicator = ElementNode::indicator();
            if let Some(target) = arg {
                indicator = indicator.with_data(SLIDE_TO_ATTR, target);
            }
            InputEvent::IndicatorClick(ClickTarget::new(vec![indicator]))
        }
        "click-outside" => InputEvent::IndicatorClick(ClickTarget::new(vec![ElementNode::other()])),
        "down" => InputEvent::PointerStart(PointerSample::mouse(coordinate(command, arg)?)),
        "up" => InputEvent::PointerEnd(PointerSample::mouse(coordinate(command, arg)?)),
        "touchstart" => {
            InputEvent::PointerStart(PointerSample::touch_start(coordinate(command, arg)?))
        }
        "touchend" => InputEvent::PointerEnd(PointerSample::touch_end(coordinate(command, arg)?)),
        "hide" => InputEvent::Visibility { hidden: true },
        "show" => InputEvent::Visibility { hidden: false },
        other => bail!("unknown command `{other}`"),
    };
    Ok(ScriptLine::Event(event))
}

fn coordinate(command: &str, arg: Option<&str>) -> Result<f64> {
    let raw = arg.with_context(|| format!("{command} needs an x coordinate"))?;
    raw.parse::<f64>()
        .with_context(|| format!("invalid x coordinate `{raw}`"))
}
