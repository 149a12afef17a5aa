use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crate::shared::{InputEvent, NOISE_STEP, RATE_STEP};
use super::mode::TuiState;

// poll for input from the terminal; mouse positions are resolved against
// the widget areas from the last render
pub fn poll_input(timeout: Duration, ts: &mut TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(key.code)),
        Event::Mouse(mouse) => Ok(handle_mouse(mouse, ts)),
        _ => Ok(vec![]),
    }
}

fn handle_key(code: KeyCode) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::PlayPress],
        KeyCode::Char('r') => vec![InputEvent::Record],
        KeyCode::Char('m') => vec![InputEvent::CycleMode],
        KeyCode::Char('l') => vec![InputEvent::ToggleLoop],
        KeyCode::Char('w') => vec![InputEvent::WatchAll],

        // knobs
        KeyCode::Char('[') => vec![InputEvent::AdjustRate(-RATE_STEP)],
        KeyCode::Char(']') => vec![InputEvent::AdjustRate(RATE_STEP)],
        KeyCode::Char('-') => vec![InputEvent::AdjustNoise(-NOISE_STEP)],
        KeyCode::Char('=') => vec![InputEvent::AdjustNoise(NOISE_STEP)],

        _ => vec![],
    }
}

// a drag keeps going to the widget it started on, even outside it
fn handle_mouse(mouse: MouseEvent, ts: &mut TuiState) -> Vec<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some((target, pos)) = ts.hit(mouse.column, mouse.row) else {
                return vec![];
            };
            ts.dragging = Some(target);
            vec![InputEvent::Click(target, pos)]
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(target) = ts.dragging else {
                return vec![];
            };
            match ts.locate(target, mouse.column, mouse.row) {
                Some(pos) => vec![InputEvent::Drag(target, pos)],
                None => vec![],
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            ts.dragging = None;
            vec![]
        }
        _ => vec![],
    }
}
