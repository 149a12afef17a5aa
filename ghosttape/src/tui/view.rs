use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::middle::{Middle, NUM_SLIDERS};
use crate::shared::{DisplayState, Target};
use crate::widgets::{Drawable, Source};
use super::canvas::CanvasSurface;
use super::mode::{Hit, TuiState};

const TOP_ROW_HEIGHT: u16 = 12;
const PANEL_WIDTH: u16 = 42;
const SLIDER_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, middle: &Middle, state: &DisplayState, ts: &mut TuiState) {
    ts.hits.clear();

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_ROW_HEIGHT), // ghost + position pad
            Constraint::Min(SLIDER_HEIGHT), // sliders
            Constraint::Length(3), // status line
        ])
        .split(area);

    draw_top_row(frame, sections[0], middle, ts);
    draw_sliders(frame, sections[1], middle, ts);
    draw_status(frame, sections[2], state);
}

fn draw_top_row(frame: &mut Frame, area: Rect, middle: &Middle, ts: &mut TuiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PANEL_WIDTH),
            Constraint::Length(PANEL_WIDTH),
            Constraint::Min(0),
        ])
        .split(area);

    draw_widget(frame, cols[0], "ghost", &*middle.ghost.borrow(), Target::Ghost, ts);

    // sliders first, then the position pad
    if let Some(pad) = middle.registry.get(NUM_SLIDERS) {
        let pad = pad.borrow();
        draw_widget(frame, cols[1], pad.name(), &*pad, Target::Source(NUM_SLIDERS), ts);
    }
}

fn draw_sliders(frame: &mut Frame, area: Rect, middle: &Middle, ts: &mut TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SLIDER_HEIGHT); NUM_SLIDERS])
        .split(area);

    for (i, row) in rows.iter().enumerate() {
        let Some(slider) = middle.registry.get(i) else {
            continue;
        };
        let slider = slider.borrow();
        let row = Rect { width: row.width.min(PANEL_WIDTH * 2), ..*row };
        draw_widget(frame, row, slider.name(), &*slider, Target::Source(i), ts);
    }
}

fn draw_widget<W: Drawable + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    widget: &W,
    target: Target,
    ts: &mut TuiState,
) {
    let block = Block::bordered().title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let size = widget.size();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, size.width])
        .y_bounds([0.0, size.height])
        .paint(|ctx| {
            let mut surface = CanvasSurface::new(ctx, size, inner);
            widget.draw(&mut surface);
        });
    frame.render_widget(canvas, inner);

    ts.hits.push(Hit { area: inner, target, size });
}

fn draw_status(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let transport = if state.recording {
        format!("REC {}", state.moment)
    } else if state.playing {
        "PLAY".to_string()
    } else {
        "IDLE".to_string()
    };
    let text = format!(
        "{transport} | {} | rate {:.2} | loop {} | noise {:.2} | size {} | sources {} | {}",
        state.mode_label,
        state.rate,
        if state.looping { "on" } else { "off" },
        state.noise,
        state.size,
        state.connected,
        state.last_transmit.as_deref().unwrap_or("-"),
    );
    let color = if state.recording { Color::LightRed } else { Color::Gray };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::bordered().title("r rec  space play  m mode  l loop  [ ] rate  - = noise  w watch  esc quit"));
    frame.render_widget(status, area);
}
