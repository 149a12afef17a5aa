// Surface on top of a ratatui canvas. Widgets draw in logical units with y
// pointing down; the canvas has y pointing up, so every y gets flipped.
// Fills are done with horizontal lines one braille dot apart.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::canvas::{Circle, Context, Line as CanvasLine};

use crate::shared::{Point, Size};
use crate::widgets::{Align, Baseline, Surface, TextStyle};

pub struct CanvasSurface<'c, 'a> {
    ctx: &'c mut Context<'a>,
    size: Size,
    cell: (f64, f64), // logical units per terminal cell
    dot: f64,         // logical units per braille dot row
}

impl<'c, 'a> CanvasSurface<'c, 'a> {
    pub fn new(ctx: &'c mut Context<'a>, size: Size, area: Rect) -> Self {
        let cols = area.width.max(1) as f64;
        let rows = area.height.max(1) as f64;
        Self {
            ctx,
            size,
            cell: (size.width / cols, size.height / rows),
            dot: (size.height / (rows * 4.0)).max(1e-3),
        }
    }

    fn flip(&self, y: f64) -> f64 {
        self.size.height - y
    }

    fn hline(&mut self, x1: f64, x2: f64, y: f64, color: Color) {
        let y = self.flip(y);
        self.ctx.draw(&CanvasLine { x1, y1: y, x2, y2: y, color });
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn fill_rect(&mut self, origin: Point, size: Size, color: Color) {
        let mut y = origin.y;
        while y <= origin.y + size.height {
            self.hline(origin.x, origin.x + size.width, y, color);
            y += self.dot;
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let mut dy = -radius;
        while dy <= radius {
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            self.hline(center.x - half, center.x + half, center.y + dy, color);
            dy += self.dot;
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Color) {
        let y = self.flip(center.y);
        let mut r = radius - line_width / 2.0;
        while r <= radius + line_width / 2.0 {
            self.ctx.draw(&Circle { x: center.x, y, radius: r, color });
            r += self.dot;
        }
    }

    // terminal text has one size, font_size is ignored
    fn text(&mut self, at: Point, text: &str, style: TextStyle) {
        let width = text.chars().count() as f64 * self.cell.0;
        let x = match style.align {
            Align::Left => at.x,
            Align::Center => at.x - width / 2.0,
            Align::Right => at.x - width,
        };
        let y = match style.baseline {
            Baseline::Top => at.y + self.cell.1 / 2.0,
            Baseline::Middle => at.y,
            Baseline::Bottom => at.y - self.cell.1 / 2.0,
        };
        let y = self.flip(y);
        self.ctx.print(x, y, Line::styled(text.to_string(), Style::default().fg(style.color)));
    }
}
