// 2D drawing target for widgets. Style is passed with every call, nothing
// is carried over between calls.

use ratatui::style::Color;

use crate::shared::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f64,
    pub align: Align,
    pub baseline: Baseline,
}

impl TextStyle {
    pub fn centered(color: Color, font_size: f64) -> Self {
        Self { color, font_size, align: Align::Center, baseline: Baseline::Middle }
    }
}

pub trait Surface {
    fn fill_rect(&mut self, origin: Point, size: Size, color: Color);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Color);
    fn text(&mut self, at: Point, text: &str, style: TextStyle);
}
