use ratatui::layout::Rect;

use crate::shared::{Point, Size, Target};

// where a widget ended up on screen last frame
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub area: Rect,
    pub target: Target,
    pub size: Size, // the widget's logical size
}

// state local to tui: screen areas from the last render for mouse
// hit-testing, and which widget a drag started on
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    pub hits: Vec<Hit>,
    pub dragging: Option<Target>,
}

impl TuiState {
    // widget under the cell, in that widget's logical coordinates
    pub fn hit(&self, col: u16, row: u16) -> Option<(Target, Point)> {
        self.hits.iter()
            .find(|h| {
                col >= h.area.x && col < h.area.x + h.area.width
                    && row >= h.area.y && row < h.area.y + h.area.height
            })
            .map(|h| (h.target, to_logical(h, col, row)))
    }

    // like `hit`, but for a known target and the cell may be outside it
    pub fn locate(&self, target: Target, col: u16, row: u16) -> Option<Point> {
        self.hits.iter()
            .find(|h| h.target == target)
            .map(|h| to_logical(h, col, row))
    }
}

// cell centers map to logical units, y still pointing down
fn to_logical(hit: &Hit, col: u16, row: u16) -> Point {
    let cols = hit.area.width.max(1) as f64;
    let rows = hit.area.height.max(1) as f64;
    let dx = col as f64 - hit.area.x as f64 + 0.5;
    let dy = row as f64 - hit.area.y as f64 + 0.5;
    Point::new(dx / cols * hit.size.width, dy / rows * hit.size.height)
}
