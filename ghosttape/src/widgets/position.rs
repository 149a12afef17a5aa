use crossbeam_channel::Sender;

use crate::math::clip;
use crate::shared::{Palette, Point, Size, POSITION_SIZE};
use super::value::{set_and_transmit, Field, Transmit, ValueMap};
use super::{Clickable, Drawable, Source, Surface, TapeBinding};

pub const X: Field = "x";
pub const Y: Field = "y";

const HANDLE_RADIUS: f64 = 4.0;

// two-dimensional touch pad
pub struct Position {
    name: String,
    val: ValueMap,
    tape: Option<TapeBinding>,
    tx: Sender<Transmit>,
    palette: Palette,
}

impl Position {
    pub fn new(name: impl Into<String>, tx: Sender<Transmit>) -> Self {
        Self {
            name: name.into(),
            val: ValueMap::from([(X, 0.5), (Y, 0.5)]),
            tape: None,
            tx,
            palette: Palette::default(),
        }
    }

    fn get(&self, field: Field) -> f64 {
        self.val.get(field).copied().unwrap_or(0.0)
    }
}

impl Source for Position {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &ValueMap {
        &self.val
    }

    fn set(&mut self, partial: &ValueMap, from_playback: bool) {
        set_and_transmit(&self.name, &mut self.val, partial, from_playback, &self.tx);
    }

    fn bind(&mut self, binding: TapeBinding) {
        self.tape = Some(binding);
    }

    fn binding(&self) -> Option<&TapeBinding> {
        self.tape.as_ref()
    }
}

impl Drawable for Position {
    fn size(&self) -> Size {
        POSITION_SIZE
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let handle = match &self.tape {
            Some(b) if b.recorder_playing() => self.palette.accent,
            _ => self.palette.border,
        };
        surface.fill_rect(Point::new(0.0, 0.0), POSITION_SIZE, self.palette.fill);
        let center = Point::new(
            self.get(X) * POSITION_SIZE.width,
            self.get(Y) * POSITION_SIZE.height,
        );
        surface.fill_circle(center, HANDLE_RADIUS, handle);
    }
}

impl Clickable for Position {
    fn click(&mut self, pos: Point) {
        let partial = ValueMap::from([
            (X, clip(pos.x / POSITION_SIZE.width, 0.0, 1.0)),
            (Y, clip(pos.y / POSITION_SIZE.height, 0.0, 1.0)),
        ]);
        self.set(&partial, false);
    }

    fn drag(&mut self, pos: Point) {
        self.click(pos);
    }
}
