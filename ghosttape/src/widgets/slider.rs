use crossbeam_channel::Sender;

use crate::math::clip;
use crate::shared::{Palette, Point, Size, SLIDER_SIZE};
use super::value::{set_and_transmit, Field, Transmit, ValueMap};
use super::{Align, Baseline, Clickable, Drawable, Source, Surface, TapeBinding, TextStyle};

pub const VALUE: Field = "value";

// horizontal fader, one field
pub struct Slider {
    name: String,
    val: ValueMap,
    tape: Option<TapeBinding>,
    tx: Sender<Transmit>,
    palette: Palette,
}

impl Slider {
    pub fn new(name: impl Into<String>, tx: Sender<Transmit>) -> Self {
        Self {
            name: name.into(),
            val: ValueMap::from([(VALUE, 0.5)]),
            tape: None,
            tx,
            palette: Palette::default(),
        }
    }

    fn level(&self) -> f64 {
        self.val.get(VALUE).copied().unwrap_or(0.0)
    }
}

impl Source for Slider {
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

impl Drawable for Slider {
    fn size(&self) -> Size {
        SLIDER_SIZE
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Size { width, height } = SLIDER_SIZE;
        // ghost-driven sliders show up in the accent color
        let bar = match &self.tape {
            Some(b) if b.recorder_playing() => self.palette.accent,
            _ => self.palette.border,
        };
        surface.fill_rect(Point::new(0.0, 0.0), SLIDER_SIZE, self.palette.fill);
        surface.fill_rect(Point::new(0.0, 0.0), Size { width: width * self.level(), height }, bar);
        surface.text(
            Point::new(2.0, height / 2.0),
            &format!("{} {:.2}", self.name, self.level()),
            TextStyle { color: self.palette.accent, font_size: height / 2.0, align: Align::Left, baseline: Baseline::Middle },
        );
    }
}

impl Clickable for Slider {
    fn click(&mut self, pos: Point) {
        let level = clip(pos.x / SLIDER_SIZE.width, 0.0, 1.0);
        self.set(&ValueMap::from([(VALUE, level)]), false);
    }

    fn drag(&mut self, pos: Point) {
        self.click(pos);
    }
}
