use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::ghost::Ghost;
use crate::shared::{Point, Size};

mod position;
mod registry;
mod slider;
mod surface;
mod value;

pub use position::Position;
pub use registry::Registry;
pub use slider::Slider;
pub use surface::{Align, Baseline, Surface, TextStyle};
pub use value::{Field, Transmit, ValueMap};

#[cfg(test)]
pub use surface::testing;

pub type SourceHandle = Rc<RefCell<dyn Source>>;

pub trait Drawable {
    fn size(&self) -> Size;
    fn draw(&self, surface: &mut dyn Surface);
}

pub trait Clickable {
    fn click(&mut self, pos: Point);
    fn drag(&mut self, _pos: Point) {}
}

// anything the scheduler can drive once per frame
pub trait Tickable {
    fn tick(&mut self);
}

// A widget whose values the ghost can capture and drive.
//
// `set` only touches fields the widget owns. `from_playback` marks a write
// coming from a recorder: the widget updates and redraws, but must not treat
// it as user input (no transmit).
pub trait Source: Drawable + Clickable {
    fn name(&self) -> &str;
    fn value(&self) -> &ValueMap;
    fn set(&mut self, partial: &ValueMap, from_playback: bool);
    fn bind(&mut self, binding: TapeBinding);
    fn binding(&self) -> Option<&TapeBinding>;
}

// what a connected widget knows about its recorder
#[derive(Clone, Debug)]
pub struct TapeBinding {
    pub slot: usize,
    pub recording: bool,
    pub recorder: Weak<RefCell<Ghost>>,
}

impl TapeBinding {
    // false if the recorder is gone or busy (mid-tick)
    pub fn recorder_playing(&self) -> bool {
        self.recorder
            .upgrade()
            .and_then(|g| g.try_borrow().ok().map(|g| g.is_playing()))
            .unwrap_or(false)
    }
}
