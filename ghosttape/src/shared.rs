// Controls:
//
// Transport (the ghost):
//   r             //  Record (toggle record / stop)
//   Space         //  PlayPress (toggle play / pause)
//   m             //  CycleMode (linear -> bounce -> random -> wander -> pattern)
//   l             //  ToggleLoop
//   [ / ]         //  AdjustRate(-0.25 or 0.25)
//   - / =         //  AdjustNoise(-0.05 or 0.05)
//   w             //  WatchAll (connect every widget on screen)
//
// Mouse:
//   left click    //  Click(target, pos) in the target's logical coordinates
//   left drag     //  Drag(target, pos)
//
// Quit:
//   Esc           //  Quit
//
// The rendering process is the same as before: middle owns the widgets,
// the tui reads them every frame and draws whatever they say.

use ratatui::style::Color;

// the ghost samples once per frame, the seconds counter assumes this rate
pub const FRAMES_PER_SECOND: f64 = 30.0;
pub const MAX_LENGTH: usize = 2000;

pub const GHOST_SIZE: Size = Size { width: 100.0, height: 50.0 };
pub const SLIDER_SIZE: Size = Size { width: 100.0, height: 12.0 };
pub const POSITION_SIZE: Size = Size { width: 100.0, height: 50.0 };

pub const RATE_STEP: f64 = 0.25;
pub const NOISE_STEP: f64 = 0.05;

// logical units, y grows downwards like a canvas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub fill: Color,
    pub border: Color,
    pub accent: Color,
    pub record: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fill: Color::Rgb(0xee, 0xee, 0xee),
            border: Color::Rgb(0x40, 0x40, 0x40),
            accent: Color::Rgb(0xff, 0x55, 0x00),
            record: Color::Rgb(0xee, 0x33, 0x33),
        }
    }
}

// what a mouse event landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Ghost,
    Source(usize), // index into the registry
}

// what the status line needs, rebuilt by middle every frame
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    pub recording: bool,
    pub playing: bool,
    pub mode_label: &'static str,
    pub rate: f64,
    pub looping: bool,
    pub noise: f64,
    pub moment: usize,
    pub size: usize,
    pub connected: usize,
    pub last_transmit: Option<String>, // json of the last user change
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Record,
    PlayPress,
    CycleMode,
    ToggleLoop,
    AdjustRate(f64),
    AdjustNoise(f64),
    WatchAll,

    Click(Target, Point),
    Drag(Target, Point),

    Quit,
}
