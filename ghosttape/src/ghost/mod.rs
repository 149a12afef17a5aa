//! Gesture recorder / player.
//!
//! The ghost samples the value maps of connected widgets once per frame while
//! recording, and on playback walks a needle over the recording and writes
//! interpolated values back into those widgets.
//!
//! Two scheduler callbacks drive it: `advance` (registered for the life of
//! the ghost) and `log` (registered only while recording).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::{clip, random};
use crate::pipeline::settings::GhostSettings;
use crate::scheduler::{Scheduler, TickHandle};
use crate::shared::{Palette, FRAMES_PER_SECOND};
use crate::widgets::{Registry, SourceHandle, TapeBinding, Tickable, ValueMap};

mod face;
mod mode;
mod tape;

pub use mode::PlayMode;
pub use tape::Tape;

struct Connection {
    slot: usize,
    source: SourceHandle,
}

// transport state as of the last redraw; this is what gets drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub recording: bool,
    pub playing: bool,
    pub seconds: i64,
}

pub struct Ghost {
    this: Weak<RefCell<Ghost>>,
    scheduler: Rc<Scheduler>,
    palette: Palette,

    recording: bool,
    playing: bool,
    max_length: usize,
    connections: Vec<Connection>,
    tape: Tape,

    moment: usize, // record head
    needle: f64,   // play head
    size: usize,   // length of the last finished recording

    rate: f64,
    start: f64,
    end: f64,
    looping: bool,
    direction: f64,
    noise: f64,
    mode: PlayMode,
    rng: StdRng,

    advance: TickHandle,
    log: Option<TickHandle>,
    face: Face,
}

impl Ghost {
    pub fn new(scheduler: &Rc<Scheduler>, settings: &GhostSettings) -> Rc<RefCell<Ghost>> {
        Self::with_rng(scheduler, settings, StdRng::from_os_rng())
    }

    pub fn with_rng(
        scheduler: &Rc<Scheduler>,
        settings: &GhostSettings,
        rng: StdRng,
    ) -> Rc<RefCell<Ghost>> {
        Rc::new_cyclic(|this| {
            let advance = scheduler.register_tickable(this.clone());
            RefCell::new(Ghost {
                this: this.clone(),
                scheduler: Rc::clone(scheduler),
                palette: Palette::default(),
                recording: false,
                playing: false,
                max_length: settings.max_length,
                connections: Vec::new(),
                tape: Tape::default(),
                moment: 0,
                needle: 0.0,
                size: 0,
                rate: settings.rate,
                start: 0.0,
                end: 1.0,
                looping: settings.looping,
                direction: 1.0,
                noise: settings.noise,
                mode: settings.mode,
                rng,
                advance,
                log: None,
                face: Face::default(),
            })
        })
    }

    // ── Connections ───────────────────────────────────────────────

    // Binds `source` to a fresh slot. Connecting the same widget twice gives
    // it a second slot; the first one keeps recording too.
    pub fn connect(&mut self, source: SourceHandle) -> usize {
        let (slot, name) = {
            let s = source.borrow();
            (self.tape.allocate(s.value().keys()), s.name().to_string())
        };
        source.borrow_mut().bind(TapeBinding {
            slot,
            recording: true,
            recorder: self.this.clone(),
        });
        debug!("connected {name} to slot {slot}");
        self.connections.push(Connection { slot, source });
        slot
    }

    // only the widgets registered right now
    pub fn watch_all(&mut self, registry: &Registry) {
        for widget in registry.iter() {
            self.connect(Rc::clone(widget));
        }
    }

    // ── Recording ─────────────────────────────────────────────────

    pub fn record(&mut self) {
        self.moment = 0;
        if let Some(old) = self.log.take() {
            self.scheduler.unregister(old);
        }
        let this = self.this.clone();
        self.log = Some(self.scheduler.register(move || {
            if let Some(ghost) = this.upgrade() {
                ghost.borrow_mut().log();
            }
        }));
        self.recording = true;
        info!("recording {} source(s)", self.connections.len());
        self.redraw();
    }

    // sampler tick: one sample per connected source at the current moment
    pub fn log(&mut self) {
        if !self.recording {
            return;
        }
        if self.moment >= self.max_length {
            self.stop();
            return;
        }
        for conn in &self.connections {
            self.tape.write(conn.slot, self.moment, conn.source.borrow().value());
        }
        if !self.connections.is_empty() {
            self.redraw();
        }
        self.moment += 1;
        if self.moment >= self.max_length {
            info!("tape full at {} moments", self.moment);
            self.stop();
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.log.take() {
            self.scheduler.unregister(handle);
        }
        self.size = self.moment;
        self.recording = false;
        info!("stopped, size {}", self.size);
        self.redraw();
    }

    // ── Playback ──────────────────────────────────────────────────

    // The needle starts from the end of the last recording pass whatever
    // `start` says; `start` and `end` only set the window.
    pub fn play(&mut self, rate: Option<f64>, start: Option<f64>, end: Option<f64>) {
        if let Some(rate) = rate {
            self.rate = rate;
        }
        self.needle = self.moment as f64 - 1.0;
        self.start = start.unwrap_or(0.0);
        self.end = end.unwrap_or(1.0);
        if self.mode == PlayMode::Linear {
            self.direction = 1.0;
        }
        self.playing = true;
        info!(
            "playing {} at rate {} from {} in [{}, {}]",
            self.mode.label(), self.rate, self.needle, self.start, self.end
        );
    }

    pub fn pause(&mut self) {
        self.playing = false;
        debug!("paused at {}", self.needle);
    }

    // transport button: pause when playing, otherwise play with the current
    // settings, and refresh the face either way
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play(None, None, None);
        }
        self.redraw();
    }

    pub fn advance(&mut self) {
        if !self.playing {
            return;
        }
        // nothing recorded: no window to move through, and needle / size
        // would not be finite
        if self.size == 0 {
            return;
        }
        let size = self.size as f64;
        match self.mode {
            PlayMode::Linear | PlayMode::Bounce => {
                self.needle += self.rate * self.direction;
            }
            PlayMode::Random => {
                self.needle = random(&mut self.rng, (self.end - self.start) * size) + self.start * size;
            }
            PlayMode::Wander => {
                // drift back towards the middle near the edges
                let mut weight = 3.0;
                if self.needle > size * 0.75 {
                    weight -= 1.0;
                }
                if self.needle < size * 0.25 {
                    weight += 1.0;
                }
                self.needle += self.rate * self.direction * (random(&mut self.rng, weight) - 1.0);
            }
            PlayMode::Pattern => {}
        }

        let pos = self.needle / size;
        if pos < self.end && pos > self.start {
            self.scan();
        } else if self.looping {
            if self.mode == PlayMode::Linear {
                self.needle = self.start * size + 1.0;
            } else {
                self.direction = -self.direction;
            }
            trace!("loop: needle {} direction {}", self.needle, self.direction);
        } else {
            self.playing = false;
            debug!("reached the end of the window, stopping");
        }
        self.redraw();
    }

    // push the tape's values at the needle into every connected widget
    fn scan(&mut self) {
        for conn in &self.connections {
            let Some(slot) = self.tape.slot(conn.slot) else {
                continue;
            };
            for (field, track) in slot.tracks() {
                let Some(mut v) = track.sample(self.needle, self.direction) else {
                    continue;
                };
                v += self.rng.random::<f64>() * self.noise - self.noise / 2.0;
                let v = clip(v, 0.0, 1.0);
                conn.source.borrow_mut().set(&ValueMap::from([(field, v)]), true);
            }
        }
    }

    fn redraw(&mut self) {
        self.face = Face {
            recording: self.recording,
            playing: self.playing,
            seconds: (self.needle / FRAMES_PER_SECOND).trunc() as i64,
        };
    }

    // ── Settings / accessors ──────────────────────────────────────

    pub fn settings(&self) -> GhostSettings {
        GhostSettings {
            max_length: self.max_length,
            rate: self.rate,
            looping: self.looping,
            noise: self.noise,
            mode: self.mode,
        }
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn set_noise(&mut self, noise: f64) {
        self.noise = noise.max(0.0);
    }

    pub fn is_recording(&self) -> bool { self.recording }
    pub fn is_playing(&self) -> bool { self.playing }
    pub fn moment(&self) -> usize { self.moment }
    pub fn needle(&self) -> f64 { self.needle }
    pub fn size(&self) -> usize { self.size }
    pub fn mode(&self) -> PlayMode { self.mode }
    pub fn rate(&self) -> f64 { self.rate }
    pub fn looping(&self) -> bool { self.looping }
    pub fn noise(&self) -> f64 { self.noise }
    pub fn face(&self) -> Face { self.face }
    pub fn tape(&self) -> &Tape { &self.tape }
    pub fn connection_count(&self) -> usize { self.connections.len() }
}

impl Tickable for Ghost {
    fn tick(&mut self) {
        self.advance();
    }
}

impl Drop for Ghost {
    fn drop(&mut self) {
        self.scheduler.unregister(self.advance);
        if let Some(handle) = self.log.take() {
            self.scheduler.unregister(handle);
        }
    }
}
