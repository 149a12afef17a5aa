// Sits between the tui and the widgets: owns the scheduler, the ghost and
// every source widget, turns input events into calls on them, and builds
// the display state the tui draws from.

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::Receiver;
use log::{debug, info};

use crate::ghost::Ghost;
use crate::pipeline::settings::GhostSettings;
use crate::scheduler::Scheduler;
use crate::shared::{DisplayState, InputEvent, Target};
use crate::widgets::{Clickable, Position, Registry, Slider, Transmit};

pub const NUM_SLIDERS: usize = 3;

pub struct Middle {
    pub scheduler: Rc<Scheduler>,
    pub ghost: Rc<RefCell<Ghost>>,
    pub registry: Registry,
    transmits: Receiver<Transmit>,
    last_transmit: Option<String>,
}

impl Middle {
    pub fn new(settings: &GhostSettings) -> Self {
        let scheduler = Rc::new(Scheduler::new());
        let ghost = Ghost::new(&scheduler, settings);
        Self::with_ghost(scheduler, ghost)
    }

    pub fn with_ghost(scheduler: Rc<Scheduler>, ghost: Rc<RefCell<Ghost>>) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<Transmit>(1024);
        let mut registry = Registry::default();
        for n in 1..=NUM_SLIDERS {
            registry.add(Rc::new(RefCell::new(Slider::new(format!("slider{n}"), tx.clone()))));
        }
        registry.add(Rc::new(RefCell::new(Position::new("position", tx))));
        Self {
            scheduler,
            ghost,
            registry,
            transmits: rx,
            last_transmit: None,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let mut ghost = self.ghost.borrow_mut();
        match event {
            InputEvent::Record => {
                if ghost.is_recording() {
                    ghost.stop();
                } else {
                    ghost.record();
                }
            }
            InputEvent::PlayPress => ghost.toggle_play(),
            InputEvent::CycleMode => {
                let mode = ghost.mode().next();
                ghost.set_mode(mode);
                info!("mode {}", mode.label());
            }
            InputEvent::ToggleLoop => {
                let looping = !ghost.looping();
                ghost.set_looping(looping);
            }
            InputEvent::AdjustRate(delta) => {
                let rate = ghost.rate() + delta;
                ghost.set_rate(rate);
            }
            InputEvent::AdjustNoise(delta) => {
                let noise = ghost.noise() + delta;
                ghost.set_noise(noise);
            }
            InputEvent::WatchAll => ghost.watch_all(&self.registry),
            InputEvent::Click(Target::Ghost, pos) => ghost.click(pos),
            InputEvent::Drag(Target::Ghost, pos) => ghost.drag(pos),
            InputEvent::Click(Target::Source(i), pos) => {
                if let Some(w) = self.registry.get(i) {
                    w.borrow_mut().click(pos);
                }
            }
            InputEvent::Drag(Target::Source(i), pos) => {
                if let Some(w) = self.registry.get(i) {
                    w.borrow_mut().drag(pos);
                }
            }
            InputEvent::Quit => {}
        }
    }

    // one animation frame
    pub fn tick(&mut self) {
        self.scheduler.tick();
        self.drain_transmits();
    }

    fn drain_transmits(&mut self) {
        while let Ok(t) = self.transmits.try_recv() {
            let json = serde_json::to_string(&t).unwrap_or_default();
            debug!("transmit {json}");
            self.last_transmit = Some(json);
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let ghost = self.ghost.borrow();
        DisplayState {
            recording: ghost.is_recording(),
            playing: ghost.is_playing(),
            mode_label: ghost.mode().label(),
            rate: ghost.rate(),
            looping: ghost.looping(),
            noise: ghost.noise(),
            moment: ghost.moment(),
            size: ghost.size(),
            connected: ghost.connection_count(),
            last_transmit: self.last_transmit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Point;
    use crate::widgets::Source;

    fn middle() -> Middle {
        Middle::new(&GhostSettings::default())
    }

    #[test]
    fn test_transport_keys_toggle() {
        let mut m = middle();
        m.handle_input(InputEvent::Record);
        assert!(m.display_state().recording);
        m.handle_input(InputEvent::Record);
        assert!(!m.display_state().recording);
        m.handle_input(InputEvent::PlayPress);
        assert!(m.display_state().playing);
        m.handle_input(InputEvent::PlayPress);
        assert!(!m.display_state().playing);
    }

    #[test]
    fn test_play_key_keeps_face_in_step() {
        let mut m = middle();
        m.handle_input(InputEvent::WatchAll);
        m.handle_input(InputEvent::Record);
        for _ in 0..10 {
            m.tick();
        }
        m.handle_input(InputEvent::Record);

        m.handle_input(InputEvent::PlayPress);
        assert!(m.ghost.borrow().face().playing);
        m.tick();
        m.handle_input(InputEvent::PlayPress);
        for _ in 0..5 {
            m.tick();
        }
        let ghost = m.ghost.borrow();
        assert!(!ghost.is_playing());
        assert_eq!(ghost.face().playing, ghost.is_playing());
    }

    #[test]
    fn test_knobs_adjust_ghost() {
        let mut m = middle();
        m.handle_input(InputEvent::AdjustRate(0.25));
        m.handle_input(InputEvent::AdjustNoise(0.05));
        m.handle_input(InputEvent::AdjustNoise(-0.5));
        m.handle_input(InputEvent::ToggleLoop);
        m.handle_input(InputEvent::CycleMode);
        let ds = m.display_state();
        assert_eq!(ds.rate, 1.25);
        assert_eq!(ds.noise, 0.0);
        assert!(!ds.looping);
        assert_eq!(ds.mode_label, "BOUNCE");
    }

    #[test]
    fn test_watch_all_connects_every_widget() {
        let mut m = middle();
        m.handle_input(InputEvent::WatchAll);
        assert_eq!(m.display_state().connected, NUM_SLIDERS + 1);
        for w in m.registry.iter() {
            assert!(w.borrow().binding().is_some());
        }
    }

    #[test]
    fn test_click_on_slider_transmits() {
        let mut m = middle();
        m.handle_input(InputEvent::Click(Target::Source(0), Point::new(30.0, 6.0)));
        m.tick();
        assert_eq!(
            m.display_state().last_transmit.as_deref(),
            Some(r#"{"widget":"slider1","val":{"value":0.3}}"#)
        );
        // clicks outside the registry are ignored
        m.handle_input(InputEvent::Click(Target::Source(42), Point::new(30.0, 6.0)));
    }

    #[test]
    fn test_recorded_drag_plays_back_silently() {
        let mut m = middle();
        m.handle_input(InputEvent::WatchAll);
        m.handle_input(InputEvent::Record);
        for k in 0..10 {
            m.handle_input(InputEvent::Drag(Target::Source(0), Point::new(k as f64 * 10.0, 6.0)));
            m.tick();
        }
        m.handle_input(InputEvent::Record);
        assert_eq!(m.display_state().size, 10);

        m.last_transmit = None;
        m.handle_input(InputEvent::PlayPress);
        for _ in 0..5 {
            m.tick();
        }
        assert!(m.display_state().playing);
        assert!(m.display_state().last_transmit.is_none());
        let level = m.registry.get(0).unwrap().borrow().value()["value"];
        assert!(level < 0.9);
    }
}
