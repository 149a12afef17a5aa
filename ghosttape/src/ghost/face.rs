// Transport face: record button on the left, play button on the right.

use crate::shared::{Point, Size, GHOST_SIZE};
use crate::widgets::{Clickable, Drawable, Surface, TextStyle};
use super::Ghost;

impl Drawable for Ghost {
    fn size(&self) -> Size {
        GHOST_SIZE
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Size { width, height } = GHOST_SIZE;
        let palette = &self.palette;
        let quad = width / 4.0;
        let quad2 = width - quad;
        let mid = height / 2.0;

        surface.fill_rect(Point::new(0.0, 0.0), GHOST_SIZE, palette.fill);

        if !self.face.recording {
            surface.fill_circle(Point::new(quad, mid), quad * 0.8, palette.record);
            surface.text(Point::new(quad, mid), "rec", TextStyle::centered(palette.fill, height / 6.0));
        } else {
            surface.fill_rect(
                Point::new(quad * 0.4, quad * 0.4),
                Size { width: quad * 1.2, height: quad * 1.2 },
                palette.record,
            );
        }

        if !self.face.playing {
            surface.fill_circle(Point::new(quad2, mid), quad * 0.8, palette.border);
            surface.text(Point::new(quad2, mid), "play", TextStyle::centered(palette.fill, height / 6.0));
        } else {
            surface.stroke_circle(Point::new(quad2, mid), quad * 0.8, width / 30.0, palette.border);
            surface.text(
                Point::new(quad2, mid + 2.0),
                &self.face.seconds.to_string(),
                TextStyle::centered(palette.border, height / 3.0),
            );
        }
    }
}

impl Clickable for Ghost {
    // left half: record / stop, right half: play / pause
    fn click(&mut self, pos: Point) {
        if pos.x < GHOST_SIZE.width / 2.0 {
            if self.recording {
                self.stop();
            } else {
                self.record();
            }
        } else {
            self.toggle_play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ghost::tests::setup;
    use crate::shared::Palette;
    use crate::widgets::testing::{DrawOp, RecordingSurface};

    fn draw(ghost: &Ghost) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        ghost.draw(&mut surface);
        surface
    }

    #[test]
    fn test_idle_face_shows_both_labels() {
        let (_s, ghost) = setup();
        let surface = draw(&ghost.borrow());
        let palette = Palette::default();
        assert_eq!(surface.texts(), vec!["rec", "play"]);
        assert_eq!(surface.ops[0], DrawOp::FillRect(Point::new(0.0, 0.0), GHOST_SIZE, palette.fill));
        assert_eq!(surface.ops[1], DrawOp::FillCircle(Point::new(25.0, 25.0), 20.0, palette.record));
        assert_eq!(surface.ops[3], DrawOp::FillCircle(Point::new(75.0, 25.0), 20.0, palette.border));
    }

    #[test]
    fn test_recording_face_shows_square() {
        let (_s, ghost) = setup();
        ghost.borrow_mut().record();
        let surface = draw(&ghost.borrow());
        assert_eq!(surface.texts(), vec!["play"]);
        assert_eq!(
            surface.ops[1],
            DrawOp::FillRect(Point::new(10.0, 10.0), Size { width: 30.0, height: 30.0 }, Palette::default().record)
        );
    }

    #[test]
    fn test_playing_face_counts_seconds() {
        let (scheduler, ghost) = setup();
        ghost.borrow_mut().record();
        for _ in 0..70 {
            scheduler.tick();
        }
        ghost.borrow_mut().stop();
        ghost.borrow_mut().click(Point::new(80.0, 25.0));
        // needle sits at 69 until the first advance
        let surface = draw(&ghost.borrow());
        assert_eq!(surface.texts(), vec!["rec", "2"]);
        assert!(surface.ops.iter().any(|op| matches!(op, DrawOp::StrokeCircle(_, r, w, _) if *r == 20.0 && (*w - 100.0 / 30.0).abs() < 1e-12)));
    }

    #[test]
    fn test_click_halves_toggle_transport() {
        let (_s, ghost) = setup();
        let left = Point::new(10.0, 25.0);
        let right = Point::new(60.0, 25.0);

        ghost.borrow_mut().click(left);
        assert!(ghost.borrow().is_recording());
        ghost.borrow_mut().click(left);
        assert!(!ghost.borrow().is_recording());
        assert!(!ghost.borrow().face().recording);

        ghost.borrow_mut().click(right);
        assert!(ghost.borrow().is_playing());
        assert!(ghost.borrow().face().playing);
        ghost.borrow_mut().click(right);
        assert!(!ghost.borrow().is_playing());
        assert!(!ghost.borrow().face().playing);
    }
}
