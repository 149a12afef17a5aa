use std::collections::BTreeMap;

use crate::math::interp;
use crate::widgets::{Field, ValueMap};

// One field's samples, indexed by moment. Sparse: a moment that was never
// written reads back as None.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    samples: Vec<Option<f64>>,
}

impl Track {
    pub fn get(&self, index: i64) -> Option<f64> {
        usize::try_from(index).ok()
            .and_then(|i| self.samples.get(i).copied().flatten())
    }

    pub fn put(&mut self, index: usize, value: f64) {
        if index >= self.samples.len() {
            self.samples.resize(index + 1, None);
        }
        self.samples[index] = Some(value);
    }

    // Interpolated value at `needle`, or None when nothing should be sent:
    // the sample behind the needle (relative to `direction`) is missing or
    // equal to the one under it. `needle` must be finite and `direction`
    // must be 1 or -1; the index casts saturate otherwise.
    pub fn sample(&self, needle: f64, direction: f64) -> Option<f64> {
        let i = needle.floor() as i64;
        let here = self.get(i)?;
        let behind = self.get(i - direction as i64)?;
        if behind == here {
            return None;
        }
        // hold the last sample past the end of the track
        let upper = self.get(i + 1).unwrap_or(here);
        Some(interp(needle - i as f64, here, upper))
    }
}

// per-connection storage, field set fixed when the slot is allocated
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slot {
    tracks: BTreeMap<Field, Track>,
}

impl Slot {
    pub fn tracks(&self) -> impl Iterator<Item = (Field, &Track)> {
        self.tracks.iter().map(|(k, t)| (*k, t))
    }

    pub fn track(&self, field: Field) -> Option<&Track> {
        self.tracks.get(field)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tape {
    slots: Vec<Slot>,
}

impl Tape {
    pub fn allocate<'a>(&mut self, fields: impl IntoIterator<Item = &'a Field>) -> usize {
        let tracks = fields.into_iter().map(|f| (*f, Track::default())).collect();
        self.slots.push(Slot { tracks });
        self.slots.len() - 1
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // fields the slot wasn't allocated with are skipped
    pub fn write(&mut self, slot: usize, moment: usize, val: &ValueMap) {
        let Some(slot) = self.slots.get_mut(slot) else {
            return;
        };
        for (key, v) in val {
            if let Some(track) = slot.tracks.get_mut(key) {
                track.put(moment, *v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(samples: &[Option<f64>]) -> Track {
        Track { samples: samples.to_vec() }
    }

    #[test]
    fn test_put_is_sparse() {
        let mut t = Track::default();
        t.put(3, 0.4);
        assert_eq!(t.get(0), None);
        assert_eq!(t.get(3), Some(0.4));
        assert_eq!(t.get(4), None);
        assert_eq!(t.get(-1), None);
        t.put(1, 0.2);
        assert_eq!(t.get(3), Some(0.4));
    }

    #[test]
    fn test_sample_halfway_is_mean() {
        let t = track(&[Some(0.0), Some(0.2), Some(0.6)]);
        let v = t.sample(1.5, 1.0).unwrap();
        assert!((v - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_sample_holds_last_value_past_end() {
        let t = track(&[Some(0.1), Some(0.3)]);
        assert_eq!(t.sample(1.7, 1.0), Some(0.3));
    }

    #[test]
    fn test_sample_suppressed_on_flat_segment() {
        let t = track(&[Some(0.5), Some(0.5), Some(0.9)]);
        assert_eq!(t.sample(1.5, 1.0), None);
        // looking backwards the neighbour is index 2, which differs
        assert!(t.sample(1.5, -1.0).is_some());
    }

    #[test]
    fn test_sample_needs_neighbour_behind() {
        let t = track(&[None, Some(0.5), Some(0.9)]);
        assert_eq!(t.sample(1.0, 1.0), None);
        assert_eq!(t.sample(0.5, 1.0), None);
    }

    #[test]
    fn test_write_skips_unallocated_fields() {
        let mut tape = Tape::default();
        let slot = tape.allocate(&["x"]);
        tape.write(slot, 2, &ValueMap::from([("x", 0.3), ("y", 0.7)]));
        let s = tape.slot(slot).unwrap();
        assert_eq!(s.track("x").unwrap().get(2), Some(0.3));
        assert!(s.track("y").is_none());
        // unknown slot is ignored
        tape.write(9, 0, &ValueMap::from([("x", 0.1)]));
        assert_eq!(tape.len(), 1);
    }
}
