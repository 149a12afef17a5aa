use std::collections::BTreeMap;

use crossbeam_channel::Sender;
use log::trace;
use serde::Serialize;

use crate::math::clip;

// field keys are fixed per widget type ("value", "x", "y", ...)
pub type Field = &'static str;
pub type ValueMap = BTreeMap<Field, f64>;

// a user-originated value change, drained by the host loop
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transmit {
    pub widget: String,
    pub val: ValueMap,
}

// copy the fields `own` already has from `partial`, clamped to [0, 1]
pub(super) fn apply(own: &mut ValueMap, partial: &ValueMap) -> bool {
    let mut changed = false;
    for (key, v) in partial {
        if let Some(slot) = own.get_mut(key) {
            *slot = clip(*v, 0.0, 1.0);
            changed = true;
        }
    }
    changed
}

// Shared `Source::set` body: apply the partial, then report user changes
// on the channel. Playback sets stay silent. A full channel drops the message.
pub(super) fn set_and_transmit(
    name: &str,
    own: &mut ValueMap,
    partial: &ValueMap,
    from_playback: bool,
    tx: &Sender<Transmit>,
) {
    if !apply(own, partial) || from_playback {
        return;
    }
    trace!("{name} -> {own:?}");
    let _ = tx.try_send(Transmit { widget: name.to_string(), val: own.clone() });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_skips_unknown_fields_and_clamps() {
        let mut own = ValueMap::from([("x", 0.2), ("y", 0.3)]);
        let partial = ValueMap::from([("x", 1.4), ("z", 0.9)]);
        assert!(apply(&mut own, &partial));
        assert_eq!(own, ValueMap::from([("x", 1.0), ("y", 0.3)]));
        assert!(!apply(&mut own, &ValueMap::from([("z", 0.1)])));
    }

    #[test]
    fn test_set_and_transmit_only_reports_user_changes() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let mut own = ValueMap::from([("value", 0.5)]);

        set_and_transmit("slider1", &mut own, &ValueMap::from([("value", 0.7)]), true, &tx);
        assert_eq!(own["value"], 0.7);
        assert!(rx.try_recv().is_err());

        set_and_transmit("slider1", &mut own, &ValueMap::from([("other", 0.1)]), false, &tx);
        assert!(rx.try_recv().is_err());

        set_and_transmit("slider1", &mut own, &ValueMap::from([("value", 0.2)]), false, &tx);
        assert_eq!(
            rx.try_recv().ok(),
            Some(Transmit { widget: "slider1".into(), val: ValueMap::from([("value", 0.2)]) })
        );
    }

    #[test]
    fn test_transmit_serializes_as_json() {
        let t = Transmit { widget: "slider1".into(), val: ValueMap::from([("value", 0.5)]) };
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"widget":"slider1","val":{"value":0.5}}"#);
    }
}
