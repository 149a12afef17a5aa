// Per-frame callback list. The host loop calls `tick` once per frame and
// every registered callback runs once, in registration order.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::widgets::Tickable;

type Callback = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

#[derive(Default)]
pub struct Scheduler {
    items: RefCell<Vec<(TickHandle, Callback)>>,
    next_id: Cell<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, callback: impl Fn() + 'static) -> TickHandle {
        let handle = TickHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.items.borrow_mut().push((handle, Rc::new(callback)));
        handle
    }

    // ticks the target until it is dropped or the handle is unregistered
    pub fn register_tickable<T: Tickable + 'static>(&self, target: Weak<RefCell<T>>) -> TickHandle {
        self.register(move || {
            if let Some(target) = target.upgrade() {
                target.borrow_mut().tick();
            }
        })
    }

    pub fn unregister(&self, handle: TickHandle) -> bool {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|(h, _)| *h != handle);
        items.len() != before
    }

    pub fn is_registered(&self, handle: TickHandle) -> bool {
        self.items.borrow().iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn tick(&self) {
        // callbacks may register/unregister while we run, so walk a snapshot
        // of handles and look each one up again right before calling it
        let handles: Vec<TickHandle> = self.items.borrow().iter().map(|(h, _)| *h).collect();
        for handle in handles {
            let callback = self.items.borrow()
                .iter()
                .find(|(h, _)| *h == handle)
                .map(|(_, cb)| Rc::clone(cb));
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_runs_in_registration_order() {
        let scheduler = Scheduler::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let c = Rc::clone(&calls);
            scheduler.register(move || c.borrow_mut().push(n));
        }
        scheduler.tick();
        scheduler.tick();
        assert_eq!(*calls.borrow(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_unregister_by_handle() {
        let scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let handle = scheduler.register(move || c.set(c.get() + 1));
        scheduler.tick();
        assert!(scheduler.unregister(handle));
        assert!(!scheduler.unregister(handle));
        scheduler.tick();
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.len(), 0);
    }

    #[test]
    fn test_unregister_during_tick_skips_later_callback() {
        let scheduler = Rc::new(Scheduler::new());
        let later_ran = Rc::new(Cell::new(false));
        let victim: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));

        let s = Rc::clone(&scheduler);
        let v = Rc::clone(&victim);
        scheduler.register(move || {
            if let Some(h) = v.get() {
                s.unregister(h);
            }
        });
        let r = Rc::clone(&later_ran);
        victim.set(Some(scheduler.register(move || r.set(true))));

        scheduler.tick();
        assert!(!later_ran.get());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_register_during_tick_runs_next_frame() {
        let scheduler = Rc::new(Scheduler::new());
        let count = Rc::new(Cell::new(0));

        let s = Rc::clone(&scheduler);
        let c = Rc::clone(&count);
        let armed = Cell::new(false);
        scheduler.register(move || {
            if !armed.replace(true) {
                let c = Rc::clone(&c);
                s.register(move || c.set(c.get() + 1));
            }
        });

        scheduler.tick();
        assert_eq!(count.get(), 0);
        scheduler.tick();
        assert_eq!(count.get(), 1);
    }

    struct Counter(u32);

    impl Tickable for Counter {
        fn tick(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_tickable_stops_when_dropped() {
        let scheduler = Scheduler::new();
        let counter = Rc::new(RefCell::new(Counter(0)));
        let handle = scheduler.register_tickable(Rc::downgrade(&counter));
        scheduler.tick();
        assert_eq!(counter.borrow().0, 1);
        drop(counter);
        scheduler.tick(); // no target, no panic
        assert!(scheduler.is_registered(handle));
    }
}
