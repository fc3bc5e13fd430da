//! Event delivery.
//!
//! Each transition is delivered, in order, to:
//! 1. the tracker-wide callback for its kind (`on_enter` / `on_exit` / `on_skip`),
//! 2. every hook registered for the region's data and that kind,
//! 3. every [`Notifier`] subscriber listening to that kind (or to all kinds).
//!
//! Delivery is synchronous. The first callback that returns `Err` stops
//! delivery for the rest of the update.

use std::fmt;

use regionwatch_common::error::{RegionwatchError, RegionwatchResult};
use regionwatch_region_model::{RegionData, TransitionEvent, TransitionKind};

/// A transition callback. Returning `Err` aborts the remaining deliveries.
pub type TransitionCallback = Box<dyn FnMut(&TransitionEvent) -> anyhow::Result<()>>;

fn invoke(callback: &mut TransitionCallback, event: &TransitionEvent) -> RegionwatchResult<()> {
    callback(event).map_err(|e| {
        tracing::warn!(
            event = event.notification_name(),
            region = %event.data(),
            error = %e,
            "Transition callback failed"
        );
        RegionwatchError::callback(event.notification_name(), e)
    })
}

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    kind: Option<TransitionKind>,
    callback: TransitionCallback,
}

/// Publish/subscribe side channel carrying the `region:*` notifications.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of transition, or to all of them with `None`.
    pub fn subscribe<F>(&mut self, kind: Option<TransitionKind>, callback: F) -> ListenerId
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every matching listener in subscription order.
    pub fn notify(&mut self, event: &TransitionEvent) -> RegionwatchResult<()> {
        for listener in &mut self.listeners {
            if listener.kind.map_or(true, |kind| kind == event.kind) {
                invoke(&mut listener.callback, event)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// The tracker-wide callbacks, one slot per kind.
#[derive(Default)]
pub(crate) struct KindCallbacks {
    pub(crate) on_enter: Option<TransitionCallback>,
    pub(crate) on_exit: Option<TransitionCallback>,
    pub(crate) on_skip: Option<TransitionCallback>,
}

impl KindCallbacks {
    pub(crate) fn slot_mut(&mut self, kind: TransitionKind) -> &mut Option<TransitionCallback> {
        match kind {
            TransitionKind::Enter => &mut self.on_enter,
            TransitionKind::Exit => &mut self.on_exit,
            TransitionKind::Skip => &mut self.on_skip,
        }
    }

    pub(crate) fn call(&mut self, event: &TransitionEvent) -> RegionwatchResult<()> {
        match self.slot_mut(event.kind) {
            Some(callback) => invoke(callback, event),
            None => Ok(()),
        }
    }
}

struct RegionHook {
    data: RegionData,
    kind: TransitionKind,
    callback: TransitionCallback,
}

/// Callbacks attached to regions by their data.
///
/// Hooks outlive the regions they name: replacing the region set keeps them,
/// so a region re-added with the same data fires the same hooks.
#[derive(Default)]
pub(crate) struct RegionHooks {
    hooks: Vec<RegionHook>,
}

impl RegionHooks {
    pub(crate) fn add(&mut self, data: RegionData, kind: TransitionKind, callback: TransitionCallback) {
        self.hooks.push(RegionHook {
            data,
            kind,
            callback,
        });
    }

    /// Drop every hook for `data`, returning how many were removed.
    pub(crate) fn remove(&mut self, data: &RegionData) -> usize {
        let before = self.hooks.len();
        self.hooks.retain(|hook| &hook.data != data);
        before - self.hooks.len()
    }

    pub(crate) fn clear(&mut self) {
        self.hooks.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }

    pub(crate) fn call(&mut self, event: &TransitionEvent) -> RegionwatchResult<()> {
        for hook in &mut self.hooks {
            if hook.kind == event.kind && &hook.data == event.data() {
                invoke(&mut hook.callback, event)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionwatch_region_model::Region;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event(kind: TransitionKind, data: &str) -> TransitionEvent {
        TransitionEvent::new(kind, Region::new(0.0, Some(1.0), data).unwrap(), -1.0, 0.5)
    }

    #[test]
    fn test_subscribe_filters_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();

        let enters = seen.clone();
        notifier.subscribe(Some(TransitionKind::Enter), move |e| {
            enters.borrow_mut().push(format!("enter-only:{}", e.kind));
            Ok(())
        });
        let all = seen.clone();
        notifier.subscribe(None, move |e| {
            all.borrow_mut().push(format!("all:{}", e.kind));
            Ok(())
        });

        notifier.notify(&event(TransitionKind::Enter, "a")).unwrap();
        notifier.notify(&event(TransitionKind::Skip, "a")).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec!["enter-only:enter", "all:enter", "all:skip"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();
        let counter = count.clone();
        let id = notifier.subscribe(None, move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        notifier.notify(&event(TransitionKind::Exit, "a")).unwrap();
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());
        notifier.notify(&event(TransitionKind::Exit, "a")).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_failing_listener_stops_delivery() {
        let reached = Rc::new(RefCell::new(false));
        let mut notifier = Notifier::new();
        notifier.subscribe(None, |_| Err(anyhow::anyhow!("listener broke")));
        let flag = reached.clone();
        notifier.subscribe(None, move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        let err = notifier
            .notify(&event(TransitionKind::Skip, "a"))
            .unwrap_err();
        assert!(err.to_string().contains("region:skip"));
        assert!(!*reached.borrow());
    }

    #[test]
    fn test_region_hooks_match_data_and_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = RegionHooks::default();

        let log = seen.clone();
        hooks.add(
            RegionData::from("a"),
            TransitionKind::Enter,
            Box::new(move |e: &TransitionEvent| {
                log.borrow_mut().push(e.data().to_string());
                Ok(())
            }),
        );

        hooks.call(&event(TransitionKind::Enter, "a")).unwrap();
        hooks.call(&event(TransitionKind::Exit, "a")).unwrap();
        hooks.call(&event(TransitionKind::Enter, "b")).unwrap();
        assert_eq!(*seen.borrow(), vec!["a"]);

        assert_eq!(hooks.remove(&RegionData::from("a")), 1);
        assert_eq!(hooks.len(), 0);
    }
}
