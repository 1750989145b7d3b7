//! Change Notifier
//!
//! Dirty flag plus at most one observer. Registering an observer replaces
//! the previous one; the returned [`Subscription`] deregisters only the
//! observer it was issued for.

/// Passed to the observer on every emitted update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotice {
    /// Monotonic count of emitted updates
    pub revision: u64,
}

/// Handle for deregistering an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Observer = Box<dyn FnMut(ChangeNotice)>;

#[derive(Default)]
pub struct ChangeNotifier {
    changed: bool,
    revision: u64,
    next_subscription: u64,
    observer: Option<(Subscription, Observer)>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("changed", &self.changed)
            .field("revision", &self.revision)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Replace the observer. Clears the dirty flag.
    pub fn subscribe(&mut self, observer: impl FnMut(ChangeNotice) + 'static) -> Subscription {
        self.next_subscription += 1;
        let subscription = Subscription(self.next_subscription);
        self.changed = false;
        self.observer = Some((subscription, Box::new(observer)));
        subscription
    }

    /// Remove the observer if `subscription` is still the current one
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        match &self.observer {
            Some((current, _)) if *current == subscription => {
                self.observer = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Clear the dirty flag and call the observer
    pub fn emit(&mut self) -> ChangeNotice {
        self.changed = false;
        self.revision += 1;
        let notice = ChangeNotice {
            revision: self.revision,
        };
        if let Some((_, observer)) = self.observer.as_mut() {
            observer(notice);
        }
        notice
    }
}
