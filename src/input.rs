use std::collections::BTreeSet;

use crate::events::{EventKind, InputEvent};

/// Something the controller registers its handlers against at startup.
pub trait InputSource {
    fn subscribe(&mut self, kind: EventKind);
}

/// Set of registered event kinds; used by the runtime to gate delivery.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    kinds: BTreeSet<EventKind>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Timer ticks are always accepted; input events only when subscribed.
    pub fn accepts(&self, event: &InputEvent) -> bool {
        match event.kind() {
            Some(kind) => self.contains(kind),
            None => true,
        }
    }
}

impl InputSource for Subscriptions {
    fn subscribe(&mut self, kind: EventKind) {
        self.kinds.insert(kind);
    }
}
