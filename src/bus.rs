use crate::model::DocId;
use crate::tree::{FoldAction, NodeId};

/// Domain events consumed by external listeners (rendering, analytics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterEvent {
    /// A cluster became the active filter; carries its flattened document set.
    Selected { documents: Vec<DocId> },
    /// The synthetic root was selected, revealing the full document universe.
    SelectedTop,
    Folded { node: NodeId, action: FoldAction },
    /// A "more" page reveal happened under `node`.
    More { node: NodeId },
}

pub type Listener = Box<dyn FnMut(&ClusterEvent)>;

/// Synchronous dispatch, in subscription order. Handlers run to completion
/// before the next emit is processed.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ClusterEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: ClusterEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_listeners_in_subscription_order() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&seen);
        bus.subscribe(move |event| first.borrow_mut().push(format!("first:{:?}", event)));
        let second = Rc::clone(&seen);
        bus.subscribe(move |event| second.borrow_mut().push(format!("second:{:?}", event)));

        bus.emit(ClusterEvent::SelectedTop);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("first:"));
        assert!(seen[1].starts_with("second:"));
    }

    #[test]
    fn test_emit_without_listeners_is_a_noop() {
        let mut bus = EventBus::new();
        bus.emit(ClusterEvent::More { node: 3 });
    }
}
