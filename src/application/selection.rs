use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Company, Month, Selection};
use crate::log_debug;

/// Handle returned by [`SelectionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&Selection)>;

/// Holds the current selection and notifies subscribers whenever it changes.
/// Setting a field to the value it already has is not a change.
pub struct SelectionStore {
    current: Selection,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl SelectionStore {
    pub fn new(initial: Selection) -> Self {
        Self { current: initial, listeners: Vec::new(), next_id: 0 }
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Selection) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn set_company(&mut self, company: Company) -> bool {
        self.set(self.current.with_company(company))
    }

    pub fn set_month(&mut self, month: Month) -> bool {
        self.set(self.current.with_month(month))
    }

    /// Replace the selection; notifies and returns `true` only if it changed
    pub fn set(&mut self, selection: Selection) -> bool {
        if selection == self.current {
            return false;
        }
        log_debug!(
            LogComponent::Application("Selection"),
            "{} {} -> {} {}",
            self.current.company,
            self.current.month,
            selection.company,
            selection.month
        );
        self.current = selection;
        self.notify();
        true
    }

    /// Notify subscribers with the unchanged selection, e.g. after the dataset was replaced
    pub fn refresh(&self) {
        self.notify();
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.current);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}
