use crate::models::line_item::ItemKind;

/// What a committed mutation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    ItemAdded { kind: ItemKind, id: String },
    ItemDeleted { kind: ItemKind, id: String },
    HistoryReplaced,
}

/// Notifications delivered to subscribers.
///
/// `LoadFailed` and `SaveFailed` are the user-visible error channel: the
/// ledger keeps working and the host decides how to surface the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Initial hydration finished (from the store or from defaults).
    Loaded,
    Changed(ChangeKind),
    LoadFailed { message: String },
    SaveFailed { message: String },
}

/// Receives ledger notifications synchronously, on the mutating call's stack.
pub trait LedgerObserver: Send + Sync {
    fn notify(&self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: Fn(&LedgerEvent) + Send + Sync,
{
    fn notify(&self, event: &LedgerEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscribers.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn LedgerObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Deliver `event` to every subscriber in subscription order.
    pub fn emit(&self, event: &LedgerEvent) {
        for (_, observer) in &self.observers {
            observer.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscribers", &self.observers.len())
            .finish()
    }
}
