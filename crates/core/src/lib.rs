pub mod clock;
pub mod config;
pub mod errors;
pub mod models;
pub mod observer;
pub mod services;
pub mod storage;

use std::sync::{Arc, Once};

use clock::{Clock, SystemClock};
use config::LedgerConfig;
use errors::CoreError;
use models::{
    ledger::LedgerState,
    line_item::{new_item_id, ItemDraft, ItemKind, LineItem},
    month::{MonthKey, MonthlyDataPoint, MonthlyRecord},
    summary::{DashboardData, GoalProgress, LedgerSummary},
};
use observer::{ChangeKind, LedgerEvent, LedgerObserver, ObserverRegistry, SubscriptionId};
use services::{
    goal_service::GoalService,
    history_editor::HistoryEditor,
    list_service::ItemQuery,
    summary_service::SummaryService,
    time_series_service::TimeSeriesService,
};
use storage::{format, manager::StorageManager, traits::KeyValueStore};

static INIT_TRACING: Once = Once::new();

/// Installs a global `tracing` fmt subscriber (`finance_ledger_core=info`
/// unless `RUST_LOG` says otherwise). Safe to call more than once.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("finance_ledger_core=info"));

        // Another subscriber may already be installed by the host.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// A state change, recorded so it can be replayed if it arrives before
/// the initial load has finished.
#[derive(Debug, Clone)]
enum Mutation {
    AddItem { kind: ItemKind, item: LineItem },
    DeleteItem { kind: ItemKind, id: String },
    ReplaceHistory(Vec<MonthlyRecord>),
}

/// Main entry point for the finance ledger core library.
///
/// Owns the ledger state, persists the whole of it to the store after every
/// change, and notifies subscribers. Screens hold a handle to this value
/// (or to something that owns it) instead of reaching for global state.
///
/// Every mutating method takes `&mut self` and awaits its own store write
/// before returning, so writes reach the store in mutation order.
#[must_use]
pub struct FinanceLedger {
    state: LedgerState,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
    observers: ObserverRegistry,
    /// Mutations received while `state.is_loading`; replayed after load.
    pending: Vec<Mutation>,
    summary_service: SummaryService,
    time_series_service: TimeSeriesService,
    goal_service: GoalService,
    /// Tracks whether any mutation has not yet reached the store.
    dirty: bool,
}

impl std::fmt::Debug for FinanceLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceLedger")
            .field("store", &self.store.name())
            .field("items", &self.state.item_count())
            .field("months", &self.state.monthly_history.len())
            .field("is_loading", &self.state.is_loading)
            .field("pending", &self.pending.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FinanceLedger {
    /// Create a ledger bound to `store`, using the system clock and default
    /// configuration. The ledger starts in the loading state; call
    /// [`load`](Self::load) before relying on its contents.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, Arc::new(SystemClock), LedgerConfig::default())
    }

    /// Create a ledger with an explicit clock and configuration.
    pub fn with_config(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: LedgerConfig) -> Self {
        let state = LedgerState {
            is_loading: true,
            ..LedgerState::default()
        };
        Self {
            state,
            store,
            clock,
            config,
            observers: ObserverRegistry::new(),
            pending: Vec::new(),
            summary_service: SummaryService::new(),
            time_series_service: TimeSeriesService::new(),
            goal_service: GoalService::new(),
            dirty: false,
        }
    }

    /// Create a ledger and load it from `store` in one step.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut ledger = Self::new(store);
        ledger.load().await;
        ledger
    }

    // ── Lifecycle & Persistence ─────────────────────────────────────

    /// Hydrate the ledger from the store.
    ///
    /// - Nothing stored → empty collections and a zeroed history covering the
    ///   configured number of months, ending at the current month.
    /// - Stored snapshot → decoded; missing fields come back empty.
    /// - Unreadable or malformed snapshot → `LedgerEvent::LoadFailed` is
    ///   emitted and the ledger continues from the same defaults. The stored
    ///   value is left as it is.
    ///
    /// Mutations made before this call are then replayed in order and saved.
    /// Calling `load` on an already-loaded ledger does nothing.
    pub async fn load(&mut self) {
        if !self.state.is_loading {
            tracing::debug!("ledger already loaded");
            return;
        }

        let key = self.config.storage_key.clone();
        let loaded = match StorageManager::load(self.store.as_ref(), &key).await {
            Ok(Some(state)) => {
                tracing::info!(
                    key = %key,
                    items = state.item_count(),
                    months = state.monthly_history.len(),
                    "ledger loaded"
                );
                Some(state)
            }
            Ok(None) => {
                tracing::info!(key = %key, "no stored ledger; starting fresh");
                None
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "failed to load ledger; starting fresh");
                self.observers.emit(&LedgerEvent::LoadFailed {
                    message: e.to_string(),
                });
                None
            }
        };

        self.state = loaded.unwrap_or_else(|| self.default_state());
        self.state.is_loading = false;
        self.dirty = false;
        self.observers.emit(&LedgerEvent::Loaded);

        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        tracing::debug!(count = pending.len(), "replaying deferred mutations");
        let mut changed = false;
        for mutation in pending {
            if let Some(change) = self.apply(mutation) {
                self.observers.emit(&LedgerEvent::Changed(change));
                changed = true;
            }
        }
        if changed {
            self.dirty = true;
            self.persist().await;
        }
    }

    /// `true` until [`load`](Self::load) has completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Write the full ledger to the store.
    ///
    /// Called automatically after every change; exposed so hosts can retry
    /// after a `SaveFailed` notification. Fails with `NotLoaded` before the
    /// initial load so stored data is never overwritten by defaults.
    pub async fn save(&mut self) -> Result<(), CoreError> {
        if self.state.is_loading {
            return Err(CoreError::NotLoaded);
        }
        StorageManager::save(
            self.store.as_ref(),
            &self.config.storage_key,
            &self.state,
            self.config.pretty_json,
        )
        .await?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if some change has not yet been written to the store
    /// (for example because the last save failed).
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Number of mutations waiting for the initial load.
    #[must_use]
    pub fn pending_mutations(&self) -> usize {
        self.pending.len()
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Register for change notifications. Observers run synchronously,
    /// in subscription order, before the mutating call returns.
    pub fn subscribe(&mut self, observer: impl LedgerObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Item Management ─────────────────────────────────────────────

    /// Add a line item to the `kind` collection, at the head of the list.
    ///
    /// Drafts that fail validation (negative or non-finite amount, more than
    /// two decimals, empty description, category not in the collection's
    /// set) are dropped without creating anything, and `None` is returned.
    /// Otherwise returns the new item's id.
    pub async fn add_item(&mut self, kind: ItemKind, draft: ItemDraft) -> Option<String> {
        if let Err(e) = draft.validate(kind) {
            tracing::debug!(%kind, error = %e, "rejected item draft");
            return None;
        }

        let mut item = LineItem::from_draft(draft, self.clock.now());
        while self.id_in_use(kind, &item.id) {
            item.id = new_item_id();
        }
        let id = item.id.clone();
        self.submit(Mutation::AddItem { kind, item }).await;
        Some(id)
    }

    /// Remove the item with `id` from the `kind` collection.
    ///
    /// Returns `true` if an item was removed. No match is not an error:
    /// nothing changes, nothing is saved, and `false` is returned. While the
    /// ledger is still loading the deletion is queued and `false` is returned.
    pub async fn delete_item(&mut self, kind: ItemKind, id: &str) -> bool {
        self.submit(Mutation::DeleteItem {
            kind,
            id: id.to_string(),
        })
        .await
        .is_some()
    }

    /// Replace the whole monthly history. Later records win when two share
    /// a month key.
    pub async fn replace_monthly_history(&mut self, records: Vec<MonthlyRecord>) {
        self.submit(Mutation::ReplaceHistory(records)).await;
    }

    /// Items of one collection, newest first (insertion order).
    #[must_use]
    pub fn items(&self, kind: ItemKind) -> &[LineItem] {
        self.state.items(kind)
    }

    /// Items of one collection after applying the screen's list controls.
    #[must_use]
    pub fn query_items(&self, kind: ItemKind, query: &ItemQuery) -> Vec<&LineItem> {
        query.apply(self.state.items(kind))
    }

    #[must_use]
    pub fn get_item(&self, kind: ItemKind, id: &str) -> Option<&LineItem> {
        self.state.find_item(kind, id)
    }

    /// Read-only view of the whole state.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    // ── Totals ──────────────────────────────────────────────────────

    #[must_use]
    pub fn total(&self, kind: ItemKind) -> f64 {
        self.summary_service.total_for(&self.state, kind)
    }

    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.total(ItemKind::Income)
    }

    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.total(ItemKind::Expense)
    }

    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.total(ItemKind::Asset)
    }

    #[must_use]
    pub fn total_liabilities(&self) -> f64 {
        self.total(ItemKind::Liability)
    }

    /// Live cashflow from the current items.
    #[must_use]
    pub fn cashflow(&self) -> f64 {
        self.summary_service.cashflow(&self.state)
    }

    /// Live net worth from the current items.
    #[must_use]
    pub fn net_worth(&self) -> f64 {
        self.summary_service.net_worth(&self.state)
    }

    /// Cashflow recorded in the monthly history for `month` (0 if absent).
    /// Independent of the live items.
    #[must_use]
    pub fn cashflow_for(&self, month: MonthKey) -> f64 {
        self.summary_service.historical_cashflow(&self.state, month)
    }

    /// Net worth recorded in the monthly history for `month` (0 if absent).
    /// Independent of the live items.
    #[must_use]
    pub fn net_worth_for(&self, month: MonthKey) -> f64 {
        self.summary_service.historical_net_worth(&self.state, month)
    }

    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        self.summary_service.summary(&self.state)
    }

    // ── Monthly History ─────────────────────────────────────────────

    /// Every recorded month, oldest first.
    #[must_use]
    pub fn all_monthly_data(&self) -> Vec<MonthlyDataPoint> {
        self.time_series_service.all_monthly_data(&self.state)
    }

    /// The trend chart series: the last 12 recorded months (or fewer),
    /// oldest first. The window size comes from the configuration.
    #[must_use]
    pub fn latest_12_months_data(&self) -> Vec<MonthlyDataPoint> {
        self.time_series_service
            .latest_months(&self.state, self.config.trend_window_months)
    }

    /// Start a staged editing session over the monthly history.
    #[must_use]
    pub fn history_editor(&self) -> HistoryEditor {
        HistoryEditor::new(self.all_monthly_data())
    }

    #[must_use]
    pub fn current_month(&self) -> MonthKey {
        self.clock.current_month()
    }

    /// Net worth, cashflow and trend series for the home screen.
    #[must_use]
    pub fn dashboard(&self) -> DashboardData {
        DashboardData {
            net_worth: self.net_worth(),
            cashflow: self.cashflow(),
            latest_12_months: self.latest_12_months_data(),
        }
    }

    // ── Goals ───────────────────────────────────────────────────────

    #[must_use]
    pub fn net_asset_goal(&self, age: u32) -> f64 {
        self.goal_service.net_asset_goal(age)
    }

    /// Live net worth measured against the milestone for `age`.
    #[must_use]
    pub fn goal_progress(&self, age: u32) -> GoalProgress {
        self.goal_service.goal_progress(age, self.net_worth())
    }

    // ── Export ──────────────────────────────────────────────────────

    /// The snapshot exactly as it would be written to the store, pretty-printed.
    pub fn to_json(&self) -> Result<String, CoreError> {
        format::encode(&self.state, true)
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Internal ────────────────────────────────────────────────────

    fn default_state(&self) -> LedgerState {
        let mut state = LedgerState::default();
        state.replace_history(self.time_series_service.default_history(
            self.clock.current_month(),
            self.config.default_history_months,
        ));
        state
    }

    fn id_in_use(&self, kind: ItemKind, id: &str) -> bool {
        self.state.find_item(kind, id).is_some()
            || self.pending.iter().any(|m| {
                matches!(m, Mutation::AddItem { kind: k, item } if *k == kind && item.id == id)
            })
    }

    /// Apply now, or queue while loading. Returns the committed change, if any.
    async fn submit(&mut self, mutation: Mutation) -> Option<ChangeKind> {
        if self.state.is_loading {
            tracing::debug!(?mutation, "ledger still loading; deferring mutation");
            self.pending.push(mutation);
            return None;
        }

        let change = self.apply(mutation)?;
        self.dirty = true;
        self.observers.emit(&LedgerEvent::Changed(change.clone()));
        self.persist().await;
        Some(change)
    }

    fn apply(&mut self, mutation: Mutation) -> Option<ChangeKind> {
        match mutation {
            Mutation::AddItem { kind, item } => {
                let id = item.id.clone();
                self.state.push_item(kind, item);
                Some(ChangeKind::ItemAdded { kind, id })
            }
            Mutation::DeleteItem { kind, id } => self
                .state
                .remove_item(kind, &id)
                .map(|_| ChangeKind::ItemDeleted { kind, id }),
            Mutation::ReplaceHistory(records) => {
                self.state.replace_history(records);
                Some(ChangeKind::HistoryReplaced)
            }
        }
    }

    /// Save, reporting failure to subscribers instead of returning it.
    /// The in-memory change stays applied either way.
    async fn persist(&mut self) {
        if let Err(e) = self.save().await {
            tracing::error!(key = %self.config.storage_key, error = %e, "failed to save ledger");
            self.observers.emit(&LedgerEvent::SaveFailed {
                message: e.to_string(),
            });
        }
    }
}
