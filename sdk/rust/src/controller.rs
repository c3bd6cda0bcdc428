//! Debounced filter controller for one table
//!
//! Edits restart a quiet-window timer. When the window passes, the current
//! filters are committed and fetched. Only the most recently started fetch
//! may update the data; results of older fetches are discarded.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::cache::TableCache;
use crate::error::ClientError;
use crate::source::TableSource;
use crate::types::{ControllerState, QueryResult, Snapshot, TableQuery};

/// Quiet window after the last edit before a fetch starts
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub debounce: Duration,
    /// Row limit sent with every fetch; `None` uses the server default
    pub limit: Option<u32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            limit: None,
        }
    }
}

struct Control {
    filters: BTreeMap<String, String>,
    /// Bumped on every edit; a timer only commits the edit that armed it
    edit_seq: u64,
    timer: Option<JoinHandle<()>>,
    /// Bumped on every fetch start; only the latest fetch is applied
    fetch_seq: u64,
}

struct Inner {
    table: String,
    source: Arc<dyn TableSource>,
    cache: TableCache,
    config: ControllerConfig,
    control: Mutex<Control>,
    snapshot: watch::Sender<Snapshot>,
}

impl Inner {
    fn edit(self: &Arc<Self>, change: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut control = self.control.lock();
        change(&mut control.filters);
        control.edit_seq += 1;
        let seq = control.edit_seq;

        if let Some(timer) = control.timer.take() {
            timer.abort();
        }
        let deadline = Instant::now() + self.config.debounce;
        let inner = Arc::clone(self);
        control.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            inner.commit(Some(seq));
        }));

        self.publish(&control, ControllerState::PendingDebounce);
    }

    /// Start a fetch for the current filters
    ///
    /// `edit_seq` is set when a debounce timer commits; a timer whose edit
    /// has been superseded does nothing.
    fn commit(self: &Arc<Self>, edit_seq: Option<u64>) -> Option<JoinHandle<()>> {
        let mut control = self.control.lock();
        if edit_seq.is_some_and(|seq| seq != control.edit_seq) {
            return None;
        }
        if let Some(timer) = control.timer.take()
            && edit_seq.is_none()
        {
            timer.abort();
        }

        control.fetch_seq += 1;
        let fetch_seq = control.fetch_seq;
        let query = TableQuery {
            filters: control.filters.clone(),
            limit: self.config.limit,
        };
        self.publish(&control, ControllerState::Fetching);
        drop(control);

        tracing::debug!(
            table = %self.table,
            fetch_seq,
            filters = query.filters.len(),
            "Fetching table"
        );
        let inner = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result = inner.source.fetch_table(&inner.table, &query).await;
            inner.apply(fetch_seq, result);
        }))
    }

    fn apply(&self, fetch_seq: u64, result: Result<QueryResult, ClientError>) {
        let control = self.control.lock();
        if fetch_seq != control.fetch_seq {
            tracing::debug!(
                table = %self.table,
                fetch_seq,
                latest = control.fetch_seq,
                "Discarding stale table result"
            );
            return;
        }

        let next = if control.timer.is_some() {
            ControllerState::PendingDebounce
        } else {
            ControllerState::Idle
        };

        match result {
            Ok(result) => {
                tracing::debug!(table = %self.table, rows = result.rows.len(), "Table result applied");
                self.cache.insert(self.table.clone(), result.clone());
                self.snapshot.send_modify(|s| {
                    s.state = next;
                    s.result = Some(result);
                    s.notice = None;
                });
            }
            Err(e) => {
                tracing::warn!(table = %self.table, error = %e, "Table fetch failed");
                self.snapshot.send_modify(|s| {
                    s.state = next;
                    s.notice = Some(e.to_string());
                });
            }
        }
    }

    fn publish(&self, control: &Control, state: ControllerState) {
        self.snapshot.send_modify(|s| {
            s.state = state;
            s.filters = control.filters.clone();
        });
    }
}

/// Per-column filter state for one table with debounced re-fetching
///
/// Must be used inside a tokio runtime. Dropping the controller cancels a
/// pending debounce; an in-flight fetch still completes and updates the cache.
pub struct FilterController {
    inner: Arc<Inner>,
}

impl FilterController {
    /// Create a controller; initial data comes from the cache entry for `table`
    pub fn new(
        table: impl Into<String>,
        source: Arc<dyn TableSource>,
        cache: TableCache,
        config: ControllerConfig,
    ) -> Self {
        let table = table.into();
        let (snapshot, _) = watch::channel(Snapshot {
            result: cache.get(&table),
            ..Snapshot::default()
        });
        Self {
            inner: Arc::new(Inner {
                table,
                source,
                cache,
                config,
                control: Mutex::new(Control {
                    filters: BTreeMap::new(),
                    edit_seq: 0,
                    timer: None,
                    fetch_seq: 0,
                }),
                snapshot,
            }),
        }
    }

    pub fn table(&self) -> &str {
        &self.inner.table
    }

    /// Set one column's filter text; empty text removes the filter
    pub fn set_filter(&self, column: impl Into<String>, text: impl Into<String>) {
        let column = column.into();
        let text = text.into();
        self.inner.edit(move |filters| {
            if text.is_empty() {
                filters.remove(&column);
            } else {
                filters.insert(column, text);
            }
        });
    }

    pub fn clear_filters(&self) {
        self.inner.edit(|filters| filters.clear());
    }

    pub fn filters(&self) -> BTreeMap<String, String> {
        self.inner.control.lock().filters.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Receive a new snapshot on every state, filter or data change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Commit the current filters now, skipping the quiet window, and wait
    /// for that fetch to finish
    pub async fn flush(&self) {
        if let Some(handle) = self.inner.commit(None)
            && let Err(e) = handle.await
        {
            tracing::warn!(table = %self.inner.table, error = %e, "Fetch task failed");
        }
    }
}

impl Drop for FilterController {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.control.lock().timer.take() {
            timer.abort();
        }
    }
}
