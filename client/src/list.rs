//! Filtered list controller.
//!
//! Each list view owns one controller: the current filter, the visible rows,
//! a loading flag, and the last error. Loads are ticketed with a
//! monotonically increasing sequence number; a completion whose ticket is no
//! longer the most recent issued is discarded, so a slow early request can
//! never overwrite the result of a later one.

use std::future::Future;

use crate::error::ApiError;

/// Sequence tag for one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct ListController<F, T> {
    filter: F,
    rows: Vec<T>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<F, T> ListController<F, T> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            rows: Vec::new(),
            loading: false,
            error: None,
            issued: 0,
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Currently visible dataset. A cache only; valid until the next reload.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed load, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the filter and issue a new load ticket. The caller drives the
    /// fetch and hands the result back through [`finish_load`].
    ///
    /// [`finish_load`]: ListController::finish_load
    pub fn set_filter(&mut self, filter: F) -> LoadTicket {
        self.filter = filter;
        self.begin_load()
    }

    /// Store a new filter without issuing a load. Used when the affected
    /// view is not the active one; it reloads when it becomes active.
    pub fn replace_filter(&mut self, filter: F) {
        self.filter = filter;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        LoadTicket(self.issued)
    }

    /// Apply a completed load. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>, ApiError>) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, current = self.issued, "discarding stale load");
            return false;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                self.error = None;
                self.rows = rows;
            }
            Err(e) => {
                tracing::error!(error = %e, "list load failed");
                self.rows.clear();
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Issue a ticket, await the fetch, and apply the result in one step.
    /// Suits the common sequential case; overlapping loads use the
    /// ticket API directly.
    pub async fn load_with<Fut>(&mut self, fetch: Fut)
    where
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let ticket = self.begin_load();
        let result = fetch.await;
        self.finish_load(ticket, result);
    }
}

impl<F: Default, T> Default for ListController<F, T> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn backend_error() -> ApiError {
        ApiError::Backend {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        }
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut list: ListController<(), i32> = ListController::new(());
        let slow = list.begin_load();
        let fast = list.begin_load();

        // The later request resolves first.
        assert!(list.finish_load(fast, Ok(vec![2])));
        assert_eq!(list.rows(), &[2]);
        assert!(!list.is_loading());

        // The earlier one resolves afterwards and must not win.
        assert!(!list.finish_load(slow, Ok(vec![1])));
        assert_eq!(list.rows(), &[2]);
    }

    #[test]
    fn failure_resets_rows_and_records_error() {
        let mut list: ListController<(), i32> = ListController::new(());
        let t = list.begin_load();
        list.finish_load(t, Ok(vec![1, 2, 3]));
        assert_eq!(list.rows().len(), 3);

        let t = list.begin_load();
        list.finish_load(t, Err(backend_error()));
        assert!(list.rows().is_empty());
        assert!(list.error().is_some());

        // Next success clears the error.
        let t = list.begin_load();
        list.finish_load(t, Ok(vec![9]));
        assert!(list.error().is_none());
        assert_eq!(list.rows(), &[9]);
    }

    #[test]
    fn set_filter_issues_fresh_ticket() {
        let mut list: ListController<Option<String>, i32> = ListController::new(None);
        let old = list.begin_load();
        let new = list.set_filter(Some("q".to_string()));
        assert_ne!(old, new);
        assert!(list.is_loading());
        assert_eq!(list.filter().as_deref(), Some("q"));

        // Result keyed to the pre-filter-change ticket is ignored.
        assert!(!list.finish_load(old, Ok(vec![1])));
        assert!(list.finish_load(new, Ok(vec![2])));
        assert_eq!(list.rows(), &[2]);
    }
}
