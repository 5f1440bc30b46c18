//! Client-side collection cache. Each cached query maps a query key to its
//! last-fetched rows plus a staleness flag; mutations publish the touched
//! resource on the invalidation bus and the owning view marks matching
//! entries stale, then refetches. There is no optimistic write path.

use std::sync::mpsc::{Receiver, Sender, channel};

/// Identifies one collection fetch: a resource family plus an optional
/// equality filter (`tasks?list=daily`, `habits?date=2024-01-01`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub filter: Option<(&'static str, String)>,
}

impl QueryKey {
    pub fn collection(resource: &'static str) -> Self {
        Self {
            resource,
            filter: None,
        }
    }

    pub fn filtered(resource: &'static str, name: &'static str, value: impl Into<String>) -> Self {
        Self {
            resource,
            filter: Some((name, value.into())),
        }
    }

    /// The query-string form of the filter, if any ("list=daily").
    pub fn query_string(&self) -> Option<String> {
        self.filter
            .as_ref()
            .map(|(name, value)| format!("{}={}", name, value))
    }
}

/// One cache entry: key, data and staleness. Data is served only while
/// fresh; a stale entry keeps serving the old rows until the next refresh
/// so the view never flashes empty.
#[derive(Debug)]
pub struct CachedQuery<T> {
    key: QueryKey,
    data: Vec<T>,
    stale: bool,
}

impl<T> CachedQuery<T> {
    pub fn new(key: QueryKey) -> Self {
        Self {
            key,
            data: Vec::new(),
            stale: true,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Point this entry at a different key (e.g. the planner moving to
    /// another day). The old rows are dropped and a refetch is forced.
    pub fn retarget(&mut self, key: QueryKey) {
        if self.key != key {
            self.key = key;
            self.data.clear();
            self.stale = true;
        }
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// React to a published invalidation: any entry for the resource goes
    /// stale, whatever its filter.
    pub fn apply_invalidation(&mut self, resource: &str) {
        if self.key.resource == resource {
            self.stale = true;
        }
    }

    /// Refetch through `fetch` if (and only if) the entry is stale.
    /// Returns whether a fetch happened.
    pub fn refresh_with<E>(
        &mut self,
        fetch: impl FnOnce(&QueryKey) -> Result<Vec<T>, E>,
    ) -> Result<bool, E> {
        if !self.stale {
            return Ok(false);
        }
        self.data = fetch(&self.key)?;
        self.stale = false;
        Ok(true)
    }
}

/// Create a connected publish/subscribe pair for invalidation signals.
pub fn invalidation_channel() -> (InvalidationPublisher, InvalidationReceiver) {
    let (tx, rx) = channel();
    (InvalidationPublisher { tx }, InvalidationReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct InvalidationPublisher {
    tx: Sender<&'static str>,
}

impl InvalidationPublisher {
    /// Announce that a resource family changed. Send failures mean the
    /// subscriber is gone, which is fine for a one-shot CLI mutation.
    pub fn publish(&self, resource: &'static str) {
        let _ = self.tx.send(resource);
    }
}

#[derive(Debug)]
pub struct InvalidationReceiver {
    rx: Receiver<&'static str>,
}

impl InvalidationReceiver {
    /// Drain every pending invalidation without blocking.
    pub fn drain(&self) -> Vec<&'static str> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_do_not_refetch() {
        let mut query: CachedQuery<i64> = CachedQuery::new(QueryKey::collection("tasks"));
        let mut calls = 0;

        query
            .refresh_with(|_| -> Result<Vec<i64>, ()> {
                calls += 1;
                Ok(vec![1, 2])
            })
            .unwrap();
        query
            .refresh_with(|_| -> Result<Vec<i64>, ()> {
                calls += 1;
                Ok(vec![3])
            })
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(query.data(), &[1, 2]);
    }

    #[test]
    fn invalidation_forces_refetch() {
        let mut query: CachedQuery<i64> = CachedQuery::new(QueryKey::collection("tasks"));
        query.refresh_with(|_| -> Result<Vec<i64>, ()> { Ok(vec![1]) }).unwrap();

        query.apply_invalidation("events");
        assert!(!query.is_stale());

        query.apply_invalidation("tasks");
        assert!(query.is_stale());

        query.refresh_with(|_| -> Result<Vec<i64>, ()> { Ok(vec![1, 2]) }).unwrap();
        assert_eq!(query.data(), &[1, 2]);
    }

    #[test]
    fn stale_entry_keeps_serving_old_rows() {
        let mut query: CachedQuery<i64> = CachedQuery::new(QueryKey::collection("habits"));
        query.refresh_with(|_| -> Result<Vec<i64>, ()> { Ok(vec![7]) }).unwrap();
        query.invalidate();
        assert_eq!(query.data(), &[7]);
    }

    #[test]
    fn failed_refresh_leaves_entry_stale() {
        let mut query: CachedQuery<i64> = CachedQuery::new(QueryKey::collection("tasks"));
        let result = query.refresh_with(|_| -> Result<Vec<i64>, &str> { Err("server down") });
        assert!(result.is_err());
        assert!(query.is_stale());
    }

    #[test]
    fn retarget_drops_rows_and_goes_stale() {
        let mut query: CachedQuery<i64> =
            CachedQuery::new(QueryKey::filtered("events", "date", "2024-05-01"));
        query.refresh_with(|_| -> Result<Vec<i64>, ()> { Ok(vec![1]) }).unwrap();

        // Same key: nothing changes
        query.retarget(QueryKey::filtered("events", "date", "2024-05-01"));
        assert!(!query.is_stale());

        query.retarget(QueryKey::filtered("events", "date", "2024-05-02"));
        assert!(query.is_stale());
        assert!(query.data().is_empty());
    }

    #[test]
    fn bus_delivers_published_resources() {
        let (publisher, receiver) = invalidation_channel();
        publisher.publish("tasks");
        publisher.clone().publish("habits");
        assert_eq!(receiver.drain(), vec!["tasks", "habits"]);
        assert!(receiver.drain().is_empty());
    }

    #[test]
    fn query_string_forms() {
        assert_eq!(QueryKey::collection("tasks").query_string(), None);
        assert_eq!(
            QueryKey::filtered("tasks", "list", "daily").query_string(),
            Some("list=daily".to_string())
        );
    }
}
