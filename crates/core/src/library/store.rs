//! The library store.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::codec::{decode_history, decode_ids, dedup_history, dedup_ids};
use super::types::{Collection, LibraryError, LibrarySnapshot, ProgressRecord, DEFAULT_NAMESPACE};
use crate::content::ContentId;
use crate::metrics::{LIBRARY_MUTATIONS, LIBRARY_REJECTIONS, STORAGE_ERRORS};
use crate::storage::{StorageBackend, StorageError};

/// Favorites, watchlist and watch history of one user, persisted through a
/// [`StorageBackend`].
///
/// Construct one per session and share it by reference. Read-modify-write
/// cycles are serialized per collection, so concurrent mutations of different
/// ids on the same store never lose updates. Two stores attached to the same
/// data (e.g. two processes) are last-writer-wins.
pub struct LibraryStore<B> {
    backend: B,
    namespace: String,
    favorites_lock: Mutex<()>,
    watchlist_lock: Mutex<()>,
    history_lock: Mutex<()>,
}

impl<B: StorageBackend> LibraryStore<B> {
    /// Attach to `backend` under the default `mediax` namespace.
    pub fn new(backend: B) -> Self {
        Self::with_namespace(backend, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            favorites_lock: Mutex::new(()),
            watchlist_lock: Mutex::new(()),
            history_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // ---------------------------------------------------------------------
    // Favorites
    // ---------------------------------------------------------------------

    /// Flip favorite membership. Returns `true` if `id` is now a favorite.
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool, LibraryError> {
        self.toggle(Collection::Favorites, id).await
    }

    /// Never fails: an unreadable store reads as "not favorited".
    pub async fn is_favorited(&self, id: &str) -> bool {
        self.contains(Collection::Favorites, id).await
    }

    /// Favorited ids in the order they were added.
    pub async fn favorites(&self) -> Result<Vec<ContentId>, LibraryError> {
        self.list(Collection::Favorites).await
    }

    /// Make favorite membership equal to `favorited`. Returns whether anything changed.
    pub async fn set_favorite(&self, id: &str, favorited: bool) -> Result<bool, LibraryError> {
        self.set_membership(Collection::Favorites, id, favorited).await
    }

    // ---------------------------------------------------------------------
    // Watchlist
    // ---------------------------------------------------------------------

    /// Flip watchlist membership. Returns `true` if `id` is now listed.
    pub async fn toggle_watchlist(&self, id: &str) -> Result<bool, LibraryError> {
        self.toggle(Collection::Watchlist, id).await
    }

    pub async fn is_in_watchlist(&self, id: &str) -> bool {
        self.contains(Collection::Watchlist, id).await
    }

    pub async fn watchlist(&self) -> Result<Vec<ContentId>, LibraryError> {
        self.list(Collection::Watchlist).await
    }

    pub async fn set_watchlist(&self, id: &str, listed: bool) -> Result<bool, LibraryError> {
        self.set_membership(Collection::Watchlist, id, listed).await
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Record the playback position of `id`, replacing any previous one.
    ///
    /// `updated` is the current time, but never earlier than the previous
    /// value for the same id.
    pub async fn save_progress(&self, id: &str, position: u64) -> Result<(), LibraryError> {
        self.validate_id(Collection::History, id)?;

        let _guard = self.history_lock.lock().await;
        let mut history = self.load_history().await?;
        let now = Utc::now().timestamp_millis();

        match history.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.position = position;
                record.updated = now.max(record.updated);
            }
            None => history.push(ProgressRecord {
                id: id.to_string(),
                position,
                updated: now,
            }),
        }

        self.store(Collection::History, &serde_json::to_string(&history)?).await?;
        LIBRARY_MUTATIONS
            .with_label_values(&[Collection::History.as_str(), "saved"])
            .inc();
        debug!("Saved progress for {} at {}s", id, position);
        Ok(())
    }

    /// Saved position in seconds, 0 when nothing is recorded. Never fails.
    pub async fn progress(&self, id: &str) -> u64 {
        match self.progress_record(id).await {
            Ok(record) => record.map(|r| r.position).unwrap_or(0),
            Err(e) => {
                warn!("Reading progress for {} failed, assuming 0: {}", id, e);
                0
            }
        }
    }

    pub async fn progress_record(&self, id: &str) -> Result<Option<ProgressRecord>, LibraryError> {
        Ok(self.load_history().await?.into_iter().find(|r| r.id == id))
    }

    /// Start `id` over from the beginning.
    pub async fn reset_progress(&self, id: &str) -> Result<(), LibraryError> {
        self.save_progress(id, 0).await
    }

    /// All progress records, oldest first-save first.
    pub async fn history(&self) -> Result<Vec<ProgressRecord>, LibraryError> {
        Ok(self.load_history().await?)
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    pub async fn snapshot(&self) -> Result<LibrarySnapshot, LibraryError> {
        Ok(LibrarySnapshot {
            favorites: self.load_ids(Collection::Favorites).await?,
            watchlist: self.load_ids(Collection::Watchlist).await?,
            history: self.load_history().await?,
        })
    }

    /// Replace all three collections with the snapshot contents.
    ///
    /// Duplicates and empty ids in the snapshot are dropped, and an empty
    /// collection is removed from the backend. Each collection is written
    /// atomically, but a failure part way leaves earlier collections already
    /// replaced.
    pub async fn restore(&self, snapshot: LibrarySnapshot) -> Result<(), LibraryError> {
        let favorites = dedup_ids(snapshot.favorites);
        let watchlist = dedup_ids(snapshot.watchlist);
        let history = dedup_history(snapshot.history);

        let _favorites = self.favorites_lock.lock().await;
        let _watchlist = self.watchlist_lock.lock().await;
        let _history = self.history_lock.lock().await;

        self.replace(Collection::Favorites, &favorites).await?;
        self.replace(Collection::Watchlist, &watchlist).await?;
        self.replace(Collection::History, &history).await?;

        for collection in [
            Collection::Favorites,
            Collection::Watchlist,
            Collection::History,
        ] {
            LIBRARY_MUTATIONS
                .with_label_values(&[collection.as_str(), "restored"])
                .inc();
        }
        debug!(
            "Restored library: {} favorites, {} watchlist, {} history",
            favorites.len(),
            watchlist.len(),
            history.len()
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn validate_id(&self, collection: Collection, id: &str) -> Result<(), LibraryError> {
        if id.is_empty() {
            LIBRARY_REJECTIONS
                .with_label_values(&[collection.as_str()])
                .inc();
            return Err(LibraryError::InvalidArgument(format!(
                "{} requires a content id",
                collection
            )));
        }
        Ok(())
    }

    fn lock_for(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Favorites => &self.favorites_lock,
            Collection::Watchlist => &self.watchlist_lock,
            Collection::History => &self.history_lock,
        }
    }

    async fn toggle(&self, collection: Collection, id: &str) -> Result<bool, LibraryError> {
        self.validate_id(collection, id)?;

        let _guard = self.lock_for(collection).lock().await;
        let mut ids = self.load_ids(collection).await?;

        let added = match ids.iter().position(|x| x == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };

        self.store(collection, &serde_json::to_string(&ids)?).await?;
        self.record_membership_change(collection, id, added);
        Ok(added)
    }

    async fn set_membership(
        &self,
        collection: Collection,
        id: &str,
        desired: bool,
    ) -> Result<bool, LibraryError> {
        self.validate_id(collection, id)?;

        let _guard = self.lock_for(collection).lock().await;
        let mut ids = self.load_ids(collection).await?;
        let position = ids.iter().position(|x| x == id);

        match (position, desired) {
            (Some(_), true) | (None, false) => return Ok(false),
            (Some(index), false) => {
                ids.remove(index);
            }
            (None, true) => ids.push(id.to_string()),
        }

        self.store(collection, &serde_json::to_string(&ids)?).await?;
        self.record_membership_change(collection, id, desired);
        Ok(true)
    }

    fn record_membership_change(&self, collection: Collection, id: &str, added: bool) {
        let outcome = if added { "added" } else { "removed" };
        LIBRARY_MUTATIONS
            .with_label_values(&[collection.as_str(), outcome])
            .inc();
        debug!("{} {} {}", outcome, id, collection);
    }

    async fn contains(&self, collection: Collection, id: &str) -> bool {
        match self.load_ids(collection).await {
            Ok(ids) => ids.iter().any(|x| x == id),
            Err(e) => {
                warn!(
                    "Reading {} failed, treating {} as absent: {}",
                    collection, id, e
                );
                false
            }
        }
    }

    async fn list(&self, collection: Collection) -> Result<Vec<ContentId>, LibraryError> {
        Ok(self.load_ids(collection).await?)
    }

    async fn load_ids(&self, collection: Collection) -> Result<Vec<ContentId>, StorageError> {
        let raw = self.fetch(collection).await?;
        Ok(decode_ids(collection, raw.as_deref()))
    }

    async fn load_history(&self) -> Result<Vec<ProgressRecord>, StorageError> {
        let raw = self.fetch(Collection::History).await?;
        Ok(decode_history(raw.as_deref()))
    }

    async fn fetch(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        let key = collection.storage_key(&self.namespace);
        self.backend.read(&key).await.inspect_err(|e| {
            STORAGE_ERRORS.with_label_values(&["read"]).inc();
            warn!("Failed to read {}: {}", key, e);
        })
    }

    /// Overwrite a whole collection, dropping the key when `items` is empty.
    async fn replace<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), LibraryError> {
        if items.is_empty() {
            self.discard(collection).await?;
        } else {
            self.store(collection, &serde_json::to_string(items)?).await?;
        }
        Ok(())
    }

    async fn discard(&self, collection: Collection) -> Result<(), StorageError> {
        let key = collection.storage_key(&self.namespace);
        self.backend.remove(&key).await.inspect_err(|e| {
            STORAGE_ERRORS.with_label_values(&["remove"]).inc();
            warn!("Failed to remove {}: {}", key, e);
        })
    }

    async fn store(&self, collection: Collection, document: &str) -> Result<(), StorageError> {
        let key = collection.storage_key(&self.namespace);
        self.backend.write(&key, document).await.inspect_err(|e| {
            STORAGE_ERRORS.with_label_values(&["write"]).inc();
            warn!("Failed to write {}: {}", key, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn library() -> LibraryStore<MemoryBackend> {
        LibraryStore::new(MemoryBackend::new())
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_state() {
        let library = library();

        assert!(library.toggle_favorite("c1").await.unwrap());
        assert!(library.is_favorited("c1").await);

        assert!(!library.toggle_favorite("c1").await.unwrap());
        assert!(!library.is_favorited("c1").await);
    }

    #[tokio::test]
    async fn test_favorites_keep_insertion_order() {
        let library = library();
        for id in ["c3", "c1", "c2"] {
            library.toggle_favorite(id).await.unwrap();
        }
        library.toggle_favorite("c1").await.unwrap();
        library.toggle_favorite("c1").await.unwrap();

        assert_eq!(library.favorites().await.unwrap(), vec!["c3", "c2", "c1"]);
    }

    #[tokio::test]
    async fn test_watchlist_is_independent_of_favorites() {
        let library = library();
        library.toggle_watchlist("s1").await.unwrap();

        assert!(library.is_in_watchlist("s1").await);
        assert!(!library.is_favorited("s1").await);
        assert_eq!(library.watchlist().await.unwrap(), vec!["s1"]);
        assert!(library.favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_without_writing() {
        let backend = MemoryBackend::new();
        let library = LibraryStore::new(backend.clone());

        let err = library.toggle_favorite("").await.unwrap_err();
        assert!(matches!(err, LibraryError::InvalidArgument(_)));
        let err = library.toggle_watchlist("").await.unwrap_err();
        assert!(matches!(err, LibraryError::InvalidArgument(_)));
        let err = library.save_progress("", 10).await.unwrap_err();
        assert!(matches!(err, LibraryError::InvalidArgument(_)));
        let err = library.set_favorite("", true).await.unwrap_err();
        assert!(matches!(err, LibraryError::InvalidArgument(_)));

        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_favorite_is_idempotent() {
        let library = library();

        assert!(library.set_favorite("c1", true).await.unwrap());
        assert!(!library.set_favorite("c1", true).await.unwrap());
        assert_eq!(library.favorites().await.unwrap(), vec!["c1"]);

        assert!(library.set_favorite("c1", false).await.unwrap());
        assert!(!library.set_favorite("c1", false).await.unwrap());
        assert!(library.favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_watchlist() {
        let library = library();
        assert!(library.set_watchlist("s1", true).await.unwrap());
        assert!(library.is_in_watchlist("s1").await);
        assert!(library.set_watchlist("s1", false).await.unwrap());
        assert!(!library.is_in_watchlist("s1").await);
    }

    #[tokio::test]
    async fn test_progress_replaces_not_accumulates() {
        let library = library();

        library.save_progress("m1", 120).await.unwrap();
        assert_eq!(library.progress("m1").await, 120);

        library.save_progress("m1", 45).await.unwrap();
        assert_eq!(library.progress("m1").await, 45);
        assert_eq!(library.history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_progress_unknown_id_is_zero() {
        let library = library();
        assert_eq!(library.progress("unknown-id").await, 0);
        assert!(library.progress_record("unknown-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_progress_updated_never_goes_backwards() {
        let backend = MemoryBackend::new();
        let future = Utc::now().timestamp_millis() + 60_000;
        backend
            .insert_raw(
                "mediax_history",
                &format!(r#"[{{"id":"m1","position":5,"updated":{}}}]"#, future),
            )
            .await;
        let library = LibraryStore::new(backend);

        library.save_progress("m1", 10).await.unwrap();
        let record = library.progress_record("m1").await.unwrap().unwrap();
        assert_eq!(record.position, 10);
        assert_eq!(record.updated, future);
    }

    #[tokio::test]
    async fn test_reset_progress() {
        let library = library();
        library.save_progress("m1", 300).await.unwrap();
        library.reset_progress("m1").await.unwrap();

        assert_eq!(library.progress("m1").await, 0);
        assert!(library.progress_record("m1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_collection_reads_empty_and_recovers() {
        let backend = MemoryBackend::new();
        backend.insert_raw("mediax_favorites", "{{{").await;
        backend.insert_raw("mediax_history", "\"oops\"").await;
        let library = LibraryStore::new(backend.clone());

        assert!(library.favorites().await.unwrap().is_empty());
        assert!(!library.is_favorited("c1").await);
        assert_eq!(library.progress("m1").await, 0);

        assert!(library.toggle_favorite("c1").await.unwrap());
        assert_eq!(
            backend.raw("mediax_favorites").await.as_deref(),
            Some("[\"c1\"]")
        );
    }

    #[tokio::test]
    async fn test_persisted_shape() {
        let backend = MemoryBackend::new();
        let library = LibraryStore::new(backend.clone());
        library.save_progress("m1", 42).await.unwrap();

        let raw = backend.raw("mediax_history").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "m1");
        assert_eq!(value[0]["position"], 42);
        assert!(value[0]["updated"].is_i64());
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let backend = MemoryBackend::new();
        let adult = LibraryStore::with_namespace(backend.clone(), "adult");
        let kids = LibraryStore::with_namespace(backend, "kids");

        adult.toggle_favorite("c1").await.unwrap();
        assert!(!kids.is_favorited("c1").await);
    }

    #[tokio::test]
    async fn test_snapshot_and_restore() {
        let source = library();
        source.toggle_favorite("c1").await.unwrap();
        source.toggle_watchlist("s1").await.unwrap();
        source.save_progress("m1", 90).await.unwrap();

        let snapshot = source.snapshot().await.unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();

        let target = library();
        target
            .restore(serde_json::from_str(&json).unwrap())
            .await
            .unwrap();

        assert_eq!(target.snapshot().await.unwrap(), snapshot);
        assert_eq!(target.progress("m1").await, 90);
    }

    #[tokio::test]
    async fn test_restore_drops_duplicates() {
        let library = library();
        library
            .restore(LibrarySnapshot {
                favorites: vec!["a".into(), "a".into(), "".into(), "b".into()],
                watchlist: vec![],
                history: vec![],
            })
            .await
            .unwrap();

        assert_eq!(library.favorites().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_restore_empty_collections_removes_keys() {
        let backend = MemoryBackend::new();
        let library = LibraryStore::new(backend.clone());
        library.toggle_favorite("c1").await.unwrap();
        library.toggle_watchlist("s1").await.unwrap();
        library.save_progress("m1", 30).await.unwrap();
        assert_eq!(backend.len().await, 3);

        library
            .restore(LibrarySnapshot {
                favorites: vec!["c2".into()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(backend.len().await, 1);
        assert_eq!(
            backend.raw("mediax_favorites").await.as_deref(),
            Some("[\"c2\"]")
        );
        assert!(library.watchlist().await.unwrap().is_empty());
        assert!(library.history().await.unwrap().is_empty());
        assert_eq!(library.progress("m1").await, 0);
    }
}
