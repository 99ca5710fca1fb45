//! The aggregation service: live (cache-only) search, advanced
//! (multi-platform fan-out) search, single-creator lookup, and the shared
//! best-effort cache-populate helper.
//!
//! The service is generic over the platform clients and the store so tests
//! can substitute counting mocks; production wires in the concrete
//! `creatordb-platforms` and `creatordb-store` clients.

use std::future::Future;

use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use creatordb_core::creators::{
    CreatorDocument, CreatorProfile, CreatorSummary, Platform, PlatformSlots,
};
use creatordb_store::filters;
use creatordb_store::{StoreClient, StoreError, UpdateOutcome};

/// Queries shorter than this return empty result sets without touching the
/// network or the store. Guards typeahead UIs against noisy one-character
/// lookups.
pub const MIN_QUERY_LEN: usize = 2;

pub const LIVE_SEARCH_DEFAULT_LIMIT: u32 = 10;
pub const ADVANCED_SEARCH_DEFAULT_LIMIT: u32 = 25;

/// Seam over a platform adapter. Implementations never fail: upstream
/// problems degrade to empty results.
pub trait PlatformClient: Send + Sync {
    fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Vec<CreatorSummary>> + Send;

    fn channel_details(&self, id: &str) -> impl Future<Output = Option<CreatorProfile>> + Send;
}

/// Seam over the cache store gateway. Implementations always surface
/// failures; whether to swallow them is the service's per-path decision.
pub trait CreatorStore: Send + Sync {
    fn find(
        &self,
        filter: Value,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<Vec<CreatorDocument>, StoreError>> + Send;

    fn insert_one(
        &self,
        document: &CreatorDocument,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    fn update_one(
        &self,
        filter: Value,
        update: Value,
    ) -> impl Future<Output = Result<UpdateOutcome, StoreError>> + Send;

    fn count_documents(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

impl PlatformClient for creatordb_platforms::YouTubeClient {
    async fn search_channels(&self, query: &str, max_results: u32) -> Vec<CreatorSummary> {
        creatordb_platforms::YouTubeClient::search_channels(self, query, max_results).await
    }

    async fn channel_details(&self, id: &str) -> Option<CreatorProfile> {
        creatordb_platforms::YouTubeClient::channel_details(self, id).await
    }
}

impl PlatformClient for creatordb_platforms::TwitchClient {
    async fn search_channels(&self, query: &str, max_results: u32) -> Vec<CreatorSummary> {
        creatordb_platforms::TwitchClient::search_channels(self, query, max_results).await
    }

    async fn channel_details(&self, id: &str) -> Option<CreatorProfile> {
        creatordb_platforms::TwitchClient::channel_details(self, id).await
    }
}

impl CreatorStore for StoreClient {
    async fn find(
        &self,
        filter: Value,
        limit: Option<u32>,
    ) -> Result<Vec<CreatorDocument>, StoreError> {
        StoreClient::find(self, filter, limit).await
    }

    async fn insert_one(&self, document: &CreatorDocument) -> Result<String, StoreError> {
        StoreClient::insert_one(self, document).await
    }

    async fn update_one(&self, filter: Value, update: Value) -> Result<UpdateOutcome, StoreError> {
        StoreClient::update_one(self, filter, update).await
    }

    async fn count_documents(&self) -> Result<u64, StoreError> {
        StoreClient::count_documents(self).await
    }
}

/// Failures of the primary creator-lookup path. Degraded-path failures
/// (adapters, cache-populate) never reach this type.
#[derive(Debug, Error)]
pub enum GetCreatorError {
    #[error("creator not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Aggregation<Y, T, S> {
    youtube: Y,
    twitch: T,
    store: S,
}

impl<Y, T, S> Aggregation<Y, T, S>
where
    Y: PlatformClient,
    T: PlatformClient,
    S: CreatorStore,
{
    pub fn new(youtube: Y, twitch: T, store: S) -> Self {
        Self {
            youtube,
            twitch,
            store,
        }
    }

    /// Cache-only typeahead search. Never contacts a platform adapter, and
    /// fails soft: a broken store yields an empty result set.
    pub async fn live_search(&self, query: &str, limit: u32) -> Vec<CreatorSummary> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        match self
            .store
            .find(filters::live_search_filter(query), Some(limit))
            .await
        {
            Ok(documents) => documents.iter().map(document_summary).collect(),
            Err(e) => {
                tracing::warn!(error = %e, query, "live search store lookup failed");
                Vec::new()
            }
        }
    }

    /// Concurrent two-platform search, YouTube results first, truncated to
    /// `limit`, with each kept result upserted into the cache sequentially.
    ///
    /// `page` is accepted for interface compatibility but not applied: both
    /// upstream calls always fetch first-page results.
    pub async fn advanced_search(&self, query: &str, page: u32, limit: u32) -> Vec<CreatorSummary> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        if page > 1 {
            tracing::debug!(page, "pagination requested but only first-page results are served");
        }

        let per_platform = limit.div_ceil(2);
        let (youtube_results, twitch_results) = tokio::join!(
            self.youtube.search_channels(query, per_platform),
            self.twitch.search_channels(query, per_platform),
        );

        let combined: Vec<CreatorSummary> = youtube_results
            .into_iter()
            .chain(twitch_results)
            .take(limit as usize)
            .collect();

        // Warm the cache in result order. Each upsert is awaited before the
        // next; a failure on one item never aborts the rest or the response.
        for summary in &combined {
            self.cache_populate(&summary.clone().into_profile()).await;
        }

        combined
    }

    /// Cache-first creator lookup with live-fetch fallback.
    ///
    /// A cache hit for the requested platform is enriched with the other
    /// platform slots of the same document. On a miss the matching adapter
    /// is asked directly and a successful fetch is cache-populated before
    /// returning.
    ///
    /// # Errors
    ///
    /// - [`GetCreatorError::NotFound`] when neither cache nor live fetch
    ///   yields a profile.
    /// - [`GetCreatorError::Store`] when the cache lookup itself fails.
    pub async fn get_creator(
        &self,
        platform: Platform,
        id: &str,
    ) -> Result<CreatorProfile, GetCreatorError> {
        let documents = self
            .store
            .find(filters::creator_lookup_filter(platform, id), Some(1))
            .await?;

        if let Some(document) = documents.first() {
            if let Some(profile) = document.slot(platform) {
                let mut profile = profile.clone();
                profile.cross_platform_data = document
                    .other_slots(platform)
                    .into_iter()
                    .cloned()
                    .collect();
                return Ok(profile);
            }
        }

        let fetched = match platform {
            Platform::Youtube => self.youtube.channel_details(id).await,
            Platform::Twitch => self.twitch.channel_details(id).await,
            Platform::Unknown => None,
        };

        match fetched {
            Some(profile) => {
                self.cache_populate(&profile).await;
                Ok(profile)
            }
            None => Err(GetCreatorError::NotFound),
        }
    }

    /// Best-effort upsert of a freshly fetched profile: update the document
    /// already holding this platform id, else insert a new single-slot
    /// document. Errors are logged and swallowed so a store outage never
    /// fails the request that triggered the write.
    ///
    /// Concurrent callers can race the find-then-write sequence; the last
    /// writer wins, which is acceptable for a cache.
    pub async fn cache_populate(&self, profile: &CreatorProfile) {
        if let Err(e) = self.try_cache_populate(profile).await {
            tracing::warn!(
                error = %e,
                platform = %profile.platform,
                creator_id = %profile.id,
                "cache populate failed"
            );
        }
    }

    async fn try_cache_populate(&self, profile: &CreatorProfile) -> Result<(), StoreError> {
        let existing = self
            .store
            .find(
                filters::platform_id_filter(profile.platform, &profile.id),
                Some(1),
            )
            .await?;

        let now = Utc::now();
        if let Some(document) = existing.first() {
            self.store
                .update_one(
                    filters::document_id_filter(&document.id),
                    filters::populate_update(profile, now),
                )
                .await?;
        } else {
            let document = CreatorDocument {
                id: Uuid::new_v4().to_string(),
                name: profile.name.clone(),
                thumbnail: profile.thumbnail.clone(),
                last_updated: now,
                platforms: single_slot(profile.clone()),
            };
            self.store.insert_one(&document).await?;
        }

        Ok(())
    }

    /// Cheap connectivity probe for the diagnostics endpoints.
    pub async fn store_reachable(&self) -> bool {
        self.store.find(json!({}), Some(1)).await.is_ok()
    }

    /// Total cached creator documents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable.
    pub async fn store_document_count(&self) -> Result<u64, StoreError> {
        self.store.count_documents().await
    }
}

/// Search-result shape for one cache document: YouTube slot preferred, then
/// Twitch, then a minimal unknown-platform fallback.
fn document_summary(document: &CreatorDocument) -> CreatorSummary {
    document
        .slot(Platform::Youtube)
        .or_else(|| document.slot(Platform::Twitch))
        .map_or_else(|| document.fallback_summary(), CreatorProfile::to_summary)
}

fn single_slot(profile: CreatorProfile) -> PlatformSlots {
    match profile.platform {
        Platform::Youtube => PlatformSlots {
            youtube: Some(profile),
            twitch: None,
        },
        Platform::Twitch => PlatformSlots {
            youtube: None,
            twitch: Some(profile),
        },
        Platform::Unknown => PlatformSlots::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Scripted platform adapter that records calls and requested sizes.
    struct FakePlatform {
        platform: Platform,
        search_results: Vec<CreatorSummary>,
        details: Option<CreatorProfile>,
        search_calls: AtomicUsize,
        details_calls: AtomicUsize,
        requested_sizes: Mutex<Vec<u32>>,
    }

    impl FakePlatform {
        fn new(platform: Platform) -> Self {
            Self {
                platform,
                search_results: Vec::new(),
                details: None,
                search_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
                requested_sizes: Mutex::new(Vec::new()),
            }
        }

        fn with_results(mut self, count: usize) -> Self {
            self.search_results = (0..count).map(|i| summary(self.platform, i)).collect();
            self
        }

        fn with_details(mut self, profile: CreatorProfile) -> Self {
            self.details = Some(profile);
            self
        }

        fn search_count(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        fn details_count(&self) -> usize {
            self.details_calls.load(Ordering::SeqCst)
        }
    }

    impl PlatformClient for &FakePlatform {
        async fn search_channels(&self, _query: &str, max_results: u32) -> Vec<CreatorSummary> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.requested_sizes.lock().unwrap().push(max_results);
            self.search_results
                .iter()
                .take(max_results as usize)
                .cloned()
                .collect()
        }

        async fn channel_details(&self, _id: &str) -> Option<CreatorProfile> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            self.details.clone()
        }
    }

    /// In-memory store understanding the filter shapes the service emits.
    #[derive(Default)]
    struct FakeStore {
        documents: Mutex<Vec<CreatorDocument>>,
        find_calls: AtomicUsize,
        fail: bool,
    }

    impl FakeStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn with_documents(documents: Vec<CreatorDocument>) -> Self {
            Self {
                documents: Mutex::new(documents),
                ..Self::default()
            }
        }

        fn document_count(&self) -> usize {
            self.documents.lock().unwrap().len()
        }

        fn find_count(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }

        fn error() -> StoreError {
            StoreError::UnexpectedStatus {
                status: 503,
                body: "down".to_string(),
            }
        }

        fn matches(document: &CreatorDocument, filter: &Value) -> bool {
            if let Some(branches) = filter.get("$or").and_then(Value::as_array) {
                return branches.iter().any(|f| Self::matches(document, f));
            }
            let Some(fields) = filter.as_object() else {
                return true;
            };
            fields.iter().all(|(key, expected)| {
                let actual = Self::field(document, key);
                match expected {
                    Value::Object(spec) => spec.get("$regex").and_then(Value::as_str).is_some_and(
                        |pattern| {
                            let needle = pattern
                                .trim_start_matches('^')
                                .trim_end_matches('$')
                                .replace('\\', "")
                                .to_lowercase();
                            actual.is_some_and(|a| a.to_lowercase().contains(&needle))
                        },
                    ),
                    Value::String(s) => actual.as_deref() == Some(s.as_str()),
                    _ => false,
                }
            })
        }

        fn field(document: &CreatorDocument, key: &str) -> Option<String> {
            let slot = |p: Platform| document.slot(p);
            match key {
                "_id" => Some(document.id.clone()),
                "name" => Some(document.name.clone()),
                "platforms.youtube.id" => slot(Platform::Youtube).map(|p| p.id.clone()),
                "platforms.youtube.name" => slot(Platform::Youtube).map(|p| p.name.clone()),
                "platforms.twitch.id" => slot(Platform::Twitch).map(|p| p.id.clone()),
                "platforms.twitch.name" => slot(Platform::Twitch).map(|p| p.name.clone()),
                _ => None,
            }
        }
    }

    impl CreatorStore for &FakeStore {
        async fn find(
            &self,
            filter: Value,
            limit: Option<u32>,
        ) -> Result<Vec<CreatorDocument>, StoreError> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FakeStore::error());
            }
            let documents = self.documents.lock().unwrap();
            let limit = limit.map_or(usize::MAX, |l| l as usize);
            Ok(documents
                .iter()
                .filter(|d| FakeStore::matches(d, &filter))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn insert_one(&self, document: &CreatorDocument) -> Result<String, StoreError> {
            if self.fail {
                return Err(FakeStore::error());
            }
            self.documents.lock().unwrap().push(document.clone());
            Ok(document.id.clone())
        }

        async fn update_one(
            &self,
            filter: Value,
            update: Value,
        ) -> Result<UpdateOutcome, StoreError> {
            if self.fail {
                return Err(FakeStore::error());
            }
            let mut documents = self.documents.lock().unwrap();
            let Some(document) = documents.iter_mut().find(|d| FakeStore::matches(d, &filter))
            else {
                return Ok(UpdateOutcome {
                    matched_count: 0,
                    modified_count: 0,
                });
            };

            let set = update["$set"].as_object().expect("$set update");
            if let Some(name) = set.get("name").and_then(Value::as_str) {
                document.name = name.to_string();
            }
            if let Some(thumb) = set.get("thumbnail").and_then(Value::as_str) {
                document.thumbnail = Some(thumb.to_string());
            }
            for (platform, slot) in [
                (Platform::Youtube, "platforms.youtube"),
                (Platform::Twitch, "platforms.twitch"),
            ] {
                if let Some(profile) = set.get(slot) {
                    let profile: CreatorProfile =
                        serde_json::from_value(profile.clone()).expect("profile value");
                    match platform {
                        Platform::Youtube => document.platforms.youtube = Some(profile),
                        Platform::Twitch => document.platforms.twitch = Some(profile),
                        Platform::Unknown => {}
                    }
                }
            }
            Ok(UpdateOutcome {
                matched_count: 1,
                modified_count: 1,
            })
        }

        async fn count_documents(&self) -> Result<u64, StoreError> {
            if self.fail {
                return Err(FakeStore::error());
            }
            Ok(self.documents.lock().unwrap().len() as u64)
        }
    }

    fn summary(platform: Platform, n: usize) -> CreatorSummary {
        CreatorSummary {
            platform,
            id: format!("{platform}-{n}"),
            name: format!("Creator {n}"),
            description: String::new(),
            thumbnail: None,
            url: String::new(),
            subscribers: None,
        }
    }

    fn profile(platform: Platform, id: &str, name: &str) -> CreatorProfile {
        CreatorProfile {
            platform,
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            thumbnail: None,
            banner: None,
            url: String::new(),
            subscribers: Some(5),
            views: None,
            videos: None,
            game: None,
            links: vec![],
            verified: false,
            cross_platform_data: vec![],
        }
    }

    fn document(id: &str, slots: PlatformSlots) -> CreatorDocument {
        CreatorDocument {
            id: id.to_string(),
            name: "Cached Creator".to_string(),
            thumbnail: None,
            last_updated: Utc::now(),
            platforms: slots,
        }
    }

    #[tokio::test]
    async fn short_queries_short_circuit_both_searches() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(5);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(5);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        assert!(service.live_search("a", 10).await.is_empty());
        assert!(service.advanced_search("a", 1, 10).await.is_empty());
        assert!(service.live_search("  ", 10).await.is_empty());

        assert_eq!(youtube.search_count(), 0);
        assert_eq!(twitch.search_count(), 0);
        assert_eq!(store.find_count(), 0);
    }

    #[tokio::test]
    async fn query_length_guard_counts_characters_not_bytes() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(5);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(5);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        // "é" is one character but two bytes; it must still short-circuit.
        assert!(service.live_search("é", 10).await.is_empty());
        assert!(service.advanced_search("é", 1, 10).await.is_empty());

        assert_eq!(youtube.search_count(), 0);
        assert_eq!(twitch.search_count(), 0);
        assert_eq!(store.find_count(), 0);

        // Two non-ASCII characters clear the guard.
        service.advanced_search("éé", 1, 10).await;
        assert_eq!(youtube.search_count(), 1);
    }

    #[tokio::test]
    async fn live_search_never_contacts_adapters() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(5);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(5);
        let store = FakeStore::with_documents(vec![document(
            "1",
            PlatformSlots {
                youtube: Some(profile(Platform::Youtube, "Y1", "Cached Creator")),
                twitch: None,
            },
        )]);
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.live_search("cached", 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].platform, Platform::Youtube);
        assert_eq!(youtube.search_count(), 0);
        assert_eq!(twitch.search_count(), 0);
    }

    #[tokio::test]
    async fn live_search_prefers_youtube_then_twitch_then_fallback() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::with_documents(vec![
            document(
                "both",
                PlatformSlots {
                    youtube: Some(profile(Platform::Youtube, "Y1", "Cached Creator")),
                    twitch: Some(profile(Platform::Twitch, "T1", "Cached Creator")),
                },
            ),
            document(
                "twitch-only",
                PlatformSlots {
                    youtube: None,
                    twitch: Some(profile(Platform::Twitch, "T2", "Cached Creator")),
                },
            ),
            document("empty", PlatformSlots::default()),
        ]);
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.live_search("cached", 10).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].platform, Platform::Youtube);
        assert_eq!(results[1].platform, Platform::Twitch);
        assert_eq!(results[2].platform, Platform::Unknown);
        assert_eq!(results[2].id, "empty");
    }

    #[tokio::test]
    async fn live_search_fails_soft_on_store_outage() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::failing();
        let service = Aggregation::new(&youtube, &twitch, &store);

        assert!(service.live_search("cached", 10).await.is_empty());
    }

    #[tokio::test]
    async fn advanced_search_requests_half_the_limit_per_adapter() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(20);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(20);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.advanced_search("creator", 1, 25).await;

        assert_eq!(youtube.search_count(), 1);
        assert_eq!(twitch.search_count(), 1);
        assert_eq!(*youtube.requested_sizes.lock().unwrap(), vec![13]);
        assert_eq!(*twitch.requested_sizes.lock().unwrap(), vec![13]);
        assert!(results.len() <= 25);
    }

    #[tokio::test]
    async fn advanced_search_orders_youtube_before_twitch_and_truncates() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(4);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(4);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.advanced_search("creator", 1, 6).await;
        assert_eq!(results.len(), 6);

        let first_twitch = results
            .iter()
            .position(|r| r.platform == Platform::Twitch)
            .expect("some twitch results");
        assert!(
            results[..first_twitch]
                .iter()
                .all(|r| r.platform == Platform::Youtube),
            "all youtube entries must precede all twitch entries"
        );
        assert!(results[first_twitch..]
            .iter()
            .all(|r| r.platform == Platform::Twitch));
    }

    #[tokio::test]
    async fn advanced_search_populates_cache_for_every_kept_result() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(2);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(2);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.advanced_search("creator", 1, 10).await;
        assert_eq!(results.len(), 4);
        assert_eq!(store.document_count(), 4);
    }

    #[tokio::test]
    async fn advanced_search_survives_store_outage() {
        let youtube = FakePlatform::new(Platform::Youtube).with_results(2);
        let twitch = FakePlatform::new(Platform::Twitch).with_results(2);
        let store = FakeStore::failing();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let results = service.advanced_search("creator", 1, 10).await;
        assert_eq!(results.len(), 4, "populate failures must not sink the response");
    }

    #[tokio::test]
    async fn cache_populate_is_idempotent() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let p = profile(Platform::Youtube, "UC123", "Some Creator");
        service.cache_populate(&p).await;
        service.cache_populate(&p).await;

        assert_eq!(store.document_count(), 1, "second call updates, not inserts");
    }

    #[tokio::test]
    async fn get_creator_prefers_cache_and_attaches_cross_platform_data() {
        let youtube = FakePlatform::new(Platform::Youtube)
            .with_details(profile(Platform::Youtube, "Y1", "Live Fetch"));
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::with_documents(vec![document(
            "1",
            PlatformSlots {
                youtube: Some(profile(Platform::Youtube, "Y1", "Cached Creator")),
                twitch: Some(profile(Platform::Twitch, "T1", "Cached Creator")),
            },
        )]);
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service
            .get_creator(Platform::Youtube, "Y1")
            .await
            .expect("cache hit");

        assert_eq!(result.name, "Cached Creator");
        assert_eq!(result.cross_platform_data.len(), 1);
        assert_eq!(result.cross_platform_data[0].id, "T1");
        assert_eq!(youtube.details_count(), 0, "cache hit must skip the adapter");
    }

    #[tokio::test]
    async fn get_creator_cache_lookup_is_case_insensitive() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::with_documents(vec![document(
            "1",
            PlatformSlots {
                youtube: Some(profile(Platform::Youtube, "UCabc", "Cached Creator")),
                twitch: None,
            },
        )]);
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service
            .get_creator(Platform::Youtube, "ucABC")
            .await
            .expect("fuzzy id match");
        assert_eq!(result.id, "UCabc");
    }

    #[tokio::test]
    async fn get_creator_miss_fetches_live_and_populates_cache() {
        let youtube = FakePlatform::new(Platform::Youtube)
            .with_details(profile(Platform::Youtube, "UC123", "Fresh Creator"));
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service
            .get_creator(Platform::Youtube, "UC123")
            .await
            .expect("live fetch");
        assert_eq!(result.name, "Fresh Creator");
        assert_eq!(youtube.details_count(), 1);
        assert_eq!(store.document_count(), 1);

        // The populated document is now a cache hit for the same id.
        let again = service
            .get_creator(Platform::Youtube, "UC123")
            .await
            .expect("cache hit");
        assert_eq!(again.name, "Fresh Creator");
        assert_eq!(youtube.details_count(), 1, "no second adapter call");
    }

    #[tokio::test]
    async fn get_creator_unresolvable_is_not_found() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::default();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service.get_creator(Platform::Twitch, "missing").await;
        assert!(matches!(result, Err(GetCreatorError::NotFound)));
    }

    #[tokio::test]
    async fn get_creator_surfaces_store_failures() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch);
        let store = FakeStore::failing();
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service.get_creator(Platform::Youtube, "UC123").await;
        assert!(matches!(result, Err(GetCreatorError::Store(_))));
    }

    #[tokio::test]
    async fn creators_first_seen_on_different_platforms_stay_separate() {
        let youtube = FakePlatform::new(Platform::Youtube);
        let twitch = FakePlatform::new(Platform::Twitch)
            .with_details(profile(Platform::Twitch, "T1", "Same Human"));
        let store = FakeStore::with_documents(vec![document(
            "1",
            PlatformSlots {
                youtube: Some(profile(Platform::Youtube, "Y1", "Same Human")),
                twitch: None,
            },
        )]);
        let service = Aggregation::new(&youtube, &twitch, &store);

        let result = service
            .get_creator(Platform::Twitch, "T1")
            .await
            .expect("live twitch fetch");
        assert_eq!(result.id, "T1");

        // No identity merge: the twitch profile lands in a new document, not
        // in document "1".
        assert_eq!(store.document_count(), 2);
        let documents = store.documents.lock().unwrap();
        let original = documents.iter().find(|d| d.id == "1").expect("original");
        assert!(original.platforms.twitch.is_none());
    }
}
