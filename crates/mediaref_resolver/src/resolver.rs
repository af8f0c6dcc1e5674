//! Session-scoped resolution of media references.

use crate::{Asset, ResolverConfig, Sample, ShortcutManager};
use futures::future::{BoxFuture, FutureExt, Shared};
use mediaref_cache::ReferenceCache;
use mediaref_core::{COMPLETE_SAMPLE, MediaReference};
use mediaref_error::{MediaRefResult, SampleError, SampleErrorKind};
use mediaref_interface::MetadataSource;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

type FetchOutcome = MediaRefResult<Arc<Asset>>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

/// A fetch in progress, shared by everyone asking for the same key.
struct Flight {
    id: u64,
    future: SharedFetch,
}

/// Mutable state of one session.
struct Session {
    generation: u64,
    next_flight: u64,
    assets: ReferenceCache<Arc<Asset>>,
    samples: ReferenceCache<Arc<Sample>>,
    aliases: HashMap<String, String>,
    pending: HashMap<String, Flight>,
    linked: HashSet<String>,
    shortcuts: ShortcutManager,
}

impl Session {
    fn new() -> Self {
        Self {
            generation: 0,
            next_flight: 0,
            assets: ReferenceCache::new("assets"),
            samples: ReferenceCache::new("samples"),
            aliases: HashMap::new(),
            pending: HashMap::new(),
            linked: HashSet::new(),
            shortcuts: ShortcutManager::new(),
        }
    }

    /// Canonical key under which `key` is cached, following aliases.
    fn cached_key<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        if self.assets.contains(key) {
            return Some(key);
        }
        let target = self.aliases.get(key)?;
        self.assets.contains(target).then_some(target.as_str())
    }

    fn cached_asset(&self, key: &str) -> Option<Arc<Asset>> {
        let key = self.cached_key(key)?;
        self.assets.get(key).cloned()
    }

    /// Add a freshly fetched asset to the session.
    ///
    /// Returns the session's asset for `key`. If the metadata names an asset
    /// already cached under another key, that one wins and `key` becomes an
    /// alias of it.
    fn admit(&mut self, key: &str, asset: Arc<Asset>) -> Arc<Asset> {
        if let Some(existing) = self.cached_asset(key) {
            return existing;
        }
        let aliases = asset.aliases();
        for alias in &aliases {
            if let Some(target) = self.cached_key(alias).map(str::to_string)
                && let Some(existing) = self.assets.get(&target).cloned()
            {
                tracing::debug!(key, alias = %alias, target = %target, "Fetched asset is already cached under an alias");
                self.aliases.insert(key.to_string(), target);
                return existing;
            }
        }

        self.assets.add(key, asset.clone());
        if let Some(shortcut) = self.shortcuts.next_for(asset.mime_class()) {
            asset.assign_shortcut(shortcut);
        }
        for alias in aliases {
            if alias != key {
                self.aliases.entry(alias).or_insert_with(|| key.to_string());
            }
        }
        if asset.is_playable() {
            for sample in asset.samples().iter() {
                self.samples.add(sample.uri(), sample.clone());
            }
        }

        tracing::info!(
            key,
            mime = %asset.mime_class(),
            shortcut = ?asset.shortcut(),
            assets = self.assets.len(),
            "Resolved new asset"
        );
        asset
    }
}

/// Resolves media references to assets and samples.
///
/// One resolver is one session: every canonical key is fetched at most once
/// (concurrent requests share a single fetch), linked assets are followed
/// depth-first, and everything resolved is kept in insertion order until
/// [`reset`](Self::reset).
///
/// # Example
///
/// ```
/// use mediaref_core::MetadataRecord;
/// use mediaref_resolver::Resolver;
/// use mediaref_source::InMemoryMetadataSource;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = InMemoryMetadataSource::new()
///     .with_record(
///         MetadataRecord::default()
///             .with_reference("Yesterday")
///             .with_path("Lieder/Yesterday.mp3")
///             .with_cover("ref:Yesterday-Cover"),
///     )
///     .with_record(
///         MetadataRecord::default()
///             .with_reference("Yesterday-Cover")
///             .with_path("Lieder/Yesterday.jpg"),
///     );
/// let resolver = Resolver::new(Arc::new(source));
///
/// let assets = resolver.resolve(["ref:Yesterday"]).await?;
/// assert_eq!(assets.len(), 1);
/// assert_eq!(resolver.export_assets().len(), 2);
///
/// let sample = resolver.resolve_sample("ref:Yesterday").await?;
/// assert_eq!(sample.reference(), "complete");
/// assert_eq!(sample.shortcut().as_deref(), Some("a 1"));
/// # Ok(())
/// # }
/// ```
pub struct Resolver {
    source: Arc<dyn MetadataSource>,
    config: ResolverConfig,
    media_base_url: String,
    session: Mutex<Session>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session();
        f.debug_struct("Resolver")
            .field("source", &self.source.name())
            .field("config", &self.config)
            .field("generation", &session.generation)
            .field("assets", &session.assets.len())
            .field("samples", &session.samples.len())
            .field("pending", &session.pending.len())
            .finish()
    }
}

impl Resolver {
    /// Create a resolver with the default configuration.
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    /// Create a resolver with an explicit configuration.
    #[tracing::instrument(skip(source, config), fields(source = source.name(), base_url = %config.base_url()))]
    pub fn with_config(source: Arc<dyn MetadataSource>, config: ResolverConfig) -> Self {
        let media_base_url = config.media_base_url();
        tracing::debug!(media_base_url = %media_base_url, "Creating resolver");
        Self {
            source,
            config,
            media_base_url,
            session: Mutex::new(Session::new()),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Backend metadata is fetched from.
    pub fn source(&self) -> &Arc<dyn MetadataSource> {
        &self.source
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock()
    }

    /// Resolve several identifiers and everything they link to.
    ///
    /// All identifiers are parsed before anything is fetched. Canonical keys
    /// are resolved once each, in first-seen order. Returns the root assets.
    ///
    /// # Errors
    ///
    /// Returns the first malformed reference, or the first error from
    /// resolving a root or one of its links. Assets resolved before the
    /// failure stay cached.
    #[tracing::instrument(skip_all)]
    pub async fn resolve<I, S>(&self, identifiers: I) -> MediaRefResult<Vec<Arc<Asset>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let references = identifiers
            .into_iter()
            .map(|raw| MediaReference::parse(raw.as_ref()))
            .collect::<MediaRefResult<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let roots: Vec<_> = references
            .into_iter()
            .filter(|reference| seen.insert(reference.canonical_key().to_string()))
            .collect();
        tracing::debug!(roots = roots.len(), "Resolving root set");

        let mut assets: Vec<Arc<Asset>> = Vec::with_capacity(roots.len());
        for root in &roots {
            let asset = self.resolve_reference(root).await?;
            if !assets.iter().any(|known| Arc::ptr_eq(known, &asset)) {
                assets.push(asset);
            }
        }
        Ok(assets)
    }

    /// Resolve one identifier to its asset. The fragment is ignored.
    ///
    /// # Errors
    ///
    /// Malformed references, fetch failures, asset construction errors and
    /// errors from linked assets.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_asset(&self, identifier: &str) -> MediaRefResult<Arc<Asset>> {
        let reference = MediaReference::parse(identifier)?;
        self.resolve_reference(&reference).await
    }

    /// Resolve an identifier to a sample; no fragment means `complete`.
    ///
    /// # Errors
    ///
    /// Everything [`resolve_asset`](Self::resolve_asset) reports, the time
    /// spec error of a rejected sample, or sample not found.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_sample(&self, identifier: &str) -> MediaRefResult<Arc<Sample>> {
        let reference = MediaReference::parse(identifier)?;
        let asset = self.resolve_reference(&reference).await?;
        let fragment = reference.fragment().unwrap_or(COMPLETE_SAMPLE);

        let samples = asset.samples();
        if let Some(sample) = samples.get(fragment) {
            let mut session = self.session();
            let key = asset.reference().canonical_key();
            if session
                .assets
                .get(key)
                .is_some_and(|cached| Arc::ptr_eq(cached, &asset))
            {
                session.samples.add(sample.uri(), sample.clone());
            }
            return Ok(sample.clone());
        }
        if let Some(error) = samples.rejection(fragment) {
            return Err(error.clone());
        }
        tracing::debug!(fragment, asset = %asset.reference(), "No such sample");
        Err(SampleError::new(SampleErrorKind::NotFound(format!(
            "{}#{}",
            asset.reference().canonical_key(),
            fragment
        )))
        .into())
    }

    /// Cached asset for `identifier`, without fetching.
    pub fn get_asset(&self, identifier: &str) -> Option<Arc<Asset>> {
        let reference = MediaReference::parse(identifier).ok()?;
        self.session().cached_asset(reference.canonical_key())
    }

    /// Cached sample for `identifier`, without fetching.
    pub fn get_sample(&self, identifier: &str) -> Option<Arc<Sample>> {
        let reference = MediaReference::parse(identifier).ok()?;
        let session = self.session();
        let key = session.cached_key(reference.canonical_key())?;
        let fragment = reference.fragment().unwrap_or(COMPLETE_SAMPLE);
        session.samples.get(&format!("{}#{}", key, fragment)).cloned()
    }

    /// Every asset of the session, in insertion order.
    pub fn export_assets(&self) -> Vec<Arc<Asset>> {
        self.session().assets.values().cloned().collect()
    }

    /// Every sample of the session, in insertion order.
    pub fn export_samples(&self) -> Vec<Arc<Sample>> {
        self.session().samples.values().cloned().collect()
    }

    /// Start a new session.
    ///
    /// Assets and samples handed out earlier stay usable; fetches still in
    /// flight finish without touching the new session.
    #[tracing::instrument(skip(self))]
    pub fn reset(&self) {
        let mut session = self.session();
        let assets = session.assets.len();
        session.assets.clear();
        session.samples.clear();
        session.aliases.clear();
        session.pending.clear();
        session.linked.clear();
        session.shortcuts.reset();
        session.generation += 1;
        tracing::info!(generation = session.generation, dropped_assets = assets, "Reset resolver session");
    }

    /// Resolve `reference` and the transitive closure of its links.
    ///
    /// Keys whose closure was fully resolved are recorded in the session so
    /// later calls skip them; a failed traversal records nothing and is
    /// retried by the next call.
    async fn resolve_reference(&self, reference: &MediaReference) -> FetchOutcome {
        let generation = self.session().generation;
        let mut visited = HashSet::new();
        let asset = self.resolve_closure(reference, &mut visited).await?;

        let mut session = self.session();
        if session.generation == generation {
            session.linked.extend(visited);
        }
        Ok(asset)
    }

    fn resolve_closure<'a>(
        &'a self,
        reference: &'a MediaReference,
        visited: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, FetchOutcome> {
        async move {
            let (asset, in_session) = self.resolve_single(reference).await?;
            if !in_session || !*self.config.follow_links() {
                return Ok(asset);
            }

            let key = asset.reference().canonical_key().to_string();
            let done = visited.contains(&key) || self.session().linked.contains(&key);
            if done {
                return Ok(asset);
            }
            visited.insert(key.clone());

            for linked in asset.linked_references() {
                tracing::debug!(from = %key, to = %linked, "Following link");
                self.resolve_closure(&linked, visited).await?;
            }
            Ok(asset)
        }
        .boxed()
    }

    /// Cache lookup or single-flight fetch of one key, links not followed.
    ///
    /// The flag is false when the session was reset while fetching and the
    /// asset was left out of the cache.
    async fn resolve_single(&self, reference: &MediaReference) -> MediaRefResult<(Arc<Asset>, bool)> {
        let key = reference.canonical_key();

        let (generation, flight_id, future) = {
            let mut session = self.session();
            if let Some(asset) = session.cached_asset(key) {
                tracing::debug!(key, "Asset cache hit");
                return Ok((asset, true));
            }
            let generation = session.generation;
            match session.pending.get(key) {
                Some(flight) => {
                    tracing::debug!(key, flight = flight.id, "Joining in-flight fetch");
                    (generation, flight.id, flight.future.clone())
                }
                None => {
                    session.next_flight += 1;
                    let id = session.next_flight;
                    let future = self.fetch(reference.without_fragment()).boxed().shared();
                    tracing::debug!(key, flight = id, "Asset cache miss, fetching");
                    session.pending.insert(
                        key.to_string(),
                        Flight {
                            id,
                            future: future.clone(),
                        },
                    );
                    (generation, id, future)
                }
            }
        };

        let outcome = future.await;

        let mut session = self.session();
        if session.generation != generation {
            tracing::debug!(key, "Fetch finished after reset, not caching");
            return outcome.map(|asset| (asset, false));
        }
        if session.pending.get(key).is_some_and(|flight| flight.id == flight_id) {
            session.pending.remove(key);
        }
        Ok((session.admit(key, outcome?), true))
    }

    fn fetch(&self, reference: MediaReference) -> impl Future<Output = FetchOutcome> + Send + 'static {
        let source = self.source.clone();
        let media_base_url = self.media_base_url.clone();
        async move {
            let metadata = source.fetch(&reference).await?;
            Asset::construct(&reference, metadata, &media_base_url)
        }
    }
}
