//! Cached access to the global meta-model.
//!
//! The service keeps one published [`GlobalMetaModel`] together with the
//! fingerprint of the document set it was built from. Reads compare the
//! fingerprint against the provider's current listing: on a match the
//! cached `Arc` is returned as is, otherwise a single background rebuild is
//! started and the caller is told to retry. Providers that report a
//! [`DocumentProvider::generation`] let reads skip the listing while the
//! generation is unchanged.
//!
//! Rebuilds reuse the [`LocalMetaModel`] of every document whose stamp did
//! not change, so editing one document only rebuilds that document before
//! the (cheap) merge.

use metamodel_engine::{
    AnyGlobalEntity, DeclarationSource, GlobalEntity, GlobalMetaModel, LocalMetaModel,
    LocalModelBuilder, MetaEntity, RelationEnd, merge,
};
use metamodel_types::{DocumentId, MetaKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use crate::collector::Collector;
use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult, NotReadyReason, ProviderResult};
use crate::provider::{DocumentEntry, DocumentProvider};

/// Coarse status of the cached model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Nothing has been published yet.
    Empty,
    /// A rebuild is running.
    Building,
    /// The published model matches the current document set.
    Ready,
    /// A model is published but the document set has moved on, or the
    /// cache was invalidated.
    Stale,
}

#[derive(Debug, Clone)]
struct Published {
    model: Arc<GlobalMetaModel>,
    /// `None` once invalidated.
    fingerprint: Option<Arc<[DocumentEntry]>>,
    /// Provider generation observed before the document set was listed.
    generation: Option<u64>,
}

struct Inner {
    provider: Arc<dyn DocumentProvider>,
    config: AccessConfig,
    runtime: Handle,
    published: watch::Sender<Option<Published>>,
    listeners: broadcast::Sender<Arc<GlobalMetaModel>>,
    building: AtomicBool,
    locals: Mutex<HashMap<DocumentId, Arc<LocalMetaModel>>>,
}

/// Releases the single-flight flag when the rebuild task ends, panics or
/// is dropped unpolled.
struct RebuildGuard(Arc<Inner>);

impl Drop for RebuildGuard {
    fn drop(&mut self) {
        self.0.building.store(false, Ordering::Release);
    }
}

/// Per-project entry point to the merged meta-model.
///
/// Cheap to clone; clones share the cache and the rebuild task.
#[derive(Clone)]
pub struct MetaModelAccess {
    inner: Arc<Inner>,
}

impl fmt::Debug for MetaModelAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaModelAccess")
            .field("config", &self.inner.config)
            .field("building", &self.is_building())
            .field("cached_locals", &self.cached_local_models())
            .finish_non_exhaustive()
    }
}

impl MetaModelAccess {
    /// Creates a service that spawns rebuilds on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime; use
    /// [`Self::with_runtime`] to pass a handle explicitly.
    pub fn new(provider: Arc<dyn DocumentProvider>, config: AccessConfig) -> Self {
        Self::with_runtime(provider, config, Handle::current())
    }

    pub fn with_runtime(
        provider: Arc<dyn DocumentProvider>,
        config: AccessConfig,
        runtime: Handle,
    ) -> Self {
        let (published, _) = watch::channel(None);
        let (listeners, _) = broadcast::channel(config.listener_capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                provider,
                config,
                runtime,
                published,
                listeners,
                building: AtomicBool::new(false),
                locals: Mutex::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AccessConfig {
        &self.inner.config
    }

    /// Returns the model for the current document set.
    ///
    /// Never blocks on a rebuild: when the cached model is missing or out of
    /// date a rebuild is started and [`AccessError::NotReady`] is returned.
    /// While the document set is unchanged, every call returns the same `Arc`.
    pub fn global_model(&self) -> AccessResult<Arc<GlobalMetaModel>> {
        let inner = &self.inner;
        if !inner.provider.is_settled() {
            return Err(AccessError::NotReady(NotReadyReason::IndexNotSettled));
        }
        if self.is_building() {
            return Err(AccessError::NotReady(NotReadyReason::RebuildInProgress));
        }
        if let Some(model) = inner.unchanged_model() {
            return Ok(model);
        }

        let collection = Collector::collect(inner.provider.as_ref());
        if !collection.consistent {
            return Err(AccessError::NotReady(NotReadyReason::IndexNotSettled));
        }
        if let Some(model) = inner.current_for(&collection.entries) {
            return Ok(model);
        }

        if self.schedule() {
            Err(AccessError::NotReady(NotReadyReason::RebuildScheduled))
        } else {
            Err(AccessError::NotReady(NotReadyReason::RebuildInProgress))
        }
    }

    /// The last published model, even if it no longer matches the document
    /// set. Useful for degraded answers while a rebuild is running.
    #[must_use]
    pub fn last_model(&self) -> Option<Arc<GlobalMetaModel>> {
        self.inner
            .published
            .borrow()
            .as_ref()
            .map(|published| Arc::clone(&published.model))
    }

    /// Waits until a model matching the current document set is available,
    /// triggering a rebuild when needed.
    pub async fn model_when_ready(&self) -> AccessResult<Arc<GlobalMetaModel>> {
        let timeout = self.inner.config.wait_timeout();
        let deadline = tokio::time::Instant::now() + timeout;
        let mut published = self.inner.published.subscribe();
        loop {
            match self.global_model() {
                Ok(model) => return Ok(model),
                Err(e) if e.is_retryable() => trace!(reason = %e, "waiting for meta-model"),
                Err(e) => return Err(e),
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                warn!(?timeout, "gave up waiting for meta-model");
                return Err(AccessError::Timeout(timeout));
            }
            let wait = self.inner.config.retry_interval().min(deadline - now);
            // Wakes on publish; the interval covers index changes, which are not signalled.
            let _ = tokio::time::timeout(wait, published.changed()).await;
        }
    }

    /// Starts a rebuild unless one is already running. Returns whether a
    /// rebuild was started.
    pub fn refresh(&self) -> bool {
        self.schedule()
    }

    /// Forgets the fingerprint of the published model so the next read
    /// rebuilds. The model stays available through [`Self::last_model`].
    pub fn invalidate(&self) {
        self.inner.published.send_modify(|published| {
            if let Some(published) = published {
                published.fingerprint = None;
            }
        });
        debug!("meta-model invalidated");
    }

    #[must_use]
    pub fn is_building(&self) -> bool {
        self.inner.building.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn state(&self) -> ModelState {
        if self.is_building() {
            return ModelState::Building;
        }
        let fingerprint = match self.inner.published.borrow().as_ref() {
            None => return ModelState::Empty,
            Some(published) => published.fingerprint.clone(),
        };
        let Some(fingerprint) = fingerprint else {
            return ModelState::Stale;
        };
        if !self.inner.provider.is_settled() {
            return ModelState::Stale;
        }
        if self.inner.unchanged_model().is_some() {
            return ModelState::Ready;
        }
        let collection = Collector::collect(self.inner.provider.as_ref());
        if collection.consistent && fingerprint[..] == collection.entries[..] {
            ModelState::Ready
        } else {
            ModelState::Stale
        }
    }

    /// Receives every model published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<GlobalMetaModel>> {
        self.inner.listeners.subscribe()
    }

    /// Number of per-document models kept for reuse.
    #[must_use]
    pub fn cached_local_models(&self) -> usize {
        self.inner.locals().len()
    }

    // ── Reads against the current model ──────────────────────────

    /// Case-insensitive lookup; `None` while no up-to-date model exists.
    #[must_use]
    pub fn find_by_name(&self, kind: MetaKind, name: &str) -> Option<AnyGlobalEntity> {
        let model = self.global_model().ok()?;
        model
            .find_by_name(kind, name)
            .map(|entity| entity.to_owned_entity())
    }

    /// Every entity of `kind`; empty while no up-to-date model exists.
    #[must_use]
    pub fn get_all(&self, kind: MetaKind) -> Vec<AnyGlobalEntity> {
        self.global_model()
            .map(|model| {
                model
                    .get_all(kind)
                    .iter()
                    .map(|entity| entity.to_owned_entity())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Relation ends navigable from `type_name`; empty while not ready.
    #[must_use]
    pub fn find_relation_ends_for(&self, type_name: &str) -> Vec<RelationEnd> {
        self.global_model()
            .map(|model| {
                model
                    .find_relation_ends_for(type_name)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn find<T: MetaEntity>(&self, name: &str) -> Option<GlobalEntity<T>> {
        let model = self.global_model().ok()?;
        model.find::<T>(name).cloned()
    }

    #[must_use]
    pub fn all<T: MetaEntity>(&self) -> Vec<GlobalEntity<T>> {
        self.global_model()
            .map(|model| model.all::<T>().cloned().collect())
            .unwrap_or_default()
    }

    // ── Rebuild ──────────────────────────────────────────────────

    fn schedule(&self) -> bool {
        if self
            .inner
            .building
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        let guard = RebuildGuard(Arc::clone(&self.inner));
        let inner = Arc::clone(&self.inner);
        debug!("meta-model rebuild scheduled");
        self.inner.runtime.spawn(async move {
            let _guard = guard;
            inner.rebuild().await;
        });
        true
    }
}

impl Inner {
    fn locals(&self) -> MutexGuard<'_, HashMap<DocumentId, Arc<LocalMetaModel>>> {
        self.locals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_for(&self, entries: &[DocumentEntry]) -> Option<Arc<GlobalMetaModel>> {
        let published = self.published.borrow();
        let published = published.as_ref()?;
        (published.fingerprint.as_deref() == Some(entries)).then(|| Arc::clone(&published.model))
    }

    /// The published model when the provider's generation has not moved
    /// since it was built; `None` means the listing has to be compared.
    fn unchanged_model(&self) -> Option<Arc<GlobalMetaModel>> {
        let generation = self.provider.generation()?;
        let published = self.published.borrow();
        let published = published.as_ref()?;
        (published.fingerprint.is_some() && published.generation == Some(generation))
            .then(|| Arc::clone(&published.model))
    }

    async fn rebuild(self: Arc<Self>) {
        let started = Instant::now();
        if !self.provider.is_settled() {
            debug!("document index not settled, rebuild abandoned");
            return;
        }
        let generation = self.provider.generation();
        let collection = Collector::collect(self.provider.as_ref());
        if !collection.consistent {
            return;
        }

        let cached = self.locals().clone();
        let provider = Arc::clone(&self.provider);
        let entries = collection.entries.clone();
        let pass = match tokio::task::spawn_blocking(move || {
            build_pass(provider.as_ref(), &entries, &cached)
        })
        .await
        {
            Ok(Ok(pass)) => pass,
            Ok(Err(e)) => {
                warn!(error = %e, "meta-model rebuild abandoned");
                return;
            }
            Err(e) => {
                warn!("meta-model rebuild panicked: {}", e);
                return;
            }
        };

        if !self.provider.is_settled() || !Collector::collect(self.provider.as_ref()).consistent {
            warn!("document index changed state during rebuild, result discarded");
            return;
        }

        let BuildPass {
            model,
            locals,
            built,
            reused,
            skipped,
        } = pass;
        *self.locals() = locals;

        let model = Arc::new(model);
        let documents = collection.entries.len();
        self.published.send_replace(Some(Published {
            model: Arc::clone(&model),
            fingerprint: Some(collection.entries.into()),
            generation,
        }));
        let listeners = self.listeners.send(Arc::clone(&model)).unwrap_or(0);

        info!(
            documents,
            built,
            reused,
            skipped,
            listeners,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "meta-model published"
        );
    }
}

struct BuildPass {
    model: GlobalMetaModel,
    locals: HashMap<DocumentId, Arc<LocalMetaModel>>,
    built: usize,
    reused: usize,
    skipped: usize,
}

/// Builds or reuses one local model per entry, then merges them. Runs on
/// the blocking pool.
fn build_pass(
    provider: &dyn DocumentProvider,
    entries: &[DocumentEntry],
    cached: &HashMap<DocumentId, Arc<LocalMetaModel>>,
) -> ProviderResult<BuildPass> {
    let mut locals = HashMap::with_capacity(entries.len());
    let (mut built, mut reused, mut skipped) = (0, 0, 0);

    for entry in entries {
        if let Some(local) = cached.get(&entry.id).filter(|l| l.stamp() == entry.stamp) {
            locals.insert(entry.id.clone(), Arc::clone(local));
            reused += 1;
            continue;
        }
        let Some(document) = Collector::load(provider, entry)? else {
            skipped += 1;
            continue;
        };
        let local = LocalModelBuilder::new(DeclarationSource {
            document: entry.id.clone(),
            module: document.module.clone(),
            custom: document.custom,
        })
        .with_stamp(entry.stamp)
        .build(&document.root);
        debug!(
            document = %entry.id,
            stamp = %entry.stamp,
            entities = local.len(),
            "built local model"
        );
        locals.insert(entry.id.clone(), Arc::new(local));
        built += 1;
    }

    let ordered: Vec<Arc<LocalMetaModel>> = entries
        .iter()
        .filter_map(|entry| locals.get(&entry.id).cloned())
        .collect();
    let model = merge(&ordered);

    Ok(BuildPass {
        model,
        locals,
        built,
        reused,
        skipped,
    })
}
