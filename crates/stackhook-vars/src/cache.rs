//! Per-run resolution cache
//!
//! One slot per [`VarKind`], filled lazily and never invalidated. Each slot is
//! an async once-cell, so concurrent callers for the same uncached kind wait on
//! the single in-flight producer instead of issuing duplicate requests.

use crate::error::Result;
use crate::kind::{VarKind, VarValue};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

type Slot = Arc<OnceCell<Option<VarValue>>>;

/// Cache owned by a single resolver instance; lives as long as the resolver
#[derive(Debug, Default)]
pub struct ResolverCache {
    slots: Mutex<HashMap<VarKind, Slot>>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, kind: VarKind) -> Slot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(kind).or_default())
    }

    /// Return the cached value for `kind`, or run `producer` and store its result.
    ///
    /// Absent results are cached too. A failing producer leaves the slot empty
    /// and its error is returned as-is.
    pub async fn perform_cached<F, Fut>(&self, kind: VarKind, producer: F) -> Result<Option<VarValue>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<VarValue>>>,
    {
        let slot = self.slot(kind).await;
        if let Some(value) = slot.get() {
            tracing::trace!("cache hit: {}", kind);
            return Ok(value.clone());
        }

        let value = slot.get_or_try_init(producer).await?;
        Ok(value.clone())
    }

    /// Cached value for `kind`; `None` when the kind has not been resolved yet
    pub async fn get(&self, kind: VarKind) -> Option<Option<VarValue>> {
        let slots = self.slots.lock().await;
        slots.get(&kind).and_then(|slot| slot.get().cloned())
    }

    pub async fn is_cached(&self, kind: VarKind) -> bool {
        self.get(kind).await.is_some()
    }
}
