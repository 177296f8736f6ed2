//! Memoized per-field expansion results.
//!
//! Expansion is deterministic, so recomputing a field is never wrong, only
//! wasted work. The cache computes each field at most once even when
//! several threads ask for it at the same time: a per-key lock is held
//! while the first caller computes, and later callers wait for its result.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rubric_foundation::Result;
use rubric_schema::DirectiveInstance;

use crate::expander::Expander;
use crate::field::FieldDirectives;

/// Identifies a field: its declaring record type and its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    /// Qualified name of the declaring record type.
    pub declaring_type: Arc<str>,
    /// Field name.
    pub field: Arc<str>,
}

impl FieldKey {
    /// Creates a key.
    #[must_use]
    pub fn new(declaring_type: impl Into<Arc<str>>, field: impl Into<Arc<str>>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.declaring_type, self.field)
    }
}

type Slot = Arc<Mutex<Option<Arc<FieldDirectives>>>>;

/// Thread-safe cache of expanded fields.
///
/// Only successful expansions are stored; a failed key is recomputed on
/// the next request. A computation that panics leaves its slot empty, so
/// poisoned locks are recovered rather than reported.
#[derive(Debug, Default)]
pub struct ExpansionCache {
    slots: Mutex<HashMap<FieldKey, Slot>>,
}

impl ExpansionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<FieldKey, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached result for `key`, computing it with `compute` on
    /// first access.
    ///
    /// # Errors
    ///
    /// Returns the error from `compute`.
    pub fn get_or_try_insert_with<F>(&self, key: FieldKey, compute: F) -> Result<Arc<FieldDirectives>>
    where
        F: FnOnce() -> Result<FieldDirectives>,
    {
        let slot = self.slots().entry(key).or_default().clone();
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(done) = guard.as_ref() {
            return Ok(done.clone());
        }
        let computed = Arc::new(compute()?);
        *guard = Some(computed.clone());
        Ok(computed)
    }

    /// Expands a field's directives through the cache.
    ///
    /// # Errors
    ///
    /// Same as [`Expander::expand_field`].
    pub fn expand(
        &self,
        expander: &Expander<'_>,
        key: FieldKey,
        directives: &[DirectiveInstance],
    ) -> Result<Arc<FieldDirectives>> {
        let field = key.to_string();
        self.get_or_try_insert_with(key, || {
            tracing::debug!(field = %field, "expansion cache miss");
            let nodes = expander.expand_field(&field, directives)?;
            Ok(FieldDirectives::new(field.as_str(), nodes))
        })
    }

    /// Returns the cached result for `key` without computing it.
    #[must_use]
    pub fn get(&self, key: &FieldKey) -> Option<Arc<FieldDirectives>> {
        let slot = self.slots().get(key)?.clone();
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Returns the number of computed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots()
            .values()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    /// Returns true if nothing has been computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.slots().clear();
    }
}
