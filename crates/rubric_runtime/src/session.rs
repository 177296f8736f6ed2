//! Expansion session: a registry, a configuration, and a result cache.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, PoisonError};

use rubric_expand::{ExpanderConfig, Expander, ExpansionCache, FieldDirectives, FieldKey};
use rubric_foundation::{Error, ErrorContext, ErrorKind, Result};
use rubric_schema::{DirectiveInstance, DirectiveRegistry, FieldDocument};

/// Expands field documents against one registry, memoizing per field.
///
/// Results are cached by declaring type and field name, so every document
/// expanded through one session must declare a given field the same way.
#[derive(Debug)]
pub struct Session {
    registry: DirectiveRegistry,
    config: ExpanderConfig,
    cache: ExpansionCache,
    declared: Mutex<HashMap<FieldKey, Vec<DirectiveInstance>>>,
}

impl Session {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new(registry: DirectiveRegistry) -> Self {
        Self::with_config(registry, ExpanderConfig::default())
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(registry: DirectiveRegistry, config: ExpanderConfig) -> Self {
        Self {
            registry,
            config,
            cache: ExpansionCache::new(),
            declared: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Returns the expansion cache.
    #[must_use]
    pub fn cache(&self) -> &ExpansionCache {
        &self.cache
    }

    /// Resolves and expands every field of a document, in field order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateField`] if a field was already declared
    /// in this session with different directives, otherwise the first
    /// resolution or expansion error. No partial result is returned.
    pub fn expand_document(&self, document: &FieldDocument) -> Result<Vec<Arc<FieldDirectives>>> {
        let expander = Expander::with_config(&self.registry, self.config.clone());
        document
            .declare(&self.registry)?
            .iter()
            .map(|field| {
                let key = FieldKey::new(field.declaring_type.clone(), field.name.clone());
                self.record(&key, &field.directives)?;
                self.cache.expand(&expander, key, &field.directives)
            })
            .collect()
    }

    fn record(&self, key: &FieldKey, directives: &[DirectiveInstance]) -> Result<()> {
        let mut declared = self.declared.lock().unwrap_or_else(PoisonError::into_inner);
        match declared.entry(key.clone()) {
            Entry::Occupied(entry) if entry.get().as_slice() != directives => {
                Err(Error::new(ErrorKind::DuplicateField(key.to_string()))
                    .with_context(ErrorContext::new().with_field(key.to_string())))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(directives.to_vec());
                Ok(())
            }
        }
    }
}
