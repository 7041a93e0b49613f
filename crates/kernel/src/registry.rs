//! Form registry: process-wide name → form mapping.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::error::{FormError, FormResult};
use crate::form::{Form, FormDefinition, FormDescriptor};

/// Registry of forms, keyed by name.
///
/// Intended usage is boot-time populate, request-time read. Mutation is
/// guarded so registration from concurrent workers stays safe.
///
/// Uses `parking_lot::RwLock` rather than `std::sync::RwLock` because:
/// - No poisoning: a panic in a writer won't permanently wedge every reader.
/// - Shorter critical sections avoid blocking Tokio worker threads.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: parking_lot::RwLock<HashMap<String, Arc<Form>>>,
}

impl FormRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form under its name. Last write wins.
    pub fn register(&self, form: Form) {
        let name = form.name().to_string();
        let replaced = self
            .forms
            .write()
            .insert(name.clone(), Arc::new(form))
            .is_some();
        if replaced {
            debug!(form = %name, "replaced existing form registration");
        } else {
            debug!(form = %name, "registered form");
        }
    }

    /// Construct and register a definition type.
    pub fn register_type<D: FormDefinition + Default>(&self) {
        self.register(Form::new(D::default()));
    }

    /// Look up a form by name.
    pub fn get(&self, name: &str) -> FormResult<Arc<Form>> {
        self.forms
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| FormError::NotFound(name.to_string()))
    }

    /// Whether a form is registered under the given name.
    pub fn has(&self, name: &str) -> bool {
        self.forms.read().contains_key(name)
    }

    /// Snapshot every registered form as a descriptor.
    pub fn get_all(&self) -> BTreeMap<String, FormDescriptor> {
        self.forms
            .read()
            .iter()
            .map(|(name, form)| (name.clone(), form.descriptor()))
            .collect()
    }

    /// Registered form names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.forms.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered forms.
    pub fn len(&self) -> usize {
        self.forms.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.forms.read().is_empty()
    }

    /// Remove every registered form.
    pub fn clear(&self) {
        self.forms.write().clear();
    }
}
